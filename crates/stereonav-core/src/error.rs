//! Error types for the framework.

use thiserror::Error;

/// Framework-wide error type.
///
/// Frame integration and rendering are total; errors only surface where
/// configuration enters the system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A configuration value was rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A textual value could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
