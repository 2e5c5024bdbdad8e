//! Core types, math, and traits for the Stereonav framework.
//!
//! This crate provides the foundational types used throughout the framework:
//! - Rigid coordinate frames ([`Pose`])
//! - Smooth, camera-relative navigation ([`Nav`])
//! - Frame math helpers (Euler conversion, view and projection matrices)
//! - Common error types

pub mod error;
pub mod math;
pub mod nav;
pub mod pose;

pub use error::{Error, Result};
pub use nav::Nav;
pub use pose::Pose;

// Re-export the math types used in the public API
pub use glam::{DMat4, DQuat, DVec2, DVec3, DVec4};
