//! Stereographic multi-pass rendering for the Stereonav framework.
//!
//! This crate provides:
//! - Camera lens and viewport descriptions
//! - Graphics backend and drawable capabilities
//! - Mono, anaglyph, active, dual and single-eye stereo modes
//! - Omnidirectional slice rendering
//! - A recording backend for headless inspection

pub mod backend;
pub mod camera;
pub mod mode;
pub mod pass;
pub mod recording;
pub mod stereographic;
pub mod viewport;

pub use backend::{Color, ColorMask, DrawBuffer, Drawable, GraphicsBackend, MatrixMode};
pub use camera::Camera;
pub use mode::{AnaglyphMode, StereoMode};
pub use pass::{Eye, RenderPass};
pub use recording::{BackendCall, RecordingBackend};
pub use stereographic::{OmniConfig, StereoConfig, Stereographic};
pub use viewport::Viewport;
