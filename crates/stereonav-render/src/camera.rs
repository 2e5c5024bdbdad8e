//! Camera lens description.

use serde::{Deserialize, Serialize};

/// Default ratio of focal length to eye separation.
const FOCAL_TO_EYE_SEP: f64 = 30.0;

/// Lens parameters for rendering.
///
/// The camera carries no position; its frame comes from the [`Pose`] handed
/// to the renderer alongside it.
///
/// [`Pose`]: stereonav_core::Pose
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fovy_degrees: f64,
    pub near: f64,
    pub far: f64,
    /// Distance to the zero-parallax plane for stereo rendering.
    pub focal_length: f64,
    /// Interocular distance.
    pub eye_sep: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(30.0, 0.1, 100.0, 6.0)
    }
}

impl Camera {
    /// Create a new camera. Eye separation is derived from the focal length.
    #[must_use]
    pub fn new(fovy_degrees: f64, near: f64, far: f64, focal_length: f64) -> Self {
        Self {
            fovy_degrees,
            near,
            far,
            focal_length,
            eye_sep: focal_length / FOCAL_TO_EYE_SEP,
        }
    }

    /// Set the interocular distance.
    #[must_use]
    pub const fn with_eye_sep(mut self, eye_sep: f64) -> Self {
        self.eye_sep = eye_sep;
        self
    }

    /// Set the focal length, keeping eye separation proportional to it.
    pub fn set_focal_length(&mut self, focal_length: f64) {
        self.focal_length = focal_length;
        self.eye_sep = focal_length / FOCAL_TO_EYE_SEP;
    }

    /// Half the interocular distance.
    #[inline]
    #[must_use]
    pub fn half_eye_sep(&self) -> f64 {
        self.eye_sep * 0.5
    }

    /// Near-plane extents `(half_width, half_height)` for the given aspect.
    #[must_use]
    pub fn near_extents(&self, aspect: f64) -> (f64, f64) {
        let top = self.near * (self.fovy_degrees.to_radians() * 0.5).tan();
        (top * aspect, top)
    }

    /// Horizontal near-plane shift for an eye displaced by `eye_offset` along
    /// the right axis, so both eyes converge at the focal plane.
    #[must_use]
    pub fn frustum_shift(&self, eye_offset: f64) -> f64 {
        if self.focal_length == 0.0 {
            return 0.0;
        }
        eye_offset * self.near / self.focal_length
    }
}
