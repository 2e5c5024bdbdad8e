//! Per-pass render state.

use glam::{DMat4, DVec3};

use crate::backend::{ColorMask, DrawBuffer};
use crate::viewport::Viewport;

/// Which eye a pass renders for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eye {
    Mono,
    Left,
    Right,
}

impl Eye {
    /// Sign of the eye's offset along the right axis.
    #[inline]
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Mono => 0.0,
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// A single sub-view of a frame.
///
/// Planned by [`Stereographic`](crate::Stereographic) and handed to the
/// drawable while its matrices are loaded on the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPass {
    pub eye: Eye,
    /// Omni slice index, if the frame is split into slices.
    pub slice: Option<u32>,
    pub viewport: Viewport,
    /// World position the pass is rendered from.
    pub eye_position: DVec3,
    pub view: DMat4,
    pub projection: DMat4,
    /// Channel restriction for anaglyph passes.
    pub color_mask: Option<ColorMask>,
    /// Target buffer for quad-buffered passes.
    pub draw_buffer: Option<DrawBuffer>,
}

impl RenderPass {
    /// Projection times view.
    #[inline]
    #[must_use]
    pub fn view_projection(&self) -> DMat4 {
        self.projection * self.view
    }

    /// Horizontal field of view of the projection in degrees.
    #[must_use]
    pub fn horizontal_fov_degrees(&self) -> f64 {
        let p = &self.projection;
        // Near-plane extents in units of the near distance
        let right = (1.0 + p.z_axis.x) / p.x_axis.x;
        let left = (1.0 - p.z_axis.x) / p.x_axis.x;
        (right.atan() + left.atan()).to_degrees()
    }
}
