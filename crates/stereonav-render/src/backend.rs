//! Graphics backend and drawable capabilities.
//!
//! The renderer never touches a graphics API directly. Every frame it is
//! handed a [`GraphicsBackend`] to configure and a [`Drawable`] to invoke
//! once per render pass.

use bitflags::bitflags;
use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

use crate::pass::RenderPass;
use crate::viewport::Viewport;

/// RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    #[inline]
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque gray.
    #[inline]
    #[must_use]
    pub const fn gray(v: f32) -> Self {
        Self::new(v, v, v, 1.0)
    }
}

bitflags! {
    /// Color channels enabled for writing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ColorMask: u8 {
        const RED = 1 << 0;
        const GREEN = 1 << 1;
        const BLUE = 1 << 2;
        const ALPHA = 1 << 3;
    }
}

/// Matrix stack selected for subsequent matrix loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixMode {
    Projection,
    ModelView,
}

/// Color buffer that subsequent draws write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawBuffer {
    #[default]
    Back,
    BackLeft,
    BackRight,
}

/// Commands the renderer issues to a graphics context.
///
/// Implementations execute or record commands in call order. The renderer
/// does not inspect results; failures are the backend's concern.
pub trait GraphicsBackend {
    /// Set the viewport rectangle.
    fn set_viewport(&mut self, viewport: &Viewport);

    /// Clear the color (with the current color mask) and depth buffers.
    fn clear(&mut self, color: Color);

    /// Select the matrix stack for [`load_matrix`](Self::load_matrix).
    fn matrix_mode(&mut self, mode: MatrixMode);

    /// Replace the top of the selected matrix stack.
    fn load_matrix(&mut self, matrix: &DMat4);

    /// Restrict color writes to the given channels.
    fn set_color_mask(&mut self, mask: ColorMask);

    /// Select the draw buffer for quad-buffered stereo.
    ///
    /// Backends without per-eye buffers may ignore this.
    fn select_draw_buffer(&mut self, buffer: DrawBuffer) {
        let _ = buffer;
    }

    /// Draw a single line segment, transformed by the loaded matrices.
    fn draw_line(&mut self, from: DVec3, to: DVec3, color: Color);
}

/// Scene content rendered once per pass.
///
/// The drawable may issue drawing commands through `gl` but must not change
/// viewport or matrix state.
pub trait Drawable<G: ?Sized> {
    fn on_draw(&mut self, gl: &mut G, pass: &RenderPass);
}

impl<G: ?Sized, F> Drawable<G> for F
where
    F: FnMut(&mut G, &RenderPass),
{
    fn on_draw(&mut self, gl: &mut G, pass: &RenderPass) {
        self(gl, pass);
    }
}
