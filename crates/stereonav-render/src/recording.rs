//! Headless backend that records commands.
//!
//! Used for inspecting the command stream a frame produces without a
//! graphics context, e.g. in tests or when dumping a frame for debugging.

use glam::{DMat4, DVec3};

use crate::backend::{Color, ColorMask, DrawBuffer, GraphicsBackend, MatrixMode};
use crate::viewport::Viewport;

/// A single recorded backend command.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    SetViewport(Viewport),
    Clear(Color),
    MatrixMode(MatrixMode),
    LoadMatrix(DMat4),
    SetColorMask(ColorMask),
    SelectDrawBuffer(DrawBuffer),
    DrawLine { from: DVec3, to: DVec3, color: Color },
    /// Marker pushed by drawables that want their invocations in the log.
    Draw,
}

/// Backend that appends every command to a list.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
}

impl RecordingBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands recorded so far, in issue order.
    #[must_use]
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Record a drawable invocation.
    pub fn mark_draw(&mut self) {
        self.calls.push(BackendCall::Draw);
    }

    /// Number of recorded drawable invocations.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, BackendCall::Draw))
            .count()
    }

    /// Viewports set, in order.
    #[must_use]
    pub fn viewports(&self) -> Vec<Viewport> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::SetViewport(vp) => Some(*vp),
                _ => None,
            })
            .collect()
    }

    /// Matrices loaded while `mode` was selected, in order.
    #[must_use]
    pub fn matrices(&self, mode: MatrixMode) -> Vec<DMat4> {
        let mut current = None;
        let mut out = Vec::new();
        for call in &self.calls {
            match call {
                BackendCall::MatrixMode(m) => current = Some(*m),
                BackendCall::LoadMatrix(matrix) if current == Some(mode) => out.push(*matrix),
                _ => {}
            }
        }
        out
    }

    /// Drop all recorded commands.
    pub fn clear_log(&mut self) {
        self.calls.clear();
    }
}

impl GraphicsBackend for RecordingBackend {
    fn set_viewport(&mut self, viewport: &Viewport) {
        self.calls.push(BackendCall::SetViewport(*viewport));
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(BackendCall::Clear(color));
    }

    fn matrix_mode(&mut self, mode: MatrixMode) {
        self.calls.push(BackendCall::MatrixMode(mode));
    }

    fn load_matrix(&mut self, matrix: &DMat4) {
        self.calls.push(BackendCall::LoadMatrix(*matrix));
    }

    fn set_color_mask(&mut self, mask: ColorMask) {
        self.calls.push(BackendCall::SetColorMask(mask));
    }

    fn select_draw_buffer(&mut self, buffer: DrawBuffer) {
        self.calls.push(BackendCall::SelectDrawBuffer(buffer));
    }

    fn draw_line(&mut self, from: DVec3, to: DVec3, color: Color) {
        self.calls.push(BackendCall::DrawLine { from, to, color });
    }
}
