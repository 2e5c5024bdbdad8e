//! Backend that logs commands instead of executing them.

use glam::{DMat4, DVec3};
use stereonav_render::{Color, ColorMask, DrawBuffer, GraphicsBackend, MatrixMode, Viewport};
use tracing::trace;

/// Per-frame command counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub viewports: u32,
    pub clears: u32,
    pub matrix_loads: u32,
    pub lines: u32,
}

/// Headless backend that traces every command and keeps counters.
#[derive(Debug, Default)]
pub struct TracingBackend {
    stats: FrameStats,
    mode: Option<MatrixMode>,
    draw_buffer: DrawBuffer,
    color_mask: Option<ColorMask>,
}

impl TracingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the counters for the finished frame and reset them.
    pub fn end_frame(&mut self) -> FrameStats {
        std::mem::take(&mut self.stats)
    }

    pub const fn draw_buffer(&self) -> DrawBuffer {
        self.draw_buffer
    }
}

impl GraphicsBackend for TracingBackend {
    fn set_viewport(&mut self, viewport: &Viewport) {
        trace!(
            "viewport {} {} {}x{}",
            viewport.left,
            viewport.bottom,
            viewport.width,
            viewport.height
        );
        self.stats.viewports += 1;
    }

    fn clear(&mut self, color: Color) {
        trace!(mask = ?self.color_mask, "clear {color:?}");
        self.stats.clears += 1;
    }

    fn matrix_mode(&mut self, mode: MatrixMode) {
        self.mode = Some(mode);
    }

    fn load_matrix(&mut self, matrix: &DMat4) {
        trace!(mode = ?self.mode, "load {:?}", matrix.to_cols_array());
        self.stats.matrix_loads += 1;
    }

    fn set_color_mask(&mut self, mask: ColorMask) {
        trace!("color mask {mask:?}");
        self.color_mask = Some(mask);
    }

    fn select_draw_buffer(&mut self, buffer: DrawBuffer) {
        trace!("draw buffer {buffer:?}");
        self.draw_buffer = buffer;
    }

    fn draw_line(&mut self, _from: DVec3, _to: DVec3, _color: Color) {
        self.stats.lines += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_frame_resets_counters() {
        let mut gl = TracingBackend::new();
        gl.set_viewport(&Viewport::default());
        gl.clear(Color::BLACK);
        gl.draw_line(DVec3::ZERO, DVec3::X, Color::WHITE);
        gl.draw_line(DVec3::ZERO, DVec3::Y, Color::WHITE);

        let stats = gl.end_frame();
        assert_eq!(
            stats,
            FrameStats {
                viewports: 1,
                clears: 1,
                matrix_loads: 0,
                lines: 2,
            }
        );
        assert_eq!(gl.end_frame(), FrameStats::default());
    }

    #[test]
    fn tracks_draw_buffer() {
        let mut gl = TracingBackend::new();
        assert_eq!(gl.draw_buffer(), DrawBuffer::Back);
        gl.select_draw_buffer(DrawBuffer::BackRight);
        assert_eq!(gl.draw_buffer(), DrawBuffer::BackRight);
    }
}
