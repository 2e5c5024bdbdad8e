//! Wireframe scene content.

use glam::DVec3;
use stereonav_render::{Color, Drawable, GraphicsBackend, RenderPass};

/// Half extent of the ground grid.
const GRID_EXTENT: i32 = 10;

/// A ground grid with a unit cube at the origin, drawn as lines.
pub struct Scene {
    lines: Vec<(DVec3, DVec3, Color)>,
    passes: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        let mut lines = Vec::new();

        let extent = f64::from(GRID_EXTENT);
        let grid = Color::gray(0.4);
        for i in -GRID_EXTENT..=GRID_EXTENT {
            let t = f64::from(i);
            lines.push((DVec3::new(t, -1.0, -extent), DVec3::new(t, -1.0, extent), grid));
            lines.push((DVec3::new(-extent, -1.0, t), DVec3::new(extent, -1.0, t), grid));
        }

        let corners: Vec<DVec3> = (0..8)
            .map(|i| {
                DVec3::new(
                    if i & 1 == 0 { -0.5 } else { 0.5 },
                    if i & 2 == 0 { -0.5 } else { 0.5 },
                    if i & 4 == 0 { -0.5 } else { 0.5 },
                )
            })
            .collect();
        // Corners differing in exactly one bit share an edge
        for a in 0..8 {
            for bit in [1, 2, 4] {
                let b = a | bit;
                if b != a {
                    lines.push((corners[a], corners[b], Color::WHITE));
                }
            }
        }

        Self { lines, passes: 0 }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of passes drawn so far.
    pub const fn passes(&self) -> u64 {
        self.passes
    }
}

impl<G: GraphicsBackend + ?Sized> Drawable<G> for Scene {
    fn on_draw(&mut self, gl: &mut G, _pass: &RenderPass) {
        self.passes += 1;
        for &(from, to, color) in &self.lines {
            gl.draw_line(from, to, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stereonav_render::RecordingBackend;

    #[test]
    fn cube_has_twelve_edges() {
        let scene = Scene::new();
        let grid_lines = 2 * (2 * GRID_EXTENT as usize + 1);
        assert_eq!(scene.line_count(), grid_lines + 12);
    }

    #[test]
    fn every_line_is_drawn_per_pass() {
        let mut scene = Scene::new();
        let mut gl = RecordingBackend::new();
        let pass = stereonav_render::Stereographic::new().plan(
            &stereonav_render::Camera::default(),
            &stereonav_core::Pose::default(),
            &stereonav_render::Viewport::default(),
        );
        scene.on_draw(&mut gl, &pass[0]);
        assert_eq!(gl.calls().len(), scene.line_count());
        assert_eq!(scene.passes(), 1);
    }
}
