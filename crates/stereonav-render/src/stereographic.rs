//! Multi-pass stereographic rendering.
//!
//! [`Stereographic::draw`] renders a frame in the configured [`StereoMode`].
//! Each mode is split into a planner (`plan_*`), a pure function from camera,
//! pose and viewport to the list of [`RenderPass`]es, and a shared executor
//! that configures the backend and invokes the drawable once per pass:
//!
//! ```text
//! draw ─> plan_<mode> ─> [pass, pass, ..] ─> for each pass:
//!           color mask / draw buffer ─> viewport ─> clear
//!           ─> projection ─> model-view ─> drawable.on_draw
//! ```
//!
//! With omni rendering enabled every eye sub-view is further split into
//! slices tiled left to right, each covering `fov / slices` degrees.

use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};
use stereonav_core::math::{frustum, ortho_pixels, perspective, view_from_basis};
use stereonav_core::{Error, Pose, Result};
use tracing::{debug, trace};

use crate::backend::{Color, ColorMask, DrawBuffer, Drawable, GraphicsBackend, MatrixMode};
use crate::camera::Camera;
use crate::mode::{AnaglyphMode, StereoMode};
use crate::pass::{Eye, RenderPass};
use crate::viewport::Viewport;

/// Fraction of the window width covered by the blue sync line.
const BLUE_LINE_FRACTION: f64 = 0.3;

/// Omnidirectional slicing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OmniConfig {
    pub enabled: bool,
    /// Number of slices per eye sub-view.
    pub slices: u32,
    /// Total horizontal field of view in degrees.
    pub fov_degrees: f64,
}

impl Default for OmniConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            slices: 24,
            fov_degrees: 360.0,
        }
    }
}

impl OmniConfig {
    /// Horizontal field of view of a single slice in degrees.
    #[inline]
    #[must_use]
    pub fn slice_fov_degrees(&self) -> f64 {
        self.fov_degrees / f64::from(self.slices.max(1))
    }

    /// Check that every slice has a valid perspective projection.
    pub fn validate(&self) -> Result<()> {
        if self.slices == 0 {
            return Err(Error::InvalidConfig(
                "omni slice count must be at least 1".to_string(),
            ));
        }
        if self.fov_degrees.is_nan() || self.fov_degrees <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "omni field of view must be positive, got {}",
                self.fov_degrees
            )));
        }
        let slice_fov = self.slice_fov_degrees();
        if slice_fov >= 180.0 {
            return Err(Error::InvalidConfig(format!(
                "omni slice field of view must be below 180 degrees, got {slice_fov} \
                 ({} degrees over {} slices)",
                self.fov_degrees, self.slices
            )));
        }
        Ok(())
    }
}

/// Rendering configuration held by a [`Stereographic`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StereoConfig {
    pub mode: StereoMode,
    pub anaglyph: AnaglyphMode,
    pub clear_color: Color,
    pub omni: OmniConfig,
}

impl StereoConfig {
    pub fn validate(&self) -> Result<()> {
        self.omni.validate()
    }
}

/// Renders a scene in one of several stereo modes.
///
/// The view and projection accessors report the matrices of the most recent
/// pass; they are meaningful while a drawable is being invoked. Drawables get
/// the authoritative per-pass values through their [`RenderPass`].
#[derive(Debug, Clone)]
pub struct Stereographic {
    config: StereoConfig,
    view: DMat4,
    projection: DMat4,
}

impl Default for Stereographic {
    fn default() -> Self {
        Self {
            config: StereoConfig::default(),
            view: DMat4::IDENTITY,
            projection: DMat4::IDENTITY,
        }
    }
}

impl Stereographic {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer from a configuration, rejecting invalid omni settings.
    pub fn with_config(config: StereoConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    #[must_use]
    pub const fn config(&self) -> &StereoConfig {
        &self.config
    }

    #[must_use]
    pub const fn mode(&self) -> StereoMode {
        self.config.mode
    }

    pub fn set_mode(&mut self, mode: StereoMode) -> &mut Self {
        if mode != self.config.mode {
            debug!("Stereo mode: {} -> {}", self.config.mode, mode);
        }
        self.config.mode = mode;
        self
    }

    #[must_use]
    pub const fn anaglyph_mode(&self) -> AnaglyphMode {
        self.config.anaglyph
    }

    /// Set the anaglyph glasses type.
    pub fn set_anaglyph_mode(&mut self, mode: AnaglyphMode) -> &mut Self {
        debug!("Anaglyph mode: {mode}");
        self.config.anaglyph = mode;
        self
    }

    #[must_use]
    pub const fn clear_color(&self) -> Color {
        self.config.clear_color
    }

    /// Set the background clear color.
    pub fn set_clear_color(&mut self, color: Color) -> &mut Self {
        self.config.clear_color = color;
        self
    }

    /// Whether omni slicing is enabled.
    #[must_use]
    pub const fn omni(&self) -> bool {
        self.config.omni.enabled
    }

    pub fn set_omni_enabled(&mut self, enabled: bool) -> &mut Self {
        self.config.omni.enabled = enabled;
        self
    }

    /// Configure omni slicing. `fov_degrees` is the total horizontal field of
    /// view; the camera's vertical field of view is ignored while enabled.
    pub fn set_omni(&mut self, enabled: bool, slices: u32, fov_degrees: f64) -> Result<&mut Self> {
        self.update_omni(OmniConfig {
            enabled,
            slices,
            fov_degrees,
        })
    }

    pub fn set_omni_fov(&mut self, fov_degrees: f64) -> Result<&mut Self> {
        self.update_omni(OmniConfig {
            fov_degrees,
            ..self.config.omni
        })
    }

    pub fn set_omni_slices(&mut self, slices: u32) -> Result<&mut Self> {
        self.update_omni(OmniConfig {
            slices,
            ..self.config.omni
        })
    }

    fn update_omni(&mut self, omni: OmniConfig) -> Result<&mut Self> {
        omni.validate()?;
        debug!(
            "Omni: enabled={} slices={} fov={}",
            omni.enabled, omni.slices, omni.fov_degrees
        );
        self.config.omni = omni;
        Ok(self)
    }

    /// View matrix of the most recent pass.
    #[must_use]
    pub const fn view_matrix(&self) -> DMat4 {
        self.view
    }

    /// Projection matrix of the most recent pass.
    #[must_use]
    pub const fn projection_matrix(&self) -> DMat4 {
        self.projection
    }

    #[must_use]
    pub fn view_projection_matrix(&self) -> DMat4 {
        self.projection * self.view
    }

    /// Draw the scene according to the configured mode.
    pub fn draw<G, D>(
        &mut self,
        gl: &mut G,
        camera: &Camera,
        pose: &Pose,
        viewport: &Viewport,
        drawable: &mut D,
    ) where
        G: GraphicsBackend + ?Sized,
        D: Drawable<G> + ?Sized,
    {
        match self.config.mode {
            StereoMode::Mono => self.draw_mono(gl, camera, pose, viewport, drawable),
            StereoMode::Active => self.draw_active(gl, camera, pose, viewport, drawable),
            StereoMode::Anaglyph => self.draw_anaglyph(gl, camera, pose, viewport, drawable),
            StereoMode::Dual => self.draw_dual(gl, camera, pose, viewport, drawable),
            StereoMode::LeftEye => self.draw_left(gl, camera, pose, viewport, drawable),
            StereoMode::RightEye => self.draw_right(gl, camera, pose, viewport, drawable),
        }
    }

    pub fn draw_mono<G, D>(
        &mut self,
        gl: &mut G,
        camera: &Camera,
        pose: &Pose,
        viewport: &Viewport,
        drawable: &mut D,
    ) where
        G: GraphicsBackend + ?Sized,
        D: Drawable<G> + ?Sized,
    {
        let passes = self.plan_mono(camera, pose, viewport);
        self.render_passes(gl, &passes, drawable);
    }

    /// Quad-buffered stereo; restores the back buffer afterwards.
    pub fn draw_active<G, D>(
        &mut self,
        gl: &mut G,
        camera: &Camera,
        pose: &Pose,
        viewport: &Viewport,
        drawable: &mut D,
    ) where
        G: GraphicsBackend + ?Sized,
        D: Drawable<G> + ?Sized,
    {
        let passes = self.plan_active(camera, pose, viewport);
        self.render_passes(gl, &passes, drawable);
        gl.select_draw_buffer(DrawBuffer::Back);
    }

    /// Color-filtered stereo; restores the full color mask afterwards.
    pub fn draw_anaglyph<G, D>(
        &mut self,
        gl: &mut G,
        camera: &Camera,
        pose: &Pose,
        viewport: &Viewport,
        drawable: &mut D,
    ) where
        G: GraphicsBackend + ?Sized,
        D: Drawable<G> + ?Sized,
    {
        let passes = self.plan_anaglyph(camera, pose, viewport);
        self.render_passes(gl, &passes, drawable);
        gl.set_color_mask(ColorMask::all());
    }

    pub fn draw_dual<G, D>(
        &mut self,
        gl: &mut G,
        camera: &Camera,
        pose: &Pose,
        viewport: &Viewport,
        drawable: &mut D,
    ) where
        G: GraphicsBackend + ?Sized,
        D: Drawable<G> + ?Sized,
    {
        let passes = self.plan_dual(camera, pose, viewport);
        self.render_passes(gl, &passes, drawable);
    }

    pub fn draw_left<G, D>(
        &mut self,
        gl: &mut G,
        camera: &Camera,
        pose: &Pose,
        viewport: &Viewport,
        drawable: &mut D,
    ) where
        G: GraphicsBackend + ?Sized,
        D: Drawable<G> + ?Sized,
    {
        let passes = self.plan_left(camera, pose, viewport);
        self.render_passes(gl, &passes, drawable);
    }

    pub fn draw_right<G, D>(
        &mut self,
        gl: &mut G,
        camera: &Camera,
        pose: &Pose,
        viewport: &Viewport,
        drawable: &mut D,
    ) where
        G: GraphicsBackend + ?Sized,
        D: Drawable<G> + ?Sized,
    {
        let passes = self.plan_right(camera, pose, viewport);
        self.render_passes(gl, &passes, drawable);
    }

    /// Blue line sync for active stereo emitters that need it.
    ///
    /// Call at the end of rendering, just before swapping buffers. Issues a
    /// single line along the bottom scanline of the window.
    pub fn draw_blue_line<G>(gl: &mut G, window_width: f64, window_height: f64)
    where
        G: GraphicsBackend + ?Sized,
    {
        gl.set_viewport(&Viewport::with_size(window_width, window_height));
        gl.matrix_mode(MatrixMode::Projection);
        gl.load_matrix(&ortho_pixels(window_width, window_height));
        gl.matrix_mode(MatrixMode::ModelView);
        gl.load_matrix(&DMat4::IDENTITY);

        let y = 0.5;
        gl.draw_line(
            DVec3::new(0.0, y, 0.0),
            DVec3::new(window_width * BLUE_LINE_FRACTION, y, 0.0),
            Color::BLUE,
        );
    }

    /// Plan the passes for the configured mode.
    #[must_use]
    pub fn plan(&self, camera: &Camera, pose: &Pose, viewport: &Viewport) -> Vec<RenderPass> {
        match self.config.mode {
            StereoMode::Mono => self.plan_mono(camera, pose, viewport),
            StereoMode::Active => self.plan_active(camera, pose, viewport),
            StereoMode::Anaglyph => self.plan_anaglyph(camera, pose, viewport),
            StereoMode::Dual => self.plan_dual(camera, pose, viewport),
            StereoMode::LeftEye => self.plan_left(camera, pose, viewport),
            StereoMode::RightEye => self.plan_right(camera, pose, viewport),
        }
    }

    #[must_use]
    pub fn plan_mono(&self, camera: &Camera, pose: &Pose, viewport: &Viewport) -> Vec<RenderPass> {
        self.eye_passes(camera, pose, Eye::Mono, viewport)
    }

    #[must_use]
    pub fn plan_active(
        &self,
        camera: &Camera,
        pose: &Pose,
        viewport: &Viewport,
    ) -> Vec<RenderPass> {
        let mut passes = Vec::new();
        for (eye, buffer) in [
            (Eye::Left, DrawBuffer::BackLeft),
            (Eye::Right, DrawBuffer::BackRight),
        ] {
            passes.extend(
                self.eye_passes(camera, pose, eye, viewport)
                    .into_iter()
                    .map(|pass| RenderPass {
                        draw_buffer: Some(buffer),
                        ..pass
                    }),
            );
        }
        passes
    }

    #[must_use]
    pub fn plan_anaglyph(
        &self,
        camera: &Camera,
        pose: &Pose,
        viewport: &Viewport,
    ) -> Vec<RenderPass> {
        let (left, right) = self.config.anaglyph.masks();
        let mut passes = Vec::new();
        for (eye, mask) in [(Eye::Left, left), (Eye::Right, right)] {
            passes.extend(
                self.eye_passes(camera, pose, eye, viewport)
                    .into_iter()
                    .map(|pass| RenderPass {
                        color_mask: Some(mask),
                        ..pass
                    }),
            );
        }
        passes
    }

    /// Side by side: left eye in the left half, right eye in the right half.
    #[must_use]
    pub fn plan_dual(&self, camera: &Camera, pose: &Pose, viewport: &Viewport) -> Vec<RenderPass> {
        let mut passes = self.eye_passes(camera, pose, Eye::Left, &viewport.split_horizontal(2, 0));
        passes.extend(self.eye_passes(camera, pose, Eye::Right, &viewport.split_horizontal(2, 1)));
        passes
    }

    #[must_use]
    pub fn plan_left(&self, camera: &Camera, pose: &Pose, viewport: &Viewport) -> Vec<RenderPass> {
        self.eye_passes(camera, pose, Eye::Left, viewport)
    }

    #[must_use]
    pub fn plan_right(&self, camera: &Camera, pose: &Pose, viewport: &Viewport) -> Vec<RenderPass> {
        self.eye_passes(camera, pose, Eye::Right, viewport)
    }

    /// Passes for a single eye covering `viewport`, one per omni slice.
    fn eye_passes(
        &self,
        camera: &Camera,
        pose: &Pose,
        eye: Eye,
        viewport: &Viewport,
    ) -> Vec<RenderPass> {
        let mut frame = *pose;
        let (right, up, forward) = frame.unit_vectors();
        let offset = eye.sign() * camera.half_eye_sep();

        if !self.config.omni.enabled {
            let eye_position = frame.position() + right * offset;
            let projection = if eye == Eye::Mono {
                perspective(camera.fovy_degrees, viewport.aspect(), camera.near, camera.far)
            } else {
                let (w, h) = camera.near_extents(viewport.aspect());
                let shift = camera.frustum_shift(offset);
                frustum(-w - shift, w - shift, -h, h, camera.near, camera.far)
            };
            return vec![RenderPass {
                eye,
                slice: None,
                viewport: *viewport,
                eye_position,
                view: view_from_basis(right, up, forward, eye_position),
                projection,
                color_mask: None,
                draw_buffer: None,
            }];
        }

        let omni = self.config.omni;
        let half_slice = (omni.slice_fov_degrees() * 0.5).to_radians().tan();
        let shift = camera.frustum_shift(offset);
        let w = slice_half_width(camera.near, half_slice, shift);
        (0..omni.slices)
            .map(|i| {
                let tile = viewport.split_horizontal(omni.slices, i);
                let center = (f64::from(i) + 0.5) / f64::from(omni.slices) - 0.5;
                let (sin, cos) = (omni.fov_degrees * center).to_radians().sin_cos();
                let slice_forward = forward * cos + right * sin;
                let slice_right = right * cos - forward * sin;
                let eye_position = frame.position() + slice_right * offset;

                let h = w / tile.aspect();

                RenderPass {
                    eye,
                    slice: Some(i),
                    viewport: tile,
                    eye_position,
                    view: view_from_basis(slice_right, up, slice_forward, eye_position),
                    projection: frustum(-w - shift, w - shift, -h, h, camera.near, camera.far),
                    color_mask: None,
                    draw_buffer: None,
                }
            })
            .collect()
    }

    fn render_passes<G, D>(&mut self, gl: &mut G, passes: &[RenderPass], drawable: &mut D)
    where
        G: GraphicsBackend + ?Sized,
        D: Drawable<G> + ?Sized,
    {
        for pass in passes {
            trace!(eye = ?pass.eye, slice = ?pass.slice, viewport = ?pass.viewport, "render pass");

            if let Some(mask) = pass.color_mask {
                gl.set_color_mask(mask);
            }
            if let Some(buffer) = pass.draw_buffer {
                gl.select_draw_buffer(buffer);
            }
            gl.set_viewport(&pass.viewport);
            gl.clear(self.config.clear_color);

            gl.matrix_mode(MatrixMode::Projection);
            gl.load_matrix(&pass.projection);
            gl.matrix_mode(MatrixMode::ModelView);
            gl.load_matrix(&pass.view);
            self.projection = pass.projection;
            self.view = pass.view;

            drawable.on_draw(gl, pass);
        }
    }
}

/// Near-plane half width of an off-axis slice frustum shifted by `shift`
/// whose horizontal extent still spans `2 * atan(tan_half)`.
///
/// Solves `atan((w + s) / n) + atan((w - s) / n) = 2 * atan(t)` for `w`,
/// i.e. `t w² + (1 - t²) n w - t (n² + s²) = 0`.
fn slice_half_width(near: f64, tan_half: f64, shift: f64) -> f64 {
    let t = tan_half;
    let c = near.mul_add(near, shift * shift);
    let b = t.mul_add(-t, 1.0) * near;
    let disc = b.mul_add(b, 4.0 * t * t * c).sqrt();
    if b > 0.0 {
        2.0 * t * c / (b + disc)
    } else {
        (disc - b) / (2.0 * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{BackendCall, RecordingBackend};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use glam::{DQuat, DVec3};

    fn scene() -> (Camera, Pose, Viewport) {
        (
            Camera::default(),
            Pose::new(DVec3::new(1.0, 2.0, 3.0), DQuat::from_rotation_y(0.4)),
            Viewport::with_size(800.0, 600.0),
        )
    }

    fn render(stereo: &mut Stereographic) -> (RecordingBackend, Vec<RenderPass>) {
        let (camera, pose, viewport) = scene();
        let mut gl = RecordingBackend::new();
        let mut seen = Vec::new();
        let mut drawable = |gl: &mut RecordingBackend, pass: &RenderPass| {
            gl.mark_draw();
            seen.push(pass.clone());
        };
        stereo.draw(&mut gl, &camera, &pose, &viewport, &mut drawable);
        (gl, seen)
    }

    fn stereo_in(mode: StereoMode) -> Stereographic {
        let mut stereo = Stereographic::new();
        stereo.set_mode(mode);
        stereo
    }

    #[test]
    fn pass_counts_per_mode() {
        for (mode, expected) in [
            (StereoMode::Mono, 1),
            (StereoMode::Active, 2),
            (StereoMode::Anaglyph, 2),
            (StereoMode::Dual, 2),
            (StereoMode::LeftEye, 1),
            (StereoMode::RightEye, 1),
        ] {
            let (gl, passes) = render(&mut stereo_in(mode));
            assert_eq!(gl.draw_count(), expected, "{mode}");
            assert_eq!(passes.len(), expected, "{mode}");
            assert_eq!(mode.eye_count() as usize, expected);
        }
    }

    #[test]
    fn mono_pass_uses_camera_perspective() {
        let (camera, pose, viewport) = scene();
        let passes = Stereographic::new().plan(&camera, &pose, &viewport);
        assert_eq!(passes.len(), 1);
        let pass = &passes[0];
        assert_eq!(pass.eye, Eye::Mono);
        assert_eq!(pass.eye_position, pose.position());
        assert_abs_diff_eq!(
            pass.projection,
            perspective(30.0, 800.0 / 600.0, 0.1, 100.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn view_matrix_follows_pose() {
        let (camera, pose, viewport) = scene();
        let pass = &Stereographic::new().plan_mono(&camera, &pose, &viewport)[0];
        let forward = pose.orientation() * DVec3::Z;
        let ahead = pass.view.transform_point3(pose.position() + forward * 2.0);
        assert_abs_diff_eq!(ahead, DVec3::new(0.0, 0.0, -2.0), epsilon = 1e-12);
    }

    #[test]
    fn command_order_per_pass() {
        let (gl, _) = render(&mut stereo_in(StereoMode::Mono));
        let calls = gl.calls();
        assert!(matches!(calls[0], BackendCall::SetViewport(_)));
        assert_eq!(calls[1], BackendCall::Clear(Color::TRANSPARENT));
        assert_eq!(calls[2], BackendCall::MatrixMode(MatrixMode::Projection));
        assert!(matches!(calls[3], BackendCall::LoadMatrix(_)));
        assert_eq!(calls[4], BackendCall::MatrixMode(MatrixMode::ModelView));
        assert!(matches!(calls[5], BackendCall::LoadMatrix(_)));
        assert_eq!(calls[6], BackendCall::Draw);
        assert_eq!(calls.len(), 7);
    }

    #[test]
    fn drawable_sees_loaded_matrices() {
        let (gl, passes) = render(&mut stereo_in(StereoMode::Anaglyph));
        assert_eq!(
            gl.matrices(MatrixMode::Projection),
            passes.iter().map(|p| p.projection).collect::<Vec<_>>()
        );
        assert_eq!(
            gl.matrices(MatrixMode::ModelView),
            passes.iter().map(|p| p.view).collect::<Vec<_>>()
        );
    }

    #[test]
    fn last_matrices_are_kept() {
        let mut stereo = stereo_in(StereoMode::Dual);
        let (_, passes) = render(&mut stereo);
        let last = passes.last().map(|p| (p.view, p.projection));
        assert_eq!(
            Some((stereo.view_matrix(), stereo.projection_matrix())),
            last
        );
        assert_eq!(
            stereo.view_projection_matrix(),
            passes[1].view_projection()
        );
    }

    #[test]
    fn left_and_right_offsets_are_opposite() {
        let (camera, pose, viewport) = scene();
        let stereo = Stereographic::new();
        let left = &stereo.plan_left(&camera, &pose, &viewport)[0];
        let right = &stereo.plan_right(&camera, &pose, &viewport)[0];

        let l = left.eye_position - pose.position();
        let r = right.eye_position - pose.position();
        assert_abs_diff_eq!(l, -r, epsilon = 1e-12);
        assert_relative_eq!(l.length(), camera.half_eye_sep(), epsilon = 1e-12);

        // Separation runs along the pose's right vector
        let ur = pose.orientation() * DVec3::X;
        assert_relative_eq!(r.dot(ur), camera.half_eye_sep(), epsilon = 1e-12);
    }

    #[test]
    fn stereo_frustums_converge_at_focal_plane() {
        let (camera, pose, viewport) = scene();
        let stereo = Stereographic::new();
        let left = &stereo.plan_left(&camera, &pose, &viewport)[0];
        let right = &stereo.plan_right(&camera, &pose, &viewport)[0];

        // A point on the focal plane straight ahead projects to the same
        // clip-space x for both eyes
        let forward = pose.orientation() * DVec3::Z;
        let target = pose.position() + forward * camera.focal_length;
        let l = left.view_projection().project_point3(target);
        let r = right.view_projection().project_point3(target);
        assert_abs_diff_eq!(l.x, r.x, epsilon = 1e-9);
        assert_abs_diff_eq!(l.x, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn anaglyph_uses_full_viewport_and_masks() {
        let mut stereo = stereo_in(StereoMode::Anaglyph);
        stereo.set_anaglyph_mode(AnaglyphMode::RedCyan);
        let (gl, passes) = render(&mut stereo);

        let full = Viewport::with_size(800.0, 600.0);
        assert_eq!(gl.viewports(), vec![full, full]);
        assert_eq!(passes[0].eye, Eye::Left);
        assert_eq!(passes[1].eye, Eye::Right);

        let masks: Vec<_> = gl
            .calls()
            .iter()
            .filter_map(|call| match call {
                BackendCall::SetColorMask(mask) => Some(*mask),
                _ => None,
            })
            .collect();
        assert_eq!(
            masks,
            vec![
                ColorMask::RED,
                ColorMask::GREEN | ColorMask::BLUE,
                ColorMask::all()
            ]
        );
    }

    #[test]
    fn color_mask_is_set_before_each_draw() {
        let (gl, _) = render(&mut stereo_in(StereoMode::Anaglyph));
        let calls = gl.calls();
        let draws: Vec<_> = calls
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == BackendCall::Draw)
            .map(|(i, _)| i)
            .collect();
        let first_mask = calls
            .iter()
            .position(|c| matches!(c, BackendCall::SetColorMask(_)));
        assert!(first_mask.is_some_and(|m| m < draws[0]));
    }

    #[test]
    fn dual_splits_viewport() {
        let (gl, passes) = render(&mut stereo_in(StereoMode::Dual));
        assert_eq!(
            gl.viewports(),
            vec![
                Viewport::new(0.0, 0.0, 400.0, 600.0),
                Viewport::new(400.0, 0.0, 400.0, 600.0),
            ]
        );
        assert_eq!(passes[0].eye, Eye::Left);
        assert_eq!(passes[1].eye, Eye::Right);
    }

    #[test]
    fn active_selects_eye_buffers() {
        let (gl, _) = render(&mut stereo_in(StereoMode::Active));
        let buffers: Vec<_> = gl
            .calls()
            .iter()
            .filter_map(|call| match call {
                BackendCall::SelectDrawBuffer(b) => Some(*b),
                _ => None,
            })
            .collect();
        assert_eq!(
            buffers,
            vec![DrawBuffer::BackLeft, DrawBuffer::BackRight, DrawBuffer::Back]
        );
        assert!(!gl
            .calls()
            .iter()
            .any(|c| matches!(c, BackendCall::SetColorMask(_))));
    }

    #[test]
    fn clear_uses_configured_color() {
        let mut stereo = stereo_in(StereoMode::Dual);
        stereo.set_clear_color(Color::gray(0.25));
        let (gl, _) = render(&mut stereo);
        let clears = gl
            .calls()
            .iter()
            .filter(|c| **c == BackendCall::Clear(Color::gray(0.25)))
            .count();
        assert_eq!(clears, 2);
    }

    #[test]
    fn omni_renders_one_pass_per_slice() {
        let mut stereo = Stereographic::new();
        stereo.set_omni(true, 6, 180.0).unwrap();
        let (gl, passes) = render(&mut stereo);

        assert_eq!(gl.draw_count(), 6);
        for (i, pass) in passes.iter().enumerate() {
            assert_eq!(pass.slice, Some(i as u32));
            assert_relative_eq!(pass.horizontal_fov_degrees(), 30.0, epsilon = 1e-9);
            assert_relative_eq!(pass.viewport.width, 800.0 / 6.0, epsilon = 1e-9);
            assert_relative_eq!(pass.viewport.left, 800.0 / 6.0 * i as f64, epsilon = 1e-9);
        }
    }

    #[test]
    fn omni_slices_sweep_left_to_right() {
        let (camera, pose, viewport) = scene();
        let mut stereo = Stereographic::new();
        stereo.set_omni(true, 4, 360.0).unwrap();
        let passes = stereo.plan(&camera, &pose, &viewport);

        let ur = pose.orientation() * DVec3::X;
        let uf = pose.orientation() * DVec3::Z;
        // Slice forward vectors sit at -135, -45, 45 and 135 degrees
        let azimuths: Vec<f64> = passes
            .iter()
            .map(|p| {
                let inv = p.view.inverse();
                let dir = inv.transform_vector3(DVec3::NEG_Z);
                dir.dot(ur).atan2(dir.dot(uf)).to_degrees()
            })
            .collect();
        for (got, want) in azimuths.iter().zip([-135.0, -45.0, 45.0, 135.0]) {
            assert_relative_eq!(*got, want, epsilon = 1e-9);
        }
    }

    #[test]
    fn omni_applies_per_eye() {
        let mut stereo = stereo_in(StereoMode::Dual);
        stereo.set_omni(true, 3, 90.0).unwrap();
        let (gl, passes) = render(&mut stereo);
        assert_eq!(gl.draw_count(), 6);
        assert!(passes[..3].iter().all(|p| p.eye == Eye::Left));
        assert!(passes[3..].iter().all(|p| p.eye == Eye::Right));
        assert_relative_eq!(passes[3].viewport.left, 400.0, epsilon = 1e-9);
    }

    #[test]
    fn stereo_omni_slices_keep_their_field_of_view() {
        let (_, pose, viewport) = scene();
        let camera = Camera::default().with_eye_sep(0.5);
        for (mode, slices, fov) in [
            (StereoMode::LeftEye, 4, 360.0),
            (StereoMode::RightEye, 4, 360.0),
            (StereoMode::Dual, 6, 180.0),
            (StereoMode::Anaglyph, 3, 300.0),
        ] {
            let mut stereo = stereo_in(mode);
            stereo.set_omni(true, slices, fov).unwrap();
            let passes = stereo.plan(&camera, &pose, &viewport);
            let slice_fov = fov / f64::from(slices);
            for pass in &passes {
                assert_relative_eq!(pass.horizontal_fov_degrees(), slice_fov, epsilon = 1e-9);
                // Still off-axis toward the focal point
                assert!(pass.projection.z_axis.x.abs() > 0.0, "{mode}");
            }
        }
    }

    #[test]
    fn slice_half_width_without_shift_is_symmetric() {
        let t = 25.0_f64.to_radians().tan();
        assert_relative_eq!(slice_half_width(0.1, t, 0.0), 0.1 * t, epsilon = 1e-15);
        assert_relative_eq!(slice_half_width(0.1, 1.0, 0.0), 0.1, epsilon = 1e-15);
        assert_relative_eq!(slice_half_width(0.1, 3.0, 0.0), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn invalid_omni_is_rejected() {
        let mut stereo = Stereographic::new();
        assert!(matches!(
            stereo.set_omni(true, 0, 360.0),
            Err(Error::InvalidConfig(_))
        ));
        assert!(stereo.set_omni(true, 2, 360.0).is_err());
        assert!(stereo.set_omni_fov(-10.0).is_err());
        assert!(stereo.set_omni_fov(f64::NAN).is_err());
        assert_eq!(stereo.config().omni, OmniConfig::default());

        stereo.set_omni_slices(8).unwrap().set_omni_enabled(true);
        assert!(stereo.omni());
        assert_eq!(stereo.config().omni.slices, 8);
    }

    #[test]
    fn with_config_validates() {
        let config = StereoConfig {
            omni: OmniConfig {
                enabled: true,
                slices: 1,
                fov_degrees: 200.0,
            },
            ..StereoConfig::default()
        };
        assert!(Stereographic::with_config(config).is_err());
    }

    #[test]
    fn degenerate_viewport_does_not_produce_nan() {
        let (camera, pose, _) = scene();
        for mode in StereoMode::ALL {
            let stereo = stereo_in(mode);
            for pass in stereo.plan(&camera, &pose, &Viewport::with_size(0.0, 0.0)) {
                assert!(!pass.projection.is_nan(), "{mode}");
                assert!(!pass.view.is_nan(), "{mode}");
            }
        }
    }

    #[test]
    fn blue_line_issues_one_line() {
        let mut gl = RecordingBackend::new();
        Stereographic::draw_blue_line(&mut gl, 1024.0, 768.0);
        let lines: Vec<_> = gl
            .calls()
            .iter()
            .filter(|c| matches!(c, BackendCall::DrawLine { .. }))
            .collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(
            *lines[0],
            BackendCall::DrawLine {
                from: DVec3::new(0.0, 0.5, 0.0),
                to: DVec3::new(1024.0 * 0.3, 0.5, 0.0),
                color: Color::BLUE,
            }
        );
    }

    #[test]
    fn drawable_trait_objects_work() {
        struct Counter(usize);
        impl Drawable<RecordingBackend> for Counter {
            fn on_draw(&mut self, _gl: &mut RecordingBackend, _pass: &RenderPass) {
                self.0 += 1;
            }
        }

        let (camera, pose, viewport) = scene();
        let mut gl = RecordingBackend::new();
        let mut counter = Counter(0);
        let drawable: &mut dyn Drawable<RecordingBackend> = &mut counter;
        stereo_in(StereoMode::Active).draw(&mut gl, &camera, &pose, &viewport, drawable);
        assert_eq!(counter.0, 2);
    }
}
