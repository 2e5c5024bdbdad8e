//! Fly-through demo: a scripted navigator rendered in a stereo mode.

use anyhow::Context as _;
use glam::DVec3;
use stereonav_core::Nav;
use stereonav_render::{AnaglyphMode, Camera, StereoMode, Stereographic, Viewport};
use tracing::{debug, info};

use crate::backend::{FrameStats, TracingBackend};
use crate::scene::Scene;

/// Fixed simulation timestep in seconds.
const DT: f64 = 1.0 / 60.0;

/// Forward flight speed in units per second.
const FLIGHT_SPEED: f64 = 2.0;

/// Orbit rate around the up axis in radians per second.
const ORBIT_RATE: f64 = 0.5;

/// Demo configuration (from CLI or defaults).
#[derive(Debug, Clone, PartialEq)]
pub struct DemoParams {
    pub mode: StereoMode,
    pub anaglyph: AnaglyphMode,
    pub frames: u64,
    pub width: f64,
    pub height: f64,
    pub omni_slices: Option<u32>,
    pub omni_fov: f64,
    pub smooth: f64,
    /// Cycle the stereo mode every this many frames.
    pub cycle_every: Option<u64>,
}

impl Default for DemoParams {
    fn default() -> Self {
        Self {
            mode: StereoMode::Mono,
            anaglyph: AnaglyphMode::RedCyan,
            frames: 120,
            width: 1280.0,
            height: 720.0,
            omni_slices: None,
            omni_fov: 360.0,
            smooth: 0.8,
            cycle_every: None,
        }
    }
}

impl DemoParams {
    /// Parse demo parameters from command line arguments.
    pub fn from_args() -> anyhow::Result<Self> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::parse(&args)
    }

    /// Parse demo parameters from an argument list (without the program name).
    pub fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut params = Self::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            let mut value = || {
                iter.next()
                    .map(String::as_str)
                    .with_context(|| format!("missing value for {arg}"))
            };
            match arg.as_str() {
                "-m" | "--mode" => params.mode = value()?.parse()?,
                "-a" | "--anaglyph" => params.anaglyph = value()?.parse()?,
                "-n" | "--frames" => {
                    params.frames = value()?.parse().context("invalid frame count")?;
                }
                "--width" => params.width = value()?.parse().context("invalid width")?,
                "--height" => params.height = value()?.parse().context("invalid height")?,
                "--omni" => {
                    params.omni_slices = Some(value()?.parse().context("invalid slice count")?);
                }
                "--omni-fov" => {
                    params.omni_fov = value()?.parse().context("invalid omni field of view")?;
                }
                "--smooth" => params.smooth = value()?.parse().context("invalid smoothing")?,
                "--cycle" => {
                    params.cycle_every = Some(value()?.parse().context("invalid cycle period")?);
                }
                other => anyhow::bail!("unknown argument '{other}'"),
            }
        }

        Ok(params)
    }
}

/// Demo state.
pub struct Demo {
    nav: Nav,
    stereo: Stereographic,
    camera: Camera,
    viewport: Viewport,
    scene: Scene,
    gl: TracingBackend,
    params: DemoParams,
}

impl Demo {
    pub fn new(params: DemoParams) -> anyhow::Result<Self> {
        let mut stereo = Stereographic::new();
        stereo
            .set_mode(params.mode)
            .set_anaglyph_mode(params.anaglyph);
        if let Some(slices) = params.omni_slices {
            stereo.set_omni(true, slices, params.omni_fov)?;
        }

        // Start behind the cube, looking at it
        let mut nav = Nav::new(DVec3::new(0.0, 0.0, -8.0), 0.0);
        nav.set_smooth(params.smooth);

        info!(
            "Demo: mode={} anaglyph={} frames={} viewport={}x{}",
            params.mode, params.anaglyph, params.frames, params.width, params.height
        );

        Ok(Self {
            nav,
            stereo,
            camera: Camera::default(),
            viewport: Viewport::with_size(params.width, params.height),
            scene: Scene::new(),
            gl: TracingBackend::new(),
            params,
        })
    }

    /// Run the configured number of frames.
    pub fn run(&mut self) -> FrameStats {
        let mut total = FrameStats::default();
        for frame in 0..self.params.frames {
            let stats = self.frame(frame);
            total.viewports += stats.viewports;
            total.clears += stats.clears;
            total.matrix_loads += stats.matrix_loads;
            total.lines += stats.lines;
        }

        info!(
            "Rendered {} frames: {} passes, {} lines",
            self.params.frames,
            self.scene.passes(),
            total.lines
        );
        total
    }

    /// Advance and render a single frame.
    fn frame(&mut self, frame: u64) -> FrameStats {
        if let Some(period) = self.params.cycle_every {
            if frame > 0 && period > 0 && frame % period == 0 {
                let next = self.stereo.mode().next();
                self.stereo.set_mode(next);
                info!("Stereo mode: {next}");
            }
        }

        // Accumulate input, then integrate
        self.nav.move_f(FLIGHT_SPEED).spin_u(ORBIT_RATE);
        if frame % 60 == 30 {
            self.nav.turn_r(0.05);
        }
        self.nav.step(DT);

        let pose = *self.nav.pose();
        self.stereo.draw(
            &mut self.gl,
            &self.camera,
            &pose,
            &self.viewport,
            &mut self.scene,
        );
        if self.stereo.mode() == StereoMode::Active {
            Stereographic::draw_blue_line(&mut self.gl, self.params.width, self.params.height);
        }

        let stats = self.gl.end_frame();
        let (az, el, dist) = self.nav.to_aed(DVec3::ZERO);
        debug!(
            frame,
            position = ?self.nav.position(),
            azimuth = az.to_degrees(),
            elevation = el.to_degrees(),
            distance = dist,
            lines = stats.lines,
            "frame"
        );
        stats
    }
}
