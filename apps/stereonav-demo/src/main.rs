//! Stereonav Headless Demo
//!
//! Flies a smoothed navigator around a wireframe scene and renders every
//! frame through the stereographic pipeline into a logging backend.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p stereonav-demo -- [OPTIONS]
//! ```
//!
//! ## Examples
//!
//! ```bash
//! # Anaglyph fly-through with per-frame logging
//! RUST_LOG=debug cargo run -p stereonav-demo -- --mode anaglyph
//!
//! # 8-slice panorama, cycling stereo modes every 20 frames
//! cargo run -p stereonav-demo -- --omni 8 --cycle 20
//!
//! # Dump every backend command
//! RUST_LOG=trace cargo run -p stereonav-demo -- --mode dual -n 1
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod app;
mod backend;
mod scene;

use tracing_subscriber::EnvFilter;

use crate::app::{Demo, DemoParams};

fn main() -> anyhow::Result<()> {
    // Check for help flag before starting the demo
    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let params = DemoParams::from_args()?;
    Demo::new(params)?.run();
    Ok(())
}

fn print_help() {
    eprintln!(
        "Stereonav Headless Demo

USAGE:
    cargo run -p stereonav-demo -- [OPTIONS]

RENDER OPTIONS:
    -m, --mode <MODE>       Stereo mode: mono, anaglyph, active, dual, left, right
                            Default: mono
    -a, --anaglyph <TYPE>   Glasses: red-blue, red-green, red-cyan, blue-red,
                            green-red, cyan-red (default: red-cyan)
    --width <W>             Viewport width (default: 1280)
    --height <H>            Viewport height (default: 720)
    --omni <SLICES>         Enable omni rendering with SLICES slices per eye
    --omni-fov <DEG>        Total omni field of view (default: 360)
    --cycle <N>             Cycle stereo mode every N frames

NAVIGATION OPTIONS:
    -n, --frames <N>        Frames to render (default: 120)
    --smooth <S>            Velocity smoothing in [0, 1) (default: 0.8)

OTHER:
    -h, --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}
