//! Stereographic rendering modes.
//!
//! Modes can be cycled at runtime (the demo binds this to a hotkey) and
//! parsed from their kebab-case names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stereonav_core::Error;

use crate::backend::ColorMask;

/// Stereographic mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StereoMode {
    /// Single centered view.
    #[default]
    Mono,
    /// Red/cyan style color-filtered stereo in one buffer.
    Anaglyph,
    /// Active quad-buffered stereo.
    Active,
    /// Side-by-side stereo.
    Dual,
    /// Left eye only.
    LeftEye,
    /// Right eye only.
    RightEye,
}

impl StereoMode {
    pub const ALL: [Self; 6] = [
        Self::Mono,
        Self::Anaglyph,
        Self::Active,
        Self::Dual,
        Self::LeftEye,
        Self::RightEye,
    ];

    /// Cycle to the next mode.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Mono => Self::Anaglyph,
            Self::Anaglyph => Self::Active,
            Self::Active => Self::Dual,
            Self::Dual => Self::LeftEye,
            Self::LeftEye => Self::RightEye,
            Self::RightEye => Self::Mono,
        }
    }

    /// Number of eye sub-views the mode renders, before omni slicing.
    #[must_use]
    pub const fn eye_count(self) -> u32 {
        match self {
            Self::Mono | Self::LeftEye | Self::RightEye => 1,
            Self::Anaglyph | Self::Active | Self::Dual => 2,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mono => "mono",
            Self::Anaglyph => "anaglyph",
            Self::Active => "active",
            Self::Dual => "dual",
            Self::LeftEye => "left",
            Self::RightEye => "right",
        }
    }
}

impl fmt::Display for StereoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StereoMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mono" => Ok(Self::Mono),
            "anaglyph" => Ok(Self::Anaglyph),
            "active" => Ok(Self::Active),
            "dual" => Ok(Self::Dual),
            "left" | "left-eye" => Ok(Self::LeftEye),
            "right" | "right-eye" => Ok(Self::RightEye),
            other => Err(Error::Parse(format!("unknown stereo mode '{other}'"))),
        }
    }
}

/// Anaglyph glasses type, named left lens first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnaglyphMode {
    RedBlue,
    RedGreen,
    #[default]
    RedCyan,
    BlueRed,
    GreenRed,
    CyanRed,
}

impl AnaglyphMode {
    /// Color channels written by the left and right eye passes.
    #[must_use]
    pub const fn masks(self) -> (ColorMask, ColorMask) {
        const RED: ColorMask = ColorMask::RED;
        const GREEN: ColorMask = ColorMask::GREEN;
        const BLUE: ColorMask = ColorMask::BLUE;
        const CYAN: ColorMask = ColorMask::GREEN.union(ColorMask::BLUE);
        match self {
            Self::RedBlue => (RED, BLUE),
            Self::RedGreen => (RED, GREEN),
            Self::RedCyan => (RED, CYAN),
            Self::BlueRed => (BLUE, RED),
            Self::GreenRed => (GREEN, RED),
            Self::CyanRed => (CYAN, RED),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RedBlue => "red-blue",
            Self::RedGreen => "red-green",
            Self::RedCyan => "red-cyan",
            Self::BlueRed => "blue-red",
            Self::GreenRed => "green-red",
            Self::CyanRed => "cyan-red",
        }
    }
}

impl fmt::Display for AnaglyphMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnaglyphMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red-blue" => Ok(Self::RedBlue),
            "red-green" => Ok(Self::RedGreen),
            "red-cyan" => Ok(Self::RedCyan),
            "blue-red" => Ok(Self::BlueRed),
            "green-red" => Ok(Self::GreenRed),
            "cyan-red" => Ok(Self::CyanRed),
            other => Err(Error::Parse(format!("unknown anaglyph mode '{other}'"))),
        }
    }
}
