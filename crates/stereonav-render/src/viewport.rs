//! Screen regions.

use serde::{Deserialize, Serialize};

/// A framed area on a display screen, in window units from the bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::with_size(800.0, 600.0)
    }
}

impl Viewport {
    #[inline]
    #[must_use]
    pub const fn new(left: f64, bottom: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            bottom,
            width,
            height,
        }
    }

    /// Viewport anchored at the origin.
    #[inline]
    #[must_use]
    pub const fn with_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Width divided by height, or `1.0` if either dimension is zero.
    #[inline]
    #[must_use]
    pub fn aspect(&self) -> f64 {
        if self.width != 0.0 && self.height != 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Set all dimensions.
    #[inline]
    pub fn set(&mut self, left: f64, bottom: f64, width: f64, height: f64) {
        *self = Self::new(left, bottom, width, height);
    }

    /// The `index`-th of `count` equal-width tiles, left to right.
    #[must_use]
    pub fn split_horizontal(&self, count: u32, index: u32) -> Self {
        debug_assert!(index < count);
        let width = self.width / f64::from(count.max(1));
        Self::new(
            self.left + width * f64::from(index),
            self.bottom,
            width,
            self.height,
        )
    }
}
