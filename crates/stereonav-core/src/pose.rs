//! Rigid coordinate frames.

use std::ops::{Mul, MulAssign};

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// A coordinate frame: a position in 3-space plus an orientation.
///
/// The orientation is relative to the global axes. In the local frame `+X`
/// is right, `+Y` is up and `+Z` is forward.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    position: DVec3,
    orientation: DQuat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
        }
    }
}

impl Pose {
    /// Create a pose from a position and orientation.
    #[inline]
    #[must_use]
    pub const fn new(position: DVec3, orientation: DQuat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Create a pose at `position` with identity orientation.
    #[inline]
    #[must_use]
    pub const fn from_position(position: DVec3) -> Self {
        Self::new(position, DQuat::IDENTITY)
    }

    /// Combine two poses: positions add, orientations multiply (`a * b`).
    #[inline]
    #[must_use]
    pub fn compose(a: &Self, b: &Self) -> Self {
        Self {
            position: a.position + b.position,
            orientation: a.orientation * b.orientation,
        }
    }

    #[inline]
    #[must_use]
    pub const fn position(&self) -> DVec3 {
        self.position
    }

    #[inline]
    #[must_use]
    pub const fn orientation(&self) -> DQuat {
        self.orientation
    }

    #[inline]
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.position.x
    }

    #[inline]
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.position.y
    }

    #[inline]
    #[must_use]
    pub const fn z(&self) -> f64 {
        self.position.z
    }

    #[inline]
    pub fn set_position(&mut self, position: DVec3) -> &mut Self {
        self.position = position;
        self
    }

    #[inline]
    pub fn set_orientation(&mut self, orientation: DQuat) -> &mut Self {
        self.orientation = orientation;
        self
    }

    /// Copy position and orientation from another pose.
    #[inline]
    pub fn set(&mut self, other: &Self) -> &mut Self {
        self.position = other.position;
        self.orientation = other.orientation;
        self
    }

    /// Normalize the orientation, then return the right, up and forward
    /// unit vectors of the frame.
    pub fn unit_vectors(&mut self) -> (DVec3, DVec3, DVec3) {
        self.orientation = self.orientation.normalize();
        self.basis()
    }

    /// Right, up and forward vectors of the current orientation, which must
    /// already be normalized.
    #[inline]
    #[must_use]
    pub(crate) fn basis(&self) -> (DVec3, DVec3, DVec3) {
        (
            self.orientation * DVec3::X,
            self.orientation * DVec3::Y,
            self.orientation * DVec3::Z,
        )
    }

    /// Azimuth, elevation and distance from this frame to `target`.
    ///
    /// Angles are in radians relative to the frame's own axes: azimuth is
    /// positive toward the right, elevation positive toward up. Both are zero
    /// when `target` coincides with the frame's position.
    #[must_use]
    pub fn to_aed(&self, target: DVec3) -> (f64, f64, f64) {
        let rel = target - self.position;
        let distance = rel.length();
        if distance <= f64::EPSILON * 2.0 {
            return (0.0, 0.0, distance);
        }

        let dir = rel / distance;
        let q = self.orientation.normalize();
        let x = dir.dot(q * DVec3::X);
        let y = dir.dot(q * DVec3::Y);
        let z = dir.dot(q * DVec3::Z);

        (x.atan2(z), y.clamp(-1.0, 1.0).asin(), distance)
    }
}

impl Mul for Pose {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::compose(&self, &rhs)
    }
}

impl MulAssign for Pose {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = Self::compose(self, &rhs);
    }
}
