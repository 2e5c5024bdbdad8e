//! Smooth navigation of a coordinate frame.
//!
//! A [`Nav`] owns a [`Pose`] and integrates linear and angular velocities
//! into it once per frame. Input is accumulated between frames through the
//! `move_*`, `push_*`, `spin_*` and `turn_*` setters, then applied by
//! [`Nav::step`]:
//!
//! ```text
//! accumulate (move/push/spin/turn) ─> step(dt) ─> read pose / render
//! ```
//!
//! Velocities are expressed in the frame's local axes, so moving "forward"
//! always follows the current view direction.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::math::{quat_from_aeb, quat_from_spin, spin_from_quat};
use crate::pose::Pose;

/// A mobile coordinate frame with low-pass filtered velocities.
///
/// Linear velocities are in units per second. Angular velocities are in
/// radians per second, stored in frame-axis order (right, up, forward).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Nav {
    pose: Pose,
    /// Raw linear velocity set by input.
    move_raw: DVec3,
    /// Filtered linear displacement applied last step.
    move_smoothed: DVec3,
    /// Raw angular velocity set by input.
    spin_raw: DVec3,
    /// Filtered angular displacement applied last step.
    spin_smoothed: DVec3,
    /// One-shot angular increment, consumed by the next step.
    turn: DVec3,
    right: DVec3,
    up: DVec3,
    forward: DVec3,
    smooth: f64,
}

impl Default for Nav {
    fn default() -> Self {
        Self::new(DVec3::ZERO, 0.0)
    }
}

impl Nav {
    /// Create a navigator at `position` with identity orientation.
    ///
    /// `smooth` is the velocity smoothing amount, clamped to `[0, 1)`; zero
    /// applies input immediately.
    #[must_use]
    pub fn new(position: DVec3, smooth: f64) -> Self {
        let mut nav = Self {
            pose: Pose::from_position(position),
            move_raw: DVec3::ZERO,
            move_smoothed: DVec3::ZERO,
            spin_raw: DVec3::ZERO,
            spin_smoothed: DVec3::ZERO,
            turn: DVec3::ZERO,
            right: DVec3::X,
            up: DVec3::Y,
            forward: DVec3::Z,
            smooth: 0.0,
        };
        nav.set_smooth(smooth);
        nav.update_unit_vectors();
        nav
    }

    /// The current frame.
    #[inline]
    #[must_use]
    pub const fn pose(&self) -> &Pose {
        &self.pose
    }

    #[inline]
    #[must_use]
    pub const fn position(&self) -> DVec3 {
        self.pose.position()
    }

    #[inline]
    #[must_use]
    pub const fn orientation(&self) -> DQuat {
        self.pose.orientation()
    }

    #[inline]
    pub fn set_position(&mut self, position: DVec3) -> &mut Self {
        self.pose.set_position(position);
        self
    }

    /// Azimuth, elevation and distance from this frame to `target`.
    #[inline]
    #[must_use]
    pub fn to_aed(&self, target: DVec3) -> (f64, f64, f64) {
        self.pose.to_aed(target)
    }

    /// Right unit vector.
    #[inline]
    #[must_use]
    pub const fn ur(&self) -> DVec3 {
        self.right
    }

    /// Up unit vector.
    #[inline]
    #[must_use]
    pub const fn uu(&self) -> DVec3 {
        self.up
    }

    /// Forward unit vector.
    #[inline]
    #[must_use]
    pub const fn uf(&self) -> DVec3 {
        self.forward
    }

    #[inline]
    #[must_use]
    pub const fn smooth(&self) -> f64 {
        self.smooth
    }

    /// Set smoothing amount, clamped to `[0, 1)`.
    pub fn set_smooth(&mut self, smooth: f64) -> &mut Self {
        self.smooth = smooth.clamp(0.0, 1.0 - f64::EPSILON);
        self
    }

    /// Smoothed linear and angular displacement of the last step as a pose.
    #[must_use]
    pub fn vel(&self) -> Pose {
        Pose::new(self.move_smoothed, quat_from_spin(self.spin_smoothed))
    }

    /// Set the orientation from azimuth, elevation and bank.
    pub fn view(&mut self, azimuth: f64, elevation: f64, bank: f64) -> &mut Self {
        self.view_quat(quat_from_aeb(azimuth, elevation, bank))
    }

    /// Set the orientation directly.
    pub fn view_quat(&mut self, orientation: DQuat) -> &mut Self {
        self.pose.set_orientation(orientation);
        self.update_unit_vectors();
        self
    }

    /// Load the smoothed angular velocity from a rotation, so the next steps
    /// ease out of it.
    pub fn spin_from_quat(&mut self, rotation: DQuat) -> &mut Self {
        self.spin_smoothed = spin_from_quat(rotation);
        self
    }

    /// Set linear velocity along right, up and forward.
    pub fn move_(&mut self, dr: f64, du: f64, df: f64) -> &mut Self {
        self.move_raw = DVec3::new(dr, du, df);
        self
    }

    pub fn move_r(&mut self, v: f64) -> &mut Self {
        self.move_raw.x = v;
        self
    }

    pub fn move_u(&mut self, v: f64) -> &mut Self {
        self.move_raw.y = v;
        self
    }

    pub fn move_f(&mut self, v: f64) -> &mut Self {
        self.move_raw.z = v;
        self
    }

    /// Accelerate along right, up and forward.
    pub fn push(&mut self, ddr: f64, ddu: f64, ddf: f64) -> &mut Self {
        self.move_raw += DVec3::new(ddr, ddu, ddf);
        self
    }

    pub fn push_r(&mut self, amount: f64) -> &mut Self {
        self.move_raw.x += amount;
        self
    }

    pub fn push_u(&mut self, amount: f64) -> &mut Self {
        self.move_raw.y += amount;
        self
    }

    pub fn push_f(&mut self, amount: f64) -> &mut Self {
        self.move_raw.z += amount;
        self
    }

    /// Set angular velocity from azimuth, elevation and bank rates.
    pub fn spin(&mut self, da: f64, de: f64, db: f64) -> &mut Self {
        self.spin_raw = DVec3::new(de, da, db);
        self
    }

    /// Set angular velocity around the right vector.
    pub fn spin_r(&mut self, v: f64) -> &mut Self {
        self.spin_raw.x = v;
        self
    }

    /// Set angular velocity around the up vector.
    pub fn spin_u(&mut self, v: f64) -> &mut Self {
        self.spin_raw.y = v;
        self
    }

    /// Set angular velocity around the forward vector.
    pub fn spin_f(&mut self, v: f64) -> &mut Self {
        self.spin_raw.z = v;
        self
    }

    /// Turn by a single increment on the next step only.
    ///
    /// The increment is not scaled by the step's `dt`.
    pub fn turn(&mut self, a: f64, e: f64, b: f64) -> &mut Self {
        self.turn = DVec3::new(e, a, b);
        self
    }

    pub fn turn_r(&mut self, v: f64) -> &mut Self {
        self.turn.x = v;
        self
    }

    pub fn turn_u(&mut self, v: f64) -> &mut Self {
        self.turn.y = v;
        self
    }

    pub fn turn_f(&mut self, v: f64) -> &mut Self {
        self.turn.z = v;
        self
    }

    /// Stop moving and spinning and reset orientation. Position is kept.
    pub fn halt(&mut self) -> &mut Self {
        self.stop();
        self.pose.set_orientation(DQuat::IDENTITY);
        self.update_unit_vectors();
        self
    }

    /// Return to the origin at rest with identity orientation.
    pub fn home(&mut self) -> &mut Self {
        self.stop();
        self.pose.set(&Pose::default());
        self.update_unit_vectors();
        self
    }

    fn stop(&mut self) {
        self.move_raw = DVec3::ZERO;
        self.move_smoothed = DVec3::ZERO;
        self.spin_raw = DVec3::ZERO;
        self.spin_smoothed = DVec3::ZERO;
        self.turn = DVec3::ZERO;
    }

    /// Recompute the basis vectors from the orientation.
    pub fn update_unit_vectors(&mut self) {
        let (right, up, forward) = self.pose.unit_vectors();
        self.right = right;
        self.up = up;
        self.forward = forward;
    }

    /// Integrate accumulated velocities over `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        let amt = 1.0 - self.smooth;

        let angular = self.spin_raw * dt + self.turn;
        self.turn = DVec3::ZERO;

        // Low-pass filter
        self.move_smoothed = self.move_smoothed.lerp(self.move_raw * dt, amt);
        self.spin_smoothed = self.spin_smoothed.lerp(angular, amt);

        // Rotation is applied in the local frame
        let delta = quat_from_spin(self.spin_smoothed);
        self.pose.set_orientation(self.pose.orientation() * delta);
        self.update_unit_vectors();

        let m = self.move_smoothed;
        let position =
            self.pose.position() + self.right * m.x + self.up * m.y + self.forward * m.z;
        self.pose.set_position(position);
    }
}

impl From<Pose> for Nav {
    fn from(pose: Pose) -> Self {
        let mut nav = Self::new(pose.position(), 0.0);
        nav.view_quat(pose.orientation());
        nav
    }
}
