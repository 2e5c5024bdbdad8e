//! Math utilities for coordinate frames.
//!
//! Angular quantities are packed into a [`DVec3`] in frame-axis order:
//! `x` is rotation about the right axis (elevation), `y` about the up axis
//! (azimuth) and `z` about the forward axis (bank).

use glam::{DMat4, DQuat, DVec3, DVec4, EulerRot};

/// Build a rotation from azimuth, elevation and bank angles in radians.
///
/// Applied in Y-X-Z order: azimuth about up, then elevation about right,
/// then bank about forward.
#[inline]
#[must_use]
pub fn quat_from_aeb(azimuth: f64, elevation: f64, bank: f64) -> DQuat {
    DQuat::from_euler(EulerRot::YXZ, azimuth, elevation, bank)
}

/// Build a rotation from an angular vector in frame-axis order.
#[inline]
#[must_use]
pub fn quat_from_spin(spin: DVec3) -> DQuat {
    quat_from_aeb(spin.y, spin.x, spin.z)
}

/// Decompose a rotation into an angular vector in frame-axis order.
#[inline]
#[must_use]
pub fn spin_from_quat(q: DQuat) -> DVec3 {
    let (azimuth, elevation, bank) = q.to_euler(EulerRot::YXZ);
    DVec3::new(elevation, azimuth, bank)
}

/// View matrix for a frame with the given basis located at `eye`.
///
/// Frames look along their forward axis; the matrix maps `forward` onto
/// eye-space -Z, `right` onto +X and `up` onto +Y.
#[must_use]
pub fn view_from_basis(right: DVec3, up: DVec3, forward: DVec3, eye: DVec3) -> DMat4 {
    DMat4::from_cols(
        DVec4::new(right.x, up.x, -forward.x, 0.0),
        DVec4::new(right.y, up.y, -forward.y, 0.0),
        DVec4::new(right.z, up.z, -forward.z, 0.0),
        DVec4::new(-right.dot(eye), -up.dot(eye), forward.dot(eye), 1.0),
    )
}

/// Perspective projection for an arbitrary view frustum.
///
/// `left`, `right`, `bottom` and `top` are the extents of the near clip
/// plane. Clip-space depth is in `[-1, 1]`.
#[must_use]
pub fn frustum(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> DMat4 {
    let w = right - left;
    let h = top - bottom;
    let d = far - near;
    DMat4::from_cols(
        DVec4::new(2.0 * near / w, 0.0, 0.0, 0.0),
        DVec4::new(0.0, 2.0 * near / h, 0.0, 0.0),
        DVec4::new((right + left) / w, (top + bottom) / h, -(far + near) / d, -1.0),
        DVec4::new(0.0, 0.0, -2.0 * far * near / d, 0.0),
    )
}

/// Symmetric perspective projection from a vertical field of view in degrees.
#[inline]
#[must_use]
pub fn perspective(fovy_degrees: f64, aspect: f64, near: f64, far: f64) -> DMat4 {
    DMat4::perspective_rh_gl(fovy_degrees.to_radians(), aspect, near, far)
}

/// Orthographic projection mapping window pixels to clip space.
#[inline]
#[must_use]
pub fn ortho_pixels(width: f64, height: f64) -> DMat4 {
    DMat4::orthographic_rh_gl(0.0, width, 0.0, height, -1.0, 1.0)
}
