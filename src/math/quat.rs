//! Unit quaternion rotation primitive
//!
//! Composition convention: `a * b` applies `b` first, then `a` (standard
//! Hamilton right-to-left order, same as `glam::Quat`). This is the order
//! used everywhere in the crate, in particular by the zero-reference
//! calibration expression `zero.conjugate() * q`.

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::{MIN_QUAT_MAGNITUDE, UNIT_DRIFT_TOLERANCE};
use crate::error::MotionError;

/// Tilt angles extracted from a quaternion (radians)
///
/// Intrinsic yaw(Z)-pitch(Y)-roll(X) convention: `Quaternion::from_euler`
/// builds `qz * qy * qx` and `to_euler` inverts it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    /// Rotation about the Y axis
    pub pitch: f32,
    /// Rotation about the X axis
    pub roll: f32,
    /// Rotation about the Z axis
    pub yaw: f32,
}

/// A rotation as a unit quaternion (scalar + vector part)
///
/// Immutable value type: operations return new quaternions. Any quaternion
/// handed to consumers is normalized; composition renormalizes when
/// floating-point drift exceeds tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    /// Scalar (real) part
    pub w: f32,
    /// Vector (imaginary) part
    pub v: Vec3,
}

impl Quaternion {
    /// The identity rotation (1, 0, 0, 0)
    pub const IDENTITY: Self = Self { w: 1.0, v: Vec3::ZERO };

    pub fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self {
            w,
            v: Vec3::new(x, y, z),
        }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Rotation of `angle` radians about `axis`
    ///
    /// Fails with `DegenerateRotation` if the axis is near zero length.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Result<Self, MotionError> {
        let len = axis.length();
        if len < MIN_QUAT_MAGNITUDE {
            return Err(MotionError::DegenerateRotation);
        }
        let half = angle * 0.5;
        Ok(Self {
            w: half.cos(),
            v: axis * (half.sin() / len),
        })
    }

    /// Build a rotation from tilt angles (intrinsic yaw-pitch-roll)
    pub fn from_euler(pitch: f32, roll: f32, yaw: f32) -> Self {
        let (sr, cr) = (roll * 0.5).sin_cos();
        let (sp, cp) = (pitch * 0.5).sin_cos();
        let (sy, cy) = (yaw * 0.5).sin_cos();

        // qz(yaw) * qy(pitch) * qx(roll), expanded
        Self::new(
            cy * cp * cr + sy * sp * sr,
            cy * cp * sr - sy * sp * cr,
            cy * sp * cr + sy * cp * sr,
            sy * cp * cr - cy * sp * sr,
        )
    }

    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.w * self.w + self.v.length_squared()
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Dot product of the four components
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.w * other.w + self.v.dot(other.v)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.w.is_finite() && self.v.is_finite()
    }

    /// Rescale to unit magnitude
    ///
    /// Fails with `DegenerateRotation` below the minimum magnitude. Already
    /// unit-length input is returned unchanged, so the operation is
    /// idempotent.
    pub fn normalize(&self) -> Result<Self, MotionError> {
        let len_sq = self.length_squared();
        if !len_sq.is_finite() || len_sq.sqrt() < MIN_QUAT_MAGNITUDE {
            return Err(MotionError::DegenerateRotation);
        }
        if (len_sq - 1.0).abs() <= UNIT_DRIFT_TOLERANCE {
            return Ok(*self);
        }
        let inv = 1.0 / len_sq.sqrt();
        Ok(Self {
            w: self.w * inv,
            v: self.v * inv,
        })
    }

    /// The inverse rotation (for unit quaternions)
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            w: self.w,
            v: -self.v,
        }
    }

    /// Closed-form conversion to a 3x3 rotation basis
    pub fn to_rotation_matrix(&self) -> Mat3 {
        let (w, x, y, z) = (self.w, self.v.x, self.v.y, self.v.z);
        Mat3::from_cols(
            Vec3::new(
                1.0 - 2.0 * (y * y + z * z),
                2.0 * (x * y + w * z),
                2.0 * (x * z - w * y),
            ),
            Vec3::new(
                2.0 * (x * y - w * z),
                1.0 - 2.0 * (x * x + z * z),
                2.0 * (y * z + w * x),
            ),
            Vec3::new(
                2.0 * (x * z + w * y),
                2.0 * (y * z - w * x),
                1.0 - 2.0 * (x * x + y * y),
            ),
        )
    }

    /// Rotate a vector by this quaternion (q v q⁻¹)
    #[inline]
    pub fn rotate_vector(&self, v: Vec3) -> Vec3 {
        self.to_rotation_matrix() * v
    }

    /// Extract tilt angles
    ///
    /// The asin argument is clamped to [-1, 1] so floating-point overshoot
    /// near the ±90° pitch gimbal-lock boundary cannot produce NaN.
    pub fn to_euler(&self) -> EulerAngles {
        let (w, x, y, z) = (self.w, self.v.x, self.v.y, self.v.z);

        let roll = (2.0 * (w * x + y * z)).atan2(1.0 - 2.0 * (x * x + y * y));
        let pitch = (2.0 * (w * y - z * x)).clamp(-1.0, 1.0).asin();
        let yaw = (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z));

        EulerAngles { pitch, roll, yaw }
    }

    /// Normalized linear interpolation toward `other`
    ///
    /// Takes the short way around: `other` is negated when the quaternions
    /// sit in opposite hemispheres (q and -q encode the same rotation).
    /// Fails only when the blend collapses to zero magnitude (antipodal
    /// inputs at t = 0.5).
    pub fn nlerp(&self, other: &Self, t: f32) -> Result<Self, MotionError> {
        let other = if self.dot(other) < 0.0 {
            Self {
                w: -other.w,
                v: -other.v,
            }
        } else {
            *other
        };
        let blended = Self {
            w: self.w + (other.w - self.w) * t,
            v: self.v + (other.v - self.v) * t,
        };
        blended.normalize()
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for Quaternion {
    type Output = Quaternion;

    /// Hamilton product: `a * b` composes rotation `b` followed by `a`
    fn mul(self, rhs: Self) -> Self {
        let raw = Self {
            w: self.w * rhs.w - self.v.dot(rhs.v),
            v: self.v.cross(rhs.v) + rhs.v * self.w + self.v * rhs.w,
        };
        // Renormalize when unit magnitude has drifted
        if (raw.length_squared() - 1.0).abs() > UNIT_DRIFT_TOLERANCE {
            raw.normalize().unwrap_or(raw)
        } else {
            raw
        }
    }
}

impl std::ops::Neg for Quaternion {
    type Output = Quaternion;

    fn neg(self) -> Self {
        Self {
            w: -self.w,
            v: -self.v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 1e-4;

    fn approx_identity(q: Quaternion) -> bool {
        // q and -q are the same rotation
        (q.w.abs() - 1.0).abs() < EPS && q.v.length() < EPS
    }

    #[test]
    fn test_identity_euler_is_zero() {
        let e = Quaternion::IDENTITY.to_euler();
        assert_eq!(e.pitch, 0.0);
        assert_eq!(e.roll, 0.0);
        assert_eq!(e.yaw, 0.0);
    }

    #[test]
    fn test_axis_angle_rotates_x_to_y() {
        // 90° about Z sends +X to +Y
        let q = Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2).unwrap();
        let rotated = q.rotate_vector(Vec3::X);
        assert!((rotated - Vec3::Y).length() < EPS);
    }

    #[test]
    fn test_axis_angle_degenerate_axis() {
        let result = Quaternion::from_axis_angle(Vec3::ZERO, 1.0);
        assert_eq!(result, Err(MotionError::DegenerateRotation));
    }

    #[test]
    fn test_normalize_idempotent() {
        let q = Quaternion::new(0.3, -1.2, 0.5, 2.0);
        let once = q.normalize().unwrap();
        let twice = once.normalize().unwrap();
        assert_eq!(once, twice);
        assert!((once.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_normalize_degenerate() {
        let q = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(q.normalize(), Err(MotionError::DegenerateRotation));

        let q = Quaternion::new(1e-6, 0.0, 0.0, 0.0);
        assert_eq!(q.normalize(), Err(MotionError::DegenerateRotation));
    }

    #[test]
    fn test_mul_conjugate_is_identity() {
        let q = Quaternion::from_euler(0.4, -0.8, 1.3);
        assert!(approx_identity(q * q.conjugate()));
    }

    #[test]
    fn test_composition_order() {
        // a * b applies b first: 90° about Z then 90° about X sends
        // +X → +Y → +Z
        let about_z = Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2).unwrap();
        let about_x = Quaternion::from_axis_angle(Vec3::X, FRAC_PI_2).unwrap();
        let composed = about_x * about_z;
        let rotated = composed.rotate_vector(Vec3::X);
        assert!((rotated - Vec3::Z).length() < EPS);
    }

    #[test]
    fn test_euler_round_trip() {
        let cases = [
            (0.0, 0.0, 0.0),
            (0.5, -0.3, 1.2),
            (-1.0, 0.9, -2.5),
            (1.4, -3.0, 0.1),
        ];
        for (pitch, roll, yaw) in cases {
            let q = Quaternion::from_euler(pitch, roll, yaw);
            let e = q.to_euler();
            assert!((e.pitch - pitch).abs() < EPS, "pitch: {pitch}");
            assert!((e.roll - roll).abs() < EPS, "roll: {roll}");
            assert!((e.yaw - yaw).abs() < EPS, "yaw: {yaw}");
        }
    }

    #[test]
    fn test_euler_gimbal_lock_no_nan() {
        // At exactly ±90° pitch the asin argument can overshoot 1.0
        for pitch in [FRAC_PI_2, -FRAC_PI_2] {
            let e = Quaternion::from_euler(pitch, 0.7, -0.2).to_euler();
            assert!(e.pitch.is_finite());
            assert!(e.roll.is_finite());
            assert!(e.yaw.is_finite());
            assert!((e.pitch.abs() - FRAC_PI_2).abs() < 0.01);
        }
    }

    #[test]
    fn test_rotation_matrix_matches_rotate() {
        let q = Quaternion::from_euler(0.3, 1.1, -0.6);
        let m = q.to_rotation_matrix();
        let v = Vec3::new(1.0, -2.0, 0.5);
        assert!((m * v - q.rotate_vector(v)).length() < EPS);
    }

    #[test]
    fn test_nlerp_midpoint() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2).unwrap();
        let mid = a.nlerp(&b, 0.5).unwrap();
        // Midpoint of identity and 90° about Z is 45° about Z
        let expected = Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2 / 2.0).unwrap();
        assert!((mid.dot(&expected).abs() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_nlerp_hemisphere_correction() {
        let a = Quaternion::from_axis_angle(Vec3::Z, 0.2).unwrap();
        let b = -Quaternion::from_axis_angle(Vec3::Z, 0.4).unwrap();
        // -b is the same rotation as b; blend must not pass through zero
        let mid = a.nlerp(&b, 0.5).unwrap();
        let expected = Quaternion::from_axis_angle(Vec3::Z, 0.3).unwrap();
        assert!((mid.dot(&expected).abs() - 1.0).abs() < EPS);
    }

    proptest! {
        #[test]
        fn prop_normalize_idempotent(
            w in -2.0f32..2.0,
            x in -2.0f32..2.0,
            y in -2.0f32..2.0,
            z in -2.0f32..2.0,
        ) {
            let q = Quaternion::new(w, x, y, z);
            if let Ok(once) = q.normalize() {
                let twice = once.normalize().unwrap();
                prop_assert_eq!(once, twice);
            }
        }

        #[test]
        fn prop_mul_conjugate_identity(
            pitch in -1.5f32..1.5,
            roll in -PI..PI,
            yaw in -PI..PI,
        ) {
            let q = Quaternion::from_euler(pitch, roll, yaw);
            prop_assert!(approx_identity(q * q.conjugate()));
        }

        #[test]
        fn prop_euler_round_trip(
            pitch in -1.4f32..1.4,
            roll in -3.0f32..3.0,
            yaw in -3.0f32..3.0,
        ) {
            let q = Quaternion::from_euler(pitch, roll, yaw);
            let e = q.to_euler();
            prop_assert!((e.pitch - pitch).abs() < 1e-3);
            prop_assert!((e.roll - roll).abs() < 1e-3);
            prop_assert!((e.yaw - yaw).abs() < 1e-3);
        }
    }
}
