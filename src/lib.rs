//! Mugic Motion - orientation core for the Mugic motion controller demos
//!
//! Core modules:
//! - `math`: unit quaternion primitive (composition, Euler tilt, rotation basis)
//! - `wireframe`: 3D wireframe models and their 2D projection
//! - `stream`: per-device orientation intake (latest sample, smoothing, calibration)
//! - `input`: tilt-to-paddle mapping for the two-player pong demo
//!
//! Device I/O, windowing, and rendering are external collaborators: they feed
//! decoded `(device, quaternion, timestamp)` samples in and consume projected
//! frames and paddle states out. Everything in this crate is synchronous pure
//! computation over in-memory values; no call blocks or suspends.

pub mod error;
pub mod input;
pub mod math;
pub mod stream;
pub mod wireframe;

pub use error::MotionError;
pub use input::{Bounds, ControlAxis, MapperConfig, PaddleState, update_paddle};
pub use math::{EulerAngles, Quaternion};
pub use stream::{DeviceId, OrientationSample, OrientationTracker, TiltAxis};
pub use wireframe::{ProjectedFrame, Projection, WireframeModel, project};

/// Numeric tolerances and mapper defaults
pub mod consts {
    /// Magnitude below which a quaternion has no defined rotation
    pub const MIN_QUAT_MAGNITUDE: f32 = 1e-4;
    /// Squared-magnitude drift beyond which a composition is renormalized
    pub const UNIT_DRIFT_TOLERANCE: f32 = 1e-4;
    /// Allowed deviation from unit magnitude for ingested samples
    /// (the device streams unit quaternions; more than this is corruption)
    pub const SAMPLE_MAG_TOLERANCE: f32 = 0.05;
    /// Default smoothing window length (samples)
    pub const SMOOTHING_WINDOW: usize = 3;

    /// Minimum perspective depth; points at or behind the focal plane are
    /// clamped here instead of dividing toward zero
    pub const MIN_PROJECTION_DEPTH: f32 = 1e-3;

    /// Deadzone (radians, ~3 degrees of tilt maps to no movement)
    pub const PADDLE_DEADZONE: f32 = 0.052;
    /// Tilt producing full deflection to the track edge (radians, ~60 degrees)
    pub const PADDLE_FULL_TILT: f32 = 1.047;
    /// Exponential smoothing time constant (seconds)
    pub const PADDLE_SMOOTHING_TIME: f32 = 0.08;
    /// Paddle speed clamp (track units per second)
    pub const PADDLE_MAX_SPEED: f32 = 900.0;
}

/// Normalize an angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Whether `angle` lies within `threshold` radians of `center`, with
/// wraparound at ±π
#[inline]
pub fn angle_within(angle: f32, center: f32, threshold: f32) -> bool {
    normalize_angle(angle - center).abs() <= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-5);
        assert!((normalize_angle(-2.5 * PI) + 0.5 * PI).abs() < 1e-5);
        assert_eq!(normalize_angle(0.5), 0.5);
    }

    #[test]
    fn test_normalize_angle_seam() {
        // Odd multiples of π land on the ±π seam; f32 rounding decides the
        // side, so only magnitude and range are guaranteed
        for angle in [3.0 * PI, -3.0 * PI, PI, -PI] {
            let n = normalize_angle(angle);
            assert!((n.abs() - PI).abs() < 1e-5);
            assert!(n >= -PI && n < PI);
        }
    }

    #[test]
    fn test_angle_within_wraparound() {
        // 175° and -175° are 10° apart across the seam
        let a = 175.0_f32.to_radians();
        let b = -175.0_f32.to_radians();
        assert!(angle_within(a, b, 0.2));
        assert!(!angle_within(a, 0.0, 0.2));
    }
}
