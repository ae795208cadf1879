//! Tilt-to-paddle input mapping
//!
//! Maps a device's tilt to a paddle position on a 1D track. Must be pure and
//! deterministic: same (paddle, tilt, config, bounds, dt) always produces the
//! same output, and the output position is always inside bounds - sensor
//! noise, extreme tilt, and non-finite input included.

use serde::{Deserialize, Serialize};

use crate::consts::{PADDLE_DEADZONE, PADDLE_FULL_TILT, PADDLE_MAX_SPEED, PADDLE_SMOOTHING_TIME};

/// 1D track the paddle moves on (e.g. screen pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
}

impl Bounds {
    pub fn new(min: f32, max: f32) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    #[inline]
    pub fn center(&self) -> f32 {
        (self.min + self.max) / 2.0
    }

    #[inline]
    pub fn half_span(&self) -> f32 {
        (self.max - self.min) / 2.0
    }
}

/// Which tilt angle drives the paddle
///
/// Roll is the default: players tilt the device sideways to move, the way
/// the original two-device pong plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlAxis {
    #[default]
    Roll,
    Pitch,
}

/// Per-device input mapping configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Tilt angle driving the paddle
    pub axis: ControlAxis,
    /// Tilt below this magnitude (radians) maps to no movement
    pub deadzone: f32,
    /// Tilt (radians) producing full deflection to the track edge
    pub full_tilt: f32,
    /// Exponential smoothing time constant (seconds); <= 0 disables smoothing
    pub smoothing_time: f32,
    /// Paddle speed clamp (track units per second)
    pub max_speed: f32,
    /// Flip the tilt direction
    pub invert: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            axis: ControlAxis::Roll,
            deadzone: PADDLE_DEADZONE,
            full_tilt: PADDLE_FULL_TILT,
            smoothing_time: PADDLE_SMOOTHING_TIME,
            max_speed: PADDLE_MAX_SPEED,
            invert: false,
        }
    }
}

/// Paddle position and velocity on its track
///
/// Immutable value owned by the game loop; `update_paddle` returns a new one
/// each tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PaddleState {
    pub pos: f32,
    pub vel: f32,
}

impl PaddleState {
    /// Paddle at rest in the middle of the track
    pub fn centered(bounds: Bounds) -> Self {
        Self {
            pos: bounds.center(),
            vel: 0.0,
        }
    }
}

/// Normalized deflection in [-1, 1] for a tilt angle, with deadzone
fn deflection(tilt: f32, config: &MapperConfig) -> f32 {
    let magnitude = tilt.abs();
    if magnitude <= config.deadzone {
        return 0.0;
    }
    let usable = (config.full_tilt - config.deadzone).max(f32::EPSILON);
    let t = ((magnitude - config.deadzone) / usable).clamp(0.0, 1.0);
    let signed = t.copysign(tilt);
    if config.invert { -signed } else { signed }
}

/// Advance the paddle one tick toward the tilt-selected target
///
/// Deadzone, then a linear map of tilt to a target position within `bounds`,
/// then exponential smoothing and a velocity clamp so sensor noise does not
/// jitter the paddle. Non-finite tilt holds the current position while the
/// velocity decays to zero.
pub fn update_paddle(
    paddle: PaddleState,
    tilt: (f32, f32),
    config: &MapperConfig,
    bounds: Bounds,
    dt: f32,
) -> PaddleState {
    if !(dt > 0.0) || !dt.is_finite() {
        return PaddleState {
            pos: bounds.clamp(paddle.pos),
            vel: 0.0,
        };
    }

    let (pitch, roll) = tilt;
    let angle = match config.axis {
        ControlAxis::Roll => roll,
        ControlAxis::Pitch => pitch,
    };

    let target = if angle.is_finite() {
        bounds.center() + deflection(angle, config) * bounds.half_span()
    } else {
        bounds.clamp(paddle.pos)
    };

    // Exponential smoothing toward the target
    let alpha = if config.smoothing_time > 0.0 {
        1.0 - (-dt / config.smoothing_time).exp()
    } else {
        1.0
    };
    let mut step = (target - bounds.clamp(paddle.pos)) * alpha;

    // Velocity clamp
    let max_step = config.max_speed * dt;
    step = step.clamp(-max_step, max_step);

    let pos = bounds.clamp(bounds.clamp(paddle.pos) + step);
    PaddleState {
        pos,
        vel: step / dt,
    }
}
