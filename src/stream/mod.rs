//! Orientation sample intake and per-device state
//!
//! The tracker is an explicit context object owned by the caller (the game
//! loop), not a process-wide global. It keeps only the latest sample per
//! device plus a small smoothing window: last write wins, stale overwrites
//! are intended behavior. Single-threaded; when device I/O runs on its own
//! thread, wrap the tracker in a `Mutex` on the hand-off boundary - one lock
//! is sufficient since only the latest value per device matters.

use std::collections::{HashMap, VecDeque};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{SAMPLE_MAG_TOLERANCE, SMOOTHING_WINDOW};
use crate::error::MotionError;
use crate::angle_within;
use crate::math::Quaternion;

/// Identifies one hardware unit in the two-device game scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId(pub u8);

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "device {}", self.0)
    }
}

/// Euler axis selector for facing queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TiltAxis {
    Yaw,
    Pitch,
    Roll,
}

/// One decoded orientation reading from a device
///
/// Immutable: later samples supersede, never mutate, earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationSample {
    pub device: DeviceId,
    pub quat: Quaternion,
    /// Monotonic timestamp in seconds (device-reported or receipt time)
    pub timestamp_s: f64,
}

impl OrientationSample {
    pub fn new(device: DeviceId, quat: Quaternion, timestamp_s: f64) -> Self {
        Self {
            device,
            quat,
            timestamp_s,
        }
    }
}

/// Per-device state inside the tracker
#[derive(Debug, Clone)]
struct TrackedDevice {
    latest: OrientationSample,
    /// Recent orientations for nlerp smoothing, newest last
    window: VecDeque<Quaternion>,
    /// Zero reference set by calibration; output is relative to it
    zero: Option<Quaternion>,
}

/// Latest-orientation store for one or more devices
#[derive(Debug, Clone)]
pub struct OrientationTracker {
    devices: HashMap<DeviceId, TrackedDevice>,
    window_len: usize,
}

impl Default for OrientationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl OrientationTracker {
    pub fn new() -> Self {
        Self::with_smoothing_window(SMOOTHING_WINDOW)
    }

    /// Tracker with a custom smoothing window length (minimum 1)
    pub fn with_smoothing_window(window_len: usize) -> Self {
        Self {
            devices: HashMap::new(),
            window_len: window_len.max(1),
        }
    }

    /// Record the latest sample for its device, overwriting any previous one
    ///
    /// Non-finite or non-unit-magnitude components are rejected with
    /// `InvalidSample`; the previous valid sample is retained.
    pub fn ingest(&mut self, sample: OrientationSample) -> Result<(), MotionError> {
        if !sample.quat.is_finite()
            || (sample.quat.length() - 1.0).abs() > SAMPLE_MAG_TOLERANCE
        {
            log::warn!(
                "rejected sample from {} at t={:.3}: non-finite or non-unit quaternion",
                sample.device,
                sample.timestamp_s
            );
            return Err(MotionError::InvalidSample {
                device: sample.device,
            });
        }

        // Magnitude already checked above, so this cannot be degenerate
        let quat = sample.quat.normalize()?;
        let sample = OrientationSample { quat, ..sample };

        let entry = self
            .devices
            .entry(sample.device)
            .or_insert_with(|| TrackedDevice {
                latest: sample,
                window: VecDeque::with_capacity(self.window_len),
                zero: None,
            });
        entry.latest = sample;
        entry.window.push_back(quat);
        while entry.window.len() > self.window_len {
            entry.window.pop_front();
        }
        Ok(())
    }

    fn tracked(&self, device: DeviceId) -> Result<&TrackedDevice, MotionError> {
        self.devices
            .get(&device)
            .ok_or(MotionError::NoSampleYet { device })
    }

    /// Apply the zero reference (if set): output is relative to "home"
    fn calibrated(&self, tracked: &TrackedDevice, quat: Quaternion) -> Quaternion {
        match tracked.zero {
            Some(zero) => zero.conjugate() * quat,
            None => quat,
        }
    }

    /// Most recent orientation for a device, relative to its zero reference
    pub fn current_orientation(&self, device: DeviceId) -> Result<Quaternion, MotionError> {
        let tracked = self.tracked(device)?;
        Ok(self.calibrated(tracked, tracked.latest.quat))
    }

    /// Nlerp average of the recent sample window, relative to the zero
    /// reference
    ///
    /// Smooths out sensor jitter at the cost of a little latency. Falls back
    /// to the latest sample if the window degenerates.
    pub fn smoothed_orientation(&self, device: DeviceId) -> Result<Quaternion, MotionError> {
        let tracked = self.tracked(device)?;
        let mut iter = tracked.window.iter();
        let mut mean = *iter.next().ok_or(MotionError::NoSampleYet { device })?;
        for (i, q) in iter.enumerate() {
            // Running mean: blend the (i+2)-th sample in at weight 1/(i+2)
            mean = match mean.nlerp(q, 1.0 / (i + 2) as f32) {
                Ok(m) => m,
                Err(_) => tracked.latest.quat,
            };
        }
        Ok(self.calibrated(tracked, mean))
    }

    /// (pitch, roll) in radians, derived from the current orientation
    pub fn current_tilt(&self, device: DeviceId) -> Result<(f32, f32), MotionError> {
        let euler = self.current_orientation(device)?.to_euler();
        Ok((euler.pitch, euler.roll))
    }

    /// The latest raw sample, if any (timestamp inspection, recording)
    pub fn latest_sample(&self, device: DeviceId) -> Option<&OrientationSample> {
        self.devices.get(&device).map(|t| &t.latest)
    }

    pub fn has_sample(&self, device: DeviceId) -> bool {
        self.devices.contains_key(&device)
    }

    /// Store the current raw orientation as the device's zero reference
    ///
    /// Subsequent queries return orientations relative to this pose.
    pub fn set_zero(&mut self, device: DeviceId) -> Result<(), MotionError> {
        let zero = self.tracked(device)?.latest.quat;
        // tracked() proved the entry exists
        if let Some(entry) = self.devices.get_mut(&device) {
            entry.zero = Some(zero);
        }
        log::info!("zero reference set for {device}");
        Ok(())
    }

    /// Drop the zero reference; queries return absolute orientation again
    pub fn clear_zero(&mut self, device: DeviceId) {
        if let Some(entry) = self.devices.get_mut(&device) {
            entry.zero = None;
            log::info!("zero reference cleared for {device}");
        }
    }

    /// Unit vector the device is pointing at (+X in device space, rotated)
    pub fn pointing_at(&self, device: DeviceId) -> Result<Vec3, MotionError> {
        Ok(self.current_orientation(device)?.rotate_vector(Vec3::X))
    }

    /// Whether the device's tilt on `axis` lies within `threshold` radians
    /// of `direction`, with wraparound at ±π
    pub fn is_facing(
        &self,
        device: DeviceId,
        axis: TiltAxis,
        direction: f32,
        threshold: f32,
    ) -> Result<bool, MotionError> {
        let euler = self.current_orientation(device)?.to_euler();
        let angle = match axis {
            TiltAxis::Yaw => euler.yaw,
            TiltAxis::Pitch => euler.pitch,
            TiltAxis::Roll => euler.roll,
        };
        Ok(angle_within(angle, direction, threshold))
    }
}
