//! Error taxonomy for the motion core
//!
//! Every error here is recoverable at the call site: the render/game loop
//! skips the affected frame or device and keeps running. Fatal conditions
//! (lost device connection etc.) belong to the I/O layer, not this crate.

use thiserror::Error;

use crate::stream::DeviceId;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MotionError {
    /// Quaternion magnitude is too small to define a rotation
    #[error("quaternion magnitude below epsilon, rotation undefined")]
    DegenerateRotation,

    /// Ingested sample had non-finite or out-of-range components
    #[error("invalid orientation sample from {device}: non-finite or non-unit components")]
    InvalidSample { device: DeviceId },

    /// Query before the first sample arrived for this device
    #[error("no orientation sample received yet from {device}")]
    NoSampleYet { device: DeviceId },
}
