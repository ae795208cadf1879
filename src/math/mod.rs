//! Orientation math
//!
//! The quaternion primitive underlying everything else in this crate.
//! All angles are radians; convert at the display boundary only.

pub mod quat;

pub use quat::{EulerAngles, Quaternion};
