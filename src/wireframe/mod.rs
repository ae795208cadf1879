//! 3D wireframe models and their 2D projection
//!
//! A wireframe is vertices plus connecting edges, rendered as line segments
//! after rotation and projection. Everything here is pure: `project` has no
//! shared mutable state and is safe to call every render tick.

pub mod model;
pub mod project;

pub use model::WireframeModel;
pub use project::{ProjectedFrame, Projection, project};
