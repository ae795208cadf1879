//! Rotation + projection of wireframe models to screen space
//!
//! `project` is a pure function over in-memory values: it applies the
//! rotation basis to every model point, then a projection, and returns the
//! 2D points with the unchanged edge list. Recomputed once per render tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_PROJECTION_DEPTH;
use crate::math::Quaternion;
use crate::wireframe::WireframeModel;

/// How 3D points collapse to 2D
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    /// Drop the Z axis, scale X/Y
    Orthographic { scale: f32 },
    /// Divide by (z + focal_distance), clamped to at least `min_depth`
    /// so points at or behind the focal plane cannot blow up
    Perspective { focal_distance: f32, min_depth: f32 },
}

impl Projection {
    /// Perspective projection with the default near-plane clamp
    pub fn perspective(focal_distance: f32) -> Self {
        Self::Perspective {
            focal_distance,
            min_depth: MIN_PROJECTION_DEPTH,
        }
    }

    /// Project a single rotated point
    #[inline]
    pub fn apply(&self, point: glam::Vec3) -> Vec2 {
        match *self {
            Projection::Orthographic { scale } => Vec2::new(point.x, point.y) * scale,
            Projection::Perspective {
                focal_distance,
                min_depth,
            } => {
                let depth = (point.z + focal_distance).max(min_depth);
                Vec2::new(point.x, point.y) * (focal_distance / depth)
            }
        }
    }
}

/// 2D points plus the model's edge list, valid for one render tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedFrame {
    pub points: Vec<Vec2>,
    pub edges: Vec<[usize; 2]>,
}

/// Rotate `model` by `rotation` and project to screen space
pub fn project(
    model: &WireframeModel,
    rotation: Quaternion,
    projection: &Projection,
) -> ProjectedFrame {
    let basis = rotation.to_rotation_matrix();
    let points = model
        .points()
        .iter()
        .map(|&p| projection.apply(basis * p))
        .collect();
    ProjectedFrame {
        points,
        edges: model.edges().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_identity_rotation_is_planar_projection() {
        let square = WireframeModel::square(2.0);
        let ortho = Projection::Orthographic { scale: 1.0 };

        let frame = project(&square, Quaternion::IDENTITY, &ortho);
        for (projected, original) in frame.points.iter().zip(square.points()) {
            assert!((projected.x - original.x).abs() < EPS);
            assert!((projected.y - original.y).abs() < EPS);
        }
        assert_eq!(frame.edges, square.edges());
    }

    #[test]
    fn test_rotation_moves_points() {
        // 90° about Z sends the point at +X to +Y
        let model = WireframeModel::new(vec![Vec3::X], vec![]);
        let rot = Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2).unwrap();
        let ortho = Projection::Orthographic { scale: 1.0 };

        let frame = project(&model, rot, &ortho);
        assert!(frame.points[0].x.abs() < EPS);
        assert!((frame.points[0].y - 1.0).abs() < EPS);
    }

    #[test]
    fn test_perspective_shrinks_with_depth() {
        let near = Vec3::new(1.0, 0.0, -1.0);
        let far = Vec3::new(1.0, 0.0, 1.0);
        let persp = Projection::perspective(4.0);

        let n = persp.apply(near);
        let f = persp.apply(far);
        assert!(n.x > f.x, "nearer point projects larger");
    }

    #[test]
    fn test_perspective_near_plane_clamp() {
        // Point exactly at the focal plane would divide by zero
        let persp = Projection::perspective(2.0);
        let p = persp.apply(Vec3::new(1.0, 1.0, -2.0));
        assert!(p.x.is_finite() && p.y.is_finite());

        // Behind the focal plane still finite
        let p = persp.apply(Vec3::new(1.0, 1.0, -10.0));
        assert!(p.x.is_finite() && p.y.is_finite());
    }

    #[test]
    fn test_project_is_deterministic() {
        let cube = WireframeModel::cube(1.0);
        let rot = Quaternion::from_euler(0.3, -0.7, 1.1);
        let persp = Projection::perspective(4.0);

        let a = project(&cube, rot, &persp);
        let b = project(&cube, rot, &persp);
        assert_eq!(a, b);
    }
}
