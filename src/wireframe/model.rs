//! Rigid wireframe shapes in model space
//!
//! A model is a fixed set of 3D points and an edge list (pairs of point
//! indices), constant for the process lifetime. All constructors center the
//! shape on the origin so device rotation reads naturally on screen.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A rigid 3D shape: vertices plus index pairs defining its line segments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireframeModel {
    points: Vec<Vec3>,
    edges: Vec<[usize; 2]>,
}

impl WireframeModel {
    /// Build a model from explicit geometry
    ///
    /// Edges referencing out-of-range points are dropped.
    pub fn new(points: Vec<Vec3>, edges: Vec<[usize; 2]>) -> Self {
        let n = points.len();
        let edges = edges
            .into_iter()
            .filter(|[a, b]| *a < n && *b < n)
            .collect();
        Self { points, edges }
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    #[inline]
    pub fn edges(&self) -> &[[usize; 2]] {
        &self.edges
    }

    /// Axis-aligned cube of the given edge length, centered on the origin
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let points = vec![
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ];
        let edges = vec![
            // Back face
            [0, 1],
            [1, 2],
            [2, 3],
            [3, 0],
            // Front face
            [4, 5],
            [5, 6],
            [6, 7],
            [7, 4],
            // Connecting sides
            [0, 4],
            [1, 5],
            [2, 6],
            [3, 7],
        ];
        Self::new(points, edges)
    }

    /// The three coordinate axes, each spanning ±`half_extent`
    pub fn axes(half_extent: f32) -> Self {
        let h = half_extent;
        let points = vec![
            Vec3::new(-h, 0.0, 0.0),
            Vec3::new(h, 0.0, 0.0),
            Vec3::new(0.0, -h, 0.0),
            Vec3::new(0.0, h, 0.0),
            Vec3::new(0.0, 0.0, -h),
            Vec3::new(0.0, 0.0, h),
        ];
        let edges = vec![[0, 1], [2, 3], [4, 5]];
        Self::new(points, edges)
    }

    /// Square in the XY plane, centered on the origin
    pub fn square(size: f32) -> Self {
        let h = size / 2.0;
        let points = vec![
            Vec3::new(-h, -h, 0.0),
            Vec3::new(h, -h, 0.0),
            Vec3::new(h, h, 0.0),
            Vec3::new(-h, h, 0.0),
        ];
        let edges = vec![[0, 1], [1, 2], [2, 3], [3, 0]];
        Self::new(points, edges)
    }

    /// Circle in the XY plane approximated by `segments` line segments
    pub fn circle(radius: f32, segments: usize) -> Self {
        let segments = segments.max(3);
        let points = (0..segments)
            .map(|i| {
                let theta = std::f32::consts::TAU * i as f32 / segments as f32;
                Vec3::new(radius * theta.cos(), radius * theta.sin(), 0.0)
            })
            .collect();
        let edges = (0..segments).map(|i| [i, (i + 1) % segments]).collect();
        Self::new(points, edges)
    }
}
