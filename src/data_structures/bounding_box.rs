//! Axis-aligned bounding boxes.

use std::ops::Mul;

use cgmath::{Matrix4, Vector3};

use crate::data_structures::vertex::VertexDescriptor;

/// Axis-aligned box given by its per-axis minimum and maximum.
///
/// An empty vertex set produces the degenerate box at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl BoundingBox {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    pub fn from_vertices(vertices: &[VertexDescriptor]) -> Self {
        let mut bounding_box = Self::default();
        bounding_box.compute(vertices);
        bounding_box
    }

    /// Resets `self` to the bounds of `vertices`. Previous bounds are discarded.
    pub fn compute(&mut self, vertices: &[VertexDescriptor]) {
        let Some(first) = vertices.first() else {
            *self = Self::default();
            return;
        };
        let mut min = first.position();
        let mut max = min;
        for vertex in &vertices[1..] {
            let p = vertex.position();
            min = Vector3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = Vector3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }
        self.min = min;
        self.max = max;
    }

    pub fn corners(&self) -> [Vector3<f32>; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vector3::new(a.x, a.y, a.z),
            Vector3::new(b.x, a.y, a.z),
            Vector3::new(a.x, b.y, a.z),
            Vector3::new(b.x, b.y, a.z),
            Vector3::new(a.x, a.y, b.z),
            Vector3::new(b.x, a.y, b.z),
            Vector3::new(a.x, b.y, b.z),
            Vector3::new(b.x, b.y, b.z),
        ]
    }

    /// The box enclosing all eight corners of `self` after applying `matrix`.
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Self {
        let mut corners = self
            .corners()
            .into_iter()
            .map(|corner| (*matrix * corner.extend(1.0)).truncate());
        // corners() always yields eight points
        let first = corners.next().unwrap_or(self.min);
        let (min, max) = corners.fold((first, first), |(min, max), p| {
            (
                Vector3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Vector3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            )
        });
        Self { min, max }
    }

    pub fn union(&self, other: &BoundingBox) -> Self {
        Self {
            min: Vector3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Vector3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            min: Vector3::new(0.0, 0.0, 0.0),
            max: Vector3::new(0.0, 0.0, 0.0),
        }
    }
}

impl Mul<BoundingBox> for Matrix4<f32> {
    type Output = BoundingBox;

    fn mul(self, rhs: BoundingBox) -> Self::Output {
        rhs.transformed(&self)
    }
}
