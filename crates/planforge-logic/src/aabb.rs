//! Axis-aligned bounding boxes.

use serde::{Deserialize, Serialize};

use crate::vec2::Vec2;

/// Axis-aligned bounding box in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Aabb {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Box of a rectangle given by its top-left corner and size.
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Sweep the vertices of a polygon. An empty polygon yields a
    /// degenerate box at the origin.
    pub fn from_polygon(polygon: &[Vec2]) -> Self {
        let Some(&first) = polygon.first() else {
            return Self::new(0.0, 0.0, 0.0, 0.0);
        };
        let mut bb = Self::new(first.x, first.y, first.x, first.y);
        for p in &polygon[1..] {
            bb.min_x = bb.min_x.min(p.x);
            bb.min_y = bb.min_y.min(p.y);
            bb.max_x = bb.max_x.max(p.x);
            bb.max_y = bb.max_y.max(p.y);
        }
        bb
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Touching edges count as intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(self.max_x < other.min_x
            || self.min_x > other.max_x
            || self.max_y < other.min_y
            || self.min_y > other.max_y)
    }

    /// Signed overlap extent along x; non-positive means no overlap.
    pub fn overlap_x(&self, other: &Aabb) -> f64 {
        self.max_x.min(other.max_x) - self.min_x.max(other.min_x)
    }

    /// Signed overlap extent along y; non-positive means no overlap.
    pub fn overlap_y(&self, other: &Aabb) -> f64 {
        self.max_y.min(other.max_y) - self.min_y.max(other.min_y)
    }

    /// Area of the overlap region, zero when disjoint.
    pub fn overlap_area(&self, other: &Aabb) -> f64 {
        let ox = self.overlap_x(other);
        let oy = self.overlap_y(other);
        if ox > 0.0 && oy > 0.0 {
            ox * oy
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_polygon_sweeps_vertices() {
        let poly = vec![
            Vec2::new(1.0, 2.0),
            Vec2::new(-3.0, 5.0),
            Vec2::new(4.0, -1.0),
        ];
        let bb = Aabb::from_polygon(&poly);
        assert_eq!(bb, Aabb::new(-3.0, -1.0, 4.0, 5.0));
    }

    #[test]
    fn test_intersects_disjoint_and_touching() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(11.0, 0.0, 20.0, 10.0);
        let c = Aabb::new(10.0, 0.0, 20.0, 10.0); // shares an edge
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
        assert!(a.intersects(&a));
    }

    #[test]
    fn test_overlap_extents() {
        let a = Aabb::from_rect(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::from_rect(6.0, 8.0, 10.0, 10.0);
        assert_eq!(a.overlap_x(&b), 4.0);
        assert_eq!(a.overlap_y(&b), 2.0);
        assert_eq!(a.overlap_area(&b), 8.0);

        let far = Aabb::from_rect(50.0, 50.0, 1.0, 1.0);
        assert!(a.overlap_x(&far) < 0.0);
        assert_eq!(a.overlap_area(&far), 0.0);
    }
}
