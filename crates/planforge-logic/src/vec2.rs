//! 2D vector used for polygon vertices and continuous room coordinates.

use serde::{Deserialize, Serialize};

/// Threshold below which a vector is considered degenerate by `normalize`.
const NORMALIZE_EPSILON: f64 = 1e-5;

/// Pair of floating-point coordinates. Plain `Copy` value math; nothing here
/// touches the heap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(self, factor: f64) -> Vec2 {
        Vec2::new(self.x * factor, self.y * factor)
    }

    pub fn magnitude(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f64 {
        self.sub(other).magnitude()
    }

    pub fn distance_sq(self, other: Vec2) -> f64 {
        let d = self.sub(other);
        d.x * d.x + d.y * d.y
    }

    /// Unit vector in the same direction, or (0,0) for near-zero input.
    pub fn normalize(self) -> Vec2 {
        let mag = self.magnitude();
        if mag < NORMALIZE_EPSILON {
            Vec2::ZERO
        } else {
            self.scale(1.0 / mag)
        }
    }
}
