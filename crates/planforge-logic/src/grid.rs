//! Integer cell grid backing the discrete layout solver.
//!
//! Cell values: `0` empty, `-1` corridor, `-2` blocked (outside the site
//! boundary, and the sentinel for out-of-range reads), `>= 1` a 1-based room
//! index. Out-of-range writes are silently dropped; that is contract, not
//! defect, since callers scan candidate rectangles without pre-clamping.

use serde::{Deserialize, Serialize};

use crate::polygon;
use crate::vec2::Vec2;

pub const CELL_EMPTY: i32 = 0;
pub const CELL_CORRIDOR: i32 = -1;
pub const CELL_BLOCKED: i32 = -2;

/// Fixed-size row-major cell grid. Dimensions never change after
/// construction; `clone` and `clear` preserve them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBuffer {
    width: i32,
    height: i32,
    cells: Vec<i32>,
}

impl GridBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            cells: vec![CELL_EMPTY; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            None
        } else {
            Some((y * self.width + x) as usize)
        }
    }

    /// Cell value, `CELL_BLOCKED` for out-of-range coordinates.
    pub fn get(&self, x: i32, y: i32) -> i32 {
        match self.index(x, y) {
            Some(i) => self.cells[i],
            None => CELL_BLOCKED,
        }
    }

    /// Set a cell; out-of-range writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, value: i32) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = value;
        }
    }

    /// Reset every cell to empty, keeping dimensions.
    pub fn clear(&mut self) {
        self.cells.fill(CELL_EMPTY);
    }

    /// Mark every cell whose center lies outside `polygon` as blocked.
    /// Cell (x, y) has its center at `origin + (x + 0.5, y + 0.5) * resolution`
    /// in world coordinates. Interior cells are left untouched.
    pub fn rasterize_polygon(&mut self, polygon: &[Vec2], origin: Vec2, resolution: f64) {
        for y in 0..self.height {
            for x in 0..self.width {
                let center = Vec2::new(
                    origin.x + (x as f64 + 0.5) * resolution,
                    origin.y + (y as f64 + 0.5) * resolution,
                );
                if !polygon::point_in_polygon(center, polygon) {
                    self.set(x, y, CELL_BLOCKED);
                }
            }
        }
    }

    /// Number of cells holding `value`.
    pub fn count(&self, value: i32) -> usize {
        self.cells.iter().filter(|&&c| c == value).count()
    }

    /// Raw row-major cell slice, for observers and snapshot diffing.
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }
}
