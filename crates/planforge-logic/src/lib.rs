//! Pure geometric substrate for planforge.
//!
//! This crate contains everything the layout solvers need that is independent
//! of any particular solver: a deterministic seedable RNG, 2D vector and
//! bounding-box math, polygon operations, the integer grid buffer, and the
//! layout validation report. Functions take plain data and return results,
//! making them unit-testable and portable.

pub mod aabb;
pub mod grid;
pub mod polygon;
pub mod rng;
pub mod validation;
pub mod vec2;

pub use aabb::Aabb;
pub use grid::{GridBuffer, CELL_BLOCKED, CELL_CORRIDOR, CELL_EMPTY};
pub use rng::LayoutRng;
pub use validation::{LayoutIssue, RoomRect, Severity};
pub use vec2::Vec2;
