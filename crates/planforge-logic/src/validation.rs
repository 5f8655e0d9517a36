//! Geometry validation for generated layouts.
//!
//! Pure functions that take placed-room data and return validation issues.
//! No solver dependency: works with plain structs, never panics, never
//! mutates.

use serde::{Deserialize, Serialize};

use crate::polygon;
use crate::vec2::Vec2;

/// Minimal room data needed for geometry validation, in world coordinates
/// with `x`/`y` the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRect {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RoomRect {
    pub fn new(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A layout validation issue.
#[derive(Debug, Clone)]
pub struct LayoutIssue {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Issue severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Check that no room has zero or negative dimensions.
pub fn check_room_dimensions(rooms: &[RoomRect]) -> Vec<LayoutIssue> {
    let mut issues = Vec::new();
    for r in rooms {
        if r.width <= 0.0 || r.height <= 0.0 {
            issues.push(LayoutIssue {
                category: "room_geometry",
                severity: Severity::Error,
                message: format!(
                    "Room '{}' has non-positive dimensions: {}x{}",
                    r.id, r.width, r.height
                ),
            });
        }
    }
    issues
}

/// Check that room aspect ratios stay below `max_ratio` (warning only).
pub fn check_aspect_ratios(rooms: &[RoomRect], max_ratio: f64) -> Vec<LayoutIssue> {
    let mut issues = Vec::new();
    for r in rooms {
        if r.width <= 0.0 || r.height <= 0.0 {
            continue; // caught by dimension check
        }
        let ratio = if r.width > r.height {
            r.width / r.height
        } else {
            r.height / r.width
        };
        if ratio > max_ratio {
            issues.push(LayoutIssue {
                category: "room_geometry",
                severity: Severity::Warning,
                message: format!(
                    "Room '{}' has extreme aspect ratio {:.1}:1 ({:.1}x{:.1})",
                    r.id, ratio, r.width, r.height
                ),
            });
        }
    }
    issues
}

/// Check rooms don't extend outside the boundary polygon. A room counts as
/// contained when all four corners, pulled inward by `tolerance`, pass the
/// point-in-polygon test.
pub fn check_rooms_within_boundary(
    rooms: &[RoomRect],
    boundary: &[Vec2],
    tolerance: f64,
) -> Vec<LayoutIssue> {
    let mut issues = Vec::new();
    for r in rooms {
        let x0 = r.x + tolerance;
        let y0 = r.y + tolerance;
        let x1 = r.x + r.width - tolerance;
        let y1 = r.y + r.height - tolerance;
        let corners = [
            Vec2::new(x0, y0),
            Vec2::new(x1, y0),
            Vec2::new(x1, y1),
            Vec2::new(x0, y1),
        ];
        if corners
            .iter()
            .any(|&c| !polygon::point_in_polygon(c, boundary))
        {
            issues.push(LayoutIssue {
                category: "room_geometry",
                severity: Severity::Error,
                message: format!(
                    "Room '{}' extends outside the boundary: ({:.1},{:.1})->({:.1},{:.1})",
                    r.id,
                    r.x,
                    r.y,
                    r.x + r.width,
                    r.y + r.height
                ),
            });
        }
    }
    issues
}

/// AABB overlap test over all room pairs, allowing `tolerance` of touching.
pub fn check_room_overlaps(rooms: &[RoomRect], tolerance: f64) -> Vec<LayoutIssue> {
    let mut issues = Vec::new();
    for i in 0..rooms.len() {
        for j in (i + 1)..rooms.len() {
            let a = &rooms[i];
            let b = &rooms[j];
            let overlap_x = (a.x + a.width - tolerance) > b.x && (b.x + b.width - tolerance) > a.x;
            let overlap_y =
                (a.y + a.height - tolerance) > b.y && (b.y + b.height - tolerance) > a.y;
            if overlap_x && overlap_y {
                issues.push(LayoutIssue {
                    category: "room_overlap",
                    severity: Severity::Error,
                    message: format!("Rooms '{}' and '{}' overlap", a.id, b.id),
                });
            }
        }
    }
    issues
}

/// Run all geometry validations and return combined results.
pub fn validate_all(rooms: &[RoomRect], boundary: &[Vec2]) -> Vec<LayoutIssue> {
    let mut all = Vec::new();
    all.extend(check_room_dimensions(rooms));
    all.extend(check_aspect_ratios(rooms, 10.0));
    all.extend(check_rooms_within_boundary(rooms, boundary, 0.1));
    all.extend(check_room_overlaps(rooms, 0.1));
    all
}
