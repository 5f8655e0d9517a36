//! Polygon operations over vertex slices.
//!
//! Polygons are ordered vertex sequences, implicitly closed, in either
//! winding. The intersection-area path is specialized for the one case the
//! solvers hit in hot loops (axis-aligned rectangle pairs); everything else
//! goes through Sutherland-Hodgman clipping against a convex clipper.

use crate::aabb::Aabb;
use crate::vec2::Vec2;

const AXIS_EPSILON: f64 = 1e-9;

/// 4-vertex rectangle polygon from top-left corner and size.
pub fn create_rectangle(x: f64, y: f64, width: f64, height: f64) -> Vec<Vec2> {
    vec![
        Vec2::new(x, y),
        Vec2::new(x + width, y),
        Vec2::new(x + width, y + height),
        Vec2::new(x, y + height),
    ]
}

/// Shoelace area with winding sign.
pub fn signed_area(polygon: &[Vec2]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        sum += (polygon[j].x + polygon[i].x) * (polygon[j].y - polygon[i].y);
        j = i;
    }
    sum / 2.0
}

/// Absolute polygon area, winding-agnostic.
pub fn area(polygon: &[Vec2]) -> f64 {
    signed_area(polygon).abs()
}

/// Ray casting to +x with the half-open edge rule `(yi > p.y) != (yj > p.y)`.
/// Winding-agnostic; points exactly on a horizontal edge resolve by that
/// rule, not by geometric containment.
pub fn point_in_polygon(p: Vec2, polygon: &[Vec2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi.y > p.y) != (pj.y > p.y)
            && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// True when the polygon is a 4-vertex axis-aligned rectangle.
pub fn is_axis_aligned_rect(polygon: &[Vec2]) -> bool {
    if polygon.len() != 4 {
        return false;
    }
    let mut j = 3;
    for i in 0..4 {
        let dx = (polygon[i].x - polygon[j].x).abs();
        let dy = (polygon[i].y - polygon[j].y).abs();
        if dx > AXIS_EPSILON && dy > AXIS_EPSILON {
            return false;
        }
        j = i;
    }
    true
}

/// Area of the intersection of two polygons.
///
/// Rectangle-rectangle pairs reduce to AABB overlap. A rectangle against an
/// arbitrary simple polygon clips the polygon by the rectangle's half-planes.
/// The general fallback clips `a` against `b` and requires `b` convex.
pub fn intersection_area(a: &[Vec2], b: &[Vec2]) -> f64 {
    let a_rect = is_axis_aligned_rect(a);
    let b_rect = is_axis_aligned_rect(b);
    if a_rect && b_rect {
        return Aabb::from_polygon(a).overlap_area(&Aabb::from_polygon(b));
    }
    if a_rect {
        return area(&clip_convex(b, a));
    }
    area(&clip_convex(a, b))
}

/// Sutherland-Hodgman: clip `subject` (any simple polygon) against a convex
/// `clipper`. Output may carry zero-area bridge edges for concave subjects;
/// the shoelace area of the result is still the intersection area.
pub fn clip_convex(subject: &[Vec2], clipper: &[Vec2]) -> Vec<Vec2> {
    if subject.len() < 3 || clipper.len() < 3 {
        return Vec::new();
    }
    let ccw = signed_area(clipper) >= 0.0;
    let mut output = subject.to_vec();
    let n = clipper.len();
    let mut j = n - 1;
    for i in 0..n {
        let edge_a = clipper[j];
        let edge_b = clipper[i];
        j = i;
        let input = std::mem::take(&mut output);
        if input.is_empty() {
            break;
        }
        let mut prev = *input.last().expect("non-empty input ring");
        for &cur in &input {
            let cur_in = edge_side(edge_a, edge_b, cur, ccw);
            let prev_in = edge_side(edge_a, edge_b, prev, ccw);
            if cur_in {
                if !prev_in {
                    output.push(line_intersection(prev, cur, edge_a, edge_b));
                }
                output.push(cur);
            } else if prev_in {
                output.push(line_intersection(prev, cur, edge_a, edge_b));
            }
            prev = cur;
        }
    }
    output
}

fn edge_side(a: Vec2, b: Vec2, p: Vec2, ccw: bool) -> bool {
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    if ccw {
        cross >= 0.0
    } else {
        cross <= 0.0
    }
}

fn line_intersection(p1: Vec2, p2: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let d1 = p2.sub(p1);
    let d2 = b.sub(a);
    let denom = d1.x * d2.y - d1.y * d2.x;
    if denom.abs() < AXIS_EPSILON {
        return p2;
    }
    let t = ((a.x - p1.x) * d2.y - (a.y - p1.y) * d2.x) / denom;
    p1.add(d1.scale(t))
}

/// Closest point on the polygon outline to `p`: project onto every edge
/// segment clamped to [0, 1], keep the minimum squared distance.
pub fn closest_point_on_boundary(p: Vec2, polygon: &[Vec2]) -> Vec2 {
    match polygon.len() {
        0 => return p,
        1 => return polygon[0],
        _ => {}
    }
    let mut best = polygon[0];
    let mut best_dist_sq = f64::MAX;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let a = polygon[j];
        let b = polygon[i];
        j = i;
        let edge = b.sub(a);
        let len_sq = edge.x * edge.x + edge.y * edge.y;
        let t = if len_sq < AXIS_EPSILON {
            0.0
        } else {
            (((p.x - a.x) * edge.x + (p.y - a.y) * edge.y) / len_sq).clamp(0.0, 1.0)
        };
        let candidate = a.add(edge.scale(t));
        let dist_sq = p.distance_sq(candidate);
        if dist_sq < best_dist_sq {
            best_dist_sq = dist_sq;
            best = candidate;
        }
    }
    best
}
