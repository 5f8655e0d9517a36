//! Corridor footprint shapes.
//!
//! The footprint is the set of cells a room claims as corridor beyond its
//! core rectangle when stamped, keyed by its corridor rule. Coordinates are
//! relative to the room's top-left cell (x, y) and size (w, h); cells may
//! fall outside the grid, the caller's validity test handles that.

use crate::input::CorridorRule;

/// Footprint cells for a room candidate at `(x, y)` of size `(w, h)`.
pub(crate) fn footprint_cells(
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    rule: CorridorRule,
) -> Vec<(i32, i32)> {
    match rule {
        CorridorRule::None => Vec::new(),
        CorridorRule::OneSide => (0..w).map(|dx| (x + dx, y + h)).collect(),
        CorridorRule::TwoSides => {
            // L-shape: bottom row (one cell wider) plus right column.
            let mut cells: Vec<(i32, i32)> = (0..=w).map(|dx| (x + dx, y + h)).collect();
            cells.extend((0..h).map(|dy| (x + w, y + dy)));
            cells
        }
        CorridorRule::AllSides => {
            // Full one-cell halo, corners included.
            let mut cells = Vec::with_capacity((2 * (w + h) + 4) as usize);
            for dx in -1..=w {
                cells.push((x + dx, y - 1));
                cells.push((x + dx, y + h));
            }
            for dy in 0..h {
                cells.push((x - 1, y + dy));
                cells.push((x + w, y + dy));
            }
            cells
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_has_no_footprint() {
        assert!(footprint_cells(5, 5, 3, 2, CorridorRule::None).is_empty());
    }

    #[test]
    fn test_one_side_is_bottom_row() {
        let cells = footprint_cells(2, 3, 4, 2, CorridorRule::OneSide);
        assert_eq!(cells, vec![(2, 5), (3, 5), (4, 5), (5, 5)]);
    }

    #[test]
    fn test_two_sides_is_l_shape() {
        let cells = footprint_cells(2, 3, 3, 2, CorridorRule::TwoSides);
        // Bottom row spans w+1 cells, right column spans h cells.
        assert_eq!(cells.len(), 4 + 2);
        assert!(cells.contains(&(2, 5)));
        assert!(cells.contains(&(5, 5)));
        assert!(cells.contains(&(5, 3)));
        assert!(cells.contains(&(5, 4)));
        assert!(!cells.contains(&(2, 2)));
    }

    #[test]
    fn test_all_sides_is_full_halo() {
        let cells = footprint_cells(2, 2, 2, 2, CorridorRule::AllSides);
        // Halo of a 2x2 room: 4x4 ring = 12 cells.
        assert_eq!(cells.len(), 12);
        assert!(cells.contains(&(1, 1)), "top-left corner");
        assert!(cells.contains(&(4, 4)), "bottom-right corner");
        assert!(cells.contains(&(1, 2)), "left column");
        assert!(cells.contains(&(4, 3)), "right column");
        assert!(!cells.contains(&(2, 2)), "core cell is not footprint");
        assert!(!cells.contains(&(3, 3)), "core cell is not footprint");
    }
}
