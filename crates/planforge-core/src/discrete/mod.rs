//! Discrete topological solver.
//!
//! Places rooms as rectangles on an integer grid and carves a single
//! connected corridor network from a start cell. The placement rule is
//! "magnetizing": every room's corridor footprint must touch the existing
//! corridor network, so the network grows as a spanning structure instead of
//! fragmenting. A greedy degree-ordered pass seeds the layout; refinement
//! rounds then remove a random subset of rooms, re-place everything that is
//! missing, and keep the result only when the global score improves.

mod footprint;

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use planforge_logic::grid::{CELL_CORRIDOR, CELL_EMPTY};
use planforge_logic::{Aabb, GridBuffer, LayoutRng, RoomRect, Vec2};

use crate::config::DiscreteConfig;
use crate::input::{
    self, Adjacency, CorridorRule, PlanError, ResolvedAdjacency, RoomRequest,
};
use footprint::footprint_cells;

/// A room stamped onto the grid, in grid coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedRoom {
    pub id: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// 1-based index stamped into core cells.
    pub room_index: i32,
    pub corridor_rule: CorridorRule,
}

impl PlacedRoom {
    fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }
}

/// Discrete grid solver. Owns its grid and placed-room map from
/// construction to drop; `solve()` runs to completion in one call.
pub struct DiscreteSolver {
    boundary: Vec<Vec2>,
    rooms: Vec<RoomRequest>,
    adjacencies: Vec<ResolvedAdjacency>,
    id_index: HashMap<String, usize>,
    config: DiscreteConfig,
    rng: LayoutRng,
    grid: GridBuffer,
    origin: Vec2,
    start: (i32, i32),
    placed: Vec<Option<PlacedRoom>>,
    best_score: f64,
    connected: bool,
    solved: bool,
}

impl DiscreteSolver {
    /// Build a solver; validates all inputs up front.
    pub fn new(
        boundary: Vec<Vec2>,
        rooms: Vec<RoomRequest>,
        adjacencies: &[Adjacency],
        config: DiscreteConfig,
        seed: u32,
    ) -> Result<Self, PlanError> {
        let id_index = input::validate_inputs(boundary.len(), &rooms)?;
        let resolved = input::resolve_adjacencies(adjacencies, &id_index)?;

        let bounds = Aabb::from_polygon(&boundary);
        let resolution = config.grid_resolution;
        let width = ((bounds.width() / resolution).ceil() as u32).max(1);
        let height = ((bounds.height() / resolution).ceil() as u32).max(1);
        let grid = GridBuffer::new(width, height);
        let start = config
            .start_point
            .unwrap_or((width as i32 / 2, height as i32 / 2));

        Ok(Self {
            origin: Vec2::new(bounds.min_x, bounds.min_y),
            boundary,
            rooms,
            adjacencies: resolved,
            id_index,
            config,
            rng: LayoutRng::new(seed),
            grid,
            start,
            placed: Vec::new(),
            best_score: f64::NEG_INFINITY,
            connected: false,
            solved: false,
        })
    }

    /// Same solver with a seed drawn from OS entropy.
    pub fn new_from_entropy(
        boundary: Vec<Vec2>,
        rooms: Vec<RoomRequest>,
        adjacencies: &[Adjacency],
        config: DiscreteConfig,
    ) -> Result<Self, PlanError> {
        let mut solver = Self::new(boundary, rooms, adjacencies, config, 0)?;
        solver.rng = LayoutRng::from_entropy();
        Ok(solver)
    }

    /// Run the full pipeline: rasterize, greedy placement, refinement,
    /// pruning, connectivity validation. Idempotent after the first call.
    pub fn solve(&mut self) {
        if self.solved {
            return;
        }
        log::info!(
            "discrete solve: {} rooms on a {}x{} grid",
            self.rooms.len(),
            self.grid.width(),
            self.grid.height()
        );

        self.grid
            .rasterize_polygon(&self.boundary, self.origin, self.config.grid_resolution);
        self.grid.set(self.start.0, self.start.1, CELL_CORRIDOR);
        self.placed = vec![None; self.rooms.len()];

        self.greedy_place();
        self.best_score = self.global_score();
        self.refine();
        self.prune_dead_ends();
        self.connected = self.check_connectivity();
        self.solved = true;

        log::info!(
            "discrete solve done: {}/{} rooms placed, score {:.1}, corridors connected: {}",
            self.placed_count(),
            self.rooms.len(),
            self.best_score,
            self.connected
        );
    }

    /// Initial placement in descending connectivity-degree order, so the
    /// most-constrained rooms claim space first.
    fn greedy_place(&mut self) {
        let mut degree = vec![0.0f64; self.rooms.len()];
        for adj in &self.adjacencies {
            degree[adj.a] += adj.weight;
            degree[adj.b] += adj.weight;
        }
        let mut order: Vec<usize> = (0..self.rooms.len()).collect();
        order.sort_by(|&a, &b| {
            degree[b]
                .partial_cmp(&degree[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for index in order {
            self.try_place(index);
        }
    }

    /// Snapshot/mutate/evaluate rounds: evict a random subset of placed
    /// rooms, re-place everything missing, keep strict improvements.
    fn refine(&mut self) {
        for round in 0..self.config.max_iterations {
            let snapshot_grid = self.grid.clone();
            let snapshot_placed = self.placed.clone();

            let mut placed_indices: Vec<usize> = (0..self.rooms.len())
                .filter(|&i| self.placed[i].is_some())
                .collect();
            if !placed_indices.is_empty() {
                let evict =
                    ((placed_indices.len() as f64 * self.config.mutation_rate).ceil() as usize)
                        .min(placed_indices.len());
                self.rng.shuffle(&mut placed_indices);
                for &index in &placed_indices[..evict] {
                    self.remove_room(index);
                }
            }

            for index in 0..self.rooms.len() {
                if self.placed[index].is_none() {
                    self.try_place(index);
                }
            }

            let score = self.global_score();
            if score > self.best_score {
                log::debug!("round {}: score improved to {:.1}", round, score);
                self.best_score = score;
            } else {
                self.grid = snapshot_grid;
                self.placed = snapshot_placed;
            }
        }
    }

    fn try_place(&mut self, index: usize) -> bool {
        if let Some((x, y, w, h)) = self.find_best_placement(index) {
            self.stamp(index, x, y, w, h);
            true
        } else {
            false
        }
    }

    /// Scan every legal position for this room at one sampled aspect ratio
    /// and return the highest-scoring one. Ties keep the first candidate in
    /// row-major order; `None` when nothing fits.
    fn find_best_placement(&mut self, index: usize) -> Option<(i32, i32, i32, i32)> {
        let room = &self.rooms[index];
        let ratio = self
            .rng
            .next_float(1.0 / room.target_ratio, room.target_ratio);
        let resolution = self.config.grid_resolution;
        let area_cells = room.target_area / (resolution * resolution);
        let width_f = (area_cells * ratio).sqrt();
        let w = (width_f.round() as i32).max(1);
        let h = ((area_cells / width_f).round() as i32).max(1);
        if w > self.grid.width() || h > self.grid.height() {
            return None;
        }
        let rule = room.corridor_rule;

        let mut best: Option<(i32, i32, i32, i32)> = None;
        let mut best_score = f64::NEG_INFINITY;
        for y in 0..=(self.grid.height() - h) {
            for x in 0..=(self.grid.width() - w) {
                if !self.is_valid_placement(x, y, w, h, rule) {
                    continue;
                }
                let score = self.placement_score(index, x, y, w, h);
                if score > best_score {
                    best_score = score;
                    best = Some((x, y, w, h));
                }
            }
        }
        best
    }

    /// Placement validity: empty core, empty-or-corridor footprint, and the
    /// magnetizing constraint. The pre-seeded start cell is the one corridor
    /// cell a core may absorb; without that, a room spanning the whole grid
    /// could never be placed.
    fn is_valid_placement(&self, x: i32, y: i32, w: i32, h: i32, rule: CorridorRule) -> bool {
        for cy in y..y + h {
            for cx in x..x + w {
                let value = self.grid.get(cx, cy);
                let is_start_seed = value == CELL_CORRIDOR && (cx, cy) == self.start;
                if value != CELL_EMPTY && !is_start_seed {
                    return false;
                }
            }
        }

        if rule == CorridorRule::None {
            return true;
        }

        let cells = footprint_cells(x, y, w, h, rule);
        let mut touches_network = false;
        for &(cx, cy) in &cells {
            let value = self.grid.get(cx, cy);
            if value != CELL_EMPTY && value != CELL_CORRIDOR {
                return false;
            }
            if value == CELL_CORRIDOR {
                touches_network = true;
            }
        }
        if !touches_network {
            touches_network = cells.iter().any(|&(cx, cy)| {
                self.grid.get(cx - 1, cy) == CELL_CORRIDOR
                    || self.grid.get(cx + 1, cy) == CELL_CORRIDOR
                    || self.grid.get(cx, cy - 1) == CELL_CORRIDOR
                    || self.grid.get(cx, cy + 1) == CELL_CORRIDOR
            });
        }
        touches_network
    }

    /// Candidate score: compactness (perimeter contact with rooms or
    /// corridors) minus the weighted mean distance to already-placed
    /// adjacency partners.
    fn placement_score(&self, index: usize, x: i32, y: i32, w: i32, h: i32) -> f64 {
        let mut compactness = 0u32;
        let mut bump = |value: i32| {
            if value == CELL_CORRIDOR || value >= 1 {
                compactness += 1;
            }
        };
        for dx in 0..w {
            bump(self.grid.get(x + dx, y - 1));
            bump(self.grid.get(x + dx, y + h));
        }
        for dy in 0..h {
            bump(self.grid.get(x - 1, y + dy));
            bump(self.grid.get(x + w, y + dy));
        }

        let center = Vec2::new(x as f64 + w as f64 / 2.0, y as f64 + h as f64 / 2.0);
        let mut weighted_distance = 0.0;
        let mut total_weight = 0.0;
        for adj in &self.adjacencies {
            let partner = if adj.a == index {
                adj.b
            } else if adj.b == index {
                adj.a
            } else {
                continue;
            };
            if let Some(other) = &self.placed[partner] {
                weighted_distance += adj.weight * center.distance(other.center());
                total_weight += adj.weight;
            }
        }
        let mean_distance = if total_weight > 0.0 {
            weighted_distance / total_weight
        } else {
            0.0
        };

        self.config.weights.compactness * compactness as f64
            - self.config.weights.adjacency * mean_distance
    }

    /// Atomic stamp: core cells take the 1-based room index, footprint
    /// cells become corridor. Corridors stamped by earlier rooms are shared
    /// naturally.
    fn stamp(&mut self, index: usize, x: i32, y: i32, w: i32, h: i32) {
        let room_index = index as i32 + 1;
        for cy in y..y + h {
            for cx in x..x + w {
                self.grid.set(cx, cy, room_index);
            }
        }
        let rule = self.rooms[index].corridor_rule;
        for (cx, cy) in footprint_cells(x, y, w, h, rule) {
            self.grid.set(cx, cy, CELL_CORRIDOR);
        }
        self.placed[index] = Some(PlacedRoom {
            id: self.rooms[index].id.clone(),
            x,
            y,
            width: w,
            height: h,
            room_index,
            corridor_rule: rule,
        });
    }

    /// Clear a room's core cells. Corridor cells are left in place; shared
    /// sections stay usable and pruning reclaims the rest at the end. A
    /// core that had absorbed the start seed gives it back.
    fn remove_room(&mut self, index: usize) {
        if let Some(room) = self.placed[index].take() {
            for cy in room.y..room.y + room.height {
                for cx in room.x..room.x + room.width {
                    if self.grid.get(cx, cy) == room.room_index {
                        self.grid.set(cx, cy, CELL_EMPTY);
                    }
                }
            }
            let (sx, sy) = self.start;
            if sx >= room.x
                && sx < room.x + room.width
                && sy >= room.y
                && sy < room.y + room.height
            {
                self.grid.set(sx, sy, CELL_CORRIDOR);
            }
        }
    }

    /// Global layout score: placements dominate, adjacency distances
    /// discount.
    fn global_score(&self) -> f64 {
        let mut score = 100.0 * self.placed_count() as f64;
        for adj in &self.adjacencies {
            if let (Some(a), Some(b)) = (&self.placed[adj.a], &self.placed[adj.b]) {
                score -= adj.weight * a.center().distance(b.center());
            }
        }
        score
    }

    /// Fixed-point dead-end removal: any corridor cell with at most one
    /// non-empty, non-blocked 4-neighbor turns empty, until stable.
    fn prune_dead_ends(&mut self) {
        loop {
            let mut changed = false;
            for y in 0..self.grid.height() {
                for x in 0..self.grid.width() {
                    if self.grid.get(x, y) != CELL_CORRIDOR {
                        continue;
                    }
                    let neighbors = [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
                        .iter()
                        .filter(|&&(nx, ny)| {
                            let v = self.grid.get(nx, ny);
                            v == CELL_CORRIDOR || v >= 1
                        })
                        .count();
                    if neighbors <= 1 {
                        self.grid.set(x, y, CELL_EMPTY);
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }
    }

    /// BFS over 4-connected corridor cells; true iff every corridor cell is
    /// reachable from the start. An empty corridor set validates trivially.
    /// When a room core absorbed the start seed, the search roots at the
    /// corridor cells adjacent to it instead.
    fn check_connectivity(&self) -> bool {
        let total = self.grid.count(CELL_CORRIDOR);
        if total == 0 {
            return true;
        }
        let (sx, sy) = self.start;
        let mut queue: VecDeque<(i32, i32)> = VecDeque::new();
        let mut visited = GridBuffer::new(self.grid.width() as u32, self.grid.height() as u32);
        let push = |queue: &mut VecDeque<(i32, i32)>,
                    visited: &mut GridBuffer,
                    x: i32,
                    y: i32| {
            if self.grid.get(x, y) == CELL_CORRIDOR && visited.get(x, y) == CELL_EMPTY {
                visited.set(x, y, 1);
                queue.push_back((x, y));
            }
        };
        if self.grid.get(sx, sy) == CELL_CORRIDOR {
            push(&mut queue, &mut visited, sx, sy);
        } else {
            push(&mut queue, &mut visited, sx - 1, sy);
            push(&mut queue, &mut visited, sx + 1, sy);
            push(&mut queue, &mut visited, sx, sy - 1);
            push(&mut queue, &mut visited, sx, sy + 1);
        }
        if queue.is_empty() {
            return false;
        }
        let mut reached = 0usize;
        while let Some((x, y)) = queue.pop_front() {
            reached += 1;
            push(&mut queue, &mut visited, x - 1, y);
            push(&mut queue, &mut visited, x + 1, y);
            push(&mut queue, &mut visited, x, y - 1);
            push(&mut queue, &mut visited, x, y + 1);
        }
        reached == total
    }

    // ── Read-only observers ─────────────────────────────────────────────

    pub fn grid(&self) -> &GridBuffer {
        &self.grid
    }

    /// Placed rooms in room input order.
    pub fn placed_rooms(&self) -> impl Iterator<Item = &PlacedRoom> {
        self.placed.iter().filter_map(|p| p.as_ref())
    }

    /// Lookup one placed room by id; `None` when the room could not be
    /// placed (that is the failure contract, not an error).
    pub fn placed(&self, id: &str) -> Option<&PlacedRoom> {
        self.id_index
            .get(id)
            .and_then(|&i| self.placed.get(i))
            .and_then(|p| p.as_ref())
    }

    pub fn placed_count(&self) -> usize {
        self.placed.iter().filter(|p| p.is_some()).count()
    }

    pub fn best_score(&self) -> f64 {
        self.best_score
    }

    pub fn start_cell(&self) -> (i32, i32) {
        self.start
    }

    /// Result of the post-solve connectivity validation.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Placed rooms converted to world coordinates.
    pub fn to_layout(&self) -> Vec<RoomRect> {
        let res = self.config.grid_resolution;
        self.placed_rooms()
            .map(|room| {
                RoomRect::new(
                    room.id.clone(),
                    self.origin.x + room.x as f64 * res,
                    self.origin.y + room.y as f64 * res,
                    room.width as f64 * res,
                    room.height as f64 * res,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_boundary(size: f64) -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(size, 0.0),
            Vec2::new(size, size),
            Vec2::new(0.0, size),
        ]
    }

    fn solver_with(
        rooms: Vec<RoomRequest>,
        adjacencies: &[Adjacency],
        config: DiscreteConfig,
    ) -> DiscreteSolver {
        DiscreteSolver::new(square_boundary(30.0), rooms, adjacencies, config, 7)
            .expect("valid inputs")
    }

    #[test]
    fn test_construction_rejects_bad_inputs() {
        let boundary = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)];
        let err = DiscreteSolver::new(
            boundary,
            vec![RoomRequest::new("a", 10.0, 1.0)],
            &[],
            DiscreteConfig::default(),
            0,
        );
        assert!(matches!(err, Err(PlanError::DegenerateBoundary { .. })));
    }

    #[test]
    fn test_grid_dimensions_from_boundary() {
        let solver = solver_with(vec![RoomRequest::new("a", 10.0, 1.0)], &[], DiscreteConfig::default());
        assert_eq!(solver.grid().width(), 30);
        assert_eq!(solver.grid().height(), 30);
        assert_eq!(solver.start_cell(), (15, 15));
    }

    #[test]
    fn test_magnetizing_rejects_detached_footprint() {
        let mut solver = solver_with(
            vec![RoomRequest::new("a", 16.0, 1.0).with_rule(CorridorRule::OneSide)],
            &[],
            DiscreteConfig::default(),
        );
        solver
            .grid
            .rasterize_polygon(&square_boundary(30.0), Vec2::ZERO, 1.0);
        solver.placed = vec![None];
        // No corridor seeded anywhere: nothing can magnetize.
        assert!(!solver.is_valid_placement(2, 2, 4, 4, CorridorRule::OneSide));
        // Seed a corridor next to the candidate footprint and it becomes
        // valid.
        solver.grid.set(2, 7, CELL_CORRIDOR);
        assert!(solver.is_valid_placement(2, 2, 4, 4, CorridorRule::OneSide));
    }

    #[test]
    fn test_rule_none_places_without_network() {
        let mut solver = solver_with(
            vec![RoomRequest::new("a", 16.0, 1.0).with_rule(CorridorRule::None)],
            &[],
            DiscreteConfig::default(),
        );
        solver
            .grid
            .rasterize_polygon(&square_boundary(30.0), Vec2::ZERO, 1.0);
        solver.placed = vec![None];
        assert!(solver.is_valid_placement(2, 2, 4, 4, CorridorRule::None));
    }

    #[test]
    fn test_stamp_and_remove_round_trip() {
        let mut solver = solver_with(
            vec![RoomRequest::new("a", 16.0, 1.0).with_rule(CorridorRule::OneSide)],
            &[],
            DiscreteConfig::default(),
        );
        solver.placed = vec![None];
        solver.stamp(0, 3, 3, 4, 4);

        assert_eq!(solver.grid.get(3, 3), 1);
        assert_eq!(solver.grid.get(6, 6), 1);
        assert_eq!(solver.grid.get(3, 7), CELL_CORRIDOR, "footprint row");
        assert_eq!(solver.placed_count(), 1);
        assert!(solver.placed("a").is_some());

        solver.remove_room(0);
        assert_eq!(solver.grid.get(3, 3), CELL_EMPTY);
        assert_eq!(
            solver.grid.get(3, 7),
            CELL_CORRIDOR,
            "corridor cells survive removal until pruning"
        );
        assert_eq!(solver.placed_count(), 0);
    }

    #[test]
    fn test_room_cell_exclusivity_after_solve() {
        let rooms = vec![
            RoomRequest::new("a", 25.0, 1.0).with_rule(CorridorRule::TwoSides),
            RoomRequest::new("b", 25.0, 1.0).with_rule(CorridorRule::OneSide),
            RoomRequest::new("c", 16.0, 1.0).with_rule(CorridorRule::OneSide),
        ];
        let mut solver = solver_with(
            rooms,
            &[Adjacency::new("a", "b")],
            DiscreteConfig {
                max_iterations: 20,
                ..DiscreteConfig::default()
            },
        );
        solver.solve();

        for room in solver.placed_rooms() {
            for cy in room.y..room.y + room.height {
                for cx in room.x..room.x + room.width {
                    assert_eq!(
                        solver.grid().get(cx, cy),
                        room.room_index,
                        "cell ({},{}) must belong to room {}",
                        cx,
                        cy,
                        room.id
                    );
                }
            }
        }
        // Every positive cell lies inside exactly one placed room rectangle.
        for y in 0..solver.grid().height() {
            for x in 0..solver.grid().width() {
                let value = solver.grid().get(x, y);
                if value >= 1 {
                    let owners = solver
                        .placed_rooms()
                        .filter(|r| {
                            r.room_index == value
                                && x >= r.x
                                && x < r.x + r.width
                                && y >= r.y
                                && y < r.y + r.height
                        })
                        .count();
                    assert_eq!(owners, 1, "cell ({},{}) value {}", x, y, value);
                }
            }
        }
    }

    #[test]
    fn test_prune_removes_stub_corridors() {
        let mut solver = solver_with(vec![RoomRequest::new("a", 9.0, 1.0)], &[], DiscreteConfig::default());
        // Hand-build a corridor spur: a line hanging off nothing.
        for x in 5..10 {
            solver.grid.set(x, 5, CELL_CORRIDOR);
        }
        solver.prune_dead_ends();
        assert_eq!(
            solver.grid.count(CELL_CORRIDOR),
            0,
            "an unattached line is all dead ends"
        );
    }

    #[test]
    fn test_prune_fixpoint_property() {
        let rooms = vec![
            RoomRequest::new("a", 25.0, 1.0).with_rule(CorridorRule::TwoSides),
            RoomRequest::new("b", 20.0, 1.2).with_rule(CorridorRule::OneSide),
        ];
        let mut solver = solver_with(
            rooms,
            &[],
            DiscreteConfig {
                max_iterations: 10,
                ..DiscreteConfig::default()
            },
        );
        solver.solve();
        for y in 0..solver.grid().height() {
            for x in 0..solver.grid().width() {
                if solver.grid().get(x, y) != CELL_CORRIDOR {
                    continue;
                }
                let neighbors = [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
                    .iter()
                    .filter(|&&(nx, ny)| {
                        let v = solver.grid().get(nx, ny);
                        v == CELL_CORRIDOR || v >= 1
                    })
                    .count();
                assert!(
                    neighbors > 1,
                    "corridor cell ({},{}) is a dead end after pruning",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn test_connectivity_on_hand_built_grid() {
        let mut solver = solver_with(vec![RoomRequest::new("a", 9.0, 1.0)], &[], DiscreteConfig::default());
        // Connected path through the start cell.
        for x in 13..=17 {
            solver.grid.set(x, 15, CELL_CORRIDOR);
        }
        assert!(solver.check_connectivity());
        // A second disconnected component breaks validation.
        solver.grid.set(2, 2, CELL_CORRIDOR);
        solver.grid.set(2, 3, CELL_CORRIDOR);
        assert!(!solver.check_connectivity());
    }

    #[test]
    fn test_determinism_same_seed_same_layout() {
        let rooms = || {
            vec![
                RoomRequest::new("a", 30.0, 1.5).with_rule(CorridorRule::TwoSides),
                RoomRequest::new("b", 25.0, 1.2).with_rule(CorridorRule::OneSide),
                RoomRequest::new("c", 16.0, 1.0).with_rule(CorridorRule::OneSide),
            ]
        };
        let adjacencies = vec![Adjacency::weighted("a", "b", 2.0), Adjacency::new("b", "c")];
        let config = DiscreteConfig {
            max_iterations: 30,
            ..DiscreteConfig::default()
        };
        let mut first = DiscreteSolver::new(
            square_boundary(30.0),
            rooms(),
            &adjacencies,
            config.clone(),
            42,
        )
        .unwrap();
        let mut second =
            DiscreteSolver::new(square_boundary(30.0), rooms(), &adjacencies, config, 42).unwrap();
        first.solve();
        second.solve();

        assert_eq!(first.grid().cells(), second.grid().cells());
        let a: Vec<_> = first.placed_rooms().cloned().collect();
        let b: Vec<_> = second.placed_rooms().cloned().collect();
        assert_eq!(a, b);
        assert_eq!(first.best_score(), second.best_score());
    }

    #[test]
    fn test_unplaceable_room_is_absent_not_error() {
        // A room far larger than the site can never fit.
        let rooms = vec![
            RoomRequest::new("giant", 10_000.0, 1.0),
            RoomRequest::new("small", 9.0, 1.0).with_rule(CorridorRule::OneSide),
        ];
        let mut solver = solver_with(
            rooms,
            &[],
            DiscreteConfig {
                max_iterations: 5,
                ..DiscreteConfig::default()
            },
        );
        solver.solve();
        assert!(solver.placed("giant").is_none());
        assert!(solver.placed("small").is_some());
    }
}
