//! One candidate floor plan: room rectangles with collision physics,
//! fitness, mutation, and crossover.

use serde::{Deserialize, Serialize};

use planforge_logic::{polygon, Aabb, LayoutRng, RoomRect, Vec2};

use crate::config::SpringConfig;
use crate::input::{ResolvedAdjacency, RoomRequest};

/// Fraction of an overlap resolved by shrinking rather than translating.
const SQUISH_FACTOR: f64 = 0.5;
/// Pull strength of the optional adjacency attraction.
const ADJACENCY_ATTRACTION_STRENGTH: f64 = 0.15;
/// Aspect-ratio bias added per mutation when pressure is one-sided.
const PRESSURE_SENSITIVITY: f64 = 0.3;
/// Overshoot applied when pushing a room back inside the boundary.
const BOUNDARY_PUSH_OVERSHOOT: f64 = 1.1;
/// Weight of the outside-the-boundary area in the geometric fitness term.
const CONTAINMENT_WEIGHT: f64 = 100.0;
/// Cap on boundary-constraint iterations per room per tick.
const MAX_CONSTRAIN_ITERATIONS: usize = 10;
/// Rooms never shrink below this edge length.
const MIN_ROOM_SIZE: f64 = 1.0;

/// Continuous room state. `x`/`y` is the top-left corner; the pressure
/// counters record how hard the room was squeezed this tick (per axis) and
/// feed the next aspect-ratio mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomState {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub target_area: f64,
    pub target_ratio: f64,
    pub pressure_x: f64,
    pub pressure_y: f64,
    pub accumulated_pressure_x: f64,
    pub accumulated_pressure_y: f64,
}

impl RoomState {
    /// Room seeded from a request at `position`, with dimensions at the
    /// wide end of the allowed ratio band.
    pub fn from_request(request: &RoomRequest, position: Vec2) -> Self {
        let width = (request.target_area * request.target_ratio).sqrt();
        let height = request.target_area / width;
        Self {
            id: request.id.clone(),
            x: position.x,
            y: position.y,
            width,
            height,
            target_area: request.target_area,
            target_ratio: request.target_ratio,
            pressure_x: 0.0,
            pressure_y: 0.0,
            accumulated_pressure_x: 0.0,
            accumulated_pressure_y: 0.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_rect(self.x, self.y, self.width, self.height)
    }

    fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x, self.y),
            Vec2::new(self.x + self.width, self.y),
            Vec2::new(self.x + self.width, self.y + self.height),
            Vec2::new(self.x, self.y + self.height),
        ]
    }

    /// The ratio bound actually in force: a global override wins unless the
    /// room is a corridor segment, which keeps its own band.
    pub fn effective_target_ratio(&self, global: Option<f64>) -> f64 {
        match global {
            Some(ratio) if !self.id.starts_with("corridor-") => ratio,
            _ => self.target_ratio,
        }
    }

    /// Re-derive width/height from the target area at `ratio`.
    fn apply_ratio(&mut self, ratio: f64) {
        self.width = (self.target_area * ratio).sqrt();
        self.height = self.target_area / self.width;
        self.clamp_min_size();
    }

    fn clamp_min_size(&mut self) {
        self.width = self.width.max(MIN_ROOM_SIZE);
        self.height = self.height.max(MIN_ROOM_SIZE);
    }

    /// Back to template dimensions with pressures cleared; used when a room
    /// is reborn in a fresh-blood gene.
    pub fn reset_dimensions(&mut self) {
        self.width = (self.target_area * self.target_ratio).sqrt();
        self.height = self.target_area / self.width;
        self.pressure_x = 0.0;
        self.pressure_y = 0.0;
        self.accumulated_pressure_x = 0.0;
        self.accumulated_pressure_y = 0.0;
    }
}

/// One candidate plan plus its fitness components. Lower fitness is better;
/// unevaluated genes carry infinity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gene {
    pub rooms: Vec<RoomState>,
    pub fitness: f64,
    pub geometric_fitness: f64,
    pub topological_fitness: f64,
}

impl Gene {
    pub fn new(rooms: Vec<RoomState>) -> Self {
        Self {
            rooms,
            fitness: f64::INFINITY,
            geometric_fitness: f64::INFINITY,
            topological_fitness: f64::INFINITY,
        }
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_finite()
    }

    /// One physics tick: inflate, attract, resolve pairwise overlaps along
    /// the smaller axis, bank pressures, then push every room back inside
    /// the boundary.
    pub fn apply_squish_collisions(
        &mut self,
        boundary: &[Vec2],
        adjacencies: &[ResolvedAdjacency],
        config: &SpringConfig,
    ) {
        for room in &mut self.rooms {
            room.pressure_x = 0.0;
            room.pressure_y = 0.0;
        }

        if config.use_aggressive_inflation {
            for room in &mut self.rooms {
                if room.area() < room.target_area * config.inflation_threshold {
                    room.width *= config.inflation_rate;
                    room.height *= config.inflation_rate;
                }
            }
        }

        if config.use_adjacency_attraction {
            for adj in adjacencies {
                let delta = self.rooms[adj.b].center().sub(self.rooms[adj.a].center());
                let pull = delta.scale(0.1 * adj.weight * ADJACENCY_ATTRACTION_STRENGTH);
                let a = &mut self.rooms[adj.a];
                a.x += pull.x;
                a.y += pull.y;
                let b = &mut self.rooms[adj.b];
                b.x -= pull.x;
                b.y -= pull.y;
            }
        }

        for i in 0..self.rooms.len() {
            for j in (i + 1)..self.rooms.len() {
                let overlap_x = self.rooms[i].aabb().overlap_x(&self.rooms[j].aabb());
                let overlap_y = self.rooms[i].aabb().overlap_y(&self.rooms[j].aabb());
                if overlap_x <= 0.0 || overlap_y <= 0.0 {
                    continue;
                }
                let (head, tail) = self.rooms.split_at_mut(j);
                let a = &mut head[i];
                let b = &mut tail[0];
                if overlap_x < overlap_y {
                    squish_horizontal(a, b, overlap_x, config.global_target_ratio);
                } else {
                    squish_vertical(a, b, overlap_y, config.global_target_ratio);
                }
            }
        }

        for room in &mut self.rooms {
            room.accumulated_pressure_x = room.pressure_x;
            room.accumulated_pressure_y = room.pressure_y;
        }

        self.constrain_to_boundary(boundary);
    }

    /// Translate rooms whose corners escaped the boundary back inside,
    /// farthest-out corner first, with overshoot so oscillation dies down.
    fn constrain_to_boundary(&mut self, boundary: &[Vec2]) {
        for room in &mut self.rooms {
            for _ in 0..MAX_CONSTRAIN_ITERATIONS {
                let mut worst: Option<(Vec2, Vec2, f64)> = None;
                for corner in room.corners() {
                    if polygon::point_in_polygon(corner, boundary) {
                        continue;
                    }
                    let closest = polygon::closest_point_on_boundary(corner, boundary);
                    let dist_sq = corner.distance_sq(closest);
                    if worst.map_or(true, |(_, _, d)| dist_sq > d) {
                        worst = Some((corner, closest, dist_sq));
                    }
                }
                let Some((corner, closest, _)) = worst else {
                    break;
                };
                let push = closest.sub(corner).scale(BOUNDARY_PUSH_OVERSHOOT);
                room.x += push.x;
                room.y += push.y;
                room.accumulated_pressure_x += push.x.abs() * 10.0;
                room.accumulated_pressure_y += push.y.abs() * 10.0;
            }
        }
    }

    /// Score the plan. Geometric: pairwise overlap area (optionally
    /// exponentiated with a compactness bonus) plus the area lying outside
    /// the boundary. Topological: weighted squared (or root) axis gaps
    /// between adjacent rooms. Lower is better.
    pub fn calculate_fitness(
        &mut self,
        boundary: &[Vec2],
        adjacencies: &[ResolvedAdjacency],
        config: &SpringConfig,
    ) {
        let mut geometric = 0.0;
        for i in 0..self.rooms.len() {
            for j in (i + 1)..self.rooms.len() {
                let a = self.rooms[i].aabb();
                let b = self.rooms[j].aabb();
                let aabb_overlap = a.overlap_area(&b);
                if aabb_overlap <= 0.0 {
                    continue;
                }
                let rect_a = polygon::create_rectangle(
                    self.rooms[i].x,
                    self.rooms[i].y,
                    self.rooms[i].width,
                    self.rooms[i].height,
                );
                let rect_b = polygon::create_rectangle(
                    self.rooms[j].x,
                    self.rooms[j].y,
                    self.rooms[j].width,
                    self.rooms[j].height,
                );
                let intersection = polygon::intersection_area(&rect_a, &rect_b);
                if config.use_non_linear_overlap_penalty {
                    let exponent = config.overlap_penalty_exponent.max(1.0);
                    let bonus = 1.0 + intersection / aabb_overlap;
                    geometric += intersection.powf(exponent) * bonus;
                } else {
                    geometric += intersection;
                }
            }
        }
        for room in &self.rooms {
            let rect = polygon::create_rectangle(room.x, room.y, room.width, room.height);
            let inside = polygon::intersection_area(&rect, boundary);
            geometric += CONTAINMENT_WEIGHT * (room.area() - inside).max(0.0);
        }

        let mut topological = 0.0;
        for adj in adjacencies {
            let a = &self.rooms[adj.a];
            let b = &self.rooms[adj.b];
            let center_a = a.center();
            let center_b = b.center();
            let gap_x =
                ((center_a.x - center_b.x).abs() - (a.width + b.width) / 2.0).max(0.0);
            let gap_y =
                ((center_a.y - center_b.y).abs() - (a.height + b.height) / 2.0).max(0.0);
            let gap_sq = gap_x * gap_x + gap_y * gap_y;
            topological += adj.weight
                * if config.use_quadratic_penalty {
                    gap_sq
                } else {
                    gap_sq.sqrt()
                };
        }

        self.geometric_fitness = geometric;
        self.topological_fitness = topological;
        self.fitness = geometric * config.fitness_balance
            + topological * (1.0 - config.fitness_balance);
    }

    /// Mutate in place: optional position swap, per-room translation
    /// (partner-seeking or random), and pressure-biased aspect jitter.
    pub fn mutate(
        &mut self,
        rng: &mut LayoutRng,
        mutation_rate: f64,
        mutation_strength: f64,
        aspect_ratio_mutation_rate: f64,
        config: &SpringConfig,
        adjacencies: &[ResolvedAdjacency],
    ) {
        if config.use_swap_mutation && rng.next_bool(config.swap_mutation_rate) {
            self.swap_mutation(rng, adjacencies);
        }

        for index in 0..self.rooms.len() {
            let mut translated = false;
            if config.use_partner_bias && rng.next_bool(config.partner_bias_rate) {
                let partners: Vec<usize> = adjacencies
                    .iter()
                    .filter_map(|adj| {
                        if adj.a == index {
                            Some(adj.b)
                        } else if adj.b == index {
                            Some(adj.a)
                        } else {
                            None
                        }
                    })
                    .collect();
                if !partners.is_empty() {
                    let partner = partners[rng.next_index(partners.len())];
                    let target = Vec2::new(self.rooms[partner].x, self.rooms[partner].y);
                    let room = &mut self.rooms[index];
                    room.x += 0.7 * (target.x - room.x);
                    room.y += 0.7 * (target.y - room.y);
                    translated = true;
                }
            }
            if !translated && rng.next_bool(mutation_rate) {
                let dx = rng.next_float(-mutation_strength / 2.0, mutation_strength / 2.0);
                let dy = rng.next_float(-mutation_strength / 2.0, mutation_strength / 2.0);
                let room = &mut self.rooms[index];
                room.x += dx;
                room.y += dy;
            }

            if rng.next_bool(aspect_ratio_mutation_rate) {
                let room = &mut self.rooms[index];
                let mut ratio = (room.width / room.height) * rng.next_float(0.9, 1.1);
                if config.use_pressure_bias {
                    let total = room.accumulated_pressure_x.abs()
                        + room.accumulated_pressure_y.abs();
                    if total > 0.1 {
                        // Lean toward the axis that has been squeezed less.
                        ratio += if room.accumulated_pressure_x > room.accumulated_pressure_y
                        {
                            -PRESSURE_SENSITIVITY
                        } else {
                            PRESSURE_SENSITIVITY
                        };
                    }
                }
                let bound = room.effective_target_ratio(config.global_target_ratio);
                room.apply_ratio(ratio.clamp(1.0 / bound, bound));
            }

            self.rooms[index].clamp_min_size();
        }
    }

    /// Swap the positions of the most promising adjacency-ranked pair, or
    /// two random rooms when no swap looks profitable.
    fn swap_mutation(&mut self, rng: &mut LayoutRng, adjacencies: &[ResolvedAdjacency]) {
        let mut candidates: Vec<(f64, usize, usize)> = Vec::new();
        for adj in adjacencies {
            let improvement = self.swap_improvement(adj.a, adj.b, adjacencies);
            if improvement > 0.0 {
                candidates.push((improvement * adj.weight, adj.a, adj.b));
            }
        }
        candidates.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        if !candidates.is_empty() {
            let pick = rng.next_index(candidates.len().min(3));
            let (_, a, b) = candidates[pick];
            self.swap_positions(a, b);
        } else if self.rooms.len() >= 2 {
            let a = rng.next_index(self.rooms.len());
            let mut b = rng.next_index(self.rooms.len());
            if a == b {
                b = (b + 1) % self.rooms.len();
            }
            self.swap_positions(a, b);
        }
    }

    /// Estimated drop in weighted partner distances if rooms `u` and `v`
    /// traded places. Their mutual edge is invariant under the swap and is
    /// skipped.
    fn swap_improvement(&self, u: usize, v: usize, adjacencies: &[ResolvedAdjacency]) -> f64 {
        let pos_u = self.rooms[u].center();
        let pos_v = self.rooms[v].center();
        let mut improvement = 0.0;
        for adj in adjacencies {
            if (adj.a == u && adj.b == v) || (adj.a == v && adj.b == u) {
                continue;
            }
            for (end, other) in [(adj.a, adj.b), (adj.b, adj.a)] {
                let partner = self.rooms.get(other).map(|r| r.center());
                let Some(partner) = partner else { continue };
                if end == u {
                    improvement += adj.weight * (pos_u.distance(partner) - pos_v.distance(partner));
                } else if end == v {
                    improvement += adj.weight * (pos_v.distance(partner) - pos_u.distance(partner));
                }
            }
        }
        improvement
    }

    fn swap_positions(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (ax, ay) = (self.rooms[a].x, self.rooms[a].y);
        let (bx, by) = (self.rooms[b].x, self.rooms[b].y);
        self.rooms[a].x = bx;
        self.rooms[a].y = by;
        self.rooms[b].x = ax;
        self.rooms[b].y = ay;
    }

    /// Uniform crossover: each scalar comes from either parent
    /// independently; identity and targets from the left parent; tick
    /// pressures reset, accumulated pressures averaged.
    pub fn crossover(&self, other: &Gene, rng: &mut LayoutRng) -> Gene {
        let rooms = self
            .rooms
            .iter()
            .zip(&other.rooms)
            .map(|(a, b)| {
                let mut room = RoomState {
                    id: a.id.clone(),
                    x: if rng.next_bool(0.5) { a.x } else { b.x },
                    y: if rng.next_bool(0.5) { a.y } else { b.y },
                    width: if rng.next_bool(0.5) { a.width } else { b.width },
                    height: if rng.next_bool(0.5) { a.height } else { b.height },
                    target_area: a.target_area,
                    target_ratio: a.target_ratio,
                    pressure_x: 0.0,
                    pressure_y: 0.0,
                    accumulated_pressure_x: (a.accumulated_pressure_x
                        + b.accumulated_pressure_x)
                        / 2.0,
                    accumulated_pressure_y: (a.accumulated_pressure_y
                        + b.accumulated_pressure_y)
                        / 2.0,
                };
                room.clamp_min_size();
                room
            })
            .collect();
        Gene::new(rooms)
    }

    /// Rooms as world-coordinate rectangles.
    pub fn to_layout(&self) -> Vec<RoomRect> {
        self.rooms
            .iter()
            .map(|r| RoomRect::new(r.id.clone(), r.x, r.y, r.width, r.height))
            .collect()
    }

    /// Total pairwise overlap area, a convergence diagnostic.
    pub fn total_overlap_area(&self) -> f64 {
        let mut total = 0.0;
        for i in 0..self.rooms.len() {
            for j in (i + 1)..self.rooms.len() {
                total += self.rooms[i].aabb().overlap_area(&self.rooms[j].aabb());
            }
        }
        total
    }
}

/// Resolve a horizontal overlap of `o` between rooms A and B: shrink both
/// widths when the resulting ratios stay inside their bands (translating to
/// compensate), otherwise translate apart unchanged.
fn squish_horizontal(a: &mut RoomState, b: &mut RoomState, overlap: f64, global: Option<f64>) {
    a.pressure_x += overlap;
    b.pressure_x += overlap;

    let squish_amount = SQUISH_FACTOR * 0.5 * overlap + 0.1;
    let trial_a = a.width - squish_amount;
    let trial_b = b.width - squish_amount;
    let direction_a = if a.x <= b.x { -1.0 } else { 1.0 };

    let within_bounds = trial_a > f64::EPSILON && trial_b > f64::EPSILON && {
        let ratio_a = trial_a / (a.target_area / trial_a);
        let ratio_b = trial_b / (b.target_area / trial_b);
        let bound_a = a.effective_target_ratio(global);
        let bound_b = b.effective_target_ratio(global);
        ratio_a >= 1.0 / bound_a
            && ratio_a <= bound_a
            && ratio_b >= 1.0 / bound_b
            && ratio_b <= bound_b
    };

    if within_bounds {
        let shift = (1.0 - SQUISH_FACTOR) * 0.5 * overlap + squish_amount * 0.5;
        a.x += direction_a * shift;
        b.x -= direction_a * shift;
        a.width = trial_a;
        a.height = a.target_area / trial_a;
        b.width = trial_b;
        b.height = b.target_area / trial_b;
    } else {
        let shift = 0.5 * overlap + 0.1;
        a.x += direction_a * shift;
        b.x -= direction_a * shift;
    }
    a.clamp_min_size();
    b.clamp_min_size();
}

/// Vertical mirror of `squish_horizontal`.
fn squish_vertical(a: &mut RoomState, b: &mut RoomState, overlap: f64, global: Option<f64>) {
    a.pressure_y += overlap;
    b.pressure_y += overlap;

    let squish_amount = SQUISH_FACTOR * 0.5 * overlap + 0.1;
    let trial_a = a.height - squish_amount;
    let trial_b = b.height - squish_amount;
    let direction_a = if a.y <= b.y { -1.0 } else { 1.0 };

    let within_bounds = trial_a > f64::EPSILON && trial_b > f64::EPSILON && {
        let ratio_a = (a.target_area / trial_a) / trial_a;
        let ratio_b = (b.target_area / trial_b) / trial_b;
        let bound_a = a.effective_target_ratio(global);
        let bound_b = b.effective_target_ratio(global);
        ratio_a >= 1.0 / bound_a
            && ratio_a <= bound_a
            && ratio_b >= 1.0 / bound_b
            && ratio_b <= bound_b
    };

    if within_bounds {
        let shift = (1.0 - SQUISH_FACTOR) * 0.5 * overlap + squish_amount * 0.5;
        a.y += direction_a * shift;
        b.y -= direction_a * shift;
        a.height = trial_a;
        a.width = a.target_area / trial_a;
        b.height = trial_b;
        b.width = b.target_area / trial_b;
    } else {
        let shift = 0.5 * overlap + 0.1;
        a.y += direction_a * shift;
        b.y -= direction_a * shift;
    }
    a.clamp_min_size();
    b.clamp_min_size();
}
