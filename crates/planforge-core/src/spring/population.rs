//! Evolving collection of genes.
//!
//! Keeps the population sorted ascending by fitness (lower is better),
//! breeds offspring from a top-fraction parent pool, culls the worst tail
//! of the combined population, refills from survivors, and optionally
//! injects incubated fresh-blood restarts to escape local optima.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use planforge_logic::{Aabb, LayoutRng, RoomRect, Vec2};

use crate::config::SpringConfig;
use crate::input::{self, Adjacency, PlanError, ResolvedAdjacency, RoomRequest};
use crate::spring::gene::{Gene, RoomState};

/// Generations of best-fitness history considered by `has_converged`.
const CONVERGENCE_WINDOW: usize = 10;

/// Snapshot of population fitness, for drivers and logging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub generation: usize,
    pub best: f64,
    pub worst: f64,
    pub average: f64,
    pub best_geometric: f64,
    pub best_topological: f64,
}

/// The gene collection. Owns its genes and its RNG; one `iterate()` call is
/// one generation, with no suspension points inside.
pub struct Population {
    boundary: Vec<Vec2>,
    adjacencies: Vec<ResolvedAdjacency>,
    config: SpringConfig,
    rng: LayoutRng,
    genes: Vec<Gene>,
    base_rooms: Vec<RoomState>,
    generation: usize,
    best_history: VecDeque<f64>,
}

impl Population {
    /// Population seeded from room requests alone: every room starts
    /// centered on the boundary's bounding box and the initial mutation
    /// spreads the non-elite genes out.
    pub fn from_requests(
        boundary: Vec<Vec2>,
        requests: &[RoomRequest],
        adjacencies: &[Adjacency],
        config: SpringConfig,
        seed: u32,
    ) -> Result<Self, PlanError> {
        let bounds = Aabb::from_polygon(&boundary);
        let center = Vec2::new(
            (bounds.min_x + bounds.max_x) / 2.0,
            (bounds.min_y + bounds.max_y) / 2.0,
        );
        let base_rooms = requests
            .iter()
            .map(|request| {
                let mut room = RoomState::from_request(request, Vec2::ZERO);
                room.x = center.x - room.width / 2.0;
                room.y = center.y - room.height / 2.0;
                room
            })
            .collect();
        Self::with_base_rooms(boundary, requests, base_rooms, adjacencies, config, seed)
    }

    /// Population seeded from an existing layout (typically the discrete
    /// solver's output); rooms without a layout entry fall back to the
    /// bounding-box center.
    pub fn from_layout(
        boundary: Vec<Vec2>,
        requests: &[RoomRequest],
        layout: &[RoomRect],
        adjacencies: &[Adjacency],
        config: SpringConfig,
        seed: u32,
    ) -> Result<Self, PlanError> {
        let bounds = Aabb::from_polygon(&boundary);
        let center = Vec2::new(
            (bounds.min_x + bounds.max_x) / 2.0,
            (bounds.min_y + bounds.max_y) / 2.0,
        );
        let by_id: HashMap<&str, &RoomRect> =
            layout.iter().map(|r| (r.id.as_str(), r)).collect();
        let base_rooms = requests
            .iter()
            .map(|request| {
                let mut room = RoomState::from_request(request, Vec2::ZERO);
                match by_id.get(request.id.as_str()) {
                    Some(rect) => {
                        room.x = rect.x;
                        room.y = rect.y;
                        room.width = rect.width.max(1.0);
                        room.height = rect.height.max(1.0);
                    }
                    None => {
                        room.x = center.x - room.width / 2.0;
                        room.y = center.y - room.height / 2.0;
                    }
                }
                room
            })
            .collect();
        Self::with_base_rooms(boundary, requests, base_rooms, adjacencies, config, seed)
    }

    fn with_base_rooms(
        boundary: Vec<Vec2>,
        requests: &[RoomRequest],
        base_rooms: Vec<RoomState>,
        adjacencies: &[Adjacency],
        config: SpringConfig,
        seed: u32,
    ) -> Result<Self, PlanError> {
        let index = input::validate_inputs(boundary.len(), requests)?;
        let resolved = input::resolve_adjacencies(adjacencies, &index)?;
        if config.population_size < 2 {
            return Err(PlanError::PopulationTooSmall {
                size: config.population_size,
            });
        }

        let mut population = Self {
            boundary,
            adjacencies: resolved,
            rng: LayoutRng::new(seed),
            genes: Vec::with_capacity(config.population_size),
            base_rooms,
            generation: 0,
            best_history: VecDeque::with_capacity(CONVERGENCE_WINDOW),
            config,
        };

        let template = Gene::new(population.base_rooms.clone());
        population.genes.push(template.clone());
        for _ in 1..population.config.population_size {
            let mut gene = template.clone();
            gene.mutate(
                &mut population.rng,
                0.5,
                population.config.mutation_strength * 2.0,
                population.config.aspect_ratio_mutation_rate,
                &population.config,
                &population.adjacencies,
            );
            population.genes.push(gene);
        }
        Ok(population)
    }

    /// One generation: physics + evaluation, sort, breed, cull, refill,
    /// and the periodic fresh-blood injection.
    pub fn iterate(&mut self) {
        for gene in &mut self.genes {
            gene.apply_squish_collisions(&self.boundary, &self.adjacencies, &self.config);
            gene.calculate_fitness(&self.boundary, &self.adjacencies, &self.config);
        }
        self.sort_by_fitness();

        let size = self.config.population_size;
        let pool = ((self.genes.len() as f64 * self.config.parent_pool_fraction).floor()
            as usize)
            .clamp(2, self.genes.len());
        let offspring_count = (size as f64 * self.config.crossover_rate).floor() as usize;
        let mut offspring = Vec::with_capacity(offspring_count);
        for _ in 0..offspring_count {
            let left = self.rng.next_index(pool);
            let right = self.rng.next_index(pool);
            let mut child = self.genes[left].crossover(&self.genes[right], &mut self.rng);
            child.mutate(
                &mut self.rng,
                self.config.mutation_rate,
                self.config.mutation_strength,
                self.config.aspect_ratio_mutation_rate,
                &self.config,
                &self.adjacencies,
            );
            self.settle(&mut child);
            offspring.push(child);
        }

        // Append the unevaluated offspring, cull the worst entries of the
        // combined population (the unevaluated tail counts as worst), then
        // refill back to size by cloning and mutating random survivors. At
        // least two genes always survive the cull.
        self.genes.extend(offspring);
        let cull = ((self.genes.len() as f64 * self.config.selection_pressure).floor()
            as usize)
            .min(self.genes.len().saturating_sub(2));
        self.genes.truncate(self.genes.len() - cull);
        if self.genes.len() > size {
            self.genes.truncate(size.max(2));
        }
        let survivors = self.genes.len();
        while self.genes.len() < size {
            let pick = self.rng.next_index(survivors);
            let mut clone = self.genes[pick].clone();
            clone.mutate(
                &mut self.rng,
                self.config.mutation_rate,
                self.config.mutation_strength,
                self.config.aspect_ratio_mutation_rate,
                &self.config,
                &self.adjacencies,
            );
            self.settle(&mut clone);
            clone.calculate_fitness(&self.boundary, &self.adjacencies, &self.config);
            self.genes.push(clone);
        }

        self.generation += 1;

        if self.config.use_fresh_blood
            && self.config.fresh_blood_interval > 0
            && self.generation % self.config.fresh_blood_interval == 0
        {
            self.inject_fresh_blood();
        }

        let best = self.best_fitness();
        if best.is_finite() {
            if self.best_history.len() == CONVERGENCE_WINDOW {
                self.best_history.pop_front();
            }
            self.best_history.push_back(best);
        }
    }

    /// Replace the worst quarter with incubated restarts built from the
    /// base templates.
    fn inject_fresh_blood(&mut self) {
        self.sort_by_fitness();
        let drop_count = (self.genes.len() / 4)
            .max(1)
            .min(self.genes.len().saturating_sub(1));
        self.genes.truncate(self.genes.len() - drop_count);
        log::debug!(
            "fresh blood at generation {}: rebuilding {} genes",
            self.generation,
            drop_count
        );
        for _ in 0..drop_count {
            let mut gene = Gene::new(self.base_rooms.clone());
            for room in &mut gene.rooms {
                room.reset_dimensions();
            }
            for _ in 0..self.config.fresh_blood_warm_up {
                gene.mutate(
                    &mut self.rng,
                    0.9,
                    self.config.mutation_strength * 3.0,
                    1.0,
                    &self.config,
                    &self.adjacencies,
                );
                gene.apply_squish_collisions(&self.boundary, &self.adjacencies, &self.config);
            }
            gene.calculate_fitness(&self.boundary, &self.adjacencies, &self.config);
            self.genes.push(gene);
        }
    }

    /// Warm-up ticks that let a newborn settle before its first evaluation.
    fn settle(&self, gene: &mut Gene) {
        for _ in 0..self.config.effective_warm_up() {
            gene.apply_squish_collisions(&self.boundary, &self.adjacencies, &self.config);
        }
    }

    fn sort_by_fitness(&mut self) {
        self.genes.sort_by(|a, b| {
            a.fitness
                .partial_cmp(&b.fitness)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    fn best_fitness(&self) -> f64 {
        self.genes
            .iter()
            .map(|g| g.fitness)
            .fold(f64::INFINITY, f64::min)
    }

    // ── Observers ───────────────────────────────────────────────────────

    /// The lowest-fitness gene. Before the first generation every gene is
    /// unevaluated and the unmutated template is returned.
    pub fn best(&self) -> &Gene {
        self.genes
            .iter()
            .min_by(|a, b| {
                a.fitness
                    .partial_cmp(&b.fitness)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .expect("population is never empty")
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Fitness summary over the evaluated genes; infinities before the
    /// first generation.
    pub fn stats(&self) -> PopulationStats {
        let mut best: Option<&Gene> = None;
        let mut worst = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0usize;
        for gene in &self.genes {
            if !gene.is_evaluated() {
                continue;
            }
            if best.map_or(true, |b| gene.fitness < b.fitness) {
                best = Some(gene);
            }
            worst = worst.max(gene.fitness);
            sum += gene.fitness;
            count += 1;
        }
        match best {
            Some(gene) => PopulationStats {
                generation: self.generation,
                best: gene.fitness,
                worst,
                average: sum / count as f64,
                best_geometric: gene.geometric_fitness,
                best_topological: gene.topological_fitness,
            },
            None => PopulationStats {
                generation: self.generation,
                best: f64::INFINITY,
                worst: f64::INFINITY,
                average: f64::INFINITY,
                best_geometric: f64::INFINITY,
                best_topological: f64::INFINITY,
            },
        }
    }

    /// Stable-best convergence: true when the best fitness has stayed
    /// within a relative `epsilon` band over the last
    /// `CONVERGENCE_WINDOW` generations.
    pub fn has_converged(&self, epsilon: f64) -> bool {
        if self.best_history.len() < CONVERGENCE_WINDOW {
            return false;
        }
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &value in &self.best_history {
            lo = lo.min(value);
            hi = hi.max(value);
        }
        let scale = hi.abs().max(1e-9);
        (hi - lo) <= epsilon * scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::CorridorRule;

    fn boundary(size: f64) -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(size, 0.0),
            Vec2::new(size, size),
            Vec2::new(0.0, size),
        ]
    }

    fn requests() -> Vec<RoomRequest> {
        vec![
            RoomRequest::new("living", 200.0, 1.5).with_rule(CorridorRule::TwoSides),
            RoomRequest::new("kitchen", 120.0, 1.2).with_rule(CorridorRule::OneSide),
            RoomRequest::new("bedroom", 150.0, 1.3).with_rule(CorridorRule::TwoSides),
            RoomRequest::new("bathroom", 60.0, 1.0).with_rule(CorridorRule::OneSide),
        ]
    }

    fn adjacencies() -> Vec<Adjacency> {
        vec![
            Adjacency::weighted("living", "kitchen", 2.0),
            Adjacency::weighted("kitchen", "bathroom", 1.5),
            Adjacency::new("bedroom", "bathroom"),
        ]
    }

    fn small_config() -> SpringConfig {
        SpringConfig {
            population_size: 10,
            ..SpringConfig::default()
        }
    }

    #[test]
    fn test_population_too_small_rejected() {
        let config = SpringConfig {
            population_size: 1,
            ..SpringConfig::default()
        };
        let err =
            Population::from_requests(boundary(60.0), &requests(), &adjacencies(), config, 1);
        assert!(matches!(err, Err(PlanError::PopulationTooSmall { size: 1 })));
    }

    #[test]
    fn test_initialization_keeps_elite_untouched() {
        let population = Population::from_requests(
            boundary(60.0),
            &requests(),
            &adjacencies(),
            small_config(),
            9,
        )
        .unwrap();
        assert_eq!(population.genes().len(), 10);
        let template = &population.genes()[0];
        assert_eq!(template.rooms, population.base_rooms);
        // At least one sibling was actually perturbed.
        assert!(population
            .genes()
            .iter()
            .skip(1)
            .any(|g| g.rooms != template.rooms));
        // Every gene carries the same rooms in the same order.
        for gene in population.genes() {
            let ids: Vec<&str> = gene.rooms.iter().map(|r| r.id.as_str()).collect();
            assert_eq!(ids, vec!["living", "kitchen", "bedroom", "bathroom"]);
        }
    }

    #[test]
    fn test_iterate_preserves_size_and_counts_generations() {
        let mut population = Population::from_requests(
            boundary(60.0),
            &requests(),
            &adjacencies(),
            small_config(),
            3,
        )
        .unwrap();
        for expected in 1..=5 {
            population.iterate();
            assert_eq!(population.generation(), expected);
            assert_eq!(population.genes().len(), 10);
        }
    }

    #[test]
    fn test_fitness_trend_decreases() {
        let mut population = Population::from_requests(
            boundary(60.0),
            &requests(),
            &adjacencies(),
            small_config(),
            7,
        )
        .unwrap();
        population.iterate();
        let early = population.stats().best;
        for _ in 0..40 {
            population.iterate();
        }
        let late = population.stats().best;
        assert!(
            late <= early,
            "best fitness should not degrade over refinement: {} -> {}",
            early,
            late
        );
    }

    #[test]
    fn test_refill_restores_population_size() {
        // No offspring and a heavy cull: the survivor-cloning refill is the
        // only way back to full size.
        let config = SpringConfig {
            population_size: 10,
            crossover_rate: 0.0,
            selection_pressure: 0.5,
            ..SpringConfig::default()
        };
        let mut population = Population::from_requests(
            boundary(60.0),
            &requests(),
            &adjacencies(),
            config,
            17,
        )
        .unwrap();
        population.iterate();
        assert_eq!(
            population.genes().len(),
            10,
            "refill must bring the population back to size"
        );
        // Refilled clones were settled and evaluated before insertion, so
        // every gene carries a finite fitness.
        assert!(population.genes().iter().all(|g| g.is_evaluated()));
        for gene in population.genes() {
            assert_eq!(gene.rooms.len(), 4);
        }

        // The refill path stays deterministic across instances.
        let rebuild = || {
            Population::from_requests(
                boundary(60.0),
                &requests(),
                &adjacencies(),
                SpringConfig {
                    population_size: 10,
                    crossover_rate: 0.0,
                    selection_pressure: 0.5,
                    ..SpringConfig::default()
                },
                17,
            )
            .unwrap()
        };
        let mut again = rebuild();
        again.iterate();
        assert_eq!(again.stats(), population.stats());
    }

    #[test]
    fn test_cull_counts_offspring_in_population_size() {
        // Offspring join before the cull: 10 genes + 3 offspring, cull
        // floor(13 * 0.3) = 3, back to 10 with no refill needed.
        let mut population = Population::from_requests(
            boundary(60.0),
            &requests(),
            &adjacencies(),
            small_config(),
            29,
        )
        .unwrap();
        population.iterate();
        assert_eq!(population.genes().len(), 10);
        // The culled tail was exactly the unevaluated offspring batch.
        assert!(population.genes().iter().all(|g| g.is_evaluated()));
    }

    #[test]
    fn test_stats_before_first_generation_are_infinite() {
        let population = Population::from_requests(
            boundary(60.0),
            &requests(),
            &adjacencies(),
            small_config(),
            4,
        )
        .unwrap();
        let stats = population.stats();
        assert!(stats.best.is_infinite());
        assert!(stats.average.is_infinite());
        assert_eq!(stats.generation, 0);
    }

    #[test]
    fn test_single_room_converges() {
        let requests = vec![RoomRequest::new("solo", 25.0, 1.0)];
        let mut population = Population::from_requests(
            boundary(40.0),
            &requests,
            &[],
            small_config(),
            21,
        )
        .unwrap();
        assert!(!population.has_converged(0.05));
        for _ in 0..20 {
            population.iterate();
        }
        assert!(population.has_converged(0.05));
        let best = population.best();
        assert_eq!(best.fitness, 0.0, "a single contained room scores zero");
    }

    #[test]
    fn test_fresh_blood_keeps_population_well_formed() {
        let config = SpringConfig {
            population_size: 12,
            use_fresh_blood: true,
            fresh_blood_interval: 3,
            fresh_blood_warm_up: 2,
            ..SpringConfig::default()
        };
        let mut population =
            Population::from_requests(boundary(60.0), &requests(), &adjacencies(), config, 13)
                .unwrap();
        for _ in 0..7 {
            population.iterate();
        }
        assert_eq!(population.genes().len(), 12);
        // Fresh genes were evaluated before insertion.
        assert!(population.genes().iter().filter(|g| g.is_evaluated()).count() > 0);
        for gene in population.genes() {
            assert_eq!(gene.rooms.len(), 4);
        }
    }

    #[test]
    fn test_iterate_deterministic_across_instances() {
        let build = || {
            Population::from_requests(
                boundary(60.0),
                &requests(),
                &adjacencies(),
                small_config(),
                42,
            )
            .unwrap()
        };
        let mut first = build();
        let mut second = build();
        for _ in 0..10 {
            first.iterate();
            second.iterate();
        }
        assert_eq!(first.stats(), second.stats());
        for (a, b) in first.genes().iter().zip(second.genes()) {
            assert_eq!(a.fitness.to_bits(), b.fitness.to_bits());
            assert_eq!(a.rooms, b.rooms);
        }
    }
}
