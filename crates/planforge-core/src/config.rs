//! Solver configuration types.
//!
//! Every field carries a serde default so configs deserialize from partial
//! documents; `Default` impls mirror the same values.

use serde::{Deserialize, Serialize};

/// Scoring weights for discrete placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    #[serde(default = "ScoreWeights::default_compactness")]
    pub compactness: f64,
    #[serde(default = "ScoreWeights::default_adjacency")]
    pub adjacency: f64,
    /// Reserved for corridor-length scoring.
    #[serde(default = "ScoreWeights::default_corridor")]
    pub corridor: f64,
}

impl ScoreWeights {
    const fn default_compactness() -> f64 {
        2.0
    }
    const fn default_adjacency() -> f64 {
        3.0
    }
    const fn default_corridor() -> f64 {
        0.5
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            compactness: Self::default_compactness(),
            adjacency: Self::default_adjacency(),
            corridor: Self::default_corridor(),
        }
    }
}

/// Configuration for the discrete grid solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscreteConfig {
    /// Meters per grid cell.
    #[serde(default = "DiscreteConfig::default_grid_resolution")]
    pub grid_resolution: f64,
    /// Outer snapshot/mutate refinement rounds.
    #[serde(default = "DiscreteConfig::default_max_iterations")]
    pub max_iterations: usize,
    /// Fraction of placed rooms removed per refinement round.
    #[serde(default = "DiscreteConfig::default_mutation_rate")]
    pub mutation_rate: f64,
    /// Seed cell of the corridor network, in grid coordinates. Defaults to
    /// the grid center.
    #[serde(default)]
    pub start_point: Option<(i32, i32)>,
    #[serde(default)]
    pub weights: ScoreWeights,
}

impl DiscreteConfig {
    const fn default_grid_resolution() -> f64 {
        1.0
    }
    const fn default_max_iterations() -> usize {
        500
    }
    const fn default_mutation_rate() -> f64 {
        0.3
    }
}

impl Default for DiscreteConfig {
    fn default() -> Self {
        Self {
            grid_resolution: Self::default_grid_resolution(),
            max_iterations: Self::default_max_iterations(),
            mutation_rate: Self::default_mutation_rate(),
            start_point: None,
            weights: ScoreWeights::default(),
        }
    }
}

/// Configuration for the continuous spring refiner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Number of genes in the population, at least 2.
    #[serde(default = "SpringConfig::default_population_size")]
    pub population_size: usize,
    /// Per-room translation mutation probability.
    #[serde(default = "SpringConfig::default_mutation_rate")]
    pub mutation_rate: f64,
    /// Half-span of the uniform translation mutation.
    #[serde(default = "SpringConfig::default_mutation_strength")]
    pub mutation_strength: f64,
    /// Fraction of the population bred as offspring each generation.
    #[serde(default = "SpringConfig::default_crossover_rate")]
    pub crossover_rate: f64,
    /// Fraction of the population culled each generation.
    #[serde(default = "SpringConfig::default_selection_pressure")]
    pub selection_pressure: f64,
    /// 0 = pure topology, 1 = pure geometry.
    #[serde(default = "SpringConfig::default_fitness_balance")]
    pub fitness_balance: f64,
    /// Per-room aspect-ratio mutation probability.
    #[serde(default = "SpringConfig::default_aspect_ratio_mutation_rate")]
    pub aspect_ratio_mutation_rate: f64,
    /// Fraction of the sorted population eligible as crossover parents.
    #[serde(default = "SpringConfig::default_parent_pool_fraction")]
    pub parent_pool_fraction: f64,
    /// Aspect-ratio bound applied to every non-corridor room when set,
    /// overriding the per-room target ratio.
    #[serde(default)]
    pub global_target_ratio: Option<f64>,
    /// Quadratic (true) vs square-root (false) topological gap penalty.
    #[serde(default = "SpringConfig::default_use_quadratic_penalty")]
    pub use_quadratic_penalty: bool,
    /// Pull rooms toward adjacency partners during the physics tick.
    #[serde(default = "SpringConfig::default_use_adjacency_attraction")]
    pub use_adjacency_attraction: bool,
    /// Bias aspect-ratio mutations toward the less-pressured axis.
    #[serde(default = "SpringConfig::default_use_pressure_bias")]
    pub use_pressure_bias: bool,
    #[serde(default)]
    pub use_partner_bias: bool,
    #[serde(default = "SpringConfig::default_partner_bias_rate")]
    pub partner_bias_rate: f64,
    #[serde(default)]
    pub use_swap_mutation: bool,
    #[serde(default = "SpringConfig::default_swap_mutation_rate")]
    pub swap_mutation_rate: f64,
    /// Grow under-sized rooms before collision resolution.
    #[serde(default)]
    pub use_aggressive_inflation: bool,
    #[serde(default = "SpringConfig::default_inflation_rate")]
    pub inflation_rate: f64,
    #[serde(default = "SpringConfig::default_inflation_threshold")]
    pub inflation_threshold: f64,
    /// Physics ticks applied to newborn genes before their first
    /// evaluation. Clamped to at most 5.
    #[serde(default = "SpringConfig::default_warm_up_iterations")]
    pub warm_up_iterations: usize,
    #[serde(default)]
    pub use_fresh_blood: bool,
    #[serde(default = "SpringConfig::default_fresh_blood_interval")]
    pub fresh_blood_interval: usize,
    #[serde(default = "SpringConfig::default_fresh_blood_warm_up")]
    pub fresh_blood_warm_up: usize,
    #[serde(default)]
    pub use_non_linear_overlap_penalty: bool,
    /// Exponent applied to pairwise overlap areas, at least 1.
    #[serde(default = "SpringConfig::default_overlap_penalty_exponent")]
    pub overlap_penalty_exponent: f64,
}

impl SpringConfig {
    const fn default_population_size() -> usize {
        25
    }
    const fn default_mutation_rate() -> f64 {
        0.3
    }
    const fn default_mutation_strength() -> f64 {
        10.0
    }
    const fn default_crossover_rate() -> f64 {
        0.3
    }
    const fn default_selection_pressure() -> f64 {
        0.3
    }
    const fn default_fitness_balance() -> f64 {
        0.5
    }
    const fn default_aspect_ratio_mutation_rate() -> f64 {
        0.2
    }
    const fn default_parent_pool_fraction() -> f64 {
        0.5
    }
    const fn default_use_quadratic_penalty() -> bool {
        true
    }
    const fn default_use_adjacency_attraction() -> bool {
        true
    }
    const fn default_use_pressure_bias() -> bool {
        true
    }
    const fn default_partner_bias_rate() -> f64 {
        0.2
    }
    const fn default_swap_mutation_rate() -> f64 {
        0.3
    }
    const fn default_inflation_rate() -> f64 {
        1.05
    }
    const fn default_inflation_threshold() -> f64 {
        0.9
    }
    const fn default_warm_up_iterations() -> usize {
        2
    }
    const fn default_fresh_blood_interval() -> usize {
        50
    }
    const fn default_fresh_blood_warm_up() -> usize {
        3
    }
    const fn default_overlap_penalty_exponent() -> f64 {
        1.2
    }

    /// Warm-up tick count with the hard cap applied.
    pub fn effective_warm_up(&self) -> usize {
        self.warm_up_iterations.min(5)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            population_size: Self::default_population_size(),
            mutation_rate: Self::default_mutation_rate(),
            mutation_strength: Self::default_mutation_strength(),
            crossover_rate: Self::default_crossover_rate(),
            selection_pressure: Self::default_selection_pressure(),
            fitness_balance: Self::default_fitness_balance(),
            aspect_ratio_mutation_rate: Self::default_aspect_ratio_mutation_rate(),
            parent_pool_fraction: Self::default_parent_pool_fraction(),
            global_target_ratio: None,
            use_quadratic_penalty: Self::default_use_quadratic_penalty(),
            use_adjacency_attraction: Self::default_use_adjacency_attraction(),
            use_pressure_bias: Self::default_use_pressure_bias(),
            use_partner_bias: false,
            partner_bias_rate: Self::default_partner_bias_rate(),
            use_swap_mutation: false,
            swap_mutation_rate: Self::default_swap_mutation_rate(),
            use_aggressive_inflation: false,
            inflation_rate: Self::default_inflation_rate(),
            inflation_threshold: Self::default_inflation_threshold(),
            warm_up_iterations: Self::default_warm_up_iterations(),
            use_fresh_blood: false,
            fresh_blood_interval: Self::default_fresh_blood_interval(),
            fresh_blood_warm_up: Self::default_fresh_blood_warm_up(),
            use_non_linear_overlap_penalty: false,
            overlap_penalty_exponent: Self::default_overlap_penalty_exponent(),
        }
    }
}
