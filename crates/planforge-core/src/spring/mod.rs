//! Continuous geometric refiner.
//!
//! A population-based evolutionary strategy over floating-point room
//! rectangles. Each gene is one candidate floor plan; a physics tick
//! squishes overlapping rooms apart and keeps them inside the boundary,
//! fitness scores overlap and adjacency gaps, and the population breeds,
//! culls, and optionally injects fresh blood each generation.

mod gene;
mod population;

pub use gene::{Gene, RoomState};
pub use population::{Population, PopulationStats};
