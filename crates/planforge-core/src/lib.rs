//! Planforge layout solvers.
//!
//! Two independent solvers over a shared geometric substrate
//! (`planforge-logic`):
//!
//! - [`discrete::DiscreteSolver`] places rooms on an integer grid and
//!   carves a connected corridor network from a start cell.
//! - [`spring::Population`] evolves continuous-coordinate rectangles under
//!   collision physics until the layout settles.
//!
//! A typical pipeline runs the discrete solver once, seeds a spring
//! population from its layout, and iterates the population once per frame:
//!
//! ```rust,no_run
//! use planforge_core::prelude::*;
//! use planforge_logic::Vec2;
//!
//! let boundary = vec![
//!     Vec2::new(0.0, 0.0),
//!     Vec2::new(50.0, 0.0),
//!     Vec2::new(50.0, 40.0),
//!     Vec2::new(0.0, 40.0),
//! ];
//! let rooms = vec![RoomRequest::new("living", 200.0, 1.5)];
//!
//! let mut solver = DiscreteSolver::new(
//!     boundary.clone(),
//!     rooms.clone(),
//!     &[],
//!     DiscreteConfig::default(),
//!     42,
//! )?;
//! solver.solve();
//!
//! let mut population = Population::from_layout(
//!     boundary,
//!     &rooms,
//!     &solver.to_layout(),
//!     &[],
//!     SpringConfig::default(),
//!     42,
//! )?;
//! loop {
//!     population.iterate();
//!     if population.has_converged(0.01) {
//!         break;
//!     }
//! }
//! # Ok::<(), planforge_core::PlanError>(())
//! ```

pub mod config;
pub mod discrete;
pub mod input;
pub mod solver;
pub mod spring;

pub use config::{DiscreteConfig, ScoreWeights, SpringConfig};
pub use discrete::{DiscreteSolver, PlacedRoom};
pub use input::{Adjacency, CorridorRule, PlanError, RoomRequest};
pub use solver::LayoutSolver;
pub use spring::{Gene, Population, PopulationStats, RoomState};

/// Commonly used types for convenient importing.
pub mod prelude {
    pub use crate::config::{DiscreteConfig, SpringConfig};
    pub use crate::discrete::{DiscreteSolver, PlacedRoom};
    pub use crate::input::{Adjacency, CorridorRule, PlanError, RoomRequest};
    pub use crate::solver::LayoutSolver;
    pub use crate::spring::{Gene, Population, RoomState};
}
