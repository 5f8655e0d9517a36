//! Thin stepping facade over both solvers.
//!
//! Drivers that don't care which solver they hold (a visualization loop
//! calling one step per frame, a batch runner stepping until done) can go
//! through this trait; the concrete types stay the primary API.

use planforge_logic::RoomRect;

use crate::discrete::DiscreteSolver;
use crate::spring::Population;

/// One solver stepping interface: advance, read the current best layout,
/// ask whether more stepping is useful.
pub trait LayoutSolver {
    /// Advance the solver by one unit of work.
    fn step(&mut self);
    /// Current best layout in world coordinates.
    fn best_layout(&self) -> Vec<RoomRect>;
    /// True once further `step()` calls stop changing the result.
    fn is_done(&self) -> bool;
}

impl LayoutSolver for DiscreteSolver {
    /// The discrete pipeline runs to completion in one call and latches.
    fn step(&mut self) {
        self.solve();
    }

    fn best_layout(&self) -> Vec<RoomRect> {
        self.to_layout()
    }

    fn is_done(&self) -> bool {
        self.is_solved()
    }
}

impl LayoutSolver for Population {
    /// One generation per step; done tracks the convergence predicate.
    fn step(&mut self) {
        self.iterate();
    }

    fn best_layout(&self) -> Vec<RoomRect> {
        self.best().to_layout()
    }

    fn is_done(&self) -> bool {
        self.has_converged(0.01)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DiscreteConfig, SpringConfig};
    use crate::input::RoomRequest;
    use planforge_logic::Vec2;

    fn boundary() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(30.0, 0.0),
            Vec2::new(30.0, 30.0),
            Vec2::new(0.0, 30.0),
        ]
    }

    #[test]
    fn test_discrete_solver_behind_trait() {
        let mut solver: Box<dyn LayoutSolver> = Box::new(
            DiscreteSolver::new(
                boundary(),
                vec![RoomRequest::new("a", 25.0, 1.0)],
                &[],
                DiscreteConfig {
                    max_iterations: 5,
                    ..DiscreteConfig::default()
                },
                1,
            )
            .unwrap(),
        );
        assert!(!solver.is_done());
        solver.step();
        assert!(solver.is_done());
        assert_eq!(solver.best_layout().len(), 1);
    }

    #[test]
    fn test_population_behind_trait() {
        let mut solver: Box<dyn LayoutSolver> = Box::new(
            Population::from_requests(
                boundary(),
                &[RoomRequest::new("a", 25.0, 1.0)],
                &[],
                SpringConfig {
                    population_size: 6,
                    ..SpringConfig::default()
                },
                1,
            )
            .unwrap(),
        );
        for _ in 0..20 {
            solver.step();
        }
        assert!(solver.is_done(), "a lone contained room converges fast");
        assert_eq!(solver.best_layout().len(), 1);
    }
}
