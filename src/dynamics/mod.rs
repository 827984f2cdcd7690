//! Simulation dynamics: Verlet integration, constraint relaxation, and link failure.

pub mod integrator;
pub mod solver;
pub mod stress;

pub use integrator::Integrator;
pub use solver::{RelaxationMetrics, RelaxationSolver};
pub use stress::StressModel;
