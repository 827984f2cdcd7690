//! Girder – position-based bridge simulation engine.
//!
//! A structure is authored as a [`Blueprint`] of point-masses and links. A
//! [`SimulationRun`] snapshots it, spawns a small vehicle, and advances both
//! once per frame with Verlet integration and iterative distance-constraint
//! relaxation. Links that strain past their material's limit break for good;
//! the run ends when the vehicle reaches the far bank or falls into the gap.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod utils;
pub mod vehicle;
pub mod world;

pub use glam::Vec2;

pub use collision::{
    contact::{RoadContact, WheelContact},
    queries::{SegmentProjection, SegmentQuery},
};
pub use config::{SimulationConfig, VehicleConfig};
pub use crate::core::{
    blueprint::Blueprint,
    link::{Link, LinkState},
    material::{MaterialKind, MaterialSpec, MaterialTable},
    point::PointMass,
};
pub use dynamics::{
    integrator::Integrator,
    solver::{RelaxationMetrics, RelaxationSolver},
    stress::StressModel,
};
pub use error::BlueprintError;
pub use utils::allocator::{Arena, ArenaKey, GenerationalId, LinkId, PointId};
pub use vehicle::Vehicle;
pub use world::{FrameSnapshot, LinkSnapshot, PointSnapshot, RunStatus, SimulationRun, StepReport};

/// Lifecycle wrapper holding at most one active [`SimulationRun`].
///
/// Mirrors a build/test toggle: `start` snapshots the current blueprint,
/// `step` is called once per frame, `stop` discards the run.
pub struct Simulator {
    config: SimulationConfig,
    run: Option<SimulationRun>,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config, run: None }
    }

    /// Starts a fresh run from `blueprint`, replacing any run in progress.
    pub fn start(&mut self, blueprint: &Blueprint) -> &SimulationRun {
        self.run.insert(SimulationRun::new(blueprint, self.config.clone()))
    }

    /// Advances the active run by one frame. Returns `None` when idle.
    pub fn step(&mut self) -> Option<StepReport> {
        self.run.as_mut().map(SimulationRun::step)
    }

    /// Discards the active run and its vehicle, returning its final state.
    pub fn stop(&mut self) -> Option<FrameSnapshot> {
        self.run.take().map(|run| run.snapshot())
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    pub fn run(&self) -> Option<&SimulationRun> {
        self.run.as_ref()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// New configuration applies from the next [`Simulator::start`].
    pub fn set_config(&mut self, config: SimulationConfig) {
        self.config = config;
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}
