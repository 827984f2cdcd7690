use glam::Vec2;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    collision::contact::{RoadContact, WheelContact},
    config::SimulationConfig,
    core::{blueprint::Blueprint, link::Link, material::MaterialKind, point::PointMass},
    dynamics::{
        integrator::Integrator,
        solver::{RelaxationMetrics, RelaxationSolver},
        stress::StressModel,
    },
    utils::{
        allocator::{Arena, LinkId, PointId},
        logging::{warn_if_frame_budget_exceeded, ScopedTimer},
    },
    vehicle::Vehicle,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunStatus {
    #[default]
    Running,
    Succeeded,
    Failed,
}

impl RunStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RunStatus::Running)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StepReport {
    pub step: u64,
    pub status: RunStatus,
    pub advanced: bool,
    pub broken_links: Vec<LinkId>,
    pub contacts: Vec<WheelContact>,
    /// Link visits skipped this step because an endpoint is missing.
    pub missing_endpoints: usize,
    pub max_stress: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointSnapshot {
    pub id: PointId,
    pub position: Vec2,
    pub fixed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkSnapshot {
    pub id: LinkId,
    pub a: PointId,
    pub b: PointId,
    pub material: MaterialKind,
    pub stress: f32,
    pub broken: bool,
}

/// Everything a renderer or UI needs to draw one frame of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub step: u64,
    pub points: Vec<PointSnapshot>,
    pub links: Vec<LinkSnapshot>,
    pub vehicle: Vec<Vec2>,
    pub succeeded: bool,
    pub failed: bool,
}

/// One simulation run: a private working copy of the authored structure plus
/// the vehicle, advanced one frame at a time.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    points: Arena<PointId, PointMass>,
    links: Arena<LinkId, Link>,
    vehicle: Option<Vehicle>,
    config: SimulationConfig,
    integrator: Integrator,
    solver: RelaxationSolver,
    stress: StressModel,
    status: RunStatus,
    steps: u64,
}

impl SimulationRun {
    pub fn new(blueprint: &Blueprint, config: SimulationConfig) -> Self {
        let dangling = blueprint.dangling_links();
        if !dangling.is_empty() {
            warn!(
                "{} link(s) reference missing points and will be ignored: {:?}",
                dangling.len(),
                dangling
            );
        }

        let vehicle = config
            .spawn_vehicle
            .then(|| Vehicle::spawn(&config.vehicle));
        info!(
            "Run started: {} points, {} links, vehicle: {}",
            blueprint.points().len(),
            blueprint.links().len(),
            if vehicle.is_some() { "spawned" } else { "none" }
        );

        Self {
            points: blueprint.points().clone(),
            links: blueprint.links().clone(),
            vehicle,
            integrator: Integrator::new(config.gravity, config.damping),
            solver: RelaxationSolver::new(config.iterations),
            stress: StressModel::new(config.failure_coefficient, config.materials.clone()),
            config,
            status: RunStatus::Running,
            steps: 0,
        }
    }

    /// Advances the run by one frame. A finished run is left untouched.
    pub fn step(&mut self) -> StepReport {
        if self.status.is_terminal() {
            return StepReport {
                step: self.steps,
                status: self.status,
                ..StepReport::default()
            };
        }

        let frame_timer = ScopedTimer::new("run::step");

        {
            let _timer = ScopedTimer::new("structure::integrate");
            self.integrator.step(&mut self.points);
        }
        let structure = {
            let _timer = ScopedTimer::new("structure::relax");
            self.solver
                .relax(&mut self.points, &mut self.links, Some(&self.stress))
        };
        self.apply_kill_floor();

        let (vehicle_metrics, contacts) = match self.vehicle.as_mut() {
            Some(vehicle) => {
                let metrics = {
                    let _timer = ScopedTimer::new("vehicle::step");
                    vehicle.integrate(&self.integrator);
                    vehicle.relax(&self.solver)
                };
                let _timer = ScopedTimer::new("vehicle::contact");
                let contacts = RoadContact::resolve(vehicle, &mut self.points, &self.links);
                (metrics, contacts)
            }
            None => (RelaxationMetrics::default(), Vec::new()),
        };

        self.steps += 1;
        self.status = self.evaluate_termination();
        self.log_step(&structure, &vehicle_metrics, &contacts);

        warn_if_frame_budget_exceeded(frame_timer.elapsed(), self.config.frame_budget_ms);

        StepReport {
            step: self.steps,
            status: self.status,
            advanced: true,
            broken_links: structure.broken,
            contacts,
            missing_endpoints: structure.missing_endpoints + vehicle_metrics.missing_endpoints,
            max_stress: structure.max_stress,
        }
    }

    pub fn run_until_finished(&mut self, max_steps: u64) -> RunStatus {
        for _ in 0..max_steps {
            if self.step().status.is_terminal() {
                break;
            }
        }
        self.status
    }

    // Success is checked first.
    fn evaluate_termination(&self) -> RunStatus {
        let Some(tracked) = self.vehicle.as_ref().and_then(Vehicle::tracked_point) else {
            return RunStatus::Running;
        };
        if tracked.position.x > self.config.goal_x {
            RunStatus::Succeeded
        } else if tracked.position.y > self.config.abyss_y() {
            RunStatus::Failed
        } else {
            RunStatus::Running
        }
    }

    fn apply_kill_floor(&mut self) {
        let Some(floor) = self.config.kill_floor_y else {
            return;
        };
        for point in self.points.iter_mut() {
            if !point.fixed && point.position.y > floor {
                point.position.y = floor;
            }
        }
    }

    fn log_step(
        &self,
        structure: &RelaxationMetrics,
        vehicle: &RelaxationMetrics,
        contacts: &[WheelContact],
    ) {
        for id in &structure.broken {
            debug!("step {}: {} broke", self.steps, id);
        }
        for contact in contacts {
            debug!("step {}: {} rides {}", self.steps, contact.wheel, contact.link);
        }
        if vehicle.degenerate_skips > 0 {
            debug!(
                "step {}: vehicle has {} degenerate link visit(s)",
                self.steps, vehicle.degenerate_skips
            );
        }
        match self.status {
            RunStatus::Succeeded => info!("Run succeeded after {} steps", self.steps),
            RunStatus::Failed => info!("Run failed after {} steps", self.steps),
            RunStatus::Running => {}
        }
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            step: self.steps,
            points: self
                .points
                .iter_with_ids()
                .map(|(id, point)| PointSnapshot {
                    id,
                    position: point.position,
                    fixed: point.fixed,
                })
                .collect(),
            links: self
                .links
                .iter_with_ids()
                .map(|(id, link)| LinkSnapshot {
                    id,
                    a: link.a,
                    b: link.b,
                    material: link.material,
                    stress: link.stress,
                    broken: link.is_broken(),
                })
                .collect(),
            vehicle: self
                .vehicle
                .as_ref()
                .map(Vehicle::positions)
                .unwrap_or_default(),
            succeeded: self.succeeded(),
            failed: self.failed(),
        }
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn succeeded(&self) -> bool {
        self.status == RunStatus::Succeeded
    }

    pub fn failed(&self) -> bool {
        self.status == RunStatus::Failed
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn point(&self, id: PointId) -> Option<&PointMass> {
        self.points.get(id)
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id)
    }

    pub fn points(&self) -> &Arena<PointId, PointMass> {
        &self.points
    }

    pub fn links(&self) -> &Arena<LinkId, Link> {
        &self.links
    }

    pub fn vehicle(&self) -> Option<&Vehicle> {
        self.vehicle.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_wins_when_both_conditions_hold() {
        let mut run = SimulationRun::new(&Blueprint::new(), SimulationConfig::default());
        // Spawned vehicle sits at x=50, y=520: past a goal of 0 and below an
        // abyss line at 500 at the same time.
        run.config.goal_x = 0.0;
        run.config.ground_y = 400.0;
        run.config.abyss_depth = 100.0;

        assert_eq!(run.evaluate_termination(), RunStatus::Succeeded);
    }

    #[test]
    fn kill_floor_clamps_free_points_only() {
        let mut blueprint = Blueprint::new();
        let anchor = blueprint.add_anchor(Vec2::new(0.0, 900.0));
        let free = blueprint.add_point(Vec2::new(10.0, 790.0));
        let config = SimulationConfig::default().with_kill_floor(Some(800.0));
        let mut run = SimulationRun::new(&blueprint, config);

        for _ in 0..50 {
            run.step();
        }

        assert_eq!(run.point(anchor).unwrap().position.y, 900.0);
        assert_eq!(run.point(free).unwrap().position.y, 800.0);
    }

    #[test]
    fn structure_only_runs_never_terminate() {
        let config = SimulationConfig::default().with_spawn_vehicle(false);
        let mut run = SimulationRun::new(&Blueprint::standard_level(), config);

        assert_eq!(run.run_until_finished(2_000), RunStatus::Running);
        assert_eq!(run.steps(), 2_000);
        assert!(run.vehicle().is_none());
        assert!(run.snapshot().vehicle.is_empty());
    }

    #[test]
    fn finished_runs_do_not_advance() {
        let mut run = SimulationRun::new(&Blueprint::new(), SimulationConfig::default());
        let status = run.run_until_finished(10_000);
        assert_eq!(status, RunStatus::Failed);

        let before = run.snapshot();
        let report = run.step();

        assert!(!report.advanced);
        assert_eq!(report.status, RunStatus::Failed);
        assert_eq!(run.snapshot(), before);
    }
}
