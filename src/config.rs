//! Global configuration constants and the tunable parameter set for a simulation run.
//!
//! Units are screen units: x grows to the right, y grows downward, and one step is
//! one rendered frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::material::MaterialTable;

/// Default gravity applied per step, scaled by point mass (Y-down).
pub const DEFAULT_GRAVITY: [f32; 2] = [0.0, 0.2];

/// Fraction of the previous step's displacement carried into the next one.
pub const DEFAULT_DAMPING: f32 = 0.98;

pub const DEFAULT_SOLVER_ITERATIONS: u32 = 8;

/// Strain at which a link of strength 1.0 fails.
pub const DEFAULT_FAILURE_COEFFICIENT: f32 = 0.3;

/// Free structure points never sink below this line.
pub const DEFAULT_KILL_FLOOR_Y: f32 = 800.0;

pub const DEFAULT_GROUND_Y: f32 = 550.0;

/// Depth below the ground line at which a falling vehicle counts as lost.
pub const DEFAULT_ABYSS_DEPTH: f32 = 300.0;

/// Horizontal coordinate the vehicle must pass to complete the level.
pub const DEFAULT_GOAL_X: f32 = 880.0;

pub const DEFAULT_VEHICLE_SPAWN: [f32; 2] = [50.0, DEFAULT_GROUND_Y - 30.0];

pub const DEFAULT_WHEEL_BASE: f32 = 60.0;

pub const DEFAULT_BODY_OFFSET: [f32; 2] = [30.0, -40.0];

pub const DEFAULT_WHEEL_MASS: f32 = 5.0;
pub const DEFAULT_BODY_MASS: f32 = 2.0;
pub const DEFAULT_WHEEL_RADIUS: f32 = 20.0;

/// Forward positional nudge applied to each wheel per step.
pub const DEFAULT_DRIVE_SPEED: f32 = 0.1;

/// Downward displacement shared by the endpoints of a contacted road link.
pub const DEFAULT_REACTION_IMPULSE: f32 = 0.5;

pub const DEFAULT_FRAME_BUDGET_MS: f32 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    pub spawn: Vec2,
    pub wheel_base: f32,
    /// Body point position relative to the rear wheel.
    pub body_offset: Vec2,
    pub wheel_mass: f32,
    pub body_mass: f32,
    pub wheel_radius: f32,
    pub drive_speed: f32,
    pub reaction_impulse: f32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            spawn: Vec2::from_array(DEFAULT_VEHICLE_SPAWN),
            wheel_base: DEFAULT_WHEEL_BASE,
            body_offset: Vec2::from_array(DEFAULT_BODY_OFFSET),
            wheel_mass: DEFAULT_WHEEL_MASS,
            body_mass: DEFAULT_BODY_MASS,
            wheel_radius: DEFAULT_WHEEL_RADIUS,
            drive_speed: DEFAULT_DRIVE_SPEED,
            reaction_impulse: DEFAULT_REACTION_IMPULSE,
        }
    }
}

/// Every tunable parameter of a simulation run.
///
/// # Builder Pattern
/// ```
/// use girder::config::SimulationConfig;
/// use glam::Vec2;
///
/// let config = SimulationConfig::default()
///     .with_iterations(12)
///     .with_gravity(Vec2::new(0.0, 0.1))
///     .with_goal_x(400.0);
/// assert_eq!(config.iterations, 12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub gravity: Vec2,
    pub damping: f32,
    pub iterations: u32,
    pub failure_coefficient: f32,
    pub materials: MaterialTable,
    /// `None` lets free structure points fall without limit.
    pub kill_floor_y: Option<f32>,
    pub ground_y: f32,
    pub abyss_depth: f32,
    pub goal_x: f32,
    pub frame_budget_ms: f32,
    /// When `false` a run simulates the structure alone and never terminates.
    pub spawn_vehicle: bool,
    pub vehicle: VehicleConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::from_array(DEFAULT_GRAVITY),
            damping: DEFAULT_DAMPING,
            iterations: DEFAULT_SOLVER_ITERATIONS,
            failure_coefficient: DEFAULT_FAILURE_COEFFICIENT,
            materials: MaterialTable::default(),
            kill_floor_y: Some(DEFAULT_KILL_FLOOR_Y),
            ground_y: DEFAULT_GROUND_Y,
            abyss_depth: DEFAULT_ABYSS_DEPTH,
            goal_x: DEFAULT_GOAL_X,
            frame_budget_ms: DEFAULT_FRAME_BUDGET_MS,
            spawn_vehicle: true,
            vehicle: VehicleConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// At least one pass is always performed.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    pub fn with_failure_coefficient(mut self, coefficient: f32) -> Self {
        self.failure_coefficient = coefficient;
        self
    }

    pub fn with_materials(mut self, materials: MaterialTable) -> Self {
        self.materials = materials;
        self
    }

    pub fn with_kill_floor(mut self, kill_floor_y: Option<f32>) -> Self {
        self.kill_floor_y = kill_floor_y;
        self
    }

    pub fn with_ground_y(mut self, ground_y: f32) -> Self {
        self.ground_y = ground_y;
        self
    }

    pub fn with_abyss_depth(mut self, depth: f32) -> Self {
        self.abyss_depth = depth;
        self
    }

    pub fn with_goal_x(mut self, goal_x: f32) -> Self {
        self.goal_x = goal_x;
        self
    }

    pub fn with_spawn_vehicle(mut self, spawn_vehicle: bool) -> Self {
        self.spawn_vehicle = spawn_vehicle;
        self
    }

    pub fn with_vehicle(mut self, vehicle: VehicleConfig) -> Self {
        self.vehicle = vehicle;
        self
    }

    pub fn abyss_y(&self) -> f32 {
        self.ground_y + self.abyss_depth
    }
}
