use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Default mass of a free structure point.
pub const DEFAULT_POINT_MASS: f32 = 1.0;

/// Point-mass whose velocity is implied by the gap between its current and
/// previous positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointMass {
    pub position: Vec2,
    pub previous: Vec2,
    /// Fixed points never move and absorb none of a constraint correction.
    pub fixed: bool,
    /// Multiplier on the external acceleration. Irrelevant for fixed points.
    pub mass: f32,
}

impl PointMass {
    /// Free point at rest.
    pub fn new(position: Vec2, mass: f32) -> Self {
        Self {
            position,
            previous: position,
            fixed: false,
            mass,
        }
    }

    /// Immovable anchor.
    pub fn anchor(position: Vec2) -> Self {
        Self {
            position,
            previous: position,
            fixed: true,
            mass: 0.0,
        }
    }

    /// Displacement over the last step.
    pub fn velocity(&self) -> Vec2 {
        self.position - self.previous
    }

    /// Moves a free point by `delta`; anchors ignore the request.
    pub fn nudge(&mut self, delta: Vec2) {
        if self.fixed {
            return;
        }
        self.position += delta;
    }

    pub fn distance(&self, other: &PointMass) -> f32 {
        self.position.distance(other.position)
    }
}

impl Default for PointMass {
    fn default() -> Self {
        Self::new(Vec2::ZERO, DEFAULT_POINT_MASS)
    }
}
