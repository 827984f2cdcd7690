//! The test vehicle: a triangle of two wheels and a body held together by links.

use glam::Vec2;

use crate::{
    config::VehicleConfig,
    core::{link::Link, material::MaterialKind, point::PointMass},
    dynamics::{integrator::Integrator, solver::{RelaxationMetrics, RelaxationSolver}},
    utils::allocator::{Arena, LinkId, PointId},
};

/// Small constraint graph driven across the structure.
///
/// Lives in its own arenas, so its ids never alias structure ids.
#[derive(Debug, Clone)]
pub struct Vehicle {
    points: Arena<PointId, PointMass>,
    links: Arena<LinkId, Link>,
    wheels: [PointId; 2],
    body: PointId,
    pub wheel_radius: f32,
    pub drive_speed: f32,
    pub reaction_impulse: f32,
}

impl Vehicle {
    /// Builds the vehicle at rest, rear wheel at `config.spawn`.
    pub fn spawn(config: &VehicleConfig) -> Self {
        let mut points = Arena::new();
        let rear_position = config.spawn;
        let front_position = config.spawn + Vec2::new(config.wheel_base, 0.0);
        let body_position = config.spawn + config.body_offset;

        let rear = points.insert(PointMass::new(rear_position, config.wheel_mass));
        let front = points.insert(PointMass::new(front_position, config.wheel_mass));
        let body = points.insert(PointMass::new(body_position, config.body_mass));

        let mut links = Arena::new();
        for (a, b, from, to) in [
            (rear, front, rear_position, front_position),
            (rear, body, rear_position, body_position),
            (front, body, front_position, body_position),
        ] {
            links.insert(Link::new(a, b, from.distance(to), MaterialKind::Steel));
        }

        Self {
            points,
            links,
            wheels: [rear, front],
            body,
            wheel_radius: config.wheel_radius,
            drive_speed: config.drive_speed,
            reaction_impulse: config.reaction_impulse,
        }
    }

    /// Verlet step for every vehicle point, then the drive nudge on the wheels.
    pub fn integrate(&mut self, integrator: &Integrator) {
        integrator.step(&mut self.points);
        let drive = Vec2::new(self.drive_speed, 0.0);
        for wheel in self.wheels {
            if let Some(point) = self.points.get_mut(wheel) {
                point.nudge(drive);
            }
        }
    }

    /// Keeps the triangle's shape. Vehicle links are never stress-tested.
    pub fn relax(&mut self, solver: &RelaxationSolver) -> RelaxationMetrics {
        solver.relax(&mut self.points, &mut self.links, None)
    }

    pub fn wheels(&self) -> [PointId; 2] {
        self.wheels
    }

    pub fn body(&self) -> PointId {
        self.body
    }

    /// The point termination checks follow: the rear wheel.
    pub fn tracked_point(&self) -> Option<&PointMass> {
        self.points.get(self.wheels[0])
    }

    pub fn point(&self, id: PointId) -> Option<&PointMass> {
        self.points.get(id)
    }

    pub fn point_mut(&mut self, id: PointId) -> Option<&mut PointMass> {
        self.points.get_mut(id)
    }

    pub fn points(&self) -> &Arena<PointId, PointMass> {
        &self.points
    }

    pub fn links(&self) -> &Arena<LinkId, Link> {
        &self.links
    }

    /// Positions in spawn order: rear wheel, front wheel, body.
    pub fn positions(&self) -> Vec<Vec2> {
        self.points.iter().map(|point| point.position).collect()
    }
}
