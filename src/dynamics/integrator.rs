use glam::Vec2;

use crate::{
    core::point::PointMass,
    utils::allocator::{Arena, ArenaKey},
};

/// Verlet integrator stepping point-masses forward by one frame.
///
/// Velocity is never stored; it is the gap between a point's current and
/// previous positions.
#[derive(Debug, Clone, Copy)]
pub struct Integrator {
    pub gravity: Vec2,
    pub damping: f32,
}

impl Integrator {
    pub fn new(gravity: Vec2, damping: f32) -> Self {
        Self { gravity, damping }
    }

    /// Advances one free point:
    /// `next = current + (current - previous) * damping + gravity * mass`.
    pub fn integrate_point(&self, point: &mut PointMass) {
        if point.fixed {
            return;
        }

        let next = point.position + point.velocity() * self.damping + self.gravity * point.mass;
        point.previous = point.position;
        point.position = next;
    }

    pub fn step<K: ArenaKey>(&self, points: &mut Arena<K, PointMass>) {
        for point in points.iter_mut() {
            self.integrate_point(point);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::allocator::PointId;
    use approx::assert_relative_eq;

    #[test]
    fn free_point_accelerates_by_mass_scaled_gravity() {
        let integrator = Integrator::new(Vec2::new(0.0, 0.2), 1.0);
        let mut point = PointMass::new(Vec2::ZERO, 2.0);

        integrator.integrate_point(&mut point);
        assert_relative_eq!(point.position.y, 0.4);
        assert_relative_eq!(point.previous.y, 0.0);

        integrator.integrate_point(&mut point);
        assert_relative_eq!(point.position.y, 1.2, epsilon = 1e-6);
    }

    #[test]
    fn damping_bleeds_off_carried_motion() {
        let integrator = Integrator::new(Vec2::ZERO, 0.5);
        let mut point = PointMass::new(Vec2::new(10.0, 0.0), 1.0);
        point.previous = Vec2::new(6.0, 0.0);

        integrator.integrate_point(&mut point);

        assert_relative_eq!(point.position.x, 12.0);
        assert_relative_eq!(point.previous.x, 10.0);
    }

    #[test]
    fn anchors_are_skipped() {
        let integrator = Integrator::new(Vec2::new(0.0, 0.2), 0.98);
        let mut points: Arena<PointId, PointMass> = Arena::new();
        let anchor = points.insert(PointMass::anchor(Vec2::new(3.0, 4.0)));
        let free = points.insert(PointMass::new(Vec2::new(3.0, 4.0), 1.0));

        for _ in 0..10 {
            integrator.step(&mut points);
        }

        assert_eq!(points.get(anchor).map(|p| p.position), Some(Vec2::new(3.0, 4.0)));
        assert!(points.get(free).map(|p| p.position.y > 4.0).unwrap_or(false));
    }
}
