use glam::Vec2;
use log::trace;

use super::queries::{SegmentProjection, SegmentQuery};
use crate::{
    core::{link::Link, point::PointMass},
    utils::allocator::{Arena, LinkId, PointId},
    vehicle::Vehicle,
};

/// A resolved wheel/road contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelContact {
    pub wheel: PointId,
    pub link: LinkId,
    /// Structure endpoints of the contacted link, `(a, b)`.
    pub endpoints: (PointId, PointId),
    /// Closest point on the road segment before the wheel was pushed out.
    pub projection: SegmentProjection,
    /// Unit direction the wheel was pushed along.
    pub normal: Vec2,
}

/// Couples the vehicle to the structure through its road links.
///
/// Each wheel is tested against the intact drivable links in insertion order.
/// The first link closer than the wheel radius wins: the wheel is moved out
/// to exactly the radius and the link's endpoints take a downward reaction
/// split by the projection parameter.
pub struct RoadContact;

impl RoadContact {
    pub fn resolve(
        vehicle: &mut Vehicle,
        points: &mut Arena<PointId, PointMass>,
        links: &Arena<LinkId, Link>,
    ) -> Vec<WheelContact> {
        let mut contacts = Vec::with_capacity(2);
        let radius = vehicle.wheel_radius;
        let reaction = vehicle.reaction_impulse;

        for wheel_id in vehicle.wheels() {
            let Some(wheel) = vehicle.point_mut(wheel_id) else {
                continue;
            };

            if let Some(contact) = Self::resolve_wheel(wheel_id, wheel, radius, points, links) {
                Self::apply_reaction(points, contact.endpoints, contact.projection.t, reaction);
                trace!(
                    "wheel {} on {} at t={:.3}",
                    contact.wheel,
                    contact.link,
                    contact.projection.t
                );
                contacts.push(contact);
            }
        }

        contacts
    }

    /// Pushes one wheel out of the first road link it penetrates.
    pub fn resolve_wheel(
        wheel_id: PointId,
        wheel: &mut PointMass,
        radius: f32,
        points: &Arena<PointId, PointMass>,
        links: &Arena<LinkId, Link>,
    ) -> Option<WheelContact> {
        for (link_id, link) in links.iter_with_ids() {
            if !link.is_drivable() {
                continue;
            }
            let (Some(start), Some(end)) = (points.get(link.a), points.get(link.b)) else {
                continue;
            };
            let Some(projection) = SegmentQuery::project(wheel.position, start.position, end.position)
            else {
                continue;
            };
            if projection.distance >= radius {
                continue;
            }

            let normal = if projection.distance > 0.0 {
                (wheel.position - projection.point) / projection.distance
            } else {
                SegmentQuery::upward_normal(start.position, end.position)
            };
            wheel.position = projection.point + normal * radius;

            return Some(WheelContact {
                wheel: wheel_id,
                link: link_id,
                endpoints: (link.a, link.b),
                projection,
                normal,
            });
        }
        None
    }

    /// Moves the free endpoints of the contacted link down: `a` by
    /// `impulse * (1 - t)`, `b` by `impulse * t`.
    pub fn apply_reaction(
        points: &mut Arena<PointId, PointMass>,
        (a, b): (PointId, PointId),
        t: f32,
        impulse: f32,
    ) {
        if let Some(a) = points.get_mut(a) {
            a.nudge(Vec2::new(0.0, impulse * (1.0 - t)));
        }
        if let Some(b) = points.get_mut(b) {
            b.nudge(Vec2::new(0.0, impulse * t));
        }
    }
}
