use glam::Vec2;

/// Closest point on a segment to a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Position along the segment, clamped to `[0, 1]`; 0 is the start.
    pub t: f32,
    pub point: Vec2,
    pub distance: f32,
}

/// Point-vs-segment queries used by wheel contact.
pub struct SegmentQuery;

impl SegmentQuery {
    /// Projects `point` onto the segment `start..end`.
    ///
    /// Returns `None` for a zero-length segment, which has no direction to
    /// project onto.
    pub fn project(point: Vec2, start: Vec2, end: Vec2) -> Option<SegmentProjection> {
        let axis = end - start;
        let length_squared = axis.length_squared();
        if length_squared == 0.0 {
            return None;
        }

        let t = ((point - start).dot(axis) / length_squared).clamp(0.0, 1.0);
        let closest = start + axis * t;
        Some(SegmentProjection {
            t,
            point: closest,
            distance: point.distance(closest),
        })
    }

    /// Unit normal of the segment pointing to the side with smaller `y`
    /// (up on screen).
    pub fn upward_normal(start: Vec2, end: Vec2) -> Vec2 {
        let normal = (end - start).perp().normalize_or_zero();
        if normal == Vec2::ZERO {
            return Vec2::NEG_Y;
        }
        if normal.y > 0.0 {
            -normal
        } else {
            normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn projection_inside_segment() {
        let hit = SegmentQuery::project(
            Vec2::new(25.0, -10.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
        )
        .unwrap();
        assert_relative_eq!(hit.t, 0.25);
        assert_eq!(hit.point, Vec2::new(25.0, 0.0));
        assert_relative_eq!(hit.distance, 10.0);
    }

    #[test]
    fn projection_clamps_to_endpoints() {
        let before = SegmentQuery::project(
            Vec2::new(-30.0, -40.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
        )
        .unwrap();
        assert_eq!(before.t, 0.0);
        assert_relative_eq!(before.distance, 50.0);

        let after = SegmentQuery::project(
            Vec2::new(130.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
        )
        .unwrap();
        assert_eq!(after.t, 1.0);
        assert_eq!(after.point, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn degenerate_segment_has_no_projection() {
        assert!(SegmentQuery::project(Vec2::ONE, Vec2::ZERO, Vec2::ZERO).is_none());
    }

    #[test]
    fn upward_normal_points_against_screen_y() {
        let n = SegmentQuery::upward_normal(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
        assert_eq!(n, Vec2::new(0.0, -1.0));
        let reversed = SegmentQuery::upward_normal(Vec2::new(100.0, 0.0), Vec2::new(0.0, 0.0));
        assert_eq!(reversed, Vec2::new(0.0, -1.0));
    }
}
