use glam::Vec2;

use super::{
    link::Link,
    material::{MaterialKind, MaterialTable},
    point::{PointMass, DEFAULT_POINT_MASS},
};
use crate::{
    config::DEFAULT_GROUND_Y,
    error::{BlueprintError, Result},
    utils::allocator::{Arena, LinkId, PointId},
};

/// Anchor positions of the standard level: two on each bank of the gap.
pub const STANDARD_ANCHORS: [[f32; 2]; 4] = [
    [100.0, DEFAULT_GROUND_Y],
    [200.0, DEFAULT_GROUND_Y],
    [700.0, DEFAULT_GROUND_Y],
    [800.0, DEFAULT_GROUND_Y],
];

/// Authored structure: the graph of point-masses and links a run starts from.
///
/// A run clones the blueprint on start, so editing it afterwards never
/// affects a simulation in progress.
#[derive(Debug, Clone, Default)]
pub struct Blueprint {
    points: Arena<PointId, PointMass>,
    links: Arena<LinkId, Link>,
    materials: MaterialTable,
}

impl Blueprint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty blueprint validating spans against a custom material table.
    pub fn with_materials(materials: MaterialTable) -> Self {
        Self {
            materials,
            ..Self::default()
        }
    }

    /// Blueprint with the four fixed bank anchors of the standard level.
    pub fn standard_level() -> Self {
        let mut blueprint = Self::new();
        for [x, y] in STANDARD_ANCHORS {
            blueprint.add_anchor(Vec2::new(x, y));
        }
        blueprint
    }

    /// Assembles a blueprint from pre-built stores without validation.
    ///
    /// Links may reference missing points; the engine skips those links and
    /// reports them, see [`Blueprint::dangling_links`].
    pub fn from_parts(points: Arena<PointId, PointMass>, links: Arena<LinkId, Link>) -> Self {
        Self {
            points,
            links,
            materials: MaterialTable::default(),
        }
    }

    pub fn add_point(&mut self, position: Vec2) -> PointId {
        self.points.insert(PointMass::new(position, DEFAULT_POINT_MASS))
    }

    pub fn add_point_with_mass(&mut self, position: Vec2, mass: f32) -> Result<PointId> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(BlueprintError::InvalidMass(mass));
        }
        Ok(self.points.insert(PointMass::new(position, mass)))
    }

    pub fn add_anchor(&mut self, position: Vec2) -> PointId {
        self.points.insert(PointMass::anchor(position))
    }

    /// Links two points with a rest length equal to their current distance.
    pub fn add_link(&mut self, a: PointId, b: PointId, material: MaterialKind) -> Result<LinkId> {
        let length = self.endpoint_distance(a, b)?;
        let max_span = self.materials.get(material).max_span;
        if length > max_span {
            return Err(BlueprintError::SpanTooLong {
                material,
                length,
                max_span,
            });
        }
        self.insert_link(a, b, length, material)
    }

    /// Links two points with an explicit rest length, ignoring their current
    /// distance and the material's span limit.
    pub fn add_link_with_rest_length(
        &mut self,
        a: PointId,
        b: PointId,
        rest_length: f32,
        material: MaterialKind,
    ) -> Result<LinkId> {
        self.endpoint_distance(a, b)?;
        self.insert_link(a, b, rest_length, material)
    }

    /// Removes a point together with every link attached to it.
    pub fn remove_point(&mut self, id: PointId) -> Result<PointMass> {
        let point = self.points.remove(id).ok_or(BlueprintError::UnknownPoint(id))?;
        let attached: Vec<LinkId> = self
            .links
            .iter_with_ids()
            .filter(|(_, link)| link.touches(id))
            .map(|(link_id, _)| link_id)
            .collect();
        for link_id in attached {
            self.links.remove(link_id);
        }
        Ok(point)
    }

    pub fn remove_link(&mut self, id: LinkId) -> Result<Link> {
        self.links.remove(id).ok_or(BlueprintError::UnknownLink(id))
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

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    /// Total build cost of all links under the given price table.
    pub fn total_cost(&self, materials: &MaterialTable) -> u64 {
        self.links
            .iter()
            .map(|link| u64::from(materials.get(link.material).cost))
            .sum()
    }

    /// Links that reference a point missing from the store.
    pub fn dangling_links(&self) -> Vec<LinkId> {
        self.links
            .iter_with_ids()
            .filter(|(_, link)| !self.points.contains(link.a) || !self.points.contains(link.b))
            .map(|(id, _)| id)
            .collect()
    }

    fn endpoint_distance(&self, a: PointId, b: PointId) -> Result<f32> {
        if a == b {
            return Err(BlueprintError::SelfLink(a));
        }
        let point_a = self.points.get(a).ok_or(BlueprintError::UnknownPoint(a))?;
        let point_b = self.points.get(b).ok_or(BlueprintError::UnknownPoint(b))?;
        Ok(point_a.distance(point_b))
    }

    fn insert_link(
        &mut self,
        a: PointId,
        b: PointId,
        rest_length: f32,
        material: MaterialKind,
    ) -> Result<LinkId> {
        if !(rest_length.is_finite() && rest_length > 0.0) {
            return Err(BlueprintError::InvalidRestLength(rest_length));
        }
        let duplicate = self
            .links
            .iter()
            .any(|link| link.touches(a) && link.touches(b));
        if duplicate {
            return Err(BlueprintError::DuplicateLink(a, b));
        }
        Ok(self.links.insert(Link::new(a, b, rest_length, material)))
    }
}
