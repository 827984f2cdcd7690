use serde::{Deserialize, Serialize};

use super::material::MaterialKind;
use crate::utils::allocator::PointId;

/// Lifecycle of a link within one run. The only transition is `Intact -> Broken`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinkState {
    #[default]
    Intact,
    Broken,
}

/// Distance constraint between two point-masses.
///
/// Stored with an `a -> b` direction but semantically undirected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub a: PointId,
    pub b: PointId,
    pub rest_length: f32,
    pub material: MaterialKind,
    /// Recomputed on the final relaxation pass of every step; 1.0 is the failure boundary.
    pub stress: f32,
    state: LinkState,
}

impl Link {
    pub fn new(a: PointId, b: PointId, rest_length: f32, material: MaterialKind) -> Self {
        Self {
            a,
            b,
            rest_length,
            material,
            stress: 0.0,
            state: LinkState::Intact,
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn is_broken(&self) -> bool {
        self.state == LinkState::Broken
    }

    /// Severs the link for the rest of the run. Returns `true` on the transition.
    pub fn mark_broken(&mut self) -> bool {
        if self.is_broken() {
            return false;
        }
        self.state = LinkState::Broken;
        true
    }

    /// Intact links of a drivable material take part in wheel contact.
    pub fn is_drivable(&self) -> bool {
        !self.is_broken() && self.material.is_drivable()
    }

    pub fn touches(&self, point: PointId) -> bool {
        self.a == point || self.b == point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaking_is_one_way() {
        let mut link = Link::new(PointId::new(0, 0), PointId::new(1, 0), 10.0, MaterialKind::Road);
        assert!(link.is_drivable());
        assert!(link.mark_broken());
        assert!(!link.mark_broken());
        assert_eq!(link.state(), LinkState::Broken);
        assert!(!link.is_drivable());
    }
}
