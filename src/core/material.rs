use serde::{Deserialize, Serialize};

/// Closed set of building materials a link can be made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    /// Drivable deck. The only kind the vehicle's wheels collide with.
    Road,
    Wood,
    Steel,
    Cable,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 4] = [
        MaterialKind::Road,
        MaterialKind::Wood,
        MaterialKind::Steel,
        MaterialKind::Cable,
    ];

    pub fn is_drivable(self) -> bool {
        matches!(self, MaterialKind::Road)
    }
}

/// Physical and economic properties of one material kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// Larger values tolerate more strain before failing.
    pub strength: f32,
    pub cost: u32,
    /// Longest link that may be authored with this material.
    pub max_span: f32,
}

impl MaterialSpec {
    pub fn road() -> Self {
        Self {
            strength: 2.5,
            cost: 200,
            max_span: 140.0,
        }
    }

    pub fn wood() -> Self {
        Self {
            strength: 1.2,
            cost: 100,
            max_span: 100.0,
        }
    }

    pub fn steel() -> Self {
        Self {
            strength: 5.0,
            cost: 450,
            max_span: 220.0,
        }
    }

    pub fn cable() -> Self {
        Self {
            strength: 1.8,
            cost: 150,
            max_span: 350.0,
        }
    }
}

/// Lookup table from [`MaterialKind`] to its [`MaterialSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialTable {
    pub road: MaterialSpec,
    pub wood: MaterialSpec,
    pub steel: MaterialSpec,
    pub cable: MaterialSpec,
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self {
            road: MaterialSpec::road(),
            wood: MaterialSpec::wood(),
            steel: MaterialSpec::steel(),
            cable: MaterialSpec::cable(),
        }
    }
}

impl MaterialTable {
    pub fn get(&self, kind: MaterialKind) -> &MaterialSpec {
        match kind {
            MaterialKind::Road => &self.road,
            MaterialKind::Wood => &self.wood,
            MaterialKind::Steel => &self.steel,
            MaterialKind::Cable => &self.cable,
        }
    }

    pub fn set(&mut self, kind: MaterialKind, spec: MaterialSpec) {
        match kind {
            MaterialKind::Road => self.road = spec,
            MaterialKind::Wood => self.wood = spec,
            MaterialKind::Steel => self.steel = spec,
            MaterialKind::Cable => self.cable = spec,
        }
    }

    pub fn with(mut self, kind: MaterialKind, spec: MaterialSpec) -> Self {
        self.set(kind, spec);
        self
    }

    pub fn strength(&self, kind: MaterialKind) -> f32 {
        self.get(kind).strength
    }
}
