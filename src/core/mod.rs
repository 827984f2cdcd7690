//! Core types describing the authored structure: points, links, materials, blueprints.

pub mod blueprint;
pub mod link;
pub mod material;
pub mod point;

pub use blueprint::Blueprint;
pub use link::{Link, LinkState};
pub use material::{MaterialKind, MaterialSpec, MaterialTable};
pub use point::PointMass;
