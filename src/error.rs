//! Error types for authoring a structure.
//!
//! The simulation step itself never fails; only building a [`Blueprint`](crate::core::blueprint::Blueprint)
//! can be rejected.

use std::fmt;

use crate::core::material::MaterialKind;
use crate::utils::allocator::{LinkId, PointId};

/// Reasons an authoring operation was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum BlueprintError {
    /// A referenced point does not exist (never created or already removed).
    UnknownPoint(PointId),
    /// A referenced link does not exist.
    UnknownLink(LinkId),
    /// Both endpoints of a link are the same point.
    SelfLink(PointId),
    /// A link between these two points already exists.
    DuplicateLink(PointId, PointId),
    /// Rest length must be positive and finite.
    InvalidRestLength(f32),
    /// Point mass must be positive and finite.
    InvalidMass(f32),
    /// The link is longer than its material allows.
    SpanTooLong {
        material: MaterialKind,
        length: f32,
        max_span: f32,
    },
}

impl fmt::Display for BlueprintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPoint(id) => write!(f, "unknown point {id}"),
            Self::UnknownLink(id) => write!(f, "unknown link {id}"),
            Self::SelfLink(id) => write!(f, "link endpoints must differ, both are {id}"),
            Self::DuplicateLink(a, b) => write!(f, "{a} and {b} are already linked"),
            Self::InvalidRestLength(length) => {
                write!(f, "rest length must be positive and finite, got {length}")
            }
            Self::InvalidMass(mass) => write!(f, "mass must be positive and finite, got {mass}"),
            Self::SpanTooLong {
                material,
                length,
                max_span,
            } => write!(
                f,
                "{material:?} link of length {length:.1} exceeds max span {max_span:.1}"
            ),
        }
    }
}

impl std::error::Error for BlueprintError {}

/// Convenience result alias for authoring operations.
pub type Result<T> = std::result::Result<T, BlueprintError>;
