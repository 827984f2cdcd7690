//! Wheel-vs-road contact: segment projection and the contact coupling step.

pub mod contact;
pub mod queries;

pub use contact::{RoadContact, WheelContact};
pub use queries::{SegmentProjection, SegmentQuery};
