//! Utility helpers: the generational arena and logging timers.

pub mod allocator;
pub mod logging;

pub use allocator::{Arena, ArenaKey, GenerationalId, LinkId, PointId};
