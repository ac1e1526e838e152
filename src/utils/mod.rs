//! Utility helpers: entity allocation, logging timers, and step profiling.

pub mod allocator;
pub mod logging;
pub mod profiling;

pub use allocator::{Arena, EntityId};
pub use profiling::StepProfiler;
