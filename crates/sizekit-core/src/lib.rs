#![forbid(unsafe_code)]

//! Core value types for size negotiation: sizes, positions, allocations,
//! padding, and the logging shim shared by the layout crates.

pub mod geometry;
pub mod logging;
pub mod padding;

pub use geometry::{Axis, GeometryError, Pos, Size, SizeAllocation};
pub use padding::Padding;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, trace_span, warn};
