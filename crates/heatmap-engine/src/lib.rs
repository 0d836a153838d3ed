//! Spatial event-aggregation engine for the heatmap service.
//!
//! [`HeatmapEngine`] owns a spatial resolution and a dictionary of named
//! counter grids. It converts continuous world coordinates to discrete
//! grid cells (floor division, so negative space buckets correctly) and
//! exposes the increment and query operations on top of the sparse storage
//! in `heatmap-store`.
//!
//! # Modules
//!
//! - [`engine`] -- [`HeatmapEngine`]: increments, point/area queries
//! - [`snapshot`] -- binary save/restore of complete engine state
//! - [`error`] -- [`EngineError`] and [`SnapshotError`]

pub mod engine;
pub mod error;
pub mod snapshot;

// Re-export primary types at crate root.
pub use engine::HeatmapEngine;
pub use error::{EngineError, SnapshotError};
