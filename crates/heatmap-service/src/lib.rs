//! Public facade for the spatial heatmap service.
//!
//! [`Heatmap`] is the one type most callers need: it wraps the engine with
//! convenience conversions (pass `(x, y)` tuples anywhere a coordinate is
//! expected), forwards every operation 1:1, and logs failures through
//! [`tracing`] so call sites can stay terse. The engine itself only
//! reports typed errors; turning them into diagnostics happens here.
//!
//! ```
//! use heatmap_service::Heatmap;
//!
//! let mut heatmap = Heatmap::with_resolution(2.0, 2.0);
//! heatmap.increment((0.5, 0.5), "deaths")?;
//! heatmap.increment((1.9, 1.9), "deaths")?;
//! assert_eq!(heatmap.get((0.0, 0.0), "deaths"), 2);
//! # Ok::<(), heatmap_service::EngineError>(())
//! ```
//!
//! # Modules
//!
//! - [`facade`] -- the [`Heatmap`] wrapper
//! - [`config`] -- typed YAML configuration for the spatial resolution

pub mod config;
pub mod facade;

// Re-export the full public surface at crate root.
pub use config::{ConfigError, HeatmapConfig};
pub use facade::Heatmap;
pub use heatmap_engine::{EngineError, HeatmapEngine, SnapshotError};
pub use heatmap_types::{CellRegion, Coordinate, GridCell, QueryResult, SpatialResolution};
