//! The [`Heatmap`] wrapper around the engine.
//!
//! Everything forwards 1:1 to [`HeatmapEngine`]; the value added here is
//! ergonomics (`impl Into<Coordinate>` parameters) and diagnostics
//! (failures get a structured `warn!` before they are returned).

use tracing::{debug, warn};

use heatmap_engine::{EngineError, HeatmapEngine, SnapshotError};
use heatmap_types::{Coordinate, GridCell, QueryResult, SpatialResolution};

use crate::config::HeatmapConfig;

/// A spatially bucketed store of named activity counters.
///
/// Log any counter ("deaths", "gold_obtained", ...) at any world
/// coordinate; query single cells, rectangles, or a counter's full extent;
/// save and restore the whole store as a binary buffer.
#[derive(Debug, Clone, Default)]
pub struct Heatmap {
    engine: HeatmapEngine,
}

impl Heatmap {
    /// A heatmap with unit cells.
    pub fn new() -> Self {
        Self::default()
    }

    /// A heatmap with square cells of the given world-space size.
    ///
    /// Non-positive sizes silently fall back to `1.0`.
    pub fn with_cell_size(size: f64) -> Self {
        Self {
            engine: HeatmapEngine::new(SpatialResolution::uniform(size)),
        }
    }

    /// A heatmap with rectangular cells.
    ///
    /// Non-positive axes silently fall back to `1.0`.
    pub fn with_resolution(width: f64, height: f64) -> Self {
        Self {
            engine: HeatmapEngine::new(SpatialResolution::new(width, height)),
        }
    }

    /// A heatmap configured from a loaded [`HeatmapConfig`].
    pub fn from_config(config: &HeatmapConfig) -> Self {
        Self {
            engine: HeatmapEngine::new(config.resolution()),
        }
    }

    /// The world-space size of one grid cell.
    pub const fn resolution(&self) -> SpatialResolution {
        self.engine.resolution()
    }

    /// Whether `counter` has ever received a positive increment.
    pub fn has_counter(&self, counter: &str) -> bool {
        self.engine.has_counter(counter)
    }

    /// Names of all live counters, in creation order.
    pub fn counter_names(&self) -> impl Iterator<Item = &str> {
        self.engine.counter_names()
    }

    /// The grid cell a world position falls into.
    pub fn adjust(&self, position: impl Into<Coordinate>) -> GridCell {
        self.engine.adjust(position.into())
    }

    /// Increment `counter` by one at `position`.
    pub fn increment(
        &mut self,
        position: impl Into<Coordinate>,
        counter: &str,
    ) -> Result<(), EngineError> {
        self.increment_by(position, counter, 1)
    }

    /// Add `amount` to `counter` at `position`; zero or negative amounts
    /// are a no-op.
    pub fn increment_by(
        &mut self,
        position: impl Into<Coordinate>,
        counter: &str,
        amount: i64,
    ) -> Result<(), EngineError> {
        let position = position.into();
        let outcome = self.engine.increment_by(position, counter, amount);
        if let Err(failure) = &outcome {
            warn!(%position, counter, amount, %failure, "increment dropped");
        }
        outcome
    }

    /// Add several counter/amount pairs at one position.
    ///
    /// Pairs apply independently and are never rolled back; the first
    /// failure is reported after all pairs were attempted.
    pub fn increment_many(
        &mut self,
        position: impl Into<Coordinate>,
        amounts: &[(&str, i64)],
    ) -> Result<(), EngineError> {
        let position = position.into();
        let outcome = self.engine.increment_many(position, amounts);
        if let Err(failure) = &outcome {
            warn!(%position, pairs = amounts.len(), %failure, "bulk increment incomplete");
        }
        outcome
    }

    /// The count for `counter` in the cell containing `position`.
    ///
    /// Unknown counters read as zero.
    pub fn get(&self, position: impl Into<Coordinate>, counter: &str) -> u32 {
        self.engine.get(position.into(), counter)
    }

    /// Dense snapshot of the counts between two world coordinates,
    /// corners included.
    pub fn get_rect(
        &self,
        lower_left: impl Into<Coordinate>,
        upper_right: impl Into<Coordinate>,
        counter: &str,
    ) -> Result<QueryResult, EngineError> {
        let outcome = self
            .engine
            .get_rect(lower_left.into(), upper_right.into(), counter);
        if let Err(failure) = &outcome {
            warn!(counter, %failure, "rectangle query rejected");
        }
        outcome
    }

    /// Dense snapshot of every cell `counter` ever touched.
    pub fn get_all(&self, counter: &str) -> Result<QueryResult, EngineError> {
        let outcome = self.engine.get_all(counter);
        if let Err(failure) = &outcome {
            warn!(counter, %failure, "full-extent query rejected");
        }
        outcome
    }

    /// Drop every counter, keeping the resolution.
    pub fn clear(&mut self) {
        self.engine.clear();
    }

    /// Encode the complete store into a binary buffer.
    pub fn serialize(&self) -> Result<Vec<u8>, SnapshotError> {
        let outcome = self.engine.serialize();
        match &outcome {
            Ok(buffer) => debug!(bytes = buffer.len(), "heatmap serialized"),
            Err(failure) => warn!(%failure, "serialization failed"),
        }
        outcome
    }

    /// Replace the complete store with the contents of `buffer`.
    ///
    /// Existing data is dropped before parsing; a rejected buffer leaves
    /// the heatmap empty with its previous resolution. Serialize first if
    /// you need rollback.
    pub fn deserialize(&mut self, buffer: &[u8]) -> Result<(), SnapshotError> {
        let outcome = self.engine.deserialize(buffer);
        if let Err(failure) = &outcome {
            warn!(bytes = buffer.len(), %failure, "snapshot rejected");
        }
        outcome
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
