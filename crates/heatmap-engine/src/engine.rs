//! The heatmap engine: coordinate adjustment, increments, and queries.
//!
//! The engine is strictly single-threaded and synchronous; every operation
//! completes in one call with no internal locking. Memory is the only
//! resource that can run out, and when it does the failed operation
//! reports it while all previously recorded data stays intact.

use tracing::debug;

use heatmap_store::{CounterMap, StoreError};
use heatmap_types::{CellRegion, Coordinate, GridCell, QueryResult, SpatialResolution};

use crate::error::{EngineError, SnapshotError};
use crate::snapshot;

/// In-process spatial aggregation store for named counters.
///
/// Counters are created lazily on their first positive increment and live
/// until [`clear`](Self::clear) or a snapshot restore replaces them. The
/// engine accepts any coordinate, positive or negative, fractional or not;
/// grids grow as needed to accommodate.
#[derive(Debug, Clone, Default)]
pub struct HeatmapEngine {
    resolution: SpatialResolution,
    counters: CounterMap,
}

impl HeatmapEngine {
    /// Create an engine with the given spatial resolution.
    pub const fn new(resolution: SpatialResolution) -> Self {
        Self {
            resolution,
            counters: CounterMap::new(),
        }
    }

    /// The engine's spatial resolution.
    pub const fn resolution(&self) -> SpatialResolution {
        self.resolution
    }

    /// Whether `counter` has ever received a positive increment.
    pub fn has_counter(&self, counter: &str) -> bool {
        self.counters.contains(counter)
    }

    /// Names of all live counters, in creation order.
    pub fn counter_names(&self) -> impl Iterator<Item = &str> {
        self.counters.names()
    }

    /// Map a world coordinate onto its grid cell.
    ///
    /// Uses floor division on both axes, so negative positions bucket
    /// into negative cells rather than collapsing toward cell zero.
    pub fn adjust(&self, position: Coordinate) -> GridCell {
        GridCell {
            cx: (position.x / self.resolution.width).floor() as i64,
            cy: (position.y / self.resolution.height).floor() as i64,
        }
    }

    /// Increment `counter` by one at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Allocation`] if the counter's grid could not
    /// grow; nothing is recorded in that case.
    pub fn increment(&mut self, position: Coordinate, counter: &str) -> Result<(), EngineError> {
        self.increment_by(position, counter, 1)
    }

    /// Add `amount` to `counter` at `position`.
    ///
    /// Zero and negative amounts are a successful no-op and do not create
    /// the counter, so a counter exists only once it holds real data.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Allocation`] if the counter's grid could not
    /// grow; nothing is recorded in that case.
    pub fn increment_by(
        &mut self,
        position: Coordinate,
        counter: &str,
        amount: i64,
    ) -> Result<(), EngineError> {
        if amount <= 0 {
            return Ok(());
        }
        let cell = self.adjust(position);
        let grid = self.counters.get_or_create(counter)?;
        grid.add(cell.cx, cell.cy, amount)?;
        Ok(())
    }

    /// Add several counter/amount pairs at one position.
    ///
    /// Every pair is applied independently; a failing pair does not stop
    /// later pairs, and pairs already applied are **not** rolled back.
    /// The first failure (if any) is reported after all pairs were
    /// attempted.
    pub fn increment_many(
        &mut self,
        position: Coordinate,
        amounts: &[(&str, i64)],
    ) -> Result<(), EngineError> {
        let mut first_failure = None;
        for (counter, amount) in amounts {
            if let Err(failure) = self.increment_by(position, counter, *amount) {
                first_failure.get_or_insert(failure);
            }
        }
        match first_failure {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    /// Read the count for `counter` in the cell containing `position`.
    ///
    /// An unknown counter reads as `0` everywhere, indistinguishable from
    /// a counter never incremented there. Never allocates, never fails.
    pub fn get(&self, position: Coordinate, counter: &str) -> u32 {
        match self.counters.get(counter) {
            Some(grid) => {
                let cell = self.adjust(position);
                grid.get(cell.cx, cell.cy)
            }
            None => 0,
        }
    }

    /// Snapshot the counts inside the rectangle spanned by two world
    /// coordinates, corners included.
    ///
    /// The result is dense: every cell in the adjusted rectangle gets a
    /// slot, zero or not, regardless of how sparse the underlying grid is.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidRegion`] if the adjusted lower-left exceeds
    ///   the adjusted upper-right on either axis (no allocation happens).
    /// - [`EngineError::UnknownCounter`] if `counter` was never
    ///   incremented.
    /// - [`EngineError::Allocation`] if the dense result matrix could not
    ///   be allocated.
    pub fn get_rect(
        &self,
        lower_left: Coordinate,
        upper_right: Coordinate,
        counter: &str,
    ) -> Result<QueryResult, EngineError> {
        let low = self.adjust(lower_left);
        let high = self.adjust(upper_right);
        let region = CellRegion::from_corners(low, high).ok_or(EngineError::InvalidRegion {
            lower_left: low,
            upper_right: high,
        })?;
        self.region_snapshot(region, counter)
    }

    /// Snapshot every cell `counter` ever touched: the full extent of its
    /// bounding box, corners included.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnknownCounter`] if `counter` was never
    ///   incremented (a counter holding no data is reported the same way;
    ///   that state is only reachable when the counter's first increment
    ///   failed on allocation).
    /// - [`EngineError::Allocation`] if the dense result matrix could not
    ///   be allocated.
    pub fn get_all(&self, counter: &str) -> Result<QueryResult, EngineError> {
        let grid = self
            .counters
            .get(counter)
            .ok_or_else(|| EngineError::UnknownCounter {
                name: counter.to_owned(),
            })?;
        let region = grid
            .bounding_box()
            .ok_or_else(|| EngineError::UnknownCounter {
                name: counter.to_owned(),
            })?;
        self.region_snapshot(region, counter)
    }

    /// Drop every counter, keeping the resolution.
    pub fn clear(&mut self) {
        self.counters.clear();
        debug!("engine cleared");
    }

    /// Encode the complete engine state into a binary buffer.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if the state exceeds what the format
    /// can express (cells beyond 32-bit range, oversized counts).
    pub fn serialize(&self) -> Result<Vec<u8>, SnapshotError> {
        snapshot::encode(self.resolution, &self.counters)
    }

    /// Replace the complete engine state with the contents of `buffer`.
    ///
    /// The current counters are dropped before parsing begins; the decoded
    /// resolution and counters are installed only if the whole buffer
    /// validates. A failed restore therefore leaves an engine with no
    /// counters and its previous resolution. Callers that need rollback
    /// must [`serialize`](Self::serialize) first.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] describing the first violation found in
    /// the buffer.
    pub fn deserialize(&mut self, buffer: &[u8]) -> Result<(), SnapshotError> {
        self.counters.clear();
        let (resolution, counters) = snapshot::decode(buffer)?;
        self.resolution = resolution;
        self.counters = counters;
        debug!(
            counters = self.counters.len(),
            %resolution,
            "engine state restored from snapshot"
        );
        Ok(())
    }

    /// Dense snapshot of `counter` over an already validated cell region.
    fn region_snapshot(
        &self,
        region: CellRegion,
        counter: &str,
    ) -> Result<QueryResult, EngineError> {
        let grid = self
            .counters
            .get(counter)
            .ok_or_else(|| EngineError::UnknownCounter {
                name: counter.to_owned(),
            })?;

        let width = usize::try_from(region.width())
            .map_err(|_| StoreError::AllocationFailure { required: usize::MAX })?;
        let height = usize::try_from(region.height())
            .map_err(|_| StoreError::AllocationFailure { required: usize::MAX })?;
        let cells = width
            .checked_mul(height)
            .ok_or(StoreError::AllocationFailure { required: usize::MAX })?;

        let mut data = Vec::new();
        data.try_reserve_exact(cells)
            .map_err(|_| StoreError::AllocationFailure { required: cells })?;
        for y in 0..height {
            for x in 0..width {
                data.push(grid.get(
                    region.min.cx.saturating_add_unsigned(x as u64),
                    region.min.cy.saturating_add_unsigned(y as u64),
                ));
            }
        }

        Ok(QueryResult {
            counter_name: counter.to_owned(),
            lower_left: region.min,
            resolution: self.resolution,
            width,
            height,
            data,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
