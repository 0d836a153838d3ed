//! A sparse 2D grid of `u32` counts over signed cell indices.
//!
//! [`CounterGrid`] stacks two layers of [`SignedVec`]: an outer vector of
//! rows indexed by `cx`, each row a vector of counts indexed by `cy`. The
//! grid needs no size at creation and grows in any direction as cells are
//! written. A cell never written reads as `0`, indistinguishable from a
//! cell explicitly counted to zero -- there is no such thing, since only
//! positive amounts are ever applied.

use heatmap_types::{CellRegion, GridCell};

use crate::error::StoreError;
use crate::signed_vec::SignedVec;

/// Spatial counter data for a single named counter.
///
/// Tracks the bounding rectangle of every cell ever incremented, so
/// full-extent queries know what "everything" means without scanning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CounterGrid {
    /// Rows indexed by `cx`; each row holds counts indexed by `cy`.
    rows: SignedVec<SignedVec<u32>>,
    /// Minimal rectangle containing every incremented cell. `None` until
    /// the first positive increment lands.
    bounds: Option<CellRegion>,
}

impl CounterGrid {
    /// Create an empty grid.
    pub const fn new() -> Self {
        Self {
            rows: SignedVec::new(),
            bounds: None,
        }
    }

    /// Add `amount` to the cell at `(cx, cy)`.
    ///
    /// Zero and negative amounts are a successful no-op; they can neither
    /// create cells nor disturb the "unwritten reads as zero" invariant.
    /// The stored count saturates at `u32::MAX` rather than wrapping.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AllocationFailure`] if the grid could not
    /// grow to hold the cell. No count is changed in that case.
    pub fn add(&mut self, cx: i64, cy: i64, amount: i64) -> Result<(), StoreError> {
        if amount <= 0 {
            return Ok(());
        }
        let amount = u32::try_from(amount).unwrap_or(u32::MAX);

        let row = self.rows.entry(cx)?;
        let count = row.entry(cy)?;
        *count = count.saturating_add(amount);

        let cell = GridCell::new(cx, cy);
        match self.bounds.as_mut() {
            Some(bounds) => bounds.expand(cell),
            None => self.bounds = Some(CellRegion::from_cell(cell)),
        }
        Ok(())
    }

    /// Read the count at `(cx, cy)`.
    ///
    /// Returns `0` for any cell outside the written area. Never allocates,
    /// never fails.
    pub fn get(&self, cx: i64, cy: i64) -> u32 {
        self.rows
            .get(cx)
            .and_then(|row| row.get(cy))
            .copied()
            .unwrap_or(0)
    }

    /// The minimal rectangle containing every incremented cell, or `None`
    /// if nothing was ever incremented.
    pub fn bounding_box(&self) -> Option<CellRegion> {
        self.bounds
    }

    /// Whether any cell was ever incremented.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// Drop all rows and reset the bounding box.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.bounds = None;
    }

    /// Iterate every non-zero cell in row order as `(cell, count)`.
    ///
    /// Rows ascend by `cx`, cells within a row ascend by `cy`. Cells that
    /// were merely spanned (default-filled) are skipped.
    pub fn iter_cells(&self) -> impl Iterator<Item = (GridCell, u32)> {
        self.rows.iter().flat_map(|(cx, row)| {
            row.iter()
                .filter(|(_, count)| **count != 0)
                .map(move |(cy, count)| (GridCell::new(cx, cy), *count))
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
