//! Owned result matrix for area queries.
//!
//! Area queries return a dense snapshot of a rectangular cell region: every
//! cell in the rectangle gets a slot, written or not. The snapshot is owned
//! by the caller and fully detached from the engine; later increments do
//! not affect it.

use serde::{Deserialize, Serialize};

use crate::geometry::{GridCell, SpatialResolution};

/// A dense snapshot of counter values over a rectangular cell region.
///
/// `data` is row-major: the value for the cell `x` columns right of and
/// `y` rows above [`lower_left`](Self::lower_left) lives at
/// `data[y * width + x]`. Cells the counter never touched hold `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Name of the counter this snapshot was taken from.
    pub counter_name: String,
    /// The cell at matrix position `(0, 0)`.
    pub lower_left: GridCell,
    /// Spatial resolution of the engine the snapshot was taken from.
    pub resolution: SpatialResolution,
    /// Number of cell columns in the matrix.
    pub width: usize,
    /// Number of cell rows in the matrix.
    pub height: usize,
    /// Row-major counter values, `width * height` entries.
    pub data: Vec<u32>,
}

impl QueryResult {
    /// Value at matrix offset `(x, y)` from the lower-left corner.
    ///
    /// Returns `None` outside the matrix.
    pub fn count_at(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y.checked_mul(self.width)?.checked_add(x)?).copied()
    }

    /// The grid cell behind matrix offset `(x, y)`, without bounds checks
    /// against the matrix. Useful when correlating a snapshot with live
    /// point queries.
    pub fn cell_at(&self, x: usize, y: usize) -> GridCell {
        GridCell {
            cx: self.lower_left.cx.saturating_add_unsigned(x as u64),
            cy: self.lower_left.cy.saturating_add_unsigned(y as u64),
        }
    }

    /// Iterate the matrix rows bottom-up, each as a `width`-long slice.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.data.chunks(self.width.max(1))
    }

    /// Sum of every value in the snapshot.
    pub fn total(&self) -> u64 {
        self.data.iter().map(|value| u64::from(*value)).sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
