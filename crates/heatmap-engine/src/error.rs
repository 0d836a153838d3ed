//! Error types for the `heatmap-engine` crate.
//!
//! All failures are reported as values; nothing in the engine panics or
//! aborts. Allocation failures from the storage layer convert losslessly
//! via `From`, so `?` works across the crate boundary.

use heatmap_store::StoreError;
use heatmap_types::GridCell;

/// Errors that can occur during engine operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// The storage layer could not grow to hold new data. The engine keeps
    /// everything recorded before the failure.
    #[error(transparent)]
    Allocation(#[from] StoreError),

    /// An area query named a counter that was never incremented.
    ///
    /// Point queries treat unknown counters as zero instead; only
    /// rectangle and full-extent queries report this, to distinguish "no
    /// such data set" from "a region of zeroes".
    #[error("counter \"{name}\" has never been incremented")]
    UnknownCounter {
        /// The counter name that was queried.
        name: String,
    },

    /// A rectangle query whose adjusted lower-left corner exceeds its
    /// adjusted upper-right corner on at least one axis.
    #[error("invalid query region: lower-left {lower_left} exceeds upper-right {upper_right}")]
    InvalidRegion {
        /// Adjusted lower-left corner of the rejected query.
        lower_left: GridCell,
        /// Adjusted upper-right corner of the rejected query.
        upper_right: GridCell,
    },

    /// Saving or restoring a snapshot failed.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Errors raised by the binary snapshot codec.
///
/// Decoding validates the whole buffer before any decoded state becomes
/// visible; every variant here means the buffer was rejected as a unit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    /// The buffer ended before a field it promised.
    #[error("snapshot truncated: needed {needed} more bytes, {remaining} left")]
    Truncated {
        /// Bytes the next field required.
        needed: usize,
        /// Bytes actually remaining.
        remaining: usize,
    },

    /// Bytes remained after the last declared counter was read.
    #[error("snapshot carries {count} trailing bytes past the declared content")]
    TrailingBytes {
        /// Number of unconsumed bytes.
        count: usize,
    },

    /// The stored spatial resolution is not strictly positive.
    #[error("snapshot resolution {width}x{height} is not positive")]
    InvalidResolution {
        /// Stored cell width.
        width: f64,
        /// Stored cell height.
        height: f64,
    },

    /// A counter name was not valid UTF-8.
    #[error("snapshot counter name is not valid UTF-8")]
    InvalidCounterName,

    /// A stored cell carried a zero count; the format stores only
    /// non-zero cells.
    #[error("counter \"{name}\" stores a zero count at cell ({cx}, {cy})")]
    ZeroCellValue {
        /// Counter the offending cell belongs to.
        name: String,
        /// Horizontal cell index as stored.
        cx: i32,
        /// Vertical cell index as stored.
        cy: i32,
    },

    /// A live cell lies outside the 32-bit coordinate range the format
    /// can express.
    #[error("cell {cell} does not fit the snapshot's 32-bit cell range")]
    CellOutOfRange {
        /// The unencodable cell.
        cell: GridCell,
    },

    /// More counters than the format's 32-bit count field can declare.
    #[error("{count} counters exceed the snapshot format limit")]
    TooManyCounters {
        /// Actual counter count.
        count: usize,
    },

    /// More non-zero cells in one counter than the format can declare.
    #[error("counter \"{name}\" has {count} cells, beyond the snapshot format limit")]
    TooManyCells {
        /// Counter that overflowed the cell count field.
        name: String,
        /// Actual non-zero cell count.
        count: usize,
    },

    /// A counter name longer than the format's length field can declare.
    #[error("counter name of {len} bytes exceeds the snapshot format limit")]
    NameTooLong {
        /// Actual name length in bytes.
        len: usize,
    },

    /// Rebuilding the decoded state could not acquire memory.
    #[error(transparent)]
    Allocation(#[from] StoreError),
}
