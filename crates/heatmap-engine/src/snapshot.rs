//! Binary save/restore of complete engine state.
//!
//! The format is sparse and self-describing: it records the resolution,
//! then each counter's name and its non-zero cells. Nothing about the
//! in-memory layout (capacities, growth factors, spanned-but-zero cells)
//! leaks into the buffer, so two engines holding the same data encode
//! identically however differently they grew.
//!
//! All fields are little-endian:
//!
//! ```text
//! header:
//!   resolution_width  : f64
//!   resolution_height : f64
//!   counter_count     : u32
//! per counter:
//!   name_length : u32
//!   name_bytes  : name_length bytes of UTF-8
//!   cell_count  : u32
//!   per cell:
//!     cx    : i32
//!     cy    : i32
//!     value : u32    (always > 0; zero cells are never stored)
//! ```
//!
//! Decoding validates everything before any decoded state is handed back:
//! strictly positive resolution, valid UTF-8 names, non-zero cell values,
//! and exact buffer consumption with no trailing bytes.

use heatmap_store::CounterMap;
use heatmap_types::SpatialResolution;

use crate::error::SnapshotError;

/// Encode a resolution and counter dictionary into a snapshot buffer.
///
/// # Errors
///
/// Returns a [`SnapshotError`] if any live cell coordinate falls outside
/// the format's 32-bit range, or a count/name overflows its 32-bit field.
pub fn encode(
    resolution: SpatialResolution,
    counters: &CounterMap,
) -> Result<Vec<u8>, SnapshotError> {
    let mut buffer = Vec::new();
    buffer.extend_from_slice(&resolution.width.to_le_bytes());
    buffer.extend_from_slice(&resolution.height.to_le_bytes());

    let counter_count = u32::try_from(counters.len()).map_err(|_| {
        SnapshotError::TooManyCounters {
            count: counters.len(),
        }
    })?;
    buffer.extend_from_slice(&counter_count.to_le_bytes());

    for (name, grid) in counters.iter() {
        let name_length = u32::try_from(name.len())
            .map_err(|_| SnapshotError::NameTooLong { len: name.len() })?;
        buffer.extend_from_slice(&name_length.to_le_bytes());
        buffer.extend_from_slice(name.as_bytes());

        let cell_total = grid.iter_cells().count();
        let cell_count = u32::try_from(cell_total).map_err(|_| SnapshotError::TooManyCells {
            name: name.to_owned(),
            count: cell_total,
        })?;
        buffer.extend_from_slice(&cell_count.to_le_bytes());

        for (cell, value) in grid.iter_cells() {
            let cx = i32::try_from(cell.cx)
                .map_err(|_| SnapshotError::CellOutOfRange { cell })?;
            let cy = i32::try_from(cell.cy)
                .map_err(|_| SnapshotError::CellOutOfRange { cell })?;
            buffer.extend_from_slice(&cx.to_le_bytes());
            buffer.extend_from_slice(&cy.to_le_bytes());
            buffer.extend_from_slice(&value.to_le_bytes());
        }
    }

    Ok(buffer)
}

/// Decode a snapshot buffer into a resolution and counter dictionary.
///
/// The whole buffer must validate; nothing partial is ever returned.
/// Counters repeated in the buffer merge into one grid, matching the
/// dictionary's create-once semantics.
///
/// # Errors
///
/// Returns the first [`SnapshotError`] violation found, or
/// [`SnapshotError::Allocation`] if rebuilding the grids ran out of
/// memory.
pub fn decode(buffer: &[u8]) -> Result<(SpatialResolution, CounterMap), SnapshotError> {
    let mut reader = Reader::new(buffer);

    let width = reader.read_f64()?;
    let height = reader.read_f64()?;
    if !(width > 0.0) || !(height > 0.0) {
        return Err(SnapshotError::InvalidResolution { width, height });
    }
    let resolution = SpatialResolution::new(width, height);

    let counter_count = reader.read_u32()?;
    let mut counters = CounterMap::new();
    for _ in 0..counter_count {
        let name_length = reader.read_u32()? as usize;
        let name_bytes = reader.take(name_length)?;
        let name = core::str::from_utf8(name_bytes)
            .map_err(|_| SnapshotError::InvalidCounterName)?
            .to_owned();

        let cell_count = reader.read_u32()?;
        let grid = counters.get_or_create(&name)?;
        for _ in 0..cell_count {
            let cx = reader.read_i32()?;
            let cy = reader.read_i32()?;
            let value = reader.read_u32()?;
            if value == 0 {
                return Err(SnapshotError::ZeroCellValue { name, cx, cy });
            }
            grid.add(i64::from(cx), i64::from(cy), i64::from(value))?;
        }
    }

    if !reader.is_empty() {
        return Err(SnapshotError::TrailingBytes {
            count: reader.remaining(),
        });
    }
    Ok((resolution, counters))
}

/// Forward-only view over the snapshot buffer.
struct Reader<'a> {
    buffer: &'a [u8],
}

impl<'a> Reader<'a> {
    const fn new(buffer: &'a [u8]) -> Self {
        Self { buffer }
    }

    fn remaining(&self) -> usize {
        self.buffer.len()
    }

    fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Consume and return the next `count` bytes.
    fn take(&mut self, count: usize) -> Result<&'a [u8], SnapshotError> {
        if count > self.buffer.len() {
            return Err(SnapshotError::Truncated {
                needed: count,
                remaining: self.buffer.len(),
            });
        }
        let (head, tail) = self.buffer.split_at(count);
        self.buffer = tail;
        Ok(head)
    }

    fn read_u32(&mut self) -> Result<u32, SnapshotError> {
        let mut bytes = [0_u8; 4];
        bytes.copy_from_slice(self.take(4)?);
        Ok(u32::from_le_bytes(bytes))
    }

    fn read_i32(&mut self) -> Result<i32, SnapshotError> {
        let mut bytes = [0_u8; 4];
        bytes.copy_from_slice(self.take(4)?);
        Ok(i32::from_le_bytes(bytes))
    }

    fn read_f64(&mut self) -> Result<f64, SnapshotError> {
        let mut bytes = [0_u8; 8];
        bytes.copy_from_slice(self.take(8)?);
        Ok(f64::from_le_bytes(bytes))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
