//! World-space coordinates and their discrete grid counterparts.
//!
//! The heatmap records activity at continuous 2D positions and buckets them
//! into grid cells. A [`SpatialResolution`] defines the world-space size of
//! one cell; a [`Coordinate`] divided by the resolution (with flooring)
//! yields a [`GridCell`]. A [`CellRegion`] is an inclusive rectangle of
//! cells, used for bounding boxes and area queries.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Coordinate
// ---------------------------------------------------------------------------

/// A continuous position in world space.
///
/// Both axes accept any finite value, positive or negative, fractional or
/// not. Coordinates carry no resolution information; the engine owning the
/// data decides which grid cell a coordinate falls into.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    /// Horizontal world-space position.
    pub x: f64,
    /// Vertical world-space position.
    pub y: f64,
}

impl Coordinate {
    /// Create a coordinate from its two components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl core::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// SpatialResolution
// ---------------------------------------------------------------------------

/// The world-space width and height of a single grid cell.
///
/// Controls how finely coordinates are bucketed: with a resolution of
/// `{10, 8}`, positions `(1, 2)` and `(5, 7)` land in the same cell.
///
/// Construction never fails. Axes that are not strictly positive (zero,
/// negative, or NaN) are silently replaced by `1.0`, so a resolution is
/// always usable as a divisor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialResolution {
    /// World-space width of one cell. Always `> 0`.
    pub width: f64,
    /// World-space height of one cell. Always `> 0`.
    pub height: f64,
}

impl SpatialResolution {
    /// Create a resolution with independent cell width and height.
    ///
    /// Each axis is clamped to `1.0` unless strictly positive.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: clamp_unit(width),
            height: clamp_unit(height),
        }
    }

    /// Create a resolution with square cells of the given size.
    pub fn uniform(size: f64) -> Self {
        Self::new(size, size)
    }
}

impl Default for SpatialResolution {
    /// Unit cells: every whole-number square of world space is one cell.
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

impl core::fmt::Display for SpatialResolution {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Clamp a cell dimension to `1.0` unless strictly positive.
///
/// NaN fails the comparison and clamps as well.
fn clamp_unit(value: f64) -> f64 {
    if value > 0.0 { value } else { 1.0 }
}

// ---------------------------------------------------------------------------
// GridCell
// ---------------------------------------------------------------------------

/// A discrete cell of the counter grid.
///
/// Obtained by floor-dividing a [`Coordinate`] by a [`SpatialResolution`].
/// Flooring (rather than truncation toward zero) keeps negative coordinates
/// in their own cells: with unit resolution, `-0.5` belongs to cell `-1`,
/// not cell `0`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct GridCell {
    /// Horizontal cell index.
    pub cx: i64,
    /// Vertical cell index.
    pub cy: i64,
}

impl GridCell {
    /// Create a cell from its two indices.
    pub const fn new(cx: i64, cy: i64) -> Self {
        Self { cx, cy }
    }
}

impl From<(i64, i64)> for GridCell {
    fn from((cx, cy): (i64, i64)) -> Self {
        Self { cx, cy }
    }
}

impl core::fmt::Display for GridCell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.cx, self.cy)
    }
}

// ---------------------------------------------------------------------------
// CellRegion
// ---------------------------------------------------------------------------

/// An inclusive rectangle of grid cells.
///
/// `min` and `max` are both contained in the region; a region covering a
/// single cell has `min == max`. Invariant: `min.cx <= max.cx` and
/// `min.cy <= max.cy`. Regions are produced by bounding-box tracking and by
/// adjusting the corners of a rectangular query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRegion {
    /// Lower-left corner (inclusive).
    pub min: GridCell,
    /// Upper-right corner (inclusive).
    pub max: GridCell,
}

impl CellRegion {
    /// Create a region spanning exactly one cell.
    pub const fn from_cell(cell: GridCell) -> Self {
        Self {
            min: cell,
            max: cell,
        }
    }

    /// Create a region from its corners, or `None` if the corners are
    /// swapped on either axis.
    pub fn from_corners(min: GridCell, max: GridCell) -> Option<Self> {
        if min.cx <= max.cx && min.cy <= max.cy {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// Grow the region, if needed, to contain `cell`.
    pub fn expand(&mut self, cell: GridCell) {
        if cell.cx < self.min.cx {
            self.min.cx = cell.cx;
        }
        if cell.cy < self.min.cy {
            self.min.cy = cell.cy;
        }
        if cell.cx > self.max.cx {
            self.max.cx = cell.cx;
        }
        if cell.cy > self.max.cy {
            self.max.cy = cell.cy;
        }
    }

    /// Whether `cell` lies inside the region.
    pub fn contains(&self, cell: GridCell) -> bool {
        cell.cx >= self.min.cx
            && cell.cx <= self.max.cx
            && cell.cy >= self.min.cy
            && cell.cy <= self.max.cy
    }

    /// Number of cell columns covered (at least 1).
    pub fn width(&self) -> u64 {
        span(self.min.cx, self.max.cx)
    }

    /// Number of cell rows covered (at least 1).
    pub fn height(&self) -> u64 {
        span(self.min.cy, self.max.cy)
    }
}

/// Inclusive distance between two cell indices.
///
/// Computed in 128-bit space so extreme corners cannot overflow; a span
/// wider than `u64::MAX` is pinned rather than wrapped.
fn span(low: i64, high: i64) -> u64 {
    let cells = i128::from(high) - i128::from(low) + 1;
    u64::try_from(cells).unwrap_or(u64::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
