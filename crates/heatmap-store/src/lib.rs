//! Sparse, unbounded counter storage for the heatmap service.
//!
//! This crate holds the storage core: a growable array indexable by any
//! signed integer, the 2D counter grid built from two layers of it, and the
//! small linear-scan dictionary mapping counter names to grids.
//!
//! Nothing here knows about world coordinates or spatial resolution; that
//! mapping lives in `heatmap-engine`. The storage layer works purely in
//! discrete cell indices.
//!
//! # Modules
//!
//! - [`signed_vec`] -- [`SignedVec`], the bidirectionally-growable array
//! - [`counter_grid`] -- [`CounterGrid`], a sparse 2D grid of `u32` counts
//! - [`counter_map`] -- [`CounterMap`], name-to-grid dictionary
//! - [`error`] -- [`StoreError`]

pub mod counter_grid;
pub mod counter_map;
pub mod error;
pub mod signed_vec;

// Re-export primary types at crate root.
pub use counter_grid::CounterGrid;
pub use counter_map::CounterMap;
pub use error::StoreError;
pub use signed_vec::SignedVec;
