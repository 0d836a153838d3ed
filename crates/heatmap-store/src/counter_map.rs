//! Name-to-grid dictionary with linear-scan lookup.
//!
//! A heatmap tracks a handful of distinct counters ("deaths",
//! "gold_obtained", ...), usually tens at most. At that cardinality a flat
//! scan over a small vector beats hashed containers on sheer lack of
//! overhead, so [`CounterMap`] stores `(name, grid)` entries in the same
//! [`SignedVec`] primitive the grids themselves are built on and searches
//! them linearly. Entries are created lazily, exactly once per distinct
//! name, on first write access.

use crate::counter_grid::CounterGrid;
use crate::error::StoreError;
use crate::signed_vec::SignedVec;

/// One named counter and its grid.
#[derive(Debug, Clone, Default, PartialEq)]
struct CounterEntry {
    name: String,
    grid: CounterGrid,
}

/// Dictionary mapping counter names to their grids.
///
/// Names are unique; iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CounterMap {
    entries: SignedVec<CounterEntry>,
}

impl CounterMap {
    /// Create an empty dictionary.
    pub const fn new() -> Self {
        Self {
            entries: SignedVec::new(),
        }
    }

    /// Number of distinct counters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no counter exists yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a counter with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(_, entry)| entry.name == name)
    }

    /// Read-only lookup by name. Never creates an entry.
    pub fn get(&self, name: &str) -> Option<&CounterGrid> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.name == name)
            .map(|(_, entry)| &entry.grid)
    }

    /// Look up a counter's grid, appending a fresh empty one if the name
    /// was never seen before.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AllocationFailure`] if a new entry was needed
    /// and the backing vector could not grow. Existing entries are
    /// unaffected.
    pub fn get_or_create(&mut self, name: &str) -> Result<&mut CounterGrid, StoreError> {
        let existing = self
            .entries
            .iter()
            .find_map(|(index, entry)| (entry.name == name).then_some(index));
        let index = match existing {
            Some(index) => index,
            None => self.entries.push_back(CounterEntry {
                name: name.to_owned(),
                grid: CounterGrid::new(),
            })?,
        };
        Ok(&mut self.entries[index].grid)
    }

    /// Drop every counter.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate `(name, grid)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CounterGrid)> {
        self.entries
            .iter()
            .map(|(_, entry)| (entry.name.as_str(), &entry.grid))
    }

    /// Iterate counter names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, entry)| entry.name.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
