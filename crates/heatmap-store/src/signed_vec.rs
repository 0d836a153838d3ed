//! A growable array indexable by any signed integer.
//!
//! [`SignedVec`] feels "seemingly infinite": reading any index outside the
//! initialized span yields nothing (callers fold that into a default), and
//! writing any index grows the allocation on demand in either direction.
//!
//! The layout is an owned buffer plus three indices:
//!
//! ```text
//!   0        lo            zero              hi          capacity
//!   |  ......|##############|#################|......     |
//!            ^ initialized span [lo, hi)     ^
//!            signed index of slot s is s - zero
//! ```
//!
//! Every slot outside the span holds `T::default()`, so extending the span
//! never needs to backfill, and clearing re-defaults the span in place.
//! Growth reallocates by a factor of ~1.5 and re-centers `zero` in the
//! middle of the new buffer, keeping later growth equally cheap toward
//! positive and negative indices. A failed growth leaves the vector
//! untouched and reports [`StoreError::AllocationFailure`].

use tracing::trace;

use crate::error::StoreError;

/// A contiguous array indexable by `i64`, growable toward both ends.
///
/// Single reads and writes are amortized O(1); reallocation is geometric.
/// The initialized span is the closed range of indices ever written (plus
/// the default-filled gaps between them).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignedVec<T> {
    /// Backing buffer. Always fully populated with valid `T` values;
    /// slots outside `[lo, hi)` hold `T::default()`.
    buf: Vec<T>,
    /// Slot holding signed index 0.
    zero: usize,
    /// First slot of the initialized span.
    lo: usize,
    /// One past the last slot of the initialized span. `lo == hi` means
    /// the vector is empty.
    hi: usize,
}

impl<T> SignedVec<T> {
    /// Create an empty vector with no allocation.
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            zero: 0,
            lo: 0,
            hi: 0,
        }
    }

    /// Number of initialized slots.
    pub fn len(&self) -> usize {
        self.hi.saturating_sub(self.lo)
    }

    /// Whether no index has been written since creation or the last clear.
    pub fn is_empty(&self) -> bool {
        self.lo == self.hi
    }

    /// Total allocated slots, initialized or not.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Smallest initialized signed index. `0` when empty.
    pub fn lowest_index(&self) -> i64 {
        self.lo as i64 - self.zero as i64
    }

    /// One past the largest initialized signed index. `0` when empty.
    pub fn highest_index(&self) -> i64 {
        self.hi as i64 - self.zero as i64
    }

    /// Read the value at `index`, or `None` outside the initialized span.
    ///
    /// Never allocates.
    pub fn get(&self, index: i64) -> Option<&T> {
        self.buf.get(self.slot_of(index)?)
    }

    /// Mutable read at `index`, or `None` outside the initialized span.
    ///
    /// Never allocates; use [`entry`](Self::entry) to write new indices.
    pub fn get_mut(&mut self, index: i64) -> Option<&mut T> {
        let slot = self.slot_of(index)?;
        self.buf.get_mut(slot)
    }

    /// Iterate the initialized span in index order as `(index, value)`.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &T)> {
        let base = self.lowest_index();
        self.buf[self.lo..self.hi]
            .iter()
            .enumerate()
            .map(move |(offset, value)| (base + offset as i64, value))
    }

    /// Iterate the initialized span mutably, in index order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (i64, &mut T)> {
        let base = self.lo as i64 - self.zero as i64;
        self.buf[self.lo..self.hi]
            .iter_mut()
            .enumerate()
            .map(move |(offset, value)| (base + offset as i64, value))
    }

    /// Drop all values and release the allocation.
    pub fn release(&mut self) {
        *self = Self::new();
    }

    /// Slot of `index` if it lies inside the initialized span.
    fn slot_of(&self, index: i64) -> Option<usize> {
        let slot = i128::from(index) + self.zero as i128;
        if slot >= self.lo as i128 && slot < self.hi as i128 {
            usize::try_from(slot).ok()
        } else {
            None
        }
    }

    /// Whether `index` falls inside the current allocation.
    fn allocation_covers(&self, index: i64) -> bool {
        let slot = i128::from(index) + self.zero as i128;
        slot >= 0 && slot < self.buf.len() as i128
    }
}

impl<T: Default> SignedVec<T> {
    /// Create an empty vector with `capacity` slots pre-allocated, logical
    /// zero centered.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut buf = Vec::new();
        if buf.try_reserve_exact(capacity).is_ok() {
            buf.resize_with(capacity, T::default);
        }
        let zero = buf.len() / 2;
        Self {
            buf,
            zero,
            lo: zero,
            hi: zero,
        }
    }

    /// Write access to `index`, growing the allocation and extending the
    /// initialized span as needed.
    ///
    /// Any indices newly spanned between the old span and `index` become
    /// `T::default()`; the first write to an empty vector spans from
    /// logical zero to `index`. On allocation failure the vector is
    /// unchanged.
    pub fn entry(&mut self, index: i64) -> Result<&mut T, StoreError> {
        if !self.allocation_covers(index) {
            self.grow_for(index)?;
        }
        self.extend_span(index);
        // allocation_covers() holds here, so the slot is in-bounds.
        let slot = (i128::from(index) + self.zero as i128) as usize;
        Ok(&mut self.buf[slot])
    }

    /// Append `value` just past the highest initialized index.
    ///
    /// Writes index 0 when the vector is empty. Returns the index written.
    pub fn push_back(&mut self, value: T) -> Result<i64, StoreError> {
        let index = if self.is_empty() {
            0
        } else {
            self.highest_index()
        };
        *self.entry(index)? = value;
        Ok(index)
    }

    /// Prepend `value` just below the lowest initialized index.
    ///
    /// Writes index -1 when the vector is empty. Returns the index written.
    pub fn push_front(&mut self, value: T) -> Result<i64, StoreError> {
        let index = if self.is_empty() {
            -1
        } else {
            self.lowest_index().saturating_sub(1)
        };
        *self.entry(index)? = value;
        Ok(index)
    }

    /// Drop all values but keep the allocation.
    ///
    /// Spanned slots are re-defaulted in place and the span collapses back
    /// onto logical zero.
    pub fn clear(&mut self) {
        for slot in &mut self.buf[self.lo..self.hi] {
            *slot = T::default();
        }
        self.lo = self.zero;
        self.hi = self.zero;
    }

    /// Reallocate so that `index` fits inside the allocation, preserving
    /// the initialized span at its signed positions.
    ///
    /// The new capacity grows geometrically (factor ~1.5) from the current
    /// one until it covers both the requested index and the existing span
    /// on either side of the re-centered logical zero.
    fn grow_for(&mut self, index: i64) -> Result<(), StoreError> {
        let lowest = self.lowest_index();
        let highest = self.highest_index();

        // Half the new buffer must reach the target index, and each half
        // must still hold its side of the existing span.
        let mut reach = index.unsigned_abs().saturating_add(1);
        if lowest < 0 {
            reach = reach.max(lowest.unsigned_abs());
        }
        if highest > 0 {
            reach = reach.max(highest.unsigned_abs());
        }
        let required = reach
            .checked_mul(2)
            .and_then(|slots| usize::try_from(slots).ok())
            .ok_or(StoreError::AllocationFailure {
                required: usize::MAX,
            })?;

        let mut new_cap = (self.buf.len().saturating_mul(3) / 2).max(2);
        while new_cap < required {
            let next = new_cap.saturating_mul(3) / 2;
            if next <= new_cap {
                new_cap = required;
            } else {
                new_cap = next;
            }
        }

        // Acquire the new buffer before touching any state, so a failed
        // reservation leaves the vector exactly as it was.
        let mut grown: Vec<T> = Vec::new();
        grown
            .try_reserve_exact(new_cap)
            .map_err(|_| StoreError::AllocationFailure { required: new_cap })?;
        grown.resize_with(new_cap, T::default);

        let new_zero = new_cap / 2;
        let span = self.hi - self.lo;
        // new_zero + lowest >= 0 by the sizing above.
        let new_lo = (new_zero as i128 + i128::from(lowest)) as usize;

        let old_lo = self.lo;
        for (offset, value) in self.buf.drain(..).skip(old_lo).take(span).enumerate() {
            grown[new_lo + offset] = value;
        }

        self.buf = grown;
        self.zero = new_zero;
        self.lo = new_lo;
        self.hi = new_lo + span;

        trace!(capacity = new_cap, span, "signed vec reallocated");
        Ok(())
    }

    /// Stretch the initialized span to include `index`.
    ///
    /// Requires the allocation to cover `index`. Slots between the old
    /// span and `index` already hold `T::default()` by invariant. An empty
    /// vector has a zero-width span sitting on logical zero, so the first
    /// write spans everything between index 0 and the written index.
    fn extend_span(&mut self, index: i64) {
        let slot = (i128::from(index) + self.zero as i128) as usize;
        if slot >= self.hi {
            self.hi = slot + 1;
        }
        if slot < self.lo {
            self.lo = slot;
        }
    }
}

impl<T> core::ops::Index<i64> for SignedVec<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index` is outside the initialized span. Use
    /// [`get`](Self::get) for a non-panicking read.
    fn index(&self, index: i64) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!("signed index {index} is outside the initialized span"),
        }
    }
}

impl<T> core::ops::IndexMut<i64> for SignedVec<T> {
    /// # Panics
    ///
    /// Panics if `index` is outside the initialized span. Use
    /// [`entry`](Self::entry) for a growing write.
    fn index_mut(&mut self, index: i64) -> &mut T {
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("signed index {index} is outside the initialized span"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_vector_is_empty_and_unallocated() {
        let vec: SignedVec<i32> = SignedVec::new();
        assert_eq!(vec.len(), 0);
        assert!(vec.is_empty());
        assert_eq!(vec.capacity(), 0);
        assert_eq!(vec.lowest_index(), 0);
        assert_eq!(vec.get(0), None);
    }

    #[test]
    fn with_capacity_reserves_without_initializing() {
        let vec: SignedVec<i32> = SignedVec::with_capacity(20);
        assert_eq!(vec.capacity(), 20);
        assert!(vec.is_empty());
        assert_eq!(vec.get(0), None);
        assert_eq!(vec.get(-5), None);
    }

    #[test]
    fn mixed_writes_and_pushes_span_both_signs() {
        let mut vec: SignedVec<i32> = SignedVec::new();
        assert_eq!(vec.entry(0).map(|slot| *slot = 0), Ok(()));
        assert_eq!(vec.entry(1).map(|slot| *slot = 1), Ok(()));
        assert_eq!(vec.push_back(4), Ok(2));
        assert_eq!(vec.entry(-1).map(|slot| *slot = -1), Ok(()));
        assert_eq!(vec.entry(-2).map(|slot| *slot = -2), Ok(()));

        assert_eq!(vec.len(), 5);
        assert_eq!(vec.lowest_index(), -2);
        assert_eq!(vec.highest_index(), 3);
        assert_eq!(vec[1] + vec[2] + vec[-1] + vec[-2], 2);
    }

    #[test]
    fn reads_outside_span_yield_none_without_allocating() {
        let mut vec: SignedVec<u32> = SignedVec::new();
        assert_eq!(vec.entry(3).map(|slot| *slot = 7), Ok(()));
        let capacity = vec.capacity();

        assert_eq!(vec.get(4), None);
        assert_eq!(vec.get(-1), None);
        assert_eq!(vec.get(i64::MAX), None);
        assert_eq!(vec.get(i64::MIN), None);
        assert_eq!(vec.capacity(), capacity);
        // First write spans from logical zero up to the written index.
        assert_eq!(vec.len(), 4);
    }

    #[test]
    fn gap_between_writes_is_default_filled() {
        let mut vec: SignedVec<u32> = SignedVec::new();
        assert_eq!(vec.entry(5).map(|slot| *slot = 50), Ok(()));
        assert_eq!(vec.entry(-3).map(|slot| *slot = 30), Ok(()));

        assert_eq!(vec.len(), 9);
        assert_eq!(vec.get(0), Some(&0));
        assert_eq!(vec.get(4), Some(&0));
        assert_eq!(vec.get(5), Some(&50));
        assert_eq!(vec.get(-3), Some(&30));
    }

    #[test]
    fn growth_preserves_values_at_their_indices() {
        let mut vec: SignedVec<i64> = SignedVec::new();
        for index in -40..=40 {
            assert_eq!(vec.entry(index).map(|slot| *slot = index * 10), Ok(()));
        }
        for index in -40..=40 {
            assert_eq!(vec.get(index), Some(&(index * 10)));
        }
        assert_eq!(vec.len(), 81);
        assert_eq!(vec.lowest_index(), -40);
        assert_eq!(vec.highest_index(), 41);
    }

    #[test]
    fn far_jump_recenters_around_zero() {
        let mut vec: SignedVec<u32> = SignedVec::new();
        assert_eq!(vec.entry(1000).map(|slot| *slot = 1), Ok(()));
        // The far positive write must leave room for negative growth too.
        assert_eq!(vec.entry(-1000).map(|slot| *slot = 2), Ok(()));
        assert_eq!(vec.get(1000), Some(&1));
        assert_eq!(vec.get(-1000), Some(&2));
        assert_eq!(vec.len(), 2001);
    }

    #[test]
    fn push_front_walks_negative_from_minus_one() {
        let mut vec: SignedVec<u32> = SignedVec::new();
        assert_eq!(vec.push_front(10), Ok(-1));
        assert_eq!(vec.push_front(20), Ok(-2));
        assert_eq!(vec.push_front(30), Ok(-3));

        assert_eq!(vec.lowest_index(), -3);
        assert_eq!(vec.highest_index(), 0);
        assert_eq!(vec.get(-1), Some(&10));
        assert_eq!(vec.get(-3), Some(&30));
    }

    #[test]
    fn push_back_continues_after_explicit_writes() {
        let mut vec: SignedVec<u32> = SignedVec::new();
        assert_eq!(vec.entry(2).map(|slot| *slot = 9), Ok(()));
        assert_eq!(vec.push_back(11), Ok(3));
        assert_eq!(vec.get(3), Some(&11));
    }

    #[test]
    fn iter_yields_index_value_pairs_in_order() {
        let mut vec: SignedVec<i32> = SignedVec::new();
        assert_eq!(vec.entry(-1).map(|slot| *slot = 5), Ok(()));
        assert_eq!(vec.entry(1).map(|slot| *slot = 6), Ok(()));

        let collected: Vec<(i64, i32)> = vec.iter().map(|(index, value)| (index, *value)).collect();
        assert_eq!(collected, vec![(-1, 5), (0, 0), (1, 6)]);
    }

    #[test]
    fn iter_mut_updates_in_place() {
        let mut vec: SignedVec<i32> = SignedVec::new();
        assert_eq!(vec.entry(-2).map(|slot| *slot = 1), Ok(()));
        assert_eq!(vec.entry(2).map(|slot| *slot = 1), Ok(()));
        for (_, value) in vec.iter_mut() {
            *value += 1;
        }
        assert_eq!(vec.get(-2), Some(&2));
        assert_eq!(vec.get(0), Some(&1));
        assert_eq!(vec.get(2), Some(&2));
    }

    #[test]
    fn clear_keeps_allocation_and_resets_span() {
        let mut vec: SignedVec<u32> = SignedVec::new();
        assert_eq!(vec.entry(-8).map(|slot| *slot = 3), Ok(()));
        assert_eq!(vec.entry(8).map(|slot| *slot = 4), Ok(()));
        let capacity = vec.capacity();

        vec.clear();
        assert!(vec.is_empty());
        assert_eq!(vec.capacity(), capacity);
        assert_eq!(vec.get(-8), None);
        assert_eq!(vec.get(8), None);

        // Re-use after clear starts from a clean slate.
        assert_eq!(vec.entry(8).map(|slot| *slot = 1), Ok(()));
        assert_eq!(vec.get(0), Some(&0));
        assert_eq!(vec.len(), 9);
    }

    #[test]
    fn release_frees_the_allocation() {
        let mut vec: SignedVec<u32> = SignedVec::new();
        assert_eq!(vec.entry(100).map(|slot| *slot = 1), Ok(()));
        vec.release();
        assert_eq!(vec.capacity(), 0);
        assert!(vec.is_empty());
    }

    #[test]
    #[should_panic(expected = "outside the initialized span")]
    fn index_panics_outside_span() {
        let vec: SignedVec<u32> = SignedVec::new();
        let _ = vec[0];
    }

    #[test]
    fn random_writes_agree_with_a_map_model() {
        use std::collections::BTreeMap;

        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};

        let mut vec: SignedVec<u64> = SignedVec::new();
        let mut model: BTreeMap<i64, u64> = BTreeMap::new();
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..5_000 {
            let index = rng.random_range(-2_000..=2_000_i64);
            let value = rng.random_range(1..=1_000_000_u64);
            assert_eq!(vec.entry(index).map(|slot| *slot += value), Ok(()));
            *model.entry(index).or_insert(0) += value;
        }

        for (index, expected) in &model {
            assert_eq!(vec.get(*index), Some(expected));
        }
        let written_total: u64 = vec.iter().map(|(_, value)| *value).sum();
        let model_total: u64 = model.values().sum();
        assert_eq!(written_total, model_total);
    }

    #[test]
    fn nested_vectors_grow_independently() {
        let mut grid: SignedVec<SignedVec<u32>> = SignedVec::new();
        let row = grid.entry(-4).and_then(|row| row.entry(9));
        assert_eq!(row.map(|cell| *cell = 42), Ok(()));

        assert_eq!(grid.get(-4).and_then(|row| row.get(9)), Some(&42));
        assert_eq!(grid.get(-4).and_then(|row| row.get(8)), Some(&0));
        assert_eq!(grid.get(-5).and_then(|row| row.get(9)), None);
    }
}
