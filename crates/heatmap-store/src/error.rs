//! Error types for the `heatmap-store` crate.
//!
//! All fallible operations in this crate return [`StoreError`] through the
//! standard [`Result`] type alias.

/// Errors that can occur in the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Growing a backing allocation could not acquire memory.
    ///
    /// The container that reported this is still in its prior, fully valid
    /// state; the failed operation had no effect.
    #[error("could not allocate {required} slots for storage growth")]
    AllocationFailure {
        /// The slot count the failed growth asked for.
        required: usize,
    },
}
