//! # Persistent Versioned Indexed Sequence
//!
//! An array whose every past state stays queryable. Each point update
//! produces a new version by path copying: only the O(log n) nodes on the
//! root-to-leaf path are allocated, and every other subtree is shared with
//! the source version.
//!
//! ## Core Algorithm
//!
//! 1. **Fixed shape**: [0, n-1] is split at the midpoint recursively; the
//!    bracketing depends on `n` alone and is identical for all versions
//! 2. **Immutable nodes**: nodes live in an append-only arena and carry
//!    sum, min and max of their span
//! 3. **Path copying**: an update copies one path and reuses all siblings
//! 4. **Range folding**: queries return stored aggregates for covered
//!    subtrees and the identity for disjoint ones
//!
//! Result: O(log n) time per update/query, O(log n) extra nodes per update
//!
//! ## Usage Example
//!
//! ```
//! use perseq::{AggregateOp, PersistentSequence, VersionId};
//!
//! let mut seq = PersistentSequence::from_values(&[1, 3, 5, 7, 9, 11])?;
//! let v1 = seq.update(VersionId(0), 2, 10)?;
//!
//! assert_eq!(seq.query(v1, 1, 4, AggregateOp::Sum)?, 29);
//! assert_eq!(seq.query(VersionId(0), 1, 4, AggregateOp::Sum)?, 24);
//! # Ok::<(), perseq::SequenceError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

// Core modules
pub mod aggregate; // Sum/min/max summaries
pub mod arena; // Immutable node storage
pub mod tree; // Implicit tree shape and descent paths
pub mod version; // Append-only version table
pub mod sequence; // Builder, updater, query engine
pub mod script; // Command scripts for the CLI driver

// Re-exports for convenience
pub use aggregate::{Aggregate, AggregateOp, Value};
pub use arena::{ArenaStats, NodeId};
pub use sequence::PersistentSequence;
pub use version::{VersionId, VersionOrigin};

use thiserror::Error;

/// Errors returned by sequence operations
///
/// A failed operation never leaves a partial version behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// Build input was empty or had the wrong length
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Version id was never produced
    #[error("invalid version {version}: only {count} version(s) exist")]
    InvalidVersion {
        /// Requested version
        version: usize,
        /// Versions currently in the table
        count: usize,
    },

    /// Position outside [0, len)
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// Requested position
        index: usize,
        /// Sequence length
        len: usize,
    },

    /// Query range inverted or past the end
    #[error("invalid range [{left}, {right}] for length {len}")]
    InvalidRange {
        /// Left end (inclusive)
        left: usize,
        /// Right end (inclusive)
        right: usize,
        /// Sequence length
        len: usize,
    },
}
