//! Persistent indexed sequence
//!
//! Ties the node arena, the fixed tree shape and the version table
//! together. Builds and updates append versions; every read takes a
//! version id and never observes later writes.

mod builder;
mod query;
mod updater;

use crate::aggregate::Value;
use crate::arena::{ArenaStats, NodeArena, NodeId, ReachabilityMarks};
use crate::tree::{self, Span};
use crate::version::{VersionId, VersionOrigin, VersionTable};
use crate::SequenceError;

/// Versioned array with path-copying point updates and range aggregates
///
/// Every version shares all subtrees it did not change with the version
/// it was derived from. Nodes are never freed, so old versions stay
/// queryable for the lifetime of the sequence.
#[derive(Debug, Default)]
pub struct PersistentSequence {
    /// Element count, fixed by the first build (0 until then)
    len: usize,
    arena: NodeArena,
    versions: VersionTable,
}

impl PersistentSequence {
    /// Create an empty sequence with no versions
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sequence whose version 0 holds `values`
    pub fn from_values(values: &[Value]) -> Result<Self, SequenceError> {
        let mut sequence = Self {
            len: 0,
            arena: NodeArena::with_capacity(2 * values.len()),
            versions: VersionTable::new(),
        };
        sequence.build(values)?;
        Ok(sequence)
    }

    /// Element count of every version (0 before the first build)
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been built yet
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of versions produced so far
    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    /// Most recently produced version
    pub fn latest(&self) -> Option<VersionId> {
        self.versions.len().checked_sub(1).map(VersionId)
    }

    /// Root node of `version`
    pub fn root_of(&self, version: VersionId) -> Result<NodeId, SequenceError> {
        self.versions.root_of(version)
    }

    /// How `version` was produced
    pub fn origin_of(&self, version: VersionId) -> Result<VersionOrigin, SequenceError> {
        self.versions.origin_of(version)
    }

    /// Ancestors of `version`, newest first, ending at its build
    pub fn lineage(&self, version: VersionId) -> Result<Vec<VersionId>, SequenceError> {
        self.versions.lineage(version)
    }

    /// Tree height: levels between the root and the deepest leaf
    pub fn tree_height(&self) -> usize {
        tree::height(self.len)
    }

    /// Arena usage counters
    pub fn arena_stats(&self) -> ArenaStats {
        self.arena.stats()
    }

    /// Number of distinct nodes kept alive by `versions`
    ///
    /// Shared subtrees are counted once, so for a build plus k updates this
    /// is about `2n + k·(height + 1)`, not `(k + 1)·2n`.
    pub fn reachable_nodes(&self, versions: &[VersionId]) -> Result<usize, SequenceError> {
        let mut marks = ReachabilityMarks::new(&self.arena);
        for &version in versions {
            marks.mark_from(&self.arena, self.root_of(version)?);
        }
        Ok(marks.count())
    }

    /// BLAKE3 digest of the values held by `version`
    ///
    /// Depends only on the values, not on how the version was produced.
    pub fn fingerprint(&self, version: VersionId) -> Result<blake3::Hash, SequenceError> {
        let mut hasher = blake3::Hasher::new();
        for value in self.get_version_array(version)? {
            hasher.update(&value.to_le_bytes());
        }
        Ok(hasher.finalize())
    }

    fn root_span(&self) -> Span {
        Span::root(self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_has_no_versions() {
        let sequence = PersistentSequence::new();
        assert!(sequence.is_empty());
        assert_eq!(sequence.version_count(), 0);
        assert_eq!(sequence.latest(), None);
        assert!(matches!(
            sequence.root_of(VersionId(0)),
            Err(SequenceError::InvalidVersion {
                version: 0,
                count: 0
            })
        ));
    }

    #[test]
    fn fingerprint_tracks_values_not_lineage() {
        let mut sequence = PersistentSequence::from_values(&[1, 2, 3]).unwrap();
        let v1 = sequence.update(VersionId(0), 1, 9).unwrap();
        let v2 = sequence.update(v1, 1, 2).unwrap();

        let original = sequence.fingerprint(VersionId(0)).unwrap();
        assert_ne!(original, sequence.fingerprint(v1).unwrap());
        assert_eq!(original, sequence.fingerprint(v2).unwrap());
    }

    #[test]
    fn reachable_nodes_counts_shared_subtrees_once() {
        let values: Vec<Value> = (0..16).collect();
        let mut sequence = PersistentSequence::from_values(&values).unwrap();
        let v0 = VersionId(0);
        let v1 = sequence.update(v0, 5, 100).unwrap();

        let full_tree = 2 * values.len() - 1;
        let path = sequence.tree_height() + 1;
        assert_eq!(sequence.reachable_nodes(&[v0]).unwrap(), full_tree);
        assert_eq!(sequence.reachable_nodes(&[v1]).unwrap(), full_tree);
        assert_eq!(sequence.reachable_nodes(&[v0, v1]).unwrap(), full_tree + path);
        assert!(sequence.reachable_nodes(&[VersionId(7)]).is_err());
    }

    #[test]
    fn sequence_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PersistentSequence>();
    }
}
