//! Version table
//!
//! Append-only list of roots, one per version, plus where each version
//! came from. Entries are never removed or rewritten, so a `VersionId`
//! stays valid for the lifetime of the table.

use std::fmt;

use crate::aggregate::Value;
use crate::arena::NodeId;
use crate::SequenceError;

/// Identifier of a version, assigned in creation order from 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct VersionId(pub usize);

impl VersionId {
    /// Position in the version table
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for VersionId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// How a version was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum VersionOrigin {
    /// Fresh tree built from a seed array
    Build,
    /// Path copy of `parent` with one position replaced
    Update {
        /// Source version
        parent: VersionId,
        /// Replaced position
        index: usize,
        /// New value at `index`
        value: Value,
    },
}

impl fmt::Display for VersionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionOrigin::Build => f.write_str("build"),
            VersionOrigin::Update {
                parent,
                index,
                value,
            } => write!(f, "update of {parent}: [{index}] = {value}"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct VersionEntry {
    root: NodeId,
    origin: VersionOrigin,
}

/// Append-only sequence of version roots
#[derive(Debug, Default)]
pub struct VersionTable {
    entries: Vec<VersionEntry>,
}

impl VersionTable {
    /// Create empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a root and return its id (= count - 1 after the push)
    pub fn push(&mut self, root: NodeId, origin: VersionOrigin) -> VersionId {
        let id = VersionId(self.entries.len());
        self.entries.push(VersionEntry { root, origin });
        id
    }

    /// Number of versions recorded
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no version exists yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, version: VersionId) -> Result<&VersionEntry, SequenceError> {
        self.entries
            .get(version.index())
            .ok_or(SequenceError::InvalidVersion {
                version: version.index(),
                count: self.entries.len(),
            })
    }

    /// Root node of `version`
    pub fn root_of(&self, version: VersionId) -> Result<NodeId, SequenceError> {
        self.entry(version).map(|entry| entry.root)
    }

    /// Origin of `version`
    pub fn origin_of(&self, version: VersionId) -> Result<VersionOrigin, SequenceError> {
        self.entry(version).map(|entry| entry.origin)
    }

    /// Chain from `version` back to the build it descends from
    ///
    /// The first element is `version` itself, the last one a `Build`.
    pub fn lineage(&self, version: VersionId) -> Result<Vec<VersionId>, SequenceError> {
        let mut chain = vec![version];
        let mut origin = self.origin_of(version)?;

        while let VersionOrigin::Update { parent, .. } = origin {
            chain.push(parent);
            origin = self.origin_of(parent)?;
        }

        Ok(chain)
    }
}
