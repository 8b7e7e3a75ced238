//! Builder: version 0 (or a reset snapshot) from a seed array

use tracing::debug;

use super::PersistentSequence;
use crate::aggregate::Value;
use crate::arena::{NodeArena, NodeId};
use crate::tree::Span;
use crate::version::{VersionId, VersionOrigin};
use crate::SequenceError;

impl PersistentSequence {
    /// Build a fresh tree over `values` and append it as a new version
    ///
    /// The first build fixes the sequence length. Later builds must use the
    /// same length; they start a new lineage without touching older
    /// versions. Allocates `2n - 1` nodes.
    pub fn build(&mut self, values: &[Value]) -> Result<VersionId, SequenceError> {
        if values.is_empty() {
            return Err(SequenceError::InvalidInput(
                "cannot build a sequence from an empty array".to_string(),
            ));
        }
        if !self.versions.is_empty() && values.len() != self.len {
            return Err(SequenceError::InvalidInput(format!(
                "rebuild length {} does not match sequence length {}",
                values.len(),
                self.len
            )));
        }

        let before = self.arena.len();
        let root = build_subtree(&mut self.arena, values, Span::root(values.len()));
        self.len = values.len();
        let version = self.versions.push(root, VersionOrigin::Build);

        debug!(
            %version,
            len = self.len,
            nodes = self.arena.len() - before,
            "built version"
        );
        Ok(version)
    }
}

/// Build the subtree covering `span`, children before parent
fn build_subtree(arena: &mut NodeArena, values: &[Value], span: Span) -> NodeId {
    if span.is_leaf() {
        return arena.alloc_leaf(values[span.lo]);
    }

    let (left, right) = span.children();
    let left = build_subtree(arena, values, left);
    let right = build_subtree(arena, values, right);
    arena.alloc_branch([left, right])
}
