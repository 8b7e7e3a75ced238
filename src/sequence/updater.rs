//! Updater: point assignment by path copying
//!
//! Only the root-to-leaf path covering the index is copied. Every sibling
//! hanging off that path is reused by id, so an update costs at most
//! `height + 1` new nodes whatever the sequence length.

use tracing::debug;

use super::PersistentSequence;
use crate::aggregate::Value;
use crate::tree::{DescentPath, Direction};
use crate::version::{VersionId, VersionOrigin};
use crate::SequenceError;

impl PersistentSequence {
    /// Derive a new version from `version` with `index` set to `value`
    ///
    /// On error nothing is allocated and the version table is unchanged.
    pub fn update(
        &mut self,
        version: VersionId,
        index: usize,
        value: Value,
    ) -> Result<VersionId, SequenceError> {
        let source_root = self.root_of(version)?;
        if index >= self.len {
            return Err(SequenceError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        // 1. Descend, recording which child was taken at every branch
        let root_span = self.root_span();
        let mut path = DescentPath::with_height(self.tree_height());
        let mut node = source_root;
        let mut span = root_span;

        while !span.is_leaf() {
            assert!(
                span.contains(index),
                "invariant violated: span {span} does not contain index {index}"
            );
            let [left_child, right_child] = self.arena.branch_children(node);
            let (left_span, right_span) = span.children();

            if left_span.contains(index) {
                path.push(node, Direction::Left);
                node = left_child;
                span = left_span;
            } else {
                path.push(node, Direction::Right);
                node = right_child;
                span = right_span;
            }
        }
        debug_assert_eq!(span.lo, index);
        debug_assert_eq!(path.recompute_span(root_span), span);
        debug_assert!(self.arena.get(node).is_leaf());

        // 2. Rebuild bottom-up: new leaf, then one new branch per level
        let before = self.arena.len();
        let depth = path.depth();
        let mut current = self.arena.alloc_leaf(value);

        while let Some(step) = path.pop() {
            let [left_child, right_child] = self.arena.branch_children(step.node);
            let children = match step.direction {
                Direction::Left => [current, right_child],
                Direction::Right => [left_child, current],
            };
            current = self.arena.alloc_branch(children);
        }
        debug_assert_eq!(self.arena.len() - before, depth + 1);

        let new_version = self.versions.push(
            current,
            VersionOrigin::Update {
                parent: version,
                index,
                value,
            },
        );

        debug!(
            parent = %version,
            version = %new_version,
            index,
            value,
            nodes = depth + 1,
            "updated version"
        );
        Ok(new_version)
    }
}
