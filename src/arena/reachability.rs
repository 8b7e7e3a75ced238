//! Reachability marks over the arena
//!
//! One bit per arena slot. Marking from a set of roots visits each shared
//! subtree once, so the marked count is the number of distinct nodes those
//! versions keep alive.

use bitvec::prelude::*;

use super::{NodeArena, NodeId};

/// Visited set keyed by arena slot
#[derive(Debug)]
pub struct ReachabilityMarks {
    marks: BitVec,
}

impl ReachabilityMarks {
    /// Create cleared marks sized for `arena`
    pub fn new(arena: &NodeArena) -> Self {
        Self {
            marks: bitvec![0; arena.len()],
        }
    }

    /// Mark every node reachable from `root`
    ///
    /// Stops at already-marked nodes: everything below them is marked too.
    pub fn mark_from(&mut self, arena: &NodeArena, root: NodeId) {
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            if self.marks[id.index()] {
                continue;
            }
            self.marks.set(id.index(), true);

            if let Some([left, right]) = arena.get(id).children() {
                stack.push(right);
                stack.push(left);
            }
        }
    }

    /// Whether `id` has been marked
    pub fn is_marked(&self, id: NodeId) -> bool {
        self.marks[id.index()]
    }

    /// Number of marked nodes
    pub fn count(&self) -> usize {
        self.marks.count_ones()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_subtree_counted_once() {
        let mut arena = NodeArena::new();
        let a = arena.alloc_leaf(1);
        let b = arena.alloc_leaf(2);
        let c = arena.alloc_leaf(3);
        let first = arena.alloc_branch([a, b]);
        let second = arena.alloc_branch([a, c]);

        let mut marks = ReachabilityMarks::new(&arena);
        marks.mark_from(&arena, first);
        assert_eq!(marks.count(), 3);
        assert!(!marks.is_marked(c));

        marks.mark_from(&arena, second);
        assert_eq!(marks.count(), 5);
        assert!(marks.is_marked(c));
    }
}
