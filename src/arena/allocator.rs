//! Append-only node slab

use super::{ArenaStats, Node, NodeId};
use crate::aggregate::Value;

/// Growable pool of immutable nodes
///
/// Slots are handed out in allocation order and never reused.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
    leaves: usize,
}

impl NodeArena {
    /// Create empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Create arena with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            leaves: 0,
        }
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let slot = u32::try_from(self.nodes.len()).unwrap_or_else(|_| {
            panic!("node arena exhausted: more than {} nodes", u32::MAX)
        });
        self.nodes.push(node);
        NodeId::from_raw(slot)
    }

    /// Allocate a leaf holding `value`
    pub fn alloc_leaf(&mut self, value: Value) -> NodeId {
        self.leaves += 1;
        self.alloc(Node::leaf(value))
    }

    /// Allocate a branch over `children`, combining their aggregates
    pub fn alloc_branch(&mut self, children: [NodeId; 2]) -> NodeId {
        let [left, right] = children;
        let aggregate = self.get(left).aggregate().combine(&self.get(right).aggregate());
        self.alloc(Node::branch(aggregate, children))
    }

    /// Look up a node
    ///
    /// Ids are only minted by this arena, so an unknown id is a bug.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Children of a node that must be a branch
    ///
    /// Panics when `id` is a leaf: a descent reached leaf level before its
    /// span narrowed to a single index, so the tree shape is corrupt.
    pub fn branch_children(&self, id: NodeId) -> [NodeId; 2] {
        match self.get(id).children() {
            Some(children) => children,
            None => panic!("invariant violated: leaf {id} reached above leaf level"),
        }
    }

    /// Number of allocated nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing has been allocated yet
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Usage counters
    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            nodes: self.nodes.len(),
            leaves: self.leaves,
            branches: self.nodes.len() - self.leaves,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Aggregate;

    #[test]
    fn branch_combines_children() {
        let mut arena = NodeArena::new();
        let left = arena.alloc_leaf(4);
        let right = arena.alloc_leaf(-7);
        let parent = arena.alloc_branch([left, right]);

        assert_eq!(
            arena.get(parent).aggregate(),
            Aggregate {
                sum: -3,
                min: -7,
                max: 4
            }
        );
        assert_eq!(arena.branch_children(parent), [left, right]);
        assert!(arena.get(left).is_leaf());
    }

    #[test]
    fn ids_follow_allocation_order() {
        let mut arena = NodeArena::with_capacity(3);
        let a = arena.alloc_leaf(1);
        let b = arena.alloc_leaf(2);
        let c = arena.alloc_branch([a, b]);

        assert_eq!((a.index(), b.index(), c.index()), (0, 1, 2));
        assert_eq!(
            arena.stats(),
            ArenaStats {
                nodes: 3,
                leaves: 2,
                branches: 1
            }
        );
    }

    #[test]
    #[should_panic(expected = "invariant violated")]
    fn leaf_has_no_branch_children() {
        let mut arena = NodeArena::new();
        let leaf = arena.alloc_leaf(0);
        arena.branch_children(leaf);
    }
}
