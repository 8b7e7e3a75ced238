//! Node storage
//!
//! Nodes live in an append-only arena and are addressed by [`NodeId`].
//! Nothing is ever freed or written after allocation, so a subtree is
//! shared between versions simply by copying its id.

mod allocator;
mod reachability;

pub use allocator::NodeArena;
pub use reachability::ReachabilityMarks;

use std::fmt;

use crate::aggregate::{Aggregate, Value};

/// Index of a node in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Wrap a raw arena slot
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Arena slot as a `usize`
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Immutable tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    aggregate: Aggregate,
    children: Option<[NodeId; 2]>,
}

impl Node {
    /// Leaf holding a single element
    pub fn leaf(value: Value) -> Self {
        Self {
            aggregate: Aggregate::leaf(value),
            children: None,
        }
    }

    /// Branch over two children with their combined aggregate
    pub fn branch(aggregate: Aggregate, children: [NodeId; 2]) -> Self {
        Self {
            aggregate,
            children: Some(children),
        }
    }

    /// Aggregate over the node's whole span
    #[inline]
    pub fn aggregate(&self) -> Aggregate {
        self.aggregate
    }

    /// Child ids (`None` for leaves)
    #[inline]
    pub fn children(&self) -> Option<[NodeId; 2]> {
        self.children
    }

    /// Check if leaf
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Snapshot of arena usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct ArenaStats {
    /// Total nodes ever allocated
    pub nodes: usize,
    /// Leaf nodes among them
    pub leaves: usize,
    /// Branch nodes among them
    pub branches: usize,
}

impl ArenaStats {
    /// Generate report
    pub fn report(&self) -> String {
        format!(
            "nodes={} leaves={} branches={}",
            self.nodes, self.leaves, self.branches
        )
    }
}
