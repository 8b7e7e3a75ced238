//! Root-to-leaf descent path
//!
//! The updater walks down iteratively and records one step per level:
//! the node it left and which child it took. Rebuilding pops the steps in
//! reverse, so the stack never holds more than O(log n) entries.

use super::Span;
use crate::arena::NodeId;

/// Which child a descent step followed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Lower half [lo, mid]
    Left,

    /// Upper half [mid+1, hi]
    Right,
}

/// One level of a descent
#[derive(Debug, Clone, Copy)]
pub struct PathStep {
    /// Branch node the descent passed through (in the source version)
    pub node: NodeId,

    /// Child that was followed
    pub direction: Direction,
}

/// Stack of steps from a root down to (but excluding) a leaf
#[derive(Debug, Default)]
pub struct DescentPath {
    steps: Vec<PathStep>,
}

impl DescentPath {
    /// Create empty path with room for `height` levels
    pub fn with_height(height: usize) -> Self {
        Self {
            steps: Vec::with_capacity(height),
        }
    }

    /// Push level onto stack
    pub fn push(&mut self, node: NodeId, direction: Direction) {
        self.steps.push(PathStep { node, direction });
    }

    /// Pop deepest level
    pub fn pop(&mut self) -> Option<PathStep> {
        self.steps.pop()
    }

    /// Number of recorded levels
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// Recompute the span the path ends at, starting from `root`
    ///
    /// Endpoints are not stored per step; they are re-derived from the
    /// directions alone.
    pub fn recompute_span(&self, root: Span) -> Span {
        let mut span = root;

        for step in &self.steps {
            if span.is_leaf() {
                break;
            }

            let (left, right) = span.children();
            span = match step.direction {
                Direction::Left => left,
                Direction::Right => right,
            };
        }

        span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recompute_span() {
        let root = Span::root(100);
        let mut path = DescentPath::with_height(root.depth_to_leaf());

        path.push(NodeId::from_raw(0), Direction::Left);
        assert_eq!(path.recompute_span(root), Span::new(0, 49));

        path.push(NodeId::from_raw(1), Direction::Right);
        assert_eq!(path.recompute_span(root), Span::new(25, 49));

        let step = path.pop().expect("two steps were pushed");
        assert_eq!(step.direction, Direction::Right);
        assert_eq!(path.depth(), 1);
    }

    #[test]
    fn test_empty_path_is_root() {
        let root = Span::root(8);
        assert_eq!(DescentPath::default().recompute_span(root), root);
    }
}
