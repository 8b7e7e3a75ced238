//! Tree shape shared by every version
//!
//! The bracketing of [0, n-1] into halves is fixed by `n` alone, so it is
//! never materialized: spans are intervals computed on demand during
//! descent, and nodes in the arena only carry values and child ids.

mod span;
mod traversal;

pub use span::{Coverage, Span};
pub use traversal::{DescentPath, Direction, PathStep};

/// Height of the tree over `len` elements: ⌈log2 len⌉
///
/// An update allocates at most `height + 1` nodes.
pub fn height(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    Span::root(len).depth_to_leaf()
}
