//! Implicit index span of a tree node
//!
//! Span = interval [lo, hi] ⊆ [0, n-1]
//! Children computed via midpoint: m = ⌊(lo + hi) / 2⌋
//!   Left child: [lo, m]
//!   Right child: [m+1, hi]
//!
//! Spans are never stored in the arena. Every walk starts from the root
//! span and recomputes child spans on the way down, so the bracketing is
//! identical for every version of a sequence.

use std::fmt;

/// Index interval covered by a node (implicit, inclusive on both ends)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Lowest index covered (inclusive)
    pub lo: usize,

    /// Highest index covered (inclusive)
    pub hi: usize,
}

/// How a span relates to a query range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// No index in common
    Disjoint,
    /// Span lies entirely inside the range
    Contained,
    /// Some but not all indices overlap
    Partial,
}

impl Span {
    /// Create span [lo, hi]
    pub fn new(lo: usize, hi: usize) -> Self {
        debug_assert!(lo <= hi, "span [{lo}, {hi}] is inverted");
        Self { lo, hi }
    }

    /// Root span [0, len-1] for a sequence of `len` elements
    pub fn root(len: usize) -> Self {
        debug_assert!(len > 0, "root span needs at least one element");
        Self::new(0, len - 1)
    }

    /// Check if leaf (unit interval)
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.lo == self.hi
    }

    /// Interval length
    #[inline]
    pub fn length(&self) -> usize {
        self.hi - self.lo + 1
    }

    /// Split point: m = ⌊(lo + hi) / 2⌋
    #[inline]
    pub fn midpoint(&self) -> usize {
        self.lo + (self.hi - self.lo) / 2
    }

    /// Get children via midpoint split
    ///
    /// Returns: ([lo, mid], [mid+1, hi])
    /// length(child) ≤ ⌈length(parent) / 2⌉
    pub fn children(&self) -> (Span, Span) {
        debug_assert!(!self.is_leaf(), "Leaf has no children");

        let mid = self.midpoint();
        (Span::new(self.lo, mid), Span::new(mid + 1, self.hi))
    }

    /// Whether `index` falls inside this span
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.lo <= index && index <= self.hi
    }

    /// Classify this span against the inclusive range [left, right]
    pub fn coverage(&self, left: usize, right: usize) -> Coverage {
        if self.hi < left || right < self.lo {
            Coverage::Disjoint
        } else if left <= self.lo && self.hi <= right {
            Coverage::Contained
        } else {
            Coverage::Partial
        }
    }

    /// Number of splits from this span down to its deepest leaf
    ///
    /// The left child is never shorter than the right one, so following
    /// left children always reaches the deepest level.
    pub fn depth_to_leaf(&self) -> usize {
        let mut span = *self;
        let mut depth = 0;

        while !span.is_leaf() {
            let (left, _) = span.children();
            span = left;
            depth += 1;
        }

        depth
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            write!(f, "[{}]", self.lo)
        } else {
            write!(f, "[{}, {}]", self.lo, self.hi)
        }
    }
}
