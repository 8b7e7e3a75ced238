//! Query engine: range aggregates, point reads, full reconstruction, diff

use tracing::trace;

use super::PersistentSequence;
use crate::aggregate::{Aggregate, AggregateOp, Value};
use crate::arena::NodeId;
use crate::tree::{Coverage, Span};
use crate::version::VersionId;
use crate::SequenceError;

impl PersistentSequence {
    /// Aggregate `op` over positions `[left, right]` of `version`
    pub fn query(
        &self,
        version: VersionId,
        left: usize,
        right: usize,
        op: AggregateOp,
    ) -> Result<Value, SequenceError> {
        let aggregate = self.query_aggregate(version, left, right)?;
        let result = aggregate.get(op);
        trace!(%version, left, right, %op, result, "range query");
        Ok(result)
    }

    /// Sum, min and max over positions `[left, right]` of `version`
    pub fn query_aggregate(
        &self,
        version: VersionId,
        left: usize,
        right: usize,
    ) -> Result<Aggregate, SequenceError> {
        let root = self.root_of(version)?;
        if left > right || right >= self.len {
            return Err(SequenceError::InvalidRange {
                left,
                right,
                len: self.len,
            });
        }

        Ok(self.fold_range(root, self.root_span(), left, right))
    }

    fn fold_range(&self, node: NodeId, span: Span, left: usize, right: usize) -> Aggregate {
        match span.coverage(left, right) {
            Coverage::Disjoint => Aggregate::IDENTITY,
            Coverage::Contained => self.arena.get(node).aggregate(),
            Coverage::Partial => {
                let [left_child, right_child] = self.arena.branch_children(node);
                let (left_span, right_span) = span.children();
                self.fold_range(left_child, left_span, left, right)
                    .combine(&self.fold_range(right_child, right_span, left, right))
            }
        }
    }

    /// Value at `index` in `version`
    pub fn get(&self, version: VersionId, index: usize) -> Result<Value, SequenceError> {
        let mut node = self.root_of(version)?;
        if index >= self.len {
            return Err(SequenceError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        let mut span = self.root_span();
        while !span.is_leaf() {
            let [left_child, right_child] = self.arena.branch_children(node);
            let (left_span, right_span) = span.children();
            if left_span.contains(index) {
                node = left_child;
                span = left_span;
            } else {
                node = right_child;
                span = right_span;
            }
        }

        // A leaf's aggregate is {v, v, v}
        Ok(self.arena.get(node).aggregate().sum)
    }

    /// Reconstruct the whole array held by `version` (O(n))
    pub fn get_version_array(&self, version: VersionId) -> Result<Vec<Value>, SequenceError> {
        let root = self.root_of(version)?;
        let mut values = Vec::with_capacity(self.len);
        self.collect_leaves(root, &mut values);
        debug_assert_eq!(values.len(), self.len);
        Ok(values)
    }

    fn collect_leaves(&self, node: NodeId, out: &mut Vec<Value>) {
        let current = self.arena.get(node);
        match current.children() {
            None => out.push(current.aggregate().sum),
            Some([left, right]) => {
                self.collect_leaves(left, out);
                self.collect_leaves(right, out);
            }
        }
    }

    /// Positions whose values differ between `a` and `b`, ascending
    ///
    /// Subtrees the two versions share are skipped without descending, so
    /// versions a few updates apart compare in O(k log n).
    pub fn diff(&self, a: VersionId, b: VersionId) -> Result<Vec<usize>, SequenceError> {
        let root_a = self.root_of(a)?;
        let root_b = self.root_of(b)?;

        let mut changed = Vec::new();
        self.diff_subtrees(root_a, root_b, self.root_span(), &mut changed);
        Ok(changed)
    }

    fn diff_subtrees(&self, a: NodeId, b: NodeId, span: Span, out: &mut Vec<usize>) {
        if a == b {
            return;
        }

        if span.is_leaf() {
            if self.arena.get(a).aggregate() != self.arena.get(b).aggregate() {
                out.push(span.lo);
            }
            return;
        }

        let [a_left, a_right] = self.arena.branch_children(a);
        let [b_left, b_right] = self.arena.branch_children(b);
        let (left_span, right_span) = span.children();
        self.diff_subtrees(a_left, b_left, left_span, out);
        self.diff_subtrees(a_right, b_right, right_span, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PersistentSequence {
        PersistentSequence::from_values(&[1, 3, 5, 7, 9, 11]).unwrap()
    }

    #[test]
    fn range_sum_min_max() {
        let sequence = sample();
        let v0 = VersionId(0);

        assert_eq!(sequence.query(v0, 1, 4, AggregateOp::Sum).unwrap(), 24);
        assert_eq!(sequence.query(v0, 1, 4, AggregateOp::Min).unwrap(), 3);
        assert_eq!(sequence.query(v0, 1, 4, AggregateOp::Max).unwrap(), 9);
        assert_eq!(sequence.query(v0, 3, 3, AggregateOp::Sum).unwrap(), 7);
        assert_eq!(
            sequence.query_aggregate(v0, 0, 5).unwrap(),
            Aggregate {
                sum: 36,
                min: 1,
                max: 11
            }
        );
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        let sequence = sample();
        let v0 = VersionId(0);

        assert!(matches!(
            sequence.query(v0, 4, 1, AggregateOp::Sum),
            Err(SequenceError::InvalidRange {
                left: 4,
                right: 1,
                len: 6
            })
        ));
        assert!(matches!(
            sequence.query(v0, 0, 6, AggregateOp::Max),
            Err(SequenceError::InvalidRange { .. })
        ));
        assert!(matches!(
            sequence.query(VersionId(1), 0, 1, AggregateOp::Min),
            Err(SequenceError::InvalidVersion { .. })
        ));
    }

    #[test]
    fn point_reads() {
        let sequence = sample();
        let values: Vec<Value> = (0..6).map(|i| sequence.get(VersionId(0), i).unwrap()).collect();

        assert_eq!(values, vec![1, 3, 5, 7, 9, 11]);
        assert!(matches!(
            sequence.get(VersionId(0), 6),
            Err(SequenceError::IndexOutOfRange { index: 6, len: 6 })
        ));
    }

    #[test]
    fn diff_reports_changed_positions() {
        let mut sequence = sample();
        let v0 = VersionId(0);
        let v1 = sequence.update(v0, 2, 10).unwrap();
        let v2 = sequence.update(v1, 5, -4).unwrap();
        let v3 = sequence.update(v2, 2, 5).unwrap();

        assert_eq!(sequence.diff(v0, v0).unwrap(), Vec::<usize>::new());
        assert_eq!(sequence.diff(v0, v1).unwrap(), vec![2]);
        assert_eq!(sequence.diff(v0, v2).unwrap(), vec![2, 5]);
        // Same value written back: different nodes, equal leaves
        assert_eq!(sequence.diff(v0, v3).unwrap(), vec![5]);
    }

    #[test]
    fn diff_between_independent_builds() {
        let mut sequence = sample();
        let rebuilt = sequence.build(&[1, 3, 0, 7, 9, 12]).unwrap();

        assert_eq!(sequence.diff(VersionId(0), rebuilt).unwrap(), vec![2, 5]);
    }
}
