//! Naive reference model: one full array copy per version.

#![allow(dead_code)]

use perseq::{AggregateOp, Value};

/// Every version stored as its own `Vec`.
#[derive(Debug, Default, Clone)]
pub struct Model {
    pub versions: Vec<Vec<Value>>,
}

impl Model {
    pub fn build(values: &[Value]) -> Self {
        Self {
            versions: vec![values.to_vec()],
        }
    }

    pub fn update(&mut self, version: usize, index: usize, value: Value) -> usize {
        let mut next = self.versions[version].clone();
        next[index] = value;
        self.versions.push(next);
        self.versions.len() - 1
    }

    pub fn query(&self, version: usize, left: usize, right: usize, op: AggregateOp) -> Value {
        self.versions[version][left..=right]
            .iter()
            .fold(op.identity(), |acc, &v| op.apply(acc, v))
    }
}

/// Seed used by most scenario tests.
pub fn sample_values() -> Vec<Value> {
    vec![1, 3, 5, 7, 9, 11]
}
