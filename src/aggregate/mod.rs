//! Range aggregates
//!
//! Every node carries sum, min and max together, so one tree answers all
//! three operators. Combination is associative with an identity element,
//! which is what lets a query fold disjoint subtrees in any grouping.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Element type stored at the leaves
pub type Value = i64;

/// Summary of a contiguous index range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Aggregate {
    /// Sum of the range (two's-complement wrapping)
    pub sum: Value,
    /// Smallest element of the range
    pub min: Value,
    /// Largest element of the range
    pub max: Value,
}

impl Aggregate {
    /// Neutral element: combining with it changes nothing
    pub const IDENTITY: Aggregate = Aggregate {
        sum: 0,
        min: Value::MAX,
        max: Value::MIN,
    };

    /// Aggregate of a single element
    #[inline]
    pub fn leaf(value: Value) -> Self {
        Self {
            sum: value,
            min: value,
            max: value,
        }
    }

    /// Combine the aggregates of two adjacent ranges
    #[inline]
    pub fn combine(&self, other: &Aggregate) -> Aggregate {
        Aggregate {
            sum: self.sum.wrapping_add(other.sum),
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Component selected by `op`
    #[inline]
    pub fn get(&self, op: AggregateOp) -> Value {
        match op {
            AggregateOp::Sum => self.sum,
            AggregateOp::Min => self.min,
            AggregateOp::Max => self.max,
        }
    }

    /// Fold a slice of elements (empty slice gives the identity)
    pub fn of(values: &[Value]) -> Aggregate {
        values
            .iter()
            .fold(Aggregate::IDENTITY, |acc, &v| acc.combine(&Aggregate::leaf(v)))
    }
}

impl Default for Aggregate {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sum={} min={} max={}", self.sum, self.min, self.max)
    }
}

/// Range operator answered by a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum AggregateOp {
    /// Sum of elements
    Sum,
    /// Minimum element
    Min,
    /// Maximum element
    Max,
}

impl AggregateOp {
    /// All operators, in display order
    pub const ALL: [AggregateOp; 3] = [AggregateOp::Sum, AggregateOp::Min, AggregateOp::Max];

    /// Identity for this operator alone (0, +∞, -∞)
    pub fn identity(self) -> Value {
        Aggregate::IDENTITY.get(self)
    }

    /// Apply this operator to two values
    pub fn apply(self, a: Value, b: Value) -> Value {
        match self {
            AggregateOp::Sum => a.wrapping_add(b),
            AggregateOp::Min => a.min(b),
            AggregateOp::Max => a.max(b),
        }
    }

    /// Lowercase name used by the script language
    pub fn name(self) -> &'static str {
        match self {
            AggregateOp::Sum => "sum",
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
        }
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown operator name
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown aggregate operator '{0}' (expected sum, min or max)")]
pub struct ParseOpError(
    /// Name that failed to parse
    pub String,
);

impl FromStr for AggregateOp {
    type Err = ParseOpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sum" => Ok(AggregateOp::Sum),
            "min" => Ok(AggregateOp::Min),
            "max" => Ok(AggregateOp::Max),
            _ => Err(ParseOpError(s.to_string())),
        }
    }
}
