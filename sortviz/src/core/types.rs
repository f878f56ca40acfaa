//! Shared value types for the sequence model and the step vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A sortable element. Generated values fall in `0..=MAX_VALUE`.
pub type Value = u32;

/// Largest value produced by random generation.
pub const MAX_VALUE: Value = 99;

/// Stable display identity for one generated element.
///
/// `origin` is the slot the element occupied when the run was generated; the
/// tag travels with its value whenever the value moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub origin: usize,
    /// Hue in degrees, `0..360`.
    pub hue: u16,
}

/// A value together with its tag, as held by one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub value: Value,
    pub tag: Tag,
}

/// Comparison operator used by a Compare step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Greater,
    Less,
    LessOrEqual,
}

impl Comparison {
    pub fn holds(self, left: Value, right: Value) -> bool {
        match self {
            Comparison::Greater => left > right,
            Comparison::Less => left < right,
            Comparison::LessOrEqual => left <= right,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::Greater => ">",
            Comparison::Less => "<",
            Comparison::LessOrEqual => "<=",
        }
    }

    /// Human-readable condition, e.g. `"5 > 3"`.
    pub fn label(self, left: Value, right: Value) -> String {
        format!("{left} {} {right}", self.symbol())
    }
}

/// Monotonic identifier of a run. Larger ids supersede smaller ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_labels_match_operator() {
        assert_eq!(Comparison::Greater.label(5, 3), "5 > 3");
        assert_eq!(Comparison::Less.label(4, 1), "4 < 1");
        assert_eq!(Comparison::LessOrEqual.label(3, 1), "3 <= 1");
    }

    #[test]
    fn less_or_equal_holds_on_ties() {
        assert!(Comparison::LessOrEqual.holds(7, 7));
        assert!(!Comparison::Less.holds(7, 7));
        assert!(!Comparison::Greater.holds(7, 7));
    }
}
