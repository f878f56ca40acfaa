//! Step vocabulary: one immutable record per observed primitive.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::types::Value;

/// One event observed while a driver runs.
///
/// Steps are never mutated after emission; their emission order is the
/// animation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Two slots were compared. `label` renders the condition, e.g. `"5 > 3"`.
    ///
    /// `held` marks operands read from a side buffer: `i` and `j` name the
    /// slots they were copied from, which may already hold other values.
    Compare {
        i: usize,
        j: usize,
        result: bool,
        label: String,
        #[serde(default)]
        held: bool,
    },
    /// Values and tags at `i` and `j` were exchanged.
    Swap { i: usize, j: usize },
    /// A lifted key travelled from `from` to `to` after the shift phase.
    ShiftInsert { from: usize, to: usize, value: Value },
    /// `value` was written back into `index`.
    Overwrite { index: usize, value: Value },
    /// Pure redraw, no data change.
    Snapshot {
        highlighted: BTreeSet<usize>,
        label: String,
        result_label: String,
    },
}

impl Step {
    pub fn kind(&self) -> &'static str {
        match self {
            Step::Compare { .. } => "compare",
            Step::Swap { .. } => "swap",
            Step::ShiftInsert { .. } => "shift_insert",
            Step::Overwrite { .. } => "overwrite",
            Step::Snapshot { .. } => "snapshot",
        }
    }

    /// Swaps and insertions animate over several frames.
    pub fn is_compound(&self) -> bool {
        matches!(self, Step::Swap { .. } | Step::ShiftInsert { .. })
    }
}

/// Display form of a boolean condition.
pub fn result_label(result: bool) -> &'static str {
    if result { "True" } else { "False" }
}
