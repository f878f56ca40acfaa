//! Error taxonomy for the engine.

use thiserror::Error;

use crate::core::types::RunId;

#[derive(Debug, Error)]
pub enum SortError {
    /// A driver addressed a slot outside `[0, len)`. Always a driver defect.
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unknown algorithm '{0}' (expected one of: bubbleSort, selectionSort, insertionSort, quickSort, mergeSort)")]
    UnknownAlgorithm(String),

    /// The run lost currency because a newer run was started.
    #[error("{run} was superseded by a newer run")]
    Superseded { run: RunId },

    #[error("sequence has {values} values but {tags} tags")]
    TagCountMismatch { values: usize, tags: usize },

    #[error("run task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl SortError {
    pub fn is_superseded(&self) -> bool {
        matches!(self, SortError::Superseded { .. })
    }
}
