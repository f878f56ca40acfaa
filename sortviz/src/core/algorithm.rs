//! Algorithm identifiers exposed to hosts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::SortError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Algorithm {
    BubbleSort,
    SelectionSort,
    InsertionSort,
    QuickSort,
    MergeSort,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::BubbleSort,
        Algorithm::SelectionSort,
        Algorithm::InsertionSort,
        Algorithm::QuickSort,
        Algorithm::MergeSort,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Algorithm::BubbleSort => "bubbleSort",
            Algorithm::SelectionSort => "selectionSort",
            Algorithm::InsertionSort => "insertionSort",
            Algorithm::QuickSort => "quickSort",
            Algorithm::MergeSort => "mergeSort",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Algorithm {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.id() == s)
            .ok_or_else(|| SortError::UnknownAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_identifier() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.id().parse::<Algorithm>().expect("parse"), algorithm);
        }
    }

    #[test]
    fn unknown_identifier_is_an_error() {
        let err = "bogoSort".parse::<Algorithm>().expect_err("unknown");
        assert!(matches!(err, SortError::UnknownAlgorithm(ref id) if id == "bogoSort"));
    }
}
