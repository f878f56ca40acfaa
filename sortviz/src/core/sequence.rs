//! Ordered container of values with a parallel tag per slot.
//!
//! Mutation is crate-private: drivers reach it only through
//! [`RunContext`](crate::context::RunContext), which records a step for
//! every change.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::core::error::SortError;
use crate::core::types::{Entry, MAX_VALUE, Tag, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    values: Vec<Value>,
    tags: Vec<Tag>,
}

impl Sequence {
    /// Build a sequence with evenly spread hues, one tag per slot.
    pub fn from_values(values: Vec<Value>) -> Self {
        let len = values.len().max(1);
        let tags = (0..values.len())
            .map(|origin| Tag {
                origin,
                hue: (origin * 360 / len) as u16,
            })
            .collect();
        Self { values, tags }
    }

    pub fn with_tags(values: Vec<Value>, tags: Vec<Tag>) -> Result<Self, SortError> {
        if values.len() != tags.len() {
            return Err(SortError::TagCountMismatch {
                values: values.len(),
                tags: tags.len(),
            });
        }
        Ok(Self { values, tags })
    }

    /// Generate `len` values in `0..=MAX_VALUE`, each with a random hue.
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let values = (0..len).map(|_| rng.gen_range(0..=MAX_VALUE)).collect();
        let tags = (0..len)
            .map(|origin| Tag {
                origin,
                hue: rng.gen_range(0..360),
            })
            .collect();
        Self { values, tags }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn check(&self, index: usize) -> Result<(), SortError> {
        if index < self.values.len() {
            return Ok(());
        }
        Err(SortError::IndexOutOfRange {
            index,
            len: self.values.len(),
        })
    }

    pub fn get(&self, index: usize) -> Result<Value, SortError> {
        self.check(index)?;
        Ok(self.values[index])
    }

    pub fn entry(&self, index: usize) -> Result<Entry, SortError> {
        self.check(index)?;
        Ok(Entry {
            value: self.values[index],
            tag: self.tags[index],
        })
    }

    pub fn entries(&self, range: RangeInclusive<usize>) -> Result<Vec<Entry>, SortError> {
        if range.is_empty() {
            return Ok(Vec::new());
        }
        self.check(*range.end())?;
        Ok(range.map(|index| self.entry_unchecked(index)).collect())
    }

    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|pair| pair[0] <= pair[1])
    }

    /// Whether `other` holds the same (value, tag) pairs in any order.
    pub fn is_permutation_of(&self, other: &Sequence) -> bool {
        let mut mine = self.pairs();
        let mut theirs = other.pairs();
        mine.sort_unstable();
        theirs.sort_unstable();
        mine == theirs
    }

    fn pairs(&self) -> Vec<(Value, usize, u16)> {
        self.values
            .iter()
            .zip(&self.tags)
            .map(|(value, tag)| (*value, tag.origin, tag.hue))
            .collect()
    }

    fn entry_unchecked(&self, index: usize) -> Entry {
        Entry {
            value: self.values[index],
            tag: self.tags[index],
        }
    }

    /// Callers validate both indices first.
    pub(crate) fn swap(&mut self, i: usize, j: usize) {
        self.values.swap(i, j);
        self.tags.swap(i, j);
    }

    pub(crate) fn write(&mut self, index: usize, entry: Entry) {
        self.values[index] = entry.value;
        self.tags[index] = entry.tag;
    }
}
