//! Per-run sequence model: the only surface algorithm drivers touch.
//!
//! Every mutating or comparing primitive validates its indices, emits exactly
//! one [`Step`], applies its mutation, and only then suspends on playback.
//! Emission and mutation happen with no await between them, so no other run
//! or frame can observe a half-applied operation.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use serde::Serialize;
use tracing::debug;

use crate::core::algorithm::Algorithm;
use crate::core::error::SortError;
use crate::core::sequence::Sequence;
use crate::core::step::Step;
use crate::core::trace::Trace;
use crate::core::types::{Comparison, Entry, RunId, Value};
use crate::playback::Playback;

/// One finished execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub id: RunId,
    pub algorithm: Algorithm,
    pub input: Vec<Value>,
    pub output: Vec<Value>,
    pub steps: Vec<Step>,
}

pub struct RunContext {
    run: RunId,
    input: Vec<Value>,
    sequence: Sequence,
    trace: Trace,
    playback: Playback,
}

impl RunContext {
    pub fn new(run: RunId, sequence: Sequence, playback: Playback) -> Self {
        Self {
            run,
            input: sequence.values().to_vec(),
            sequence,
            trace: Trace::new(),
            playback,
        }
    }

    pub fn run_id(&self) -> RunId {
        self.run
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn get(&self, index: usize) -> Result<Value, SortError> {
        self.sequence.get(index)
    }

    pub fn entry(&self, index: usize) -> Result<Entry, SortError> {
        self.sequence.entry(index)
    }

    /// Copy a range out of the sequence (merge buffers).
    pub fn entries(&self, range: RangeInclusive<usize>) -> Result<Vec<Entry>, SortError> {
        self.sequence.entries(range)
    }

    /// Compare the values at `i` and `j` with `op`.
    pub async fn compare(&mut self, i: usize, j: usize, op: Comparison) -> Result<bool, SortError> {
        let left = self.sequence.get(i)?;
        let right = self.sequence.get(j)?;
        let result = op.holds(left, right);
        let step = Step::Compare {
            i,
            j,
            result,
            label: op.label(left, right),
            held: false,
        };
        self.commit(step, |_| {}).await?;
        Ok(result)
    }

    /// Compare values held outside the sequence. `i` and `j` name the slots
    /// the operands came from; the frame highlights neither, since either
    /// slot may have been overwritten since the copy.
    pub async fn compare_held(
        &mut self,
        i: usize,
        j: usize,
        left: Value,
        right: Value,
        op: Comparison,
    ) -> Result<bool, SortError> {
        self.sequence.check(i)?;
        self.sequence.check(j)?;
        let result = op.holds(left, right);
        let step = Step::Compare {
            i,
            j,
            result,
            label: op.label(left, right),
            held: true,
        };
        self.commit(step, |_| {}).await?;
        Ok(result)
    }

    pub async fn swap(&mut self, i: usize, j: usize) -> Result<(), SortError> {
        self.sequence.check(i)?;
        self.sequence.check(j)?;
        self.commit(Step::Swap { i, j }, |seq| seq.swap(i, j)).await
    }

    pub async fn set_at(&mut self, index: usize, entry: Entry) -> Result<(), SortError> {
        self.sequence.check(index)?;
        let step = Step::Overwrite {
            index,
            value: entry.value,
        };
        self.commit(step, |seq| seq.write(index, entry)).await
    }

    /// Insertion-sort shift: if the value at `index` is greater than `key`,
    /// record the comparison and move that entry one slot right.
    ///
    /// Returns false without emitting when the neighbor is not greater. The
    /// comparison frame shows the board before the shift.
    pub async fn shift_if_greater(&mut self, index: usize, key: Value) -> Result<bool, SortError> {
        let neighbor = self.sequence.entry(index)?;
        self.sequence.check(index + 1)?;
        if !Comparison::Greater.holds(neighbor.value, key) {
            return Ok(false);
        }
        let step = Step::Compare {
            i: index,
            j: index + 1,
            result: true,
            label: Comparison::Greater.label(neighbor.value, key),
            held: false,
        };
        let before = self.sequence.clone();
        let emitted = self.apply(step, |seq| seq.write(index + 1, neighbor))?;
        self.playback
            .play(self.run, &self.trace.steps()[emitted], &before)
            .await?;
        Ok(true)
    }

    /// Place a lifted key at `to` after its shift phase.
    pub async fn insert(&mut self, from: usize, to: usize, key: Entry) -> Result<(), SortError> {
        self.sequence.check(from)?;
        self.sequence.check(to)?;
        let step = Step::ShiftInsert {
            from,
            to,
            value: key.value,
        };
        self.commit(step, |seq| seq.write(to, key)).await
    }

    pub async fn snapshot<I>(
        &mut self,
        highlighted: I,
        label: impl Into<String>,
        result_label: impl Into<String>,
    ) -> Result<(), SortError>
    where
        I: IntoIterator<Item = usize>,
    {
        let highlighted: BTreeSet<usize> = highlighted.into_iter().collect();
        for index in &highlighted {
            self.sequence.check(*index)?;
        }
        let step = Step::Snapshot {
            highlighted,
            label: label.into(),
            result_label: result_label.into(),
        };
        self.commit(step, |_| {}).await
    }

    /// Present the closing frame of a completed run.
    pub fn finish(&self) -> Result<(), SortError> {
        self.playback.finish(self.run, &self.sequence)
    }

    pub fn into_run(self, algorithm: Algorithm) -> Run {
        Run {
            id: self.run,
            algorithm,
            input: self.input,
            output: self.sequence.values().to_vec(),
            steps: self.trace.into_steps(),
        }
    }

    async fn commit<F>(&mut self, step: Step, apply: F) -> Result<(), SortError>
    where
        F: FnOnce(&mut Sequence),
    {
        let index = self.apply(step, apply)?;
        self.playback
            .play(self.run, &self.trace.steps()[index], &self.sequence)
            .await
    }

    /// Emit `step` and apply its mutation with no suspension in between.
    fn apply<F>(&mut self, step: Step, apply: F) -> Result<usize, SortError>
    where
        F: FnOnce(&mut Sequence),
    {
        self.playback.ensure_current(self.run)?;
        let index = self.trace.emit(step);
        apply(&mut self.sequence);
        let step = &self.trace.steps()[index];
        debug!(run = %self.run, index, kind = step.kind(), ?step, "step");
        Ok(index)
    }
}
