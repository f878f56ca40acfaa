//! Test-only helpers: a recording renderer and step constructors.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};

use crate::core::step::Step;
use crate::core::types::RunId;
use crate::io::renderer::{Frame, Renderer};

/// Renderer that keeps every frame it is handed. Clones share storage.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<Frame> {
        self.lock().clone()
    }

    /// Run ids in presentation order, one entry per frame.
    pub fn runs(&self) -> Vec<RunId> {
        self.lock().iter().map(|frame| frame.run).collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.lock().iter().map(|frame| frame.label.clone()).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Frame>> {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Renderer for RecordingRenderer {
    fn render_frame(&self, frame: &Frame) {
        self.lock().push(frame.clone());
    }
}

/// Build a Compare step with a deterministic label.
pub fn compare(i: usize, j: usize, result: bool, label: &str) -> Step {
    Step::Compare {
        i,
        j,
        result,
        label: label.to_string(),
        held: false,
    }
}

/// Build a Compare step over operands read from a merge buffer.
pub fn held_compare(i: usize, j: usize, result: bool, label: &str) -> Step {
    Step::Compare {
        i,
        j,
        result,
        label: label.to_string(),
        held: true,
    }
}

/// Build a Snapshot step with no result label.
pub fn snapshot<const N: usize>(highlighted: [usize; N], label: &str) -> Step {
    Step::Snapshot {
        highlighted: BTreeSet::from(highlighted),
        label: label.to_string(),
        result_label: String::new(),
    }
}

pub fn count_compares(steps: &[Step]) -> usize {
    steps
        .iter()
        .filter(|step| matches!(step, Step::Compare { .. }))
        .count()
}
