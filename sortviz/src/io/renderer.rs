//! Rendering contract consumed by the playback scheduler.
//!
//! The [`Renderer`] trait decouples playback from the host surface. The
//! engine only describes what the board looks like at one instant; drawing
//! pixels (or terminal lines) is the renderer's business. Tests use a
//! recording renderer that keeps every frame.

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tracing::warn;

use crate::core::types::{RunId, Tag, Value};

/// One element as drawn in a frame.
///
/// Positions are in slot units: `x == slot as f64` at rest. `lift` is the
/// vertical offset from the baseline, positive upwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub slot: usize,
    pub value: Value,
    pub tag: Tag,
    pub x: f64,
    pub lift: f64,
    pub highlighted: bool,
    pub moving: bool,
}

/// The full board at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub run: RunId,
    pub values: Vec<Value>,
    pub highlighted: BTreeSet<usize>,
    pub label: String,
    pub result_label: String,
    pub blocks: Vec<Block>,
}

impl Frame {
    /// True for the intermediate frames of a swap or insertion animation.
    pub fn is_moving(&self) -> bool {
        self.blocks.iter().any(|block| block.moving)
    }
}

/// Paints frames. Must be idempotent and return without blocking on I/O for
/// longer than a bounded synchronous write.
pub trait Renderer: Send + Sync {
    fn render_frame(&self, frame: &Frame);
}

/// Writes one text line per frame.
///
/// Highlighted slots are bracketed; moving blocks are marked with `^` (arcing
/// up) or `v` (arcing down). Animation frames are skipped unless
/// `show_motion` is set.
pub struct TerminalRenderer<W: Write + Send> {
    out: Mutex<W>,
    show_motion: bool,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout(show_motion: bool) -> Self {
        Self::new(io::stdout(), show_motion)
    }
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W, show_motion: bool) -> Self {
        Self {
            out: Mutex::new(out),
            show_motion,
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn render_frame(&self, frame: &Frame) {
        if frame.is_moving() && !self.show_motion {
            return;
        }
        let line = format_frame(frame);
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            warn!(error = %err, "failed to write frame");
        }
    }
}

pub fn format_frame(frame: &Frame) -> String {
    let mut blocks = frame.blocks.clone();
    blocks.sort_by(|a, b| a.x.total_cmp(&b.x));
    let cells: Vec<String> = blocks.iter().map(format_block).collect();

    let mut line = format!("{} {}", frame.run, cells.join(" "));
    if !frame.label.is_empty() {
        line.push_str(" | ");
        line.push_str(&frame.label);
    }
    if !frame.result_label.is_empty() {
        line.push(' ');
        line.push_str(&frame.result_label);
    }
    line
}

fn format_block(block: &Block) -> String {
    let marker = match (block.moving, block.lift) {
        (false, _) => "",
        (true, lift) if lift >= 0.0 => "^",
        (true, _) => "v",
    };
    if block.highlighted {
        format!("[{:>2}]{marker}", block.value)
    } else {
        format!(" {:>2} {marker}", block.value)
    }
}
