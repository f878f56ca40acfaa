//! Playback scheduler: turns steps into paced frames.
//!
//! Playback is interleaved with the drivers. Every primitive on
//! [`RunContext`] records its step, then awaits [`Playback::play`], which
//! renders the step's frames and sleeps between them. A driver therefore
//! cannot emit step k+1 before step k's animation has resolved.
//!
//! All frames pass through a shared [`Stage`] that knows the current run id.
//! The currency check and the render happen under one lock, so a run that was
//! superseded can never paint over its successor.
//!
//! [`record`] is the pre-buffered strategy: it runs a driver to completion
//! with a silent playback and returns the full step list.

use std::collections::BTreeSet;
use std::f64::consts::PI;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::debug;

use crate::context::{Run, RunContext};
use crate::core::algorithm::Algorithm;
use crate::core::error::SortError;
use crate::core::sequence::Sequence;
use crate::core::step::{Step, result_label};
use crate::core::types::RunId;
use crate::drivers;
use crate::io::config::PacingConfig;
use crate::io::renderer::{Block, Frame, Renderer};

pub const COMPLETED_LABEL: &str = "Sorting completed";

/// Delays and animation shape resolved from [`PacingConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct Pacing {
    pub compare: Duration,
    pub swap_settle: Duration,
    pub frame_count: u32,
    pub frame: Duration,
    pub insert_settle: Duration,
    pub overwrite: Duration,
    pub arc_height: f64,
}

impl From<&PacingConfig> for Pacing {
    fn from(cfg: &PacingConfig) -> Self {
        Self {
            compare: Duration::from_millis(cfg.compare_delay_ms),
            swap_settle: Duration::from_millis(cfg.swap_settle_delay_ms),
            frame_count: cfg.swap_frame_count.max(1),
            frame: Duration::from_millis(cfg.swap_frame_delay_ms),
            insert_settle: Duration::from_millis(cfg.insert_settle_delay_ms),
            overwrite: Duration::from_millis(cfg.overwrite_delay_ms),
            arc_height: cfg.arc_height,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::from(&PacingConfig::default())
    }
}

/// Renderer gate shared by the controller and every run it started.
pub struct Stage {
    renderer: Box<dyn Renderer>,
    current: Mutex<RunId>,
}

impl Stage {
    pub fn new<R: Renderer + 'static>(renderer: R) -> Self {
        Self {
            renderer: Box::new(renderer),
            current: Mutex::new(RunId(0)),
        }
    }

    /// Open a new generation. Every earlier run becomes stale.
    pub fn begin_run(&self) -> RunId {
        let mut current = self.lock();
        current.0 += 1;
        *current
    }

    pub fn current(&self) -> RunId {
        *self.lock()
    }

    pub fn ensure_current(&self, run: RunId) -> Result<(), SortError> {
        if *self.lock() == run {
            return Ok(());
        }
        Err(SortError::Superseded { run })
    }

    /// Render `frame` if its run is still current.
    pub fn present(&self, frame: &Frame) -> Result<(), SortError> {
        let current = self.lock();
        if *current != frame.run {
            let newest = *current;
            debug!(run = %frame.run, current = %newest, "dropping frame of stale run");
            return Err(SortError::Superseded { run: frame.run });
        }
        self.renderer.render_frame(frame);
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, RunId> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Per-run handle on the stage plus pacing. A silent playback renders
/// nothing and never sleeps.
#[derive(Clone)]
pub struct Playback {
    stage: Option<Arc<Stage>>,
    pacing: Pacing,
}

impl Playback {
    pub fn live(stage: Arc<Stage>, pacing: Pacing) -> Self {
        Self {
            stage: Some(stage),
            pacing,
        }
    }

    pub fn silent() -> Self {
        Self {
            stage: None,
            pacing: Pacing::default(),
        }
    }

    pub fn ensure_current(&self, run: RunId) -> Result<(), SortError> {
        match &self.stage {
            Some(stage) => stage.ensure_current(run),
            None => Ok(()),
        }
    }

    /// Render `step` against the already-mutated `sequence` and wait out its
    /// pacing.
    pub async fn play(&self, run: RunId, step: &Step, sequence: &Sequence) -> Result<(), SortError> {
        let Some(stage) = &self.stage else {
            return Ok(());
        };
        let pacing = &self.pacing;
        match step {
            Step::Compare {
                i,
                j,
                result,
                label,
                held,
            } => {
                let highlighted = if *held { vec![] } else { vec![*i, *j] };
                let frame = still(run, sequence, highlighted, label, result_label(*result));
                stage.present(&frame)?;
                hold(pacing.compare).await;
            }
            Step::Snapshot {
                highlighted,
                label,
                result_label,
            } => {
                let frame = still(
                    run,
                    sequence,
                    highlighted.iter().copied(),
                    label,
                    result_label,
                );
                stage.present(&frame)?;
                hold(pacing.compare).await;
            }
            Step::Overwrite { index, .. } => {
                stage.present(&still(run, sequence, [*index], "", ""))?;
                hold(pacing.overwrite).await;
            }
            Step::Swap { i, j } => {
                // After the swap, slot j holds the element that left i.
                self.animate(stage, run, sequence, |p, arc| {
                    vec![
                        Motion::travel(*j, *i, *j, p, arc),
                        Motion::travel(*i, *j, *i, p, -arc),
                    ]
                })
                .await?;
                stage.present(&still(run, sequence, [], "", ""))?;
                hold(pacing.swap_settle).await;
            }
            Step::ShiftInsert { from, to, .. } => {
                self.animate(stage, run, sequence, |p, arc| {
                    vec![Motion::travel(*to, *from, *to, p, arc)]
                })
                .await?;
                stage.present(&still(run, sequence, [], "", ""))?;
                hold(pacing.insert_settle).await;
            }
        }
        Ok(())
    }

    /// Closing frame of a completed run. Not a step.
    pub fn finish(&self, run: RunId, sequence: &Sequence) -> Result<(), SortError> {
        let Some(stage) = &self.stage else {
            return Ok(());
        };
        stage.present(&still(run, sequence, [], COMPLETED_LABEL, ""))
    }

    async fn animate<F>(
        &self,
        stage: &Stage,
        run: RunId,
        sequence: &Sequence,
        motions: F,
    ) -> Result<(), SortError>
    where
        F: Fn(f64, f64) -> Vec<Motion>,
    {
        let frames = self.pacing.frame_count;
        for index in 0..=frames {
            let progress = f64::from(index) / f64::from(frames);
            let frame = build_frame(
                run,
                sequence,
                BTreeSet::new(),
                "",
                "",
                &motions(progress, self.pacing.arc_height),
            );
            stage.present(&frame)?;
            hold(self.pacing.frame).await;
        }
        Ok(())
    }
}

/// Run `algorithm` to completion over `sequence` without rendering.
///
/// The returned step list is exactly what interleaved playback would emit for
/// the same input.
pub fn record(algorithm: Algorithm, sequence: Sequence) -> Result<Run, SortError> {
    let mut ctx = RunContext::new(RunId(0), sequence, Playback::silent());
    futures::executor::block_on(drivers::drive(algorithm, &mut ctx))?;
    Ok(ctx.into_run(algorithm))
}

/// Override for one slot during an animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Motion {
    slot: usize,
    x: f64,
    lift: f64,
}

impl Motion {
    /// Element now resting in `slot`, travelling `from -> to`, `progress` in
    /// `[0, 1]`. Positive `arc` lifts upwards.
    fn travel(slot: usize, from: usize, to: usize, progress: f64, arc: f64) -> Self {
        let (from, to) = (from as f64, to as f64);
        Self {
            slot,
            x: from + (to - from) * progress,
            lift: arc * (PI * progress).sin(),
        }
    }
}

async fn hold(duration: Duration) {
    if duration.is_zero() {
        return;
    }
    tokio::time::sleep(duration).await;
}

fn still<I>(run: RunId, sequence: &Sequence, highlighted: I, label: &str, result_label: &str) -> Frame
where
    I: IntoIterator<Item = usize>,
{
    build_frame(
        run,
        sequence,
        highlighted.into_iter().collect(),
        label,
        result_label,
        &[],
    )
}

fn build_frame(
    run: RunId,
    sequence: &Sequence,
    highlighted: BTreeSet<usize>,
    label: &str,
    result_label: &str,
    motions: &[Motion],
) -> Frame {
    let blocks = sequence
        .values()
        .iter()
        .zip(sequence.tags())
        .enumerate()
        .map(|(slot, (value, tag))| {
            let motion = motions.iter().rev().find(|motion| motion.slot == slot);
            Block {
                slot,
                value: *value,
                tag: *tag,
                x: motion.map_or(slot as f64, |m| m.x),
                lift: motion.map_or(0.0, |m| m.lift),
                highlighted: highlighted.contains(&slot),
                moving: motion.is_some(),
            }
        })
        .collect();
    Frame {
        run,
        values: sequence.values().to_vec(),
        highlighted,
        label: label.to_string(),
        result_label: result_label.to_string(),
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingRenderer;
    use tokio::time::Instant;

    fn live(renderer: &RecordingRenderer) -> (Arc<Stage>, Playback, RunId) {
        let stage = Arc::new(Stage::new(renderer.clone()));
        let run = stage.begin_run();
        let playback = Playback::live(stage.clone(), Pacing::default());
        (stage, playback, run)
    }

    #[test]
    fn travel_follows_half_sine_arc() {
        let start = Motion::travel(3, 0, 3, 0.0, 50.0);
        assert!(start.x.abs() < 1e-9);
        assert!(start.lift.abs() < 1e-9);

        let peak = Motion::travel(3, 0, 3, 0.5, 50.0);
        assert!((peak.x - 1.5).abs() < 1e-9);
        assert!((peak.lift - 50.0).abs() < 1e-9);

        let end = Motion::travel(3, 0, 3, 1.0, -50.0);
        assert!((end.x - 3.0).abs() < 1e-9);
        assert!(end.lift.abs() < 1e-9);
    }

    #[tokio::test(start_paused = true)]
    async fn compare_renders_one_frame_and_waits() {
        let renderer = RecordingRenderer::new();
        let (_stage, playback, run) = live(&renderer);
        let seq = Sequence::from_values(vec![5, 3]);
        let step = Step::Compare {
            i: 0,
            j: 1,
            result: true,
            label: "5 > 3".to_string(),
            held: false,
        };

        let started = Instant::now();
        playback.play(run, &step, &seq).await.expect("play");

        assert_eq!(started.elapsed(), Duration::from_millis(500));
        let frames = renderer.frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].label, "5 > 3");
        assert_eq!(frames[0].result_label, "True");
        assert_eq!(frames[0].highlighted, BTreeSet::from([0, 1]));
    }

    #[tokio::test(start_paused = true)]
    async fn swap_animates_in_opposite_arcs_then_settles() {
        let renderer = RecordingRenderer::new();
        let (_stage, playback, run) = live(&renderer);
        // Already swapped: slot 2 holds the value that left slot 0.
        let seq = Sequence::from_values(vec![1, 7, 9]);

        let started = Instant::now();
        playback
            .play(run, &Step::Swap { i: 0, j: 2 }, &seq)
            .await
            .expect("play");

        assert_eq!(started.elapsed(), Duration::from_millis(21 * 25 + 200));
        let frames = renderer.frames();
        assert_eq!(frames.len(), 22);
        assert!(frames[..21].iter().all(Frame::is_moving));
        assert!(!frames[21].is_moving());

        let mid = &frames[10];
        assert!((mid.blocks[2].x - 1.0).abs() < 1e-9);
        assert!(mid.blocks[2].lift > 49.0);
        assert!(mid.blocks[0].lift < -49.0);
        assert!(!mid.blocks[1].moving);
    }

    #[tokio::test(start_paused = true)]
    async fn insertion_moves_only_the_key() {
        let renderer = RecordingRenderer::new();
        let (_stage, playback, run) = live(&renderer);
        let seq = Sequence::from_values(vec![2, 4, 6]);
        let step = Step::ShiftInsert {
            from: 2,
            to: 0,
            value: 2,
        };

        playback.play(run, &step, &seq).await.expect("play");

        let frames = renderer.frames();
        assert_eq!(frames.len(), 22);
        let first = &frames[0];
        assert!((first.blocks[0].x - 2.0).abs() < 1e-9);
        assert!(first.blocks.iter().filter(|b| b.moving).count() == 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_run_cannot_present() {
        let renderer = RecordingRenderer::new();
        let (stage, playback, run) = live(&renderer);
        stage.begin_run();
        let seq = Sequence::from_values(vec![1, 2]);

        let err = playback
            .play(run, &Step::Overwrite { index: 0, value: 1 }, &seq)
            .await
            .expect_err("stale");
        assert!(err.is_superseded());
        assert!(renderer.frames().is_empty());
    }

    #[test]
    fn silent_playback_never_renders() {
        let seq = Sequence::from_values(vec![2, 1]);
        let playback = Playback::silent();
        futures::executor::block_on(playback.play(RunId(9), &Step::Swap { i: 0, j: 1 }, &seq))
            .expect("silent");
        playback.finish(RunId(9), &seq).expect("silent finish");
    }

    #[test]
    fn record_returns_the_full_trace() {
        let run = record(Algorithm::BubbleSort, Sequence::from_values(vec![2, 1])).expect("record");
        assert_eq!(run.output, vec![1, 2]);
        assert_eq!(
            run.steps,
            vec![
                Step::Compare {
                    i: 0,
                    j: 1,
                    result: true,
                    label: "2 > 1".to_string(),
                    held: false,
                },
                Step::Swap { i: 0, j: 1 },
            ]
        );
    }
}
