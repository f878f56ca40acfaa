//! Run lifecycle: generate data, pick a driver, keep one run live.
//!
//! Starting a run opens a new generation on the shared [`Stage`]. Any run
//! still in flight becomes stale: its next primitive or frame fails with
//! [`SortError::Superseded`] and its task ends without rendering again.
//!
//! Runs are spawned onto the ambient tokio runtime, so [`RunController::start`]
//! must be called from within one. A current-thread runtime gives the single
//! cooperative timeline the engine is designed for.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

use crate::context::{Run, RunContext};
use crate::core::algorithm::Algorithm;
use crate::core::error::SortError;
use crate::core::sequence::Sequence;
use crate::core::types::RunId;
use crate::drivers;
use crate::io::config::VisualizerConfig;
use crate::io::renderer::Renderer;
use crate::playback::{Pacing, Playback, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Running(RunId),
}

struct ActiveRun {
    id: RunId,
    handle: JoinHandle<Result<Run, SortError>>,
}

pub struct RunController {
    config: VisualizerConfig,
    pacing: Pacing,
    stage: Arc<Stage>,
    rng: StdRng,
    active: Option<ActiveRun>,
}

impl RunController {
    pub fn new<R: Renderer + 'static>(config: VisualizerConfig, renderer: R) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            pacing: Pacing::from(&config.pacing),
            config,
            stage: Arc::new(Stage::new(renderer)),
            rng,
            active: None,
        }
    }

    pub fn stage(&self) -> &Arc<Stage> {
        &self.stage
    }

    pub fn state(&self) -> ControllerState {
        match &self.active {
            Some(active) if !active.handle.is_finished() => ControllerState::Running(active.id),
            _ => ControllerState::Idle,
        }
    }

    /// Start `identifier` over freshly generated values.
    ///
    /// An unknown identifier is rejected before anything changes: the live
    /// run, if any, keeps playing.
    pub fn start(&mut self, identifier: &str) -> Result<RunId, SortError> {
        let algorithm: Algorithm = identifier.parse()?;
        let sequence = Sequence::random(self.config.element_count, &mut self.rng);
        Ok(self.start_with(algorithm, sequence))
    }

    /// Start `algorithm` over caller-supplied data, superseding any live run.
    pub fn start_with(&mut self, algorithm: Algorithm, sequence: Sequence) -> RunId {
        let id = self.stage.begin_run();
        if let Some(previous) = self.active.take()
            && !previous.handle.is_finished()
        {
            // The detached task notices it is stale at its next suspension.
            info!(previous = %previous.id, run = %id, "superseding live run");
        }

        let playback = Playback::live(self.stage.clone(), self.pacing.clone());
        let ctx = RunContext::new(id, sequence, playback);
        let handle = tokio::spawn(execute(algorithm, ctx));
        self.active = Some(ActiveRun { id, handle });
        id
    }

    /// Wait for the live run to end. `None` when nothing was started.
    pub async fn wait(&mut self) -> Option<Result<Run, SortError>> {
        let active = self.active.take()?;
        Some(match active.handle.await {
            Ok(outcome) => outcome,
            Err(err) => Err(SortError::from(err)),
        })
    }
}

#[instrument(skip_all, fields(run = %ctx.run_id(), algorithm = %algorithm, len = ctx.len()))]
async fn execute(algorithm: Algorithm, mut ctx: RunContext) -> Result<Run, SortError> {
    info!(values = ?ctx.sequence().values(), "run started");
    let outcome = drivers::drive(algorithm, &mut ctx).await;
    conclude(algorithm, ctx, outcome)
}

fn conclude(
    algorithm: Algorithm,
    ctx: RunContext,
    outcome: Result<(), SortError>,
) -> Result<Run, SortError> {
    match outcome.and_then(|()| ctx.finish()) {
        Ok(()) => {
            info!(steps = ctx.trace().len(), "run completed");
            Ok(ctx.into_run(algorithm))
        }
        Err(err) if err.is_superseded() => {
            debug!(steps = ctx.trace().len(), "run superseded");
            Err(err)
        }
        Err(err) => {
            error!(
                error = %err,
                steps = ctx.trace().len(),
                values = ?ctx.sequence().values(),
                "run aborted"
            );
            Err(err)
        }
    }
}
