//! Step-generation and playback engine for sorting animations.
//!
//! Sorting drivers run against a per-run sequence model that records every
//! comparison and move as a [`Step`](core::step::Step) and paces it through a
//! renderer before the driver may continue. The architecture keeps a strict
//! separation:
//!
//! - **[`core`]**: Pure, deterministic data (values, tags, steps, traces,
//!   algorithm identifiers). No I/O, no timing.
//! - **[`io`]**: Side-effecting edges (configuration files, renderers).
//!
//! [`context`] is the sequence model drivers talk to, [`drivers`] holds the
//! five algorithms, [`playback`] turns steps into timed frames, and
//! [`controller`] owns the run lifecycle.

pub mod context;
pub mod controller;
pub mod core;
pub mod drivers;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod playback;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
