//! Deterministic, pure logic shared by the engine.
//!
//! Core modules must be free of I/O and timing. They operate on in-memory
//! data and return deterministic outputs suitable for tests.

pub mod algorithm;
pub mod error;
pub mod sequence;
pub mod step;
pub mod trace;
pub mod types;
