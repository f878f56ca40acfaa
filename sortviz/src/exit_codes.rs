//! Stable exit codes for the `sortviz` binary.

/// Run completed, or the command needed no run.
pub const OK: i32 = 0;
/// Invalid input: unknown algorithm, bad config, malformed values.
pub const INVALID: i32 = 1;
/// A run started but was aborted by a driver defect.
pub const ABORTED: i32 = 2;
