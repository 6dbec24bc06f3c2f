//! Output helpers for the soyo CLI.
//!
//! All user-facing output goes through an injected writer so tests can
//! assert on the exact lines emitted.

use crate::context::RunContext;
use std::io::Write;

/// Write a line to the given writer, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Write a trace line when the context's debug toggle is set.
pub fn trace_line(ctx: &RunContext, stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if ctx.debug {
        write_stderr_line(stderr, format!("DEBUG {message}"));
    }
}

/// Final success line printed after assembly completes.
pub const SUCCESS_MESSAGE: &str = "Publish directory prepared";
