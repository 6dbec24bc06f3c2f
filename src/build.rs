//! Build runner.
//!
//! Runs the package's build script before handing over to the copy
//! pipeline. A failing build script is reported and stops the pipeline
//! without raising an error; the caller decides nothing further.

use crate::context::RunContext;
use crate::error::{Result, SoyoError};
use crate::fsutil;
use crate::manifest::Manifest;
use crate::output::write_stderr_line;
use crate::pipeline;
use std::io::Write;
use std::process::Command;

/// Program used to run the package's build script.
pub const BUILD_PROGRAM: &str = "npm";

/// Terminal state of a build invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The build script exited zero.
    Succeeded,
    /// The build script exited non-zero; already reported to the user.
    Failed,
}

/// Run the build script, then the copy pipeline on success.
///
/// # Errors
///
/// Returns [`SoyoError::NoBuildScript`] when the manifest has no
/// `scripts.build` entry, and propagates copy-pipeline errors. A non-zero
/// build exit is not an error: it is reported and the copy step is skipped.
pub fn run(ctx: &RunContext, stderr: &mut dyn Write) -> Result<()> {
    let manifest = Manifest::load(&ctx.cwd)?;

    match run_build_with(&manifest, ctx, stderr, BUILD_PROGRAM)? {
        BuildOutcome::Succeeded => pipeline::run_copy(ctx, stderr),
        BuildOutcome::Failed => Ok(()),
    }
}

/// Invoke the build script with an injectable program for tests.
fn run_build_with(
    manifest: &Manifest,
    ctx: &RunContext,
    stderr: &mut dyn Write,
    program: &str,
) -> Result<BuildOutcome> {
    write_stderr_line(stderr, "Removing dist directory");
    fsutil::remove_if_exists(&ctx.dist_dir())?;

    if !manifest.has_build_script() {
        return Err(SoyoError::NoBuildScript);
    }

    write_stderr_line(stderr, "Running build script...");
    let status = Command::new(program)
        .args(["run", "build"])
        .current_dir(&ctx.cwd)
        .status()?;

    if !status.success() {
        write_stderr_line(stderr, "Failed to build");
        return Ok(BuildOutcome::Failed);
    }

    Ok(BuildOutcome::Succeeded)
}
