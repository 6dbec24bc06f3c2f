//! Run context shared by the build and copy pipelines.
//!
//! The debug toggle is resolved from the environment once, at construction
//! time, and carried as explicit state so the pipelines stay deterministic
//! under test.

use camino::{Utf8Path, Utf8PathBuf};

/// Environment variable that enables verbose trace output.
pub const DEBUG_ENV_VAR: &str = "SOYO_DEBUG";

/// Name of the build output directory inside the source directory.
pub const DIST_DIR: &str = "dist";

/// Invocation-scoped state shared by all pipeline stages.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Source directory containing the package to prepare.
    pub cwd: Utf8PathBuf,
    /// Version of this tool, injected into the clean manifest.
    pub tool_version: String,
    /// Whether verbose trace lines are emitted.
    pub debug: bool,
}

impl RunContext {
    /// Create a run context for the given source directory.
    #[must_use]
    pub fn new(cwd: Utf8PathBuf, tool_version: impl Into<String>, debug: bool) -> Self {
        Self {
            cwd,
            tool_version: tool_version.into(),
            debug,
        }
    }

    /// Return the build output directory for this invocation.
    #[must_use]
    pub fn dist_dir(&self) -> Utf8PathBuf {
        self.cwd.join(DIST_DIR)
    }

    /// Return the source directory.
    #[must_use]
    pub fn source_dir(&self) -> &Utf8Path {
        &self.cwd
    }
}
