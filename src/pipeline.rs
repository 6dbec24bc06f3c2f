//! Copy pipeline orchestration.
//!
//! Keeps the load/reconcile/assemble sequencing out of `main.rs`.

use crate::assemble::assemble;
use crate::context::RunContext;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::output::{SUCCESS_MESSAGE, write_stderr_line};
use crate::reconcile::reconcile;
use std::io::Write;

/// Run the copy pipeline: load, reconcile, report warnings, assemble.
///
/// # Errors
///
/// Propagates manifest, reconciliation, and assembly errors unchanged.
pub fn run_copy(ctx: &RunContext, stderr: &mut dyn Write) -> Result<()> {
    let manifest = Manifest::load(&ctx.cwd)?;
    let reconciliation = reconcile(&manifest, ctx, stderr)?;

    for warning in &reconciliation.warnings {
        write_stderr_line(stderr, warning);
    }

    assemble(&reconciliation.clean, &manifest, ctx, stderr)?;
    write_stderr_line(stderr, SUCCESS_MESSAGE);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SoyoError;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    struct TestSetup {
        _temp: TempDir,
        ctx: RunContext,
    }

    #[fixture]
    fn setup() -> TestSetup {
        let temp = TempDir::new().expect("failed to create temp dir");
        let path = Utf8PathBuf::try_from(temp.path().to_owned()).expect("non-UTF8 temp path");
        TestSetup {
            _temp: temp,
            ctx: RunContext::new(path, "0.3.1", false),
        }
    }

    fn write_manifest(setup: &TestSetup, value: &serde_json::Value) {
        fs::write(
            setup.ctx.cwd.join("package.json"),
            serde_json::to_string(value).expect("failed to serialize manifest"),
        )
        .expect("failed to write manifest");
    }

    #[rstest]
    fn fails_when_no_manifest_exists(setup: TestSetup) {
        let mut sink = Vec::new();
        let err = run_copy(&setup.ctx, &mut sink).expect_err("expected missing manifest error");
        assert!(matches!(err, SoyoError::ManifestNotFound { .. }));
    }

    #[rstest]
    fn reports_warnings_and_success_on_the_writer(setup: TestSetup) {
        write_manifest(
            &setup,
            &json!({"name": "pkg", "version": "1.0.0", "description": "d"}),
        );
        fs::create_dir_all(setup.ctx.dist_dir()).expect("failed to create dist");

        let mut sink = Vec::new();
        run_copy(&setup.ctx, &mut sink).expect("expected copy to succeed");

        let output = String::from_utf8(sink).expect("output was not UTF-8");
        assert!(
            output.contains("missing recommended fields"),
            "got: {output}"
        );
        assert!(output.contains(SUCCESS_MESSAGE), "got: {output}");
    }

    #[rstest]
    fn reconciliation_failure_writes_no_files(setup: TestSetup) {
        write_manifest(
            &setup,
            &json!({"name": "@scope/x", "version": "1.0.0", "description": "d"}),
        );
        fs::create_dir_all(setup.ctx.dist_dir()).expect("failed to create dist");

        let mut sink = Vec::new();
        let err = run_copy(&setup.ctx, &mut sink).expect_err("expected scoped access error");
        assert!(matches!(err, SoyoError::MissingScopedPublishAccess { .. }));
        assert!(!setup.ctx.dist_dir().join("package.json").exists());
    }
}
