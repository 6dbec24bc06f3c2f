//! Publish directory assembly.
//!
//! Reshapes the build output directory into publish form: previously built
//! files move into a nested subdirectory, then the clean manifest and
//! auxiliary files are laid out at the top level.

use crate::context::RunContext;
use crate::error::{Result, SoyoError};
use crate::fields;
use crate::fsutil;
use crate::manifest::{MANIFEST_FILE, Manifest};
use crate::output::trace_line;
use crate::reconcile::CleanManifest;
use camino::Utf8Path;
use std::fs;
use std::io::Write;

/// Name of the nested subdirectory built artifacts are relocated into.
pub const OUTPUT_SUBDIR: &str = "dist";

/// Files that signal a previous, incompatible assembly run.
const STALE_FILES: &[&str] = &[MANIFEST_FILE, "readme.md", "README.md"];

/// Auxiliary files copied from the source directory when present.
const AUX_FILES: &[&str] = &["readme.md", "README.md", "CHANGELOG.md", "LICENSE"];

/// OS metadata files excluded from relocation.
const OS_METADATA_FILES: &[&str] = &[".DS_Store"];

/// Assemble the publish directory from the clean manifest and source files.
///
/// # Errors
///
/// Returns [`SoyoError::BuildOutputMissing`] when the build output directory
/// does not exist, [`SoyoError::StaleOutputFiles`] when a manifest or readme
/// left over from a previous run sits at its top level, and
/// [`SoyoError::DeclaredFileMissing`] when an entry of the manifest's
/// `files` list is absent from the source directory.
pub fn assemble(
    clean: &CleanManifest,
    manifest: &Manifest,
    ctx: &RunContext,
    stderr: &mut dyn Write,
) -> Result<()> {
    let dist = ctx.dist_dir();
    if !dist.exists() {
        return Err(SoyoError::BuildOutputMissing { dir: dist });
    }

    // 1. A leftover nested subdirectory from an earlier run is rebuilt.
    let nested = dist.join(OUTPUT_SUBDIR);
    fsutil::remove_if_exists(&nested)?;

    // 2. Top-level scaffold files mean the directory was already assembled.
    check_stale_files(&dist)?;

    // 3. Relocate built artifacts into the nested subdirectory.
    relocate_built_entries(&dist, &nested, ctx, stderr)?;

    // 4. Write the clean manifest at the top level.
    fs::write(dist.join(MANIFEST_FILE), clean.to_pretty_json()?)?;

    // 5. Copy auxiliary files that exist in the source directory.
    for file in AUX_FILES {
        let from = ctx.source_dir().join(file);
        if !from.exists() {
            continue;
        }
        trace_line(ctx, stderr, format_args!("copy {file}"));
        fsutil::force_copy(&from, &dist.join(file))?;
    }

    // 6. Copy the declared publish file list, preserving relative paths.
    copy_declared_files(manifest, ctx, &dist, stderr)?;

    // 7. A bin field brings the bin directory along.
    if clean.contains(fields::BIN) {
        trace_line(ctx, stderr, format_args!("copy {}", fields::BIN));
        fsutil::force_copy(&ctx.source_dir().join(fields::BIN), &dist.join(fields::BIN))?;
    }

    Ok(())
}

fn check_stale_files(dist: &Utf8Path) -> Result<()> {
    for file in STALE_FILES {
        if dist.join(file).exists() {
            return Err(SoyoError::StaleOutputFiles {
                file: (*file).to_owned(),
            });
        }
    }
    Ok(())
}

fn relocate_built_entries(
    dist: &Utf8Path,
    nested: &Utf8Path,
    ctx: &RunContext,
    stderr: &mut dyn Write,
) -> Result<()> {
    for name in fsutil::read_dir_names(dist)? {
        if name == OUTPUT_SUBDIR || OS_METADATA_FILES.contains(&name.as_str()) {
            continue;
        }
        trace_line(
            ctx,
            stderr,
            format_args!("move {name} to {OUTPUT_SUBDIR}/{OUTPUT_SUBDIR}"),
        );
        fsutil::move_entry(&dist.join(&name), &nested.join(&name))?;
    }
    Ok(())
}

fn copy_declared_files(
    manifest: &Manifest,
    ctx: &RunContext,
    dist: &Utf8Path,
    stderr: &mut dyn Write,
) -> Result<()> {
    let Some(files) = manifest.files() else {
        return Ok(());
    };

    for file in files {
        // The build output directory itself is assembled, never copied.
        if file.strip_suffix('/').unwrap_or(file) == OUTPUT_SUBDIR {
            trace_line(ctx, stderr, format_args!("skip {OUTPUT_SUBDIR} folder"));
            continue;
        }

        let from = ctx.source_dir().join(file);
        if !from.exists() {
            return Err(SoyoError::DeclaredFileMissing { path: from });
        }
        trace_line(ctx, stderr, format_args!("copy {file}"));
        fsutil::force_copy(&from, &dist.join(file))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::reconcile;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};
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

    fn manifest_from(value: Value) -> Manifest {
        match value {
            Value::Object(fields) => Manifest::from_fields(fields),
            other => panic!("test manifest must be an object, got {other}"),
        }
    }

    fn minimal() -> Value {
        json!({"name": "pkg", "version": "1.0.0", "description": "a package"})
    }

    fn reconciled(setup: &TestSetup, value: &Value) -> CleanManifest {
        let mut sink = Vec::new();
        reconcile(&manifest_from(value.clone()), &setup.ctx, &mut sink)
            .expect("expected reconciliation to succeed")
            .clean
    }

    fn assemble_with(setup: &TestSetup, value: Value) -> Result<()> {
        let clean = reconciled(setup, &value);
        let manifest = manifest_from(value);
        let mut sink = Vec::new();
        assemble(&clean, &manifest, &setup.ctx, &mut sink)
    }

    fn make_dist(setup: &TestSetup) -> Utf8PathBuf {
        let dist = setup.ctx.dist_dir();
        fs::create_dir_all(&dist).expect("failed to create dist");
        dist
    }

    #[rstest]
    fn fails_when_build_output_is_missing(setup: TestSetup) {
        let err = assemble_with(&setup, minimal()).expect_err("expected missing dist error");
        assert!(matches!(err, SoyoError::BuildOutputMissing { .. }));
    }

    #[rstest]
    #[case::manifest("package.json")]
    #[case::lower_readme("readme.md")]
    #[case::upper_readme("README.md")]
    fn fails_on_stale_top_level_files(setup: TestSetup, #[case] stale: &str) {
        let dist = make_dist(&setup);
        fs::write(dist.join(stale), b"old").expect("failed to write stale file");

        let err = assemble_with(&setup, minimal()).expect_err("expected stale file error");
        assert!(
            matches!(err, SoyoError::StaleOutputFiles { ref file } if file == stale),
            "got: {err:?}"
        );
        // The stale file is left untouched.
        assert_eq!(
            fs::read(dist.join(stale)).expect("stale file disappeared"),
            b"old"
        );
    }

    #[rstest]
    fn relocates_built_entries_into_the_nested_subdirectory(setup: TestSetup) {
        let dist = make_dist(&setup);
        fs::write(dist.join("index.js"), b"js").expect("failed to write artifact");
        fs::create_dir(dist.join("chunks")).expect("failed to create artifact dir");
        fs::write(dist.join("chunks/a.js"), b"a").expect("failed to write artifact");
        fs::write(dist.join(".DS_Store"), b"meta").expect("failed to write metadata");

        assemble_with(&setup, minimal()).expect("expected assembly to succeed");

        assert!(!dist.join("index.js").exists());
        assert_eq!(
            fs::read(dist.join("dist/index.js")).expect("artifact not relocated"),
            b"js"
        );
        assert_eq!(
            fs::read(dist.join("dist/chunks/a.js")).expect("artifact dir not relocated"),
            b"a"
        );
        // OS metadata stays where it was and is not relocated.
        assert!(dist.join(".DS_Store").exists());
        assert!(!dist.join("dist/.DS_Store").exists());
    }

    #[rstest]
    fn writes_the_clean_manifest_at_the_top_level(setup: TestSetup) {
        let dist = make_dist(&setup);

        assemble_with(&setup, minimal()).expect("expected assembly to succeed");

        let written = fs::read_to_string(dist.join("package.json"))
            .expect("clean manifest not written");
        let parsed: Value = serde_json::from_str(&written).expect("clean manifest not JSON");
        let object = parsed.as_object().expect("clean manifest not an object");
        assert_eq!(object.len(), 4);
        assert_eq!(object.get("__soyo"), Some(&json!("0.3.1")));
    }

    #[rstest]
    fn assembly_from_identical_state_is_byte_identical(setup: TestSetup) {
        let dist = make_dist(&setup);
        fs::write(dist.join("index.js"), b"js").expect("failed to write artifact");

        assemble_with(&setup, minimal()).expect("expected first assembly to succeed");
        let first = fs::read(dist.join("package.json")).expect("manifest missing");

        // Restore the pre-assembly state, as a rebuild would.
        fsutil::remove_if_exists(&dist).expect("failed to reset dist");
        let dist = make_dist(&setup);
        fs::write(dist.join("index.js"), b"js").expect("failed to write artifact");

        assemble_with(&setup, minimal()).expect("expected second assembly to succeed");
        let second = fs::read(dist.join("package.json")).expect("manifest missing");

        assert_eq!(first, second);
    }

    #[rstest]
    fn copies_auxiliary_files_that_exist(setup: TestSetup) {
        let dist = make_dist(&setup);
        fs::write(setup.ctx.source_dir().join("README.md"), b"# pkg")
            .expect("failed to write readme");
        fs::write(setup.ctx.source_dir().join("LICENSE"), b"ISC")
            .expect("failed to write license");

        assemble_with(&setup, minimal()).expect("expected assembly to succeed");

        assert_eq!(
            fs::read(dist.join("README.md")).expect("readme not copied"),
            b"# pkg"
        );
        assert_eq!(
            fs::read(dist.join("LICENSE")).expect("license not copied"),
            b"ISC"
        );
        assert!(!dist.join("CHANGELOG.md").exists());
    }

    #[rstest]
    fn copies_declared_files_preserving_relative_paths(setup: TestSetup) {
        let dist = make_dist(&setup);
        let assets = setup.ctx.source_dir().join("assets");
        fs::create_dir_all(&assets).expect("failed to create assets");
        fs::write(assets.join("logo.svg"), b"<svg/>").expect("failed to write asset");

        let mut value = minimal();
        value["files"] = json!(["assets/logo.svg", "dist"]);

        assemble_with(&setup, value).expect("expected assembly to succeed");

        assert_eq!(
            fs::read(dist.join("assets/logo.svg")).expect("declared file not copied"),
            b"<svg/>"
        );
    }

    #[rstest]
    #[case::plain("dist")]
    #[case::trailing_slash("dist/")]
    fn declared_dist_entries_are_skipped(setup: TestSetup, #[case] entry: &str) {
        make_dist(&setup);
        let mut value = minimal();
        value["files"] = json!([entry]);

        assemble_with(&setup, value).expect("expected assembly to succeed");
    }

    #[rstest]
    fn fails_when_a_declared_file_is_missing(setup: TestSetup) {
        make_dist(&setup);
        let mut value = minimal();
        value["files"] = json!(["README.md"]);

        let err = assemble_with(&setup, value).expect_err("expected missing file error");
        assert!(matches!(err, SoyoError::DeclaredFileMissing { .. }));
    }

    #[rstest]
    fn bin_field_brings_the_bin_directory(setup: TestSetup) {
        let dist = make_dist(&setup);
        let bin = setup.ctx.source_dir().join("bin");
        fs::create_dir_all(&bin).expect("failed to create bin");
        fs::write(bin.join("pkg.js"), b"#!/usr/bin/env node")
            .expect("failed to write bin script");

        let mut value = minimal();
        value["bin"] = json!({"pkg": "bin/pkg.js"});

        assemble_with(&setup, value).expect("expected assembly to succeed");

        assert_eq!(
            fs::read(dist.join("bin/pkg.js")).expect("bin not copied"),
            b"#!/usr/bin/env node"
        );
    }

    #[rstest]
    fn debug_context_traces_file_operations(setup: TestSetup) {
        let dist = make_dist(&setup);
        fs::write(dist.join("index.js"), b"js").expect("failed to write artifact");

        let ctx = RunContext::new(setup.ctx.cwd.clone(), "0.3.1", true);
        let value = minimal();
        let clean = {
            let mut sink = Vec::new();
            reconcile(&manifest_from(value.clone()), &ctx, &mut sink)
                .expect("expected reconciliation to succeed")
                .clean
        };
        let manifest = manifest_from(value);

        let mut sink = Vec::new();
        assemble(&clean, &manifest, &ctx, &mut sink).expect("expected assembly to succeed");

        let trace = String::from_utf8(sink).expect("trace output was not UTF-8");
        assert!(trace.contains("DEBUG move index.js"), "got: {trace}");
    }
}
