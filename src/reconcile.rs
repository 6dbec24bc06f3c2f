//! Manifest field reconciliation.
//!
//! Applies the field rulebook to the source manifest and builds the clean
//! manifest additively: every field in the output was explicitly selected by
//! a rule. Non-fatal findings are collected as [`Warning`] records rather
//! than printed inline, so callers decide how to surface them.

use crate::context::RunContext;
use crate::error::{Result, SoyoError};
use crate::fields::{self, FieldCategory};
use crate::manifest::Manifest;
use crate::output::trace_line;
use serde_json::{Map, Value};
use std::fmt;
use std::io::Write;

/// The filtered manifest written into the publish directory.
#[derive(Debug, Clone, Default)]
pub struct CleanManifest {
    fields: Map<String, Value>,
}

impl CleanManifest {
    fn insert(&mut self, field: &str, value: Value) {
        self.fields.insert(field.to_owned(), value);
    }

    /// Whether a field was selected into the clean manifest.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Look up a selected field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Number of selected fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields were selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serialize as pretty-printed JSON with canonically sorted keys.
    ///
    /// The backing map orders keys lexicographically, so the output is
    /// stable regardless of the order fields were selected in.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization fails.
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut text = serde_json::to_string_pretty(&self.fields)?;
        text.push('\n');
        Ok(text)
    }
}

/// A non-fatal finding collected during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// One or more recommended fields are absent.
    MissingRecommendedFields {
        /// Names of the absent fields.
        fields: Vec<String>,
    },
    /// The manifest has no `license` field.
    MissingLicenseField,
    /// No LICENSE file exists next to the manifest.
    MissingLicenseFile,
    /// The manifest has no `packageManager` field.
    MissingPackageManager,
    /// `engines` contains keys other than `node`.
    UnexpectedEngines {
        /// The unexpected engine keys.
        engines: Vec<String>,
    },
    /// None of the entry-point fields are present.
    MissingEntryPoint,
    /// None of the type-declaration fields are present.
    MissingTypeDeclarations,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MissingRecommendedFields { fields } => write!(
                f,
                "package.json is missing recommended fields: {}",
                fields.join(", ")
            ),
            Warning::MissingLicenseField => {
                write!(f, "package.json is missing recommended field: license")
            }
            Warning::MissingLicenseFile => write!(f, "LICENSE file not found"),
            Warning::MissingPackageManager => {
                write!(f, "package.json is missing recommended field: packageManager")
            }
            Warning::UnexpectedEngines { engines } => write!(
                f,
                "engines should not contain keys other than node: {}",
                engines.join(", ")
            ),
            Warning::MissingEntryPoint => write!(
                f,
                "package.json has no entry point field: main, browser, exports or module"
            ),
            Warning::MissingTypeDeclarations => write!(
                f,
                "package.json has no type declarations field: types or typings"
            ),
        }
    }
}

/// The outcome of a successful reconciliation.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// The assembled clean manifest.
    pub clean: CleanManifest,
    /// Non-fatal findings, in the order they were detected.
    pub warnings: Vec<Warning>,
}

/// Reconcile the source manifest into a clean manifest.
///
/// Steps run in a fixed order; each either selects fields into the clean
/// manifest, collects a warning, or fails. With the context's debug toggle
/// set, every selected field emits a trace line on `stderr`.
///
/// # Errors
///
/// Returns [`SoyoError::MissingRequiredFields`] when name, version, or
/// description is absent; [`SoyoError::MissingScopedPublishAccess`] when a
/// scoped package lacks `publishConfig.access = "public"`; and
/// [`SoyoError::MissingExtraField`] when a field declared in `soyo.fields`
/// is absent.
pub fn reconcile(
    manifest: &Manifest,
    ctx: &RunContext,
    stderr: &mut dyn Write,
) -> Result<Reconciliation> {
    let mut reconciler = Reconciler {
        manifest,
        ctx,
        clean: CleanManifest::default(),
        warnings: Vec::new(),
    };

    // 1. Required fields fail the run when absent.
    let missing = reconciler.missing_in(FieldCategory::Required);
    if !missing.is_empty() {
        return Err(SoyoError::MissingRequiredFields { fields: missing });
    }
    reconciler.select_category(stderr, FieldCategory::Required);

    // 2. Recommended fields warn when absent; optional fields copy silently.
    let missing = reconciler.missing_in(FieldCategory::Recommended);
    if !missing.is_empty() {
        reconciler
            .warnings
            .push(Warning::MissingRecommendedFields { fields: missing });
    }
    reconciler.select_category(stderr, FieldCategory::Recommended);
    reconciler.select_category(stderr, FieldCategory::Optional);

    // 3. License: both the field and the on-disk file are checked.
    if !manifest.has(fields::LICENSE) {
        reconciler.warnings.push(Warning::MissingLicenseField);
    }
    if !ctx.source_dir().join(fields::LICENSE_FILE).exists() {
        reconciler.warnings.push(Warning::MissingLicenseFile);
    }
    reconciler.select_field(stderr, fields::LICENSE);

    // 4. packageManager is warned about but deliberately never copied.
    if !manifest.has(fields::PACKAGE_MANAGER) {
        reconciler.warnings.push(Warning::MissingPackageManager);
    }

    // 5. Engines copy verbatim; non-node keys draw a warning.
    if let Some(engines) = manifest.engines() {
        let unexpected: Vec<String> = engines
            .keys()
            .filter(|key| key.as_str() != fields::NODE_ENGINE)
            .cloned()
            .collect();
        if !unexpected.is_empty() {
            reconciler
                .warnings
                .push(Warning::UnexpectedEngines { engines: unexpected });
        }
    }
    reconciler.select_field(stderr, fields::ENGINES);

    // 6. Scoped packages must declare public access.
    if manifest.is_scoped() && manifest.publish_access() != Some("public") {
        return Err(SoyoError::MissingScopedPublishAccess {
            name: manifest.name().unwrap_or_default().to_owned(),
        });
    }
    reconciler.select_field(stderr, fields::PUBLISH_CONFIG);

    // 7. Entry points: warn only when none is present.
    if !reconciler.any_present(FieldCategory::EntryPoint) {
        reconciler.warnings.push(Warning::MissingEntryPoint);
    }
    reconciler.select_category(stderr, FieldCategory::EntryPoint);

    // 8. Type declarations: same shape as entry points.
    if !reconciler.any_present(FieldCategory::TypeDeclaration) {
        reconciler.warnings.push(Warning::MissingTypeDeclarations);
    }
    reconciler.select_category(stderr, FieldCategory::TypeDeclaration);

    // 9. Dependency groups copy verbatim.
    reconciler.select_category(stderr, FieldCategory::DependencyGroup);

    // 10. Pass-through fields copy verbatim.
    reconciler.select_category(stderr, FieldCategory::PassThrough);

    // 11. Declared extra fields must exist.
    for field in manifest.extra_fields() {
        let Some(value) = manifest.get(&field) else {
            return Err(SoyoError::MissingExtraField { field });
        };
        trace_line(ctx, stderr, format_args!("set {field} to {value}"));
        reconciler.clean.insert(&field, value.clone());
    }

    // 12. Record the tool's own version.
    trace_line(
        ctx,
        stderr,
        format_args!("set {} to \"{}\"", fields::TOOL_VERSION_FIELD, ctx.tool_version),
    );
    reconciler.clean.insert(
        fields::TOOL_VERSION_FIELD,
        Value::String(ctx.tool_version.clone()),
    );

    Ok(Reconciliation {
        clean: reconciler.clean,
        warnings: reconciler.warnings,
    })
}

struct Reconciler<'a> {
    manifest: &'a Manifest,
    ctx: &'a RunContext,
    clean: CleanManifest,
    warnings: Vec<Warning>,
}

impl Reconciler<'_> {
    /// Copy one field into the clean manifest when the source has it.
    fn select_field(&mut self, stderr: &mut dyn Write, field: &str) {
        if let Some(value) = self.manifest.get(field) {
            trace_line(self.ctx, stderr, format_args!("set {field} to {value}"));
            self.clean.insert(field, value.clone());
        }
    }

    /// Copy every present field of a rulebook category, in table order.
    fn select_category(&mut self, stderr: &mut dyn Write, category: FieldCategory) {
        for field in fields::fields_in(category) {
            self.select_field(stderr, field);
        }
    }

    /// Names of a category's fields that are absent from the source.
    fn missing_in(&self, category: FieldCategory) -> Vec<String> {
        fields::fields_in(category)
            .filter(|field| !self.manifest.has(field))
            .map(str::to_owned)
            .collect()
    }

    /// Whether any field of a category is present in the source.
    fn any_present(&self, category: FieldCategory) -> bool {
        fields::fields_in(category).any(|field| self.manifest.has(field))
    }
}
