//! The manifest field rulebook.
//!
//! Every field that may appear in the clean manifest is catalogued here with
//! its category, so the reconciler is a single loop over a declarative table
//! rather than scattered string checks. Fields with bespoke handling
//! (license, packageManager, engines, publishConfig, and the soyo blocks)
//! keep named constants but sit outside the table.

/// How a catalogued field participates in reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCategory {
    /// Reconciliation fails when the field is absent.
    Required,
    /// A warning is collected when the field is absent; copied when present.
    Recommended,
    /// Copied when present; silent when absent.
    Optional,
    /// At least one field of this category should be present (single warning).
    EntryPoint,
    /// At least one field of this category should be present (single warning).
    TypeDeclaration,
    /// Dependency mapping, always copied verbatim when present.
    DependencyGroup,
    /// Copied verbatim when present, no checks.
    PassThrough,
}

/// A single entry of the field rulebook.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Manifest field name.
    pub name: &'static str,
    /// Category governing copy and warning behaviour.
    pub category: FieldCategory,
}

/// The ordered rulebook applied by the reconciler.
///
/// Order matters only for trace output; the serialized manifest is
/// canonically sorted regardless.
pub const RULEBOOK: &[FieldRule] = &[
    FieldRule { name: "name", category: FieldCategory::Required },
    FieldRule { name: "version", category: FieldCategory::Required },
    FieldRule { name: "description", category: FieldCategory::Required },
    FieldRule { name: "homepage", category: FieldCategory::Recommended },
    FieldRule { name: "author", category: FieldCategory::Recommended },
    FieldRule { name: "repository", category: FieldCategory::Recommended },
    FieldRule { name: "keywords", category: FieldCategory::Recommended },
    FieldRule { name: "contributors", category: FieldCategory::Optional },
    FieldRule { name: "bugs", category: FieldCategory::Optional },
    FieldRule { name: "main", category: FieldCategory::EntryPoint },
    FieldRule { name: "browser", category: FieldCategory::EntryPoint },
    FieldRule { name: "exports", category: FieldCategory::EntryPoint },
    FieldRule { name: "module", category: FieldCategory::EntryPoint },
    FieldRule { name: "types", category: FieldCategory::TypeDeclaration },
    FieldRule { name: "typings", category: FieldCategory::TypeDeclaration },
    FieldRule { name: "dependencies", category: FieldCategory::DependencyGroup },
    FieldRule { name: "devDependencies", category: FieldCategory::DependencyGroup },
    FieldRule { name: "peerDependencies", category: FieldCategory::DependencyGroup },
    FieldRule { name: "optionalDependencies", category: FieldCategory::DependencyGroup },
    FieldRule { name: "bin", category: FieldCategory::PassThrough },
    FieldRule { name: "napi", category: FieldCategory::PassThrough },
    FieldRule { name: "imports", category: FieldCategory::PassThrough },
    FieldRule { name: "os", category: FieldCategory::PassThrough },
    FieldRule { name: "cpu", category: FieldCategory::PassThrough },
];

/// Fields with bespoke reconciliation steps.
pub const LICENSE: &str = "license";
/// Warned about when absent, never copied into the clean manifest.
pub const PACKAGE_MANAGER: &str = "packageManager";
/// Copied verbatim; keys other than `node` draw a warning.
pub const ENGINES: &str = "engines";
/// The only engine key that is expected.
pub const NODE_ENGINE: &str = "node";
/// Checked for `access = "public"` on scoped packages, then copied.
pub const PUBLISH_CONFIG: &str = "publishConfig";
/// The source manifest's declared publish file list.
pub const FILES: &str = "files";
/// Pass-through `bin` field; also triggers the `bin` directory copy.
pub const BIN: &str = "bin";
/// Nested tool-configuration block in the source manifest.
pub const SOYO_CONFIG: &str = "soyo";
/// Reserved field recording the tool's own version in the clean manifest.
pub const TOOL_VERSION_FIELD: &str = "__soyo";

/// License file checked for on disk next to the manifest.
pub const LICENSE_FILE: &str = "LICENSE";

/// Iterate the rulebook names belonging to one category, in table order.
pub fn fields_in(category: FieldCategory) -> impl Iterator<Item = &'static str> {
    RULEBOOK
        .iter()
        .filter(move |rule| rule.category == category)
        .map(|rule| rule.name)
}
