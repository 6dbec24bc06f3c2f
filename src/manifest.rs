//! Source manifest loading and access.
//!
//! The manifest is read once per invocation and never mutated; the clean
//! manifest is built additively from it by the reconciler. JSON `null` is
//! treated the same as an absent field throughout.

use crate::error::{Result, SoyoError};
use crate::fields;
use camino::Utf8Path;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;

/// Name of the package manifest file.
pub const MANIFEST_FILE: &str = "package.json";

/// The nested `soyo` tool-configuration block inside the source manifest.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SoyoConfig {
    /// Extra field names that must be present and are copied verbatim.
    #[serde(default)]
    pub fields: Vec<String>,
}

/// An immutable view of the source `package.json`.
#[derive(Debug, Clone)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    /// Load the manifest from the given source directory.
    ///
    /// # Errors
    ///
    /// Returns [`SoyoError::ManifestNotFound`] when no `package.json` exists
    /// there, and [`SoyoError::ManifestParse`] when the file is unreadable,
    /// not valid JSON, or not a JSON object.
    pub fn load(dir: &Utf8Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Err(SoyoError::ManifestNotFound {
                dir: dir.to_owned(),
            });
        }

        let contents = fs::read_to_string(&path).map_err(|e| SoyoError::ManifestParse {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let value: Value =
            serde_json::from_str(&contents).map_err(|e| SoyoError::ManifestParse {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(SoyoError::ManifestParse {
                path,
                reason: format!("expected a JSON object, found {}", json_type_name(&other)),
            }),
        }
    }

    /// Build a manifest from an already-parsed field mapping.
    #[must_use]
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Look up a field, treating JSON `null` as absent.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|value| !value.is_null())
    }

    /// Whether a field is present (and not `null`).
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// The package name, when present and a string.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    /// Whether the package name is namespaced (`@scope/...`).
    #[must_use]
    pub fn is_scoped(&self) -> bool {
        self.name().is_some_and(|name| name.starts_with('@'))
    }

    /// Whether the manifest declares a `build` entry under `scripts`.
    #[must_use]
    pub fn has_build_script(&self) -> bool {
        self.get("scripts")
            .and_then(Value::as_object)
            .is_some_and(|scripts| scripts.contains_key("build"))
    }

    /// The declared publish file list, when present.
    ///
    /// Non-string entries are skipped.
    #[must_use]
    pub fn files(&self) -> Option<Vec<&str>> {
        self.get(fields::FILES).and_then(Value::as_array).map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .collect()
        })
    }

    /// The extra field names declared under `soyo.fields`.
    ///
    /// A missing or malformed `soyo` block yields an empty list, matching
    /// the tolerant handling of optional configuration.
    #[must_use]
    pub fn extra_fields(&self) -> Vec<String> {
        self.get(fields::SOYO_CONFIG)
            .map(|value| {
                serde_json::from_value::<SoyoConfig>(value.clone()).unwrap_or_default()
            })
            .unwrap_or_default()
            .fields
    }

    /// The `engines` mapping, when present and an object.
    #[must_use]
    pub fn engines(&self) -> Option<&Map<String, Value>> {
        self.get(fields::ENGINES).and_then(Value::as_object)
    }

    /// The `publishConfig.access` value, when present and a string.
    #[must_use]
    pub fn publish_access(&self) -> Option<&str> {
        self.get(fields::PUBLISH_CONFIG)
            .and_then(Value::as_object)
            .and_then(|config| config.get("access"))
            .and_then(Value::as_str)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
