//! Error types for the soyo CLI.
//!
//! This module defines semantic error variants for every fatal condition the
//! publish pipeline can hit. Each error message carries enough context for
//! the user to act on it without consulting the source.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while preparing the publish directory.
#[derive(Debug, Error)]
pub enum SoyoError {
    /// No `package.json` exists in the source directory.
    #[error("package.json not found in {dir}")]
    ManifestNotFound {
        /// Directory that was searched.
        dir: Utf8PathBuf,
    },

    /// The manifest file exists but could not be parsed as a JSON object.
    #[error("invalid package.json at {path}: {reason}")]
    ManifestParse {
        /// Path to the unparseable manifest.
        path: Utf8PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// One or more required manifest fields are absent.
    #[error("package.json is missing required fields: {}", fields.join(", "))]
    MissingRequiredFields {
        /// Names of the absent fields.
        fields: Vec<String>,
    },

    /// A scoped package does not declare public publish access.
    #[error("scoped package {name} must set publishConfig.access to \"public\"")]
    MissingScopedPublishAccess {
        /// The scoped package name.
        name: String,
    },

    /// A field declared in `soyo.fields` is absent from the manifest.
    #[error("package.json is missing field declared in soyo.fields: {field}")]
    MissingExtraField {
        /// Name of the absent field.
        field: String,
    },

    /// The build output directory does not exist yet.
    #[error("build output directory {dir} not found; run `soyo build` first")]
    BuildOutputMissing {
        /// Expected location of the build output.
        dir: Utf8PathBuf,
    },

    /// A leftover file from a previous assembly run was found.
    #[error(
        "stale file {file} found in the build output directory; \
         remove the directory, then rebuild and copy"
    )]
    StaleOutputFiles {
        /// Name of the stale file.
        file: String,
    },

    /// An entry of the manifest's `files` list does not exist on disk.
    #[error("file or directory listed in `files` not found: {path}")]
    DeclaredFileMissing {
        /// Path that was expected to exist.
        path: Utf8PathBuf,
    },

    /// The manifest has no `build` entry under `scripts`.
    #[error("no build script found in package.json")]
    NoBuildScript,

    /// The clean manifest could not be serialized.
    #[error("failed to serialize clean package.json: {0}")]
    Serialize(#[from] serde_json::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`SoyoError`].
pub type Result<T> = std::result::Result<T, SoyoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_fields_lists_field_names() {
        let err = SoyoError::MissingRequiredFields {
            fields: vec!["name".to_owned(), "description".to_owned()],
        };
        let msg = err.to_string();
        assert!(msg.contains("name, description"));
    }

    #[test]
    fn scoped_access_error_includes_package_name() {
        let err = SoyoError::MissingScopedPublishAccess {
            name: "@scope/pkg".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("@scope/pkg"));
        assert!(msg.contains("publishConfig.access"));
    }

    #[test]
    fn build_output_missing_suggests_building_first() {
        let err = SoyoError::BuildOutputMissing {
            dir: Utf8PathBuf::from("/tmp/pkg/dist"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/pkg/dist"));
        assert!(msg.contains("soyo build"));
    }

    #[test]
    fn stale_output_error_names_the_file() {
        let err = SoyoError::StaleOutputFiles {
            file: "package.json".to_owned(),
        };
        assert!(err.to_string().contains("package.json"));
    }

    #[test]
    fn missing_extra_field_names_the_field() {
        let err = SoyoError::MissingExtraField {
            field: "sideEffects".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("sideEffects"));
        assert!(msg.contains("soyo.fields"));
    }
}
