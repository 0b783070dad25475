//! Errors raised while installing the configuration into a project.

use miette::Diagnostic;
use std::path::PathBuf;

/// Installation errors.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum InstallError {
    /// A file could not be read or written.
    #[error("Failed to access {path}: {source}")]
    #[diagnostic(
        code(esconf::file_access),
        help("check that the path exists and is writable")
    )]
    FileAccess {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The manifest is not valid JSON.
    #[error("Failed to parse {path}: {source}")]
    #[diagnostic(code(esconf::parse), help("fix the JSON syntax, then run esconf again"))]
    Parse {
        /// Manifest path.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The manifest parsed but cannot take the patch.
    #[error("Invalid manifest {path}: {reason}")]
    #[diagnostic(
        code(esconf::invalid_manifest),
        help("the manifest must be a JSON object whose `scripts` field is an object")
    )]
    InvalidManifest {
        /// Manifest path.
        path: PathBuf,
        /// What is wrong with it.
        reason: String,
    },

    /// The package manager could not be run or reported failure.
    #[error("`{command}` failed: {reason}")]
    #[diagnostic(
        code(esconf::subprocess),
        help("install the packages by hand or re-run with --skip-install")
    )]
    Subprocess {
        /// Command line that was run.
        command: String,
        /// Spawn error or exit status.
        reason: String,
    },

    /// A document could not be rendered.
    #[error("Failed to render configuration: {0}")]
    #[diagnostic(code(esconf::render))]
    Render(#[source] serde_json::Error),
}

impl InstallError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }
}
