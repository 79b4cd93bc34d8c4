//! Manifest errors.

use std::path::PathBuf;

use miette::{Diagnostic as MietteDiagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error reading or interpreting a manifest on disk.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ManifestError {
    #[error("could not find {file} in {}", dir.display())]
    #[diagnostic(code(rigging::manifest::not_found))]
    NotFound { file: &'static str, dir: PathBuf },

    #[error("could not find Project.toml or Workspace.toml in {} or any parent directory", dir.display())]
    #[diagnostic(
        code(rigging::manifest::no_manifest),
        help("create a Project.toml or pass --path")
    )]
    NoManifest { dir: PathBuf },

    #[error("failed to parse {}: {message}", path.display())]
    #[diagnostic(code(rigging::manifest::parse))]
    Parse {
        path: PathBuf,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
    },

    #[error("target `{name}` is declared more than once in {}", path.display())]
    #[diagnostic(code(rigging::manifest::duplicate_target))]
    DuplicateTarget { name: String, path: PathBuf },
}

impl ManifestError {
    /// Build a parse error pointing into `content`.
    pub fn parse(path: impl Into<PathBuf>, content: &str, err: toml::de::Error) -> Self {
        let path = path.into();
        ManifestError::Parse {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: err.span().map(SourceSpan::from),
            message: err.message().to_string(),
            path,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ManifestError::NotFound { file, dir } => {
                Diagnostic::error(format!("could not find {}", file))
                    .with_location(dir)
                    .with_suggestion(suggestions::CHECK_PROJECT_PATH)
            }
            ManifestError::NoManifest { dir } => Diagnostic::error("could not find a manifest")
                .with_context(format!("searched {} and its parents", dir.display()))
                .with_suggestion(suggestions::NO_MANIFEST),
            ManifestError::Parse { path, message, .. } => {
                Diagnostic::error(format!("failed to parse manifest: {}", message))
                    .with_location(path)
            }
            ManifestError::DuplicateTarget { name, path } => {
                Diagnostic::error(format!("target `{}` is declared more than once", name))
                    .with_location(path)
                    .with_suggestion("Rename one of the targets; names must be unique within a project")
            }
        }
    }
}
