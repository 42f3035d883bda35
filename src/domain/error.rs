use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::identifiers::NameError;

/// Library-wide error type for modchart operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Chart or module name failed validation.
    #[error(transparent)]
    InvalidName(#[from] NameError),

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Writing a generated file or directory failed.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Target base directory is missing or not a directory.
    #[error("no such directory {}", .0.display())]
    NotADirectory(PathBuf),

    /// A regular file sits where the chart directory should be created.
    #[error("file {} already exists and is not a directory", .0.display())]
    ChartPathOccupied(PathBuf),

    /// Directory does not hold a chart (no values.yaml to extend).
    #[error("no chart found in {}: values.yaml is missing", .0.display())]
    ChartNotFound(PathBuf),

    /// The chart loader rejected a directory.
    #[error("could not load {}: {details}", .path.display())]
    ChartLoad { path: PathBuf, details: String },

    /// The chart saver could not write a chart.
    #[error("could not save chart to {}: {details}", .path.display())]
    ChartSave { path: PathBuf, details: String },

    /// Manifest kind supplied by the user is not in the catalog.
    #[error(
        "Unknown manifest kind '{0}': must be one of ingress, deployment, service, serviceaccount, hpa, helpers, test-connection"
    )]
    UnknownManifestKind(String),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn write_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AppError::Write { path: path.into(), source }
    }

    /// Provide an `io::ErrorKind`-like view for callers mapping errors to exit codes.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Write { source, .. } => source.kind(),
            AppError::InvalidName(_)
            | AppError::UnknownManifestKind(_)
            | AppError::Configuration(_)
            | AppError::ParseError { .. }
            | AppError::TomlParseError(_) => io::ErrorKind::InvalidInput,
            AppError::NotADirectory(_) | AppError::ChartNotFound(_) => io::ErrorKind::NotFound,
            AppError::ChartPathOccupied(_) => io::ErrorKind::AlreadyExists,
            AppError::ChartLoad { .. } | AppError::ChartSave { .. } => io::ErrorKind::Other,
        }
    }
}
