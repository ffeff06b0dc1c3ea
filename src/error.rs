use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for fixts
#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Failed to read file: {} ({})", .path.display(), .source)]
    Read {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Failed to write to file: {} ({})", .path.display(), .source)]
    Write {
        source: std::io::Error,
        path: PathBuf,
    },
}

impl PatchError {
    /// Create a new read error with path context
    pub fn read_error(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Read {
            source: err,
            path: path.into(),
        }
    }

    /// Create a new write error with path context
    pub fn write_error(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Write {
            source: err,
            path: path.into(),
        }
    }

    /// Path of the file the failed operation touched
    pub fn path(&self) -> &Path {
        match self {
            PatchError::Read { path, .. } | PatchError::Write { path, .. } => path,
        }
    }

    /// Underlying io error kind
    pub fn kind(&self) -> std::io::ErrorKind {
        match self {
            PatchError::Read { source, .. } | PatchError::Write { source, .. } => source.kind(),
        }
    }
}

/// Result type alias using PatchError
pub type PatchResult<T> = Result<T, PatchError>;

/// Contextual error mapping for reads
pub fn map_read_err<P: Into<PathBuf>>(path: P) -> impl FnOnce(std::io::Error) -> PatchError {
    let path = path.into();
    move |err| PatchError::read_error(err, path)
}

/// Contextual error mapping for writes
pub fn map_write_err<P: Into<PathBuf>>(path: P) -> impl FnOnce(std::io::Error) -> PatchError {
    let path = path.into();
    move |err| PatchError::write_error(err, path)
}
