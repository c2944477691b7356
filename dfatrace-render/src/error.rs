//! Render error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from writing or rendering diagrams.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("graphviz executable '{}' not found", .binary.display())]
    DotNotFound { binary: PathBuf },

    #[error("graphviz failed ({status}): {stderr}")]
    DotFailed { status: String, stderr: String },

    #[error("unknown output format '{0}'")]
    UnknownFormat(String),
}
