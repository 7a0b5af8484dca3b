//! Error types for the staffline binary

use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by the command line tool
#[derive(Debug, Error)]
pub enum CliError {
    /// The input image could not be read or decoded
    #[error("cannot read {}: {source}", path.display())]
    Input {
        path: PathBuf,
        source: staffline_io::IoError,
    },

    /// The options file could not be read or parsed
    #[error("cannot load config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// An output image could not be written
    #[error("cannot write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        source: staffline_io::IoError,
    },

    #[error(transparent)]
    Core(#[from] staffline_core::Error),

    #[error(transparent)]
    Recog(#[from] staffline_recog::RecogError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
