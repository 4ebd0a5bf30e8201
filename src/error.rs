//! Fatal error conditions for both pipeline stages.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read input CSV {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("input CSV {path} has no header row")]
    EmptyInput { path: PathBuf },

    #[error("no datetime column found; columns: {columns:?}")]
    NoTimestampColumn { columns: Vec<String> },

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
