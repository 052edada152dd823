// errors.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors from writing the CSV/JSON output files.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
