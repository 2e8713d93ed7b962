use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TodoError {
    /// Submitted task text was empty after trimming.
    #[error("Please enter a task")]
    EmptyText,

    #[error("Invalid due date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid date format '{0}'")]
    InvalidDateFormat(String),

    #[error("Unknown color '{0}'")]
    InvalidColor(String),

    #[error("Failed to read config {}: {source}", path.display())]
    ReadConfig { path: PathBuf, source: io::Error },

    #[error("Failed to parse config {}: {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
