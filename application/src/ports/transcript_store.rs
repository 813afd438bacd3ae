//! Port for persisting a rendered transcript

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("Failed to write transcript to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub trait TranscriptStore: Send + Sync {
    /// Write `contents` and return the path written.
    ///
    /// With no `file_name` the store picks one.
    fn save(&self, file_name: Option<&str>, contents: &str) -> Result<PathBuf, TranscriptError>;
}
