//! Writes transcripts as plain-text files under an output directory

use advisor_application::ports::transcript_store::{TranscriptError, TranscriptStore};
use std::path::PathBuf;

/// Stores each transcript as `<dir>/<name>`, default name
/// `aws_consultation_<unix-seconds>.txt`
#[derive(Debug, Clone)]
pub struct FileTranscriptStore {
    dir: PathBuf,
}

impl FileTranscriptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }


    fn default_file_name() -> String {
        format!("aws_consultation_{}.txt", chrono::Utc::now().timestamp())
    }
}

impl TranscriptStore for FileTranscriptStore {
    fn save(&self, file_name: Option<&str>, contents: &str) -> Result<PathBuf, TranscriptError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| TranscriptError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let name = file_name
            .map(str::to_string)
            .unwrap_or_else(Self::default_file_name);
        let path = self.dir.join(name);

        std::fs::write(&path, contents).map_err(|source| TranscriptError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
