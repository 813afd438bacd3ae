//! Conversation recorder
//!
//! Collects exchanges in memory and writes them once, at the end of a run,
//! through a [`TranscriptStore`]. Write failures are reported and swallowed.

use crate::ports::transcript_store::TranscriptStore;
use advisor_domain::{ConversationLog, Exchange, render_transcript};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

pub struct ConversationRecorder {
    log: ConversationLog,
    store: Arc<dyn TranscriptStore>,
}

impl ConversationRecorder {
    pub fn new(store: Arc<dyn TranscriptStore>) -> Self {
        Self {
            log: ConversationLog::new(),
            store,
        }
    }

    pub fn append(&mut self, user_text: &str, assistant_text: &str) {
        self.log.append(Exchange::new(user_text, assistant_text));
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Write the transcript. `None` when there is nothing to write or the
    /// write failed.
    pub fn flush(&self, file_name: Option<&str>) -> Option<PathBuf> {
        if self.log.is_empty() {
            return None;
        }

        let contents = render_transcript(&self.log);
        match self.store.save(file_name, &contents) {
            Ok(path) => {
                info!(path = %path.display(), exchanges = self.log.len(), "Transcript saved");
                Some(path)
            }
            Err(e) => {
                warn!("Could not save conversation: {}", e);
                None
            }
        }
    }
}
