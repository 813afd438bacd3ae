//! Line input for the interactive loop

use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing::debug;

/// Where interactive input comes from
pub trait LineSource {
    /// Read one line. `ReadlineError::Interrupted` and `ReadlineError::Eof`
    /// end the session.
    fn read_line(&mut self, prompt: &str) -> rustyline::Result<String>;

    fn add_history(&mut self, _line: &str) {}
}

/// `$XDG_DATA_HOME/aws-advisor/history.txt`
pub fn default_history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("aws-advisor").join("history.txt"))
}

/// Terminal input with persistent history
///
/// History is loaded on creation and written back when dropped.
pub struct RustylineSource {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
}

impl RustylineSource {
    pub fn new(history_path: Option<PathBuf>) -> rustyline::Result<Self> {
        let mut editor = DefaultEditor::new()?;

        if let Some(path) = &history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if editor.load_history(path).is_err() {
                debug!(path = %path.display(), "No readline history loaded");
            }
        }

        Ok(Self {
            editor,
            history_path,
        })
    }
}

impl LineSource for RustylineSource {
    fn read_line(&mut self, prompt: &str) -> rustyline::Result<String> {
        self.editor.readline(prompt)
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }
}

impl Drop for RustylineSource {
    fn drop(&mut self) {
        if let Some(path) = &self.history_path {
            if let Err(e) = self.editor.save_history(path) {
                debug!(path = %path.display(), error = %e, "Could not save readline history");
            }
        }
    }
}
