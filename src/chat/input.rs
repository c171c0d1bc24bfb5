//! Line input for the chat loop.
//!
//! [`LineReader`] is what the loop reads from. [`ReadlineInput`] backs it
//! with [`rustyline`] (line editing plus history persisted under the cache
//! directory); tests use a scripted reader instead.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing::debug;

/// One attempt at reading a line.
#[derive(Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Input stream closed (Ctrl+D).
    Eof,
    /// Interrupted by the user (Ctrl+C).
    Interrupted,
}

pub trait LineReader {
    /// Shows `prompt` and blocks until a line, end of input, or interruption.
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;
}

/// Readline-backed input with persistent history.
pub struct ReadlineInput {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
}

impl ReadlineInput {
    /// Creates the editor and loads history from `history_path` if it exists.
    pub fn open(history_path: Option<PathBuf>) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;
        if let Some(ref path) = history_path {
            if path.exists() {
                let _ = editor.load_history(path);
            }
        }
        Ok(Self {
            editor,
            history_path,
        })
    }

    /// Writes history back to disk. Failures are ignored.
    pub fn save_history(&mut self) {
        let Some(ref path) = self.history_path else {
            return;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = self.editor.save_history(path) {
            debug!("could not save history to {}: {}", path.display(), e);
        }
    }
}

impl LineReader for ReadlineInput {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(e) => Err(e.into()),
        }
    }
}
