//! Read-only view of an interactive command history.

use std::path::{Path, PathBuf};

use rustyline::error::ReadlineError;
use rustyline::history::{DefaultHistory, History};
use rustyline::Config;
use thiserror::Error;

use crate::error::FetchError;
use crate::line_source::{LineSource, SourceId};

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("cannot load history from {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: ReadlineError,
    },
}

// Neither drops repeated lines nor caps the log.
fn keep_everything() -> rustyline::Result<Config> {
    Ok(Config::builder()
        .history_ignore_dups(false)?
        .max_history_size(usize::MAX)?
        .build())
}

/// Recorded commands, oldest first.
///
/// Indexing through [`LineSource`] runs the other way: entry 1 is the most
/// recent command, entry 2 the one before it, and so on.
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    entries: Vec<String>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Load a history file written by the interactive prompt.
    ///
    /// Every recorded line is kept, repeated ones included: a continuation
    /// chain may legitimately repeat a physical line.
    pub fn load(path: &Path) -> Result<Self, HistoryError> {
        let load_error = |source: ReadlineError| HistoryError::Load {
            path: path.to_path_buf(),
            source,
        };
        let mut history = DefaultHistory::with_config(keep_everything().map_err(load_error)?);
        history.load(path).map_err(load_error)?;
        Ok(Self::from_entries(history.iter().cloned()))
    }

    /// Record a new most-recent entry.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LineSource for CommandHistory {
    fn source_id(&self) -> SourceId {
        SourceId::History
    }

    fn fetch(&self, n: usize) -> Result<String, FetchError> {
        let available = self.entries.len();
        if n == 0 || n > available {
            return Err(FetchError::NoHistory {
                requested: n,
                available,
            });
        }
        Ok(self.entries[available - n].trim().to_string())
    }

    // Older entries sit logically above newer ones.
    fn preceding(&self, n: usize) -> Option<usize> {
        (n < self.entries.len()).then(|| n + 1)
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_counts_back_from_most_recent() {
        let history = CommandHistory::from_entries(["a = 1", "  b = 2  ", "c = 3"]);
        assert_eq!(history.fetch(1).unwrap(), "c = 3");
        assert_eq!(history.fetch(2).unwrap(), "b = 2");
        assert_eq!(history.fetch(3).unwrap(), "a = 1");
    }

    #[test]
    fn test_fetch_past_oldest_is_no_history() {
        let history = CommandHistory::from_entries(["x", "y"]);
        assert_eq!(
            history.fetch(3),
            Err(FetchError::NoHistory {
                requested: 3,
                available: 2
            })
        );
        assert!(history.fetch(0).is_err());
    }

    #[test]
    fn test_preceding_moves_to_older_entries() {
        let history = CommandHistory::from_entries(["x", "y"]);
        assert_eq!(history.preceding(1), Some(2));
        assert_eq!(history.preceding(2), None);
    }

    #[test]
    fn test_push_makes_newest_entry_first() {
        let mut history = CommandHistory::new();
        history.push("old");
        history.push("new");
        assert_eq!(history.fetch(1).unwrap(), "new");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_load_round_trips_saved_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");

        let mut saved = DefaultHistory::new();
        saved.add("y = x^2 + ...").unwrap();
        saved.add("1").unwrap();
        saved.save(&path).unwrap();

        let history = CommandHistory::load(&path).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.fetch(1).unwrap(), "1");
        assert_eq!(history.fetch(2).unwrap(), "y = x^2 + ...");
    }

    #[test]
    fn test_load_keeps_repeated_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        std::fs::write(&path, "y = 1 + ...\n1 + ...\n1 + ...\n1\n").unwrap();

        let history = CommandHistory::load(&path).unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(history.fetch(2).unwrap(), "1 + ...");
        assert_eq!(history.fetch(3).unwrap(), "1 + ...");
    }

    #[test]
    fn test_load_keeps_long_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        let lines: Vec<String> = (1..=150).map(|i| format!("x{} = {}", i, i)).collect();
        std::fs::write(&path, lines.join("\n") + "\n").unwrap();

        let history = CommandHistory::load(&path).unwrap();
        assert_eq!(history.len(), 150);
        assert_eq!(history.fetch(150).unwrap(), "x1 = 1");
    }
}
