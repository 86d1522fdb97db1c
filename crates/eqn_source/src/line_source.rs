use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use tracing::trace;

use crate::error::FetchError;

/// Where physical lines come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceId {
    File(PathBuf),
    /// The interactive command history.
    History,
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceId::File(path) => write!(f, "{}", path.display()),
            SourceId::History => write!(f, "<command history>"),
        }
    }
}

/// A 1-based position in a [`SourceId`].
///
/// For files the index is the physical line number. For the history it is
/// the distance from the most recent entry (1 = the entry just typed).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineRef {
    pub source: SourceId,
    pub index: usize,
}

impl LineRef {
    pub fn file(path: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            source: SourceId::File(path.into()),
            index: line,
        }
    }

    pub fn history(distance: usize) -> Self {
        Self {
            source: SourceId::History,
            index: distance,
        }
    }
}

impl fmt::Display for LineRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.index)
    }
}

/// Random access to the physical lines of one source.
pub trait LineSource {
    fn source_id(&self) -> SourceId;

    /// Return line `n` (1-based, in this source's own indexing).
    fn fetch(&self, n: usize) -> Result<String, FetchError>;

    /// Index of the line logically above `n`, or `None` at the edge of the
    /// available context.
    fn preceding(&self, n: usize) -> Option<usize>;

    /// True when the source has nothing recorded at all.
    fn is_empty(&self) -> bool {
        false
    }
}

/// Lines of a text file, re-read on every fetch.
///
/// Each fetch is a bounded sequential scan up to the requested line; the
/// file handle lives only for the duration of that scan.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LineSource for FileSource {
    fn source_id(&self) -> SourceId {
        SourceId::File(self.path.clone())
    }

    fn fetch(&self, n: usize) -> Result<String, FetchError> {
        let file = File::open(&self.path).map_err(|e| FetchError::NotFound {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        let out_of_range = || FetchError::OutOfRange {
            path: self.path.clone(),
            requested: n,
        };
        if n == 0 {
            return Err(out_of_range());
        }

        let bytes = BufReader::new(file)
            .split(b'\n')
            .nth(n - 1)
            .ok_or_else(out_of_range)?
            .map_err(|e| FetchError::NotFound {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        let mut line = String::from_utf8_lossy(&bytes).into_owned();
        if line.ends_with('\r') {
            line.pop();
        }
        trace!(path = %self.path.display(), line = n, "fetched file line");
        Ok(line)
    }

    fn preceding(&self, n: usize) -> Option<usize> {
        (n > 1).then(|| n - 1)
    }
}
