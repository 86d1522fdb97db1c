//! Locating "the line above the call".
//!
//! A viewer invoked without an explicit expression shows the statement that
//! ends just above the call site: the previous line of a script, or the
//! previous command at an interactive prompt.

use std::env;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::comment::strip_comment;
use crate::error::{FetchError, LocateError};
use crate::line_source::LineRef;

pub trait CallerLocator {
    fn locate_caller(&self) -> Result<LineRef, LocateError>;
}

/// A call found on physical line `call_line` of a script file.
#[derive(Debug, Clone)]
pub struct ScriptCallLocator {
    pub path: PathBuf,
    pub call_line: usize,
}

impl ScriptCallLocator {
    pub fn new(path: impl Into<PathBuf>, call_line: usize) -> Self {
        Self {
            path: path.into(),
            call_line,
        }
    }
}

impl CallerLocator for ScriptCallLocator {
    fn locate_caller(&self) -> Result<LineRef, LocateError> {
        if self.call_line == 0 {
            return Err(LocateError::NoCallerContext(format!(
                "{} has no line 0",
                self.path.display()
            )));
        }
        Ok(LineRef::file(&self.path, self.call_line - 1))
    }
}

/// A call typed at the interactive prompt: the statement is the entry
/// recorded just before it.
#[derive(Debug, Clone, Copy)]
pub struct HistoryLocator {
    /// Whether a command history log is attached to the caller.
    pub has_history: bool,
}

impl HistoryLocator {
    pub fn new(has_history: bool) -> Self {
        Self { has_history }
    }
}

impl CallerLocator for HistoryLocator {
    fn locate_caller(&self) -> Result<LineRef, LocateError> {
        if !self.has_history {
            return Err(LocateError::NoCallerContext(
                "no command history is attached".to_string(),
            ));
        }
        Ok(LineRef::history(1))
    }
}

/// A call from Rust source, captured with `#[track_caller]`.
///
/// The recorded file path is relative to the directory the crate was built
/// from, so it is resolved against the working directory and its ancestors.
#[derive(Debug, Clone, Copy)]
pub struct CallSiteLocator {
    file: &'static str,
    line: u32,
}

impl CallSiteLocator {
    #[track_caller]
    pub fn here() -> Self {
        let caller = Location::caller();
        Self {
            file: caller.file(),
            line: caller.line(),
        }
    }

    fn resolve_file(&self) -> Option<PathBuf> {
        let recorded = Path::new(self.file);
        if recorded.is_absolute() {
            return recorded.is_file().then(|| recorded.to_path_buf());
        }
        let cwd = env::current_dir().ok()?;
        cwd.ancestors()
            .map(|dir| dir.join(recorded))
            .find(|candidate| candidate.is_file())
    }
}

impl CallerLocator for CallSiteLocator {
    fn locate_caller(&self) -> Result<LineRef, LocateError> {
        let path = self.resolve_file().ok_or_else(|| {
            LocateError::NoCallerContext(format!(
                "source file {} is not reachable from the working directory",
                self.file
            ))
        })?;
        debug!(file = %path.display(), line = self.line, "resolved call site");
        Ok(LineRef::file(path, self.line as usize - 1))
    }
}

/// True when `code` is a bare call of `directive`: `eqn`, `eqn;`, `eqn()`, `eqn();`
pub fn is_call_directive(code: &str, directive: &str) -> bool {
    let code = code.trim();
    let code = code.strip_suffix(';').unwrap_or(code).trim_end();
    let code = code.strip_suffix("()").unwrap_or(code).trim_end();
    code == directive
}

/// 1-based line numbers of every bare `directive` call in a script.
pub fn find_call_sites(path: &Path, directive: &str) -> Result<Vec<usize>, FetchError> {
    let bytes = fs::read(path).map_err(|e| FetchError::NotFound {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let contents = String::from_utf8_lossy(&bytes);

    let sites: Vec<usize> = contents
        .lines()
        .enumerate()
        .filter(|(_, line)| is_call_directive(&strip_comment(line), directive))
        .map(|(i, _)| i + 1)
        .collect();

    debug!(file = %path.display(), count = sites.len(), "found call sites");
    Ok(sites)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_source::SourceId;

    #[test]
    fn test_script_call_points_at_line_above() {
        let locator = ScriptCallLocator::new("demo.m", 7);
        assert_eq!(locator.locate_caller().unwrap(), LineRef::file("demo.m", 6));
    }

    #[test]
    fn test_script_call_on_line_zero_has_no_context() {
        let locator = ScriptCallLocator::new("demo.m", 0);
        assert!(matches!(
            locator.locate_caller(),
            Err(LocateError::NoCallerContext(_))
        ));
    }

    #[test]
    fn test_history_locator_is_previous_entry() {
        let line = HistoryLocator::new(true).locate_caller().unwrap();
        assert_eq!(line.source, SourceId::History);
        assert_eq!(line.index, 1);
    }

    #[test]
    fn test_history_locator_without_log_has_no_context() {
        assert!(matches!(
            HistoryLocator::new(false).locate_caller(),
            Err(LocateError::NoCallerContext(_))
        ));
    }

    #[test]
    fn test_call_directive_forms() {
        for code in ["eqn", "eqn;", "eqn()", "eqn();", "  eqn() ; "] {
            assert!(is_call_directive(code, "eqn"), "{:?}", code);
        }
        for code in ["eqn('x')", "eqnx", "y = eqn", ""] {
            assert!(!is_call_directive(code, "eqn"), "{:?}", code);
        }
    }
}
