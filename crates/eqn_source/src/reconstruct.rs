use std::fmt;

use tracing::{debug, trace};

use crate::comment::{strip_comment, strip_continuation};
use crate::error::ReconstructError;
use crate::line_source::{LineSource, SourceId};

/// One logical statement assembled from one or more physical lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalExpression {
    /// Comment-free code with continuation lines joined, no separator inserted.
    pub text: String,
    pub source: SourceId,
    /// Index the reconstruction started from (the line ending the statement).
    pub terminal_line: usize,
    /// Number of physical lines merged into `text`.
    pub physical_lines: usize,
}

impl LogicalExpression {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for LogicalExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Rebuild the logical expression that ends at line `start` of `source`.
///
/// The start line is stripped of its trailing comment. Lines logically above
/// it are merged while they end with a continuation marker; the first line
/// that does not continue (or the edge of the source) ends the walk.
pub fn reconstruct(
    source: &dyn LineSource,
    start: usize,
) -> Result<LogicalExpression, ReconstructError> {
    if start >= 1 && source.is_empty() {
        return Err(ReconstructError::NoPrecedingContext);
    }

    let raw = source.fetch(start)?;
    let terminal = strip_comment(&raw);
    let terminal = terminal.trim();
    let mut text = strip_continuation(terminal).unwrap_or(terminal).to_string();

    let mut cursor = start;
    let mut physical_lines = 1;
    while let Some(above) = source.preceding(cursor) {
        let neighbor = match source.fetch(above) {
            Ok(line) => line,
            Err(e) => {
                trace!(line = above, error = %e, "no more context above");
                break;
            }
        };

        let candidate = strip_comment(&neighbor);
        let Some(continued) = strip_continuation(candidate.trim()) else {
            break;
        };

        trace!(line = above, text = continued, "merging continuation line");
        text.insert_str(0, continued);
        cursor = above;
        physical_lines += 1;
    }

    debug!(
        source = %source.source_id(),
        start,
        physical_lines,
        expression = %text,
        "reconstructed logical expression"
    );

    Ok(LogicalExpression {
        text,
        source: source.source_id(),
        terminal_line: start,
        physical_lines,
    })
}
