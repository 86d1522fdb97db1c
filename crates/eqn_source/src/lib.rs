//! Line sources and logical-expression reconstruction.
//!
//! A [`LineSource`] hands out physical lines from a script file or from the
//! interactive command history. [`reconstruct`] strips `%` comments and
//! merges `...` continuation lines into the single logical expression that
//! ends at a given line.

pub mod comment;
pub mod error;
pub mod history;
pub mod line_source;
pub mod locate;
pub mod reconstruct;

pub use comment::{strip_comment, strip_continuation, COMMENT_MARKER, CONTINUATION_MARKER};
pub use error::{FetchError, LocateError, ReconstructError};
pub use history::{CommandHistory, HistoryError};
pub use line_source::{FileSource, LineRef, LineSource, SourceId};
pub use locate::{
    find_call_sites, is_call_directive, CallSiteLocator, CallerLocator, HistoryLocator,
    ScriptCallLocator,
};
pub use reconstruct::{reconstruct, LogicalExpression};
