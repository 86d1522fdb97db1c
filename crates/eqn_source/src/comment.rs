//! Line-comment and continuation-marker handling.
//!
//! Both are purely syntactic: a `%` inside a string literal still starts a
//! comment. That false positive is accepted; callers that need the literal
//! text should pass the expression explicitly.

use std::sync::LazyLock;

use regex::Regex;

pub const COMMENT_MARKER: char = '%';
pub const CONTINUATION_MARKER: &str = "...";

// Leftmost match: everything from the first marker on is comment.
static TRAILING_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*%.*$").expect("valid regex literal"));

/// Remove a trailing line comment and the whitespace before it.
///
/// `y = x^2; %comment` → `y = x^2;`
pub fn strip_comment(line: &str) -> String {
    TRAILING_COMMENT.replace(line, "").into_owned()
}

/// If `code` ends with a continuation marker, return the code before it with
/// the whitespace preceding the marker removed.
///
/// `a = 1 + ...` → `Some("a = 1 +")`, `a = 1` → `None`
pub fn strip_continuation(code: &str) -> Option<&str> {
    code.trim_end()
        .strip_suffix(CONTINUATION_MARKER)
        .map(str::trim_end)
}
