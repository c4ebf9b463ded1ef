use thiserror::Error;

/// A parse failure.
///
/// Failures are ordinary values inside the parser; nothing is thrown until a
/// caller decides to. The position is a 0-based byte offset into the input,
/// pointing at the character the failing production could not accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at byte {position}")]
pub struct ParseError {
    /// Human-readable description of what was expected.
    pub message: String,
    /// 0-based byte offset into the input.
    pub position: usize,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    /// Pick the failure closer to the true problem.
    ///
    /// When every alternative of an alternation fails, the deepest failure
    /// (maximal byte position) is the one surfaced to the caller; ties go to
    /// `b`, the failure from the earlier-tried, more specific alternative.
    pub(crate) fn furthest(a: Self, b: Self) -> Self {
        if b.position >= a.position { b } else { a }
    }
}
