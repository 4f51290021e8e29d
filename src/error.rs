//! Error types.
//!
//! Both subsystems report contract violations synchronously. Running off the
//! edge of the text is *not* an error for the break iterators: navigation simply
//! returns `None` (the `DONE` sentinel).

use std::ops::Range;

/// Failures raised by [`CharsTrieBuilder`](crate::CharsTrieBuilder) and by
/// [`CharsTrie`](crate::CharsTrie) state handling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrieError {
    #[error("duplicate key {0:?}")]
    DuplicateKey(String),

    #[error("no (string, value) pairs were added")]
    Empty,

    #[error("cannot add (string, value) pairs after build(); call clear() first")]
    AlreadyBuilt,

    #[error("trie state was saved from a different trie")]
    StateMismatch,

    #[error("serialized trie is malformed: {0}")]
    Malformed(&'static str),
}

/// Failures raised by the break iterators and rule-set construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BreakError {
    #[error("offset {offset} is outside the text range {}..={}", range.start, range.end)]
    OffsetOutOfRange { offset: usize, range: Range<usize> },

    #[error("range {}..{} is invalid for text of length {len}", range.start, range.end)]
    InvalidRange { range: Range<usize>, len: usize },

    #[error("offset {0} does not fall on a character boundary")]
    NotCharBoundary(usize),

    #[error("replacement text does not match the current text")]
    TextMismatch,

    #[error("invalid character class pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },
}
