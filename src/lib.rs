//! Rule-based text segmentation over a compact trie.
//!
//! Two building blocks:
//!
//! - [`trie`]: a serialized string → integer trie over UTF-16 units
//!   ([`CharsTrie`], [`CharsTrieBuilder`]), readable in place and shareable
//!   between any number of cursors.
//! - [`segment`]: break iterators that find grapheme cluster, word, sentence
//!   and line-break boundaries by running an ordered adjacency rule table over
//!   classified characters ([`RuleSet`], [`RuleBreakIterator`]). Sentence
//!   breaks after abbreviations can be suppressed with a trie of reversed
//!   abbreviations ([`FilteredBreakIterator`]).
//!
//! For one-off calls, [`segment()`] and [`segment_with`] return owned segments.
//!
//! ```
//! use ruleseg::{BreakIterator, RuleBreakIterator, RuleSet};
//!
//! let text = "Isn't it? 2.25";
//! let mut it = RuleBreakIterator::new(RuleSet::word(), text);
//! let mut words = Vec::new();
//! let mut start = it.first();
//! while let Some(end) = it.next() {
//!     words.push(&text[start..end]);
//!     start = end;
//! }
//! assert_eq!(words, ["Isn't", " ", "it", "?", " ", "2.25"]);
//! ```

use std::ops::Range;

#[macro_use]
mod macros;
mod api;
mod error;
pub mod segment;
pub mod trie;

#[cfg(test)]
mod monkey;

pub use api::{
    Options, SegmentDetails, SegmentResult, SegmentResultVerbose, Span, segment, segment_verbose_with, segment_with,
};
pub use error::{BreakError, TrieError};
pub use segment::{
    BreakIterator, ClassId, ClassSet, Classifier, FilteredBreakIterator, RuleBreakIterator, RuleSet, Suppressions,
    Window, status,
};
pub use trie::{BuildOption, CharsTrie, CharsTrieBuilder, Entries, TrieEntry, TrieResult, TrieState};

/// A piece of text between two consecutive boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'t> {
    pub text: &'t str,
    /// Byte range in the iterator's text.
    pub range: Range<usize>,
    /// Rule-status tag of the segment (see [`status`]).
    pub status: i32,
    /// Rule that placed the boundary ending the segment.
    pub rule: &'static str,
}

/// The built-in rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SegmentKind {
    Grapheme,
    #[default]
    Word,
    Sentence,
    Line,
    AsciiWord,
}

impl SegmentKind {
    pub fn rule_set(self) -> &'static RuleSet {
        match self {
            SegmentKind::Grapheme => RuleSet::grapheme(),
            SegmentKind::Word => RuleSet::word(),
            SegmentKind::Sentence => RuleSet::sentence(),
            SegmentKind::Line => RuleSet::line(),
            SegmentKind::AsciiWord => RuleSet::ascii_word(),
        }
    }

    pub fn name(self) -> &'static str {
        self.rule_set().name()
    }

    /// Parse a kind by rule-set name (`"grapheme"`, `"word"`, `"sentence"`,
    /// `"line"`, `"ascii-word"`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "grapheme" => Some(SegmentKind::Grapheme),
            "word" => Some(SegmentKind::Word),
            "sentence" => Some(SegmentKind::Sentence),
            "line" => Some(SegmentKind::Line),
            "ascii-word" | "ascii" => Some(SegmentKind::AsciiWord),
            _ => None,
        }
    }
}
