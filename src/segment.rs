//! Rule-based text segmentation.
//!
//! Grapheme clusters, words, sentences and line-break opportunities are all
//! found by the same machinery; only the [`RuleSet`] differs.
//!
//! ```text
//! char ── Classifier ──> ClassId            (class.rs)
//!                          │
//!     units: significant char + ignorables   (scanner.rs)
//!                          │
//!     Window (history | candidate | ahead)
//!                          │
//!     ordered rules: first match keeps or breaks   (rule_set.rs)
//!                          │
//!     Boundary { offset, status, rule }
//!                          │
//!     BoundaryCache: adjacent boundaries, safe-point restarts   (cache.rs)
//!                          │
//!     RuleBreakIterator / FilteredBreakIterator   (iterator.rs, filter.rs)
//! ```
//!
//! ## Backward and random access
//!
//! The rules are only ever run forward. A backward step or an arbitrary
//! `following`/`preceding`/`is_boundary` query first finds a *safe point*: an
//! offset where a boundary holds whatever comes before it (after a hard
//! break, or between a pair of classes the rule set declares as always
//! separated). The scan restarts there. Because the scanner's state right
//! after a boundary is nothing but its position, the re-scan yields exactly
//! the boundaries a scan from the start of the text would.
//!
//! ## Rule tables
//!
//! - `grapheme.rs`: extended grapheme clusters.
//! - `word.rs`: words, with status tags for letters, numbers, kana and ideographs.
//! - `sentence.rs`: sentences; `filter.rs` adds abbreviation suppression.
//! - `line.rs`: line-break opportunities, hard breaks tagged separately.
//! - `ascii.rs`: a pattern-defined word approximation for ASCII text.

#[path = "segment/ascii.rs"]
mod ascii;
#[path = "segment/cache.rs"]
mod cache;
#[path = "segment/class.rs"]
mod class;
#[path = "segment/filter.rs"]
mod filter;
#[path = "segment/grapheme.rs"]
mod grapheme;
#[path = "segment/iterator.rs"]
mod iterator;
#[path = "segment/line.rs"]
mod line;
#[path = "segment/rule_set.rs"]
mod rule_set;
#[path = "segment/scanner.rs"]
mod scanner;
#[path = "segment/sentence.rs"]
mod sentence;
#[path = "segment/word.rs"]
mod word;

pub use class::{ClassId, ClassSet, Classifier, PatternClasses};
pub use filter::{FilteredBreakIterator, Suppressions};
pub use iterator::{BreakIterator, Boundaries, DONE, RuleBreakIterator, Segments};
pub use rule_set::{Action, Guard, Rule, RuleSet, RuleSetBuilder, StatusRule};
pub use scanner::Window;

/// Rule-status tags.
///
/// Each category owns a range `[X, X_LIMIT)`. Callers should test ranges,
/// not exact values. The kana range is loosely bounded: a segment mixing kana
/// with other word classes still reports the highest tag among them.
pub mod status {
    /// Word that is none of the other kinds (spaces, punctuation, symbols).
    pub const WORD_NONE: i32 = 0;
    pub const WORD_NONE_LIMIT: i32 = 100;
    pub const WORD_NUMBER: i32 = 100;
    pub const WORD_NUMBER_LIMIT: i32 = 200;
    pub const WORD_LETTER: i32 = 200;
    pub const WORD_LETTER_LIMIT: i32 = 300;
    pub const WORD_KANA: i32 = 300;
    pub const WORD_KANA_LIMIT: i32 = 400;
    pub const WORD_IDEO: i32 = 400;
    pub const WORD_IDEO_LIMIT: i32 = 500;

    /// A line-break opportunity.
    pub const LINE_SOFT: i32 = 0;
    pub const LINE_SOFT_LIMIT: i32 = 100;
    /// A mandatory break after a newline.
    pub const LINE_HARD: i32 = 100;
    pub const LINE_HARD_LIMIT: i32 = 200;

    /// Sentence ended by a terminator (or by the end of the text).
    pub const SENTENCE_TERM: i32 = 0;
    pub const SENTENCE_TERM_LIMIT: i32 = 100;
    /// Sentence ended by a paragraph separator.
    pub const SENTENCE_SEP: i32 = 100;
    pub const SENTENCE_SEP_LIMIT: i32 = 200;
}

#[cfg(test)]
#[path = "segment/tests.rs"]
mod tests;
