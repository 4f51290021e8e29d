//! Sentence-break suppression after known abbreviations.
//!
//! Abbreviations are stored reversed in a [`CharsTrie`]; at each candidate
//! sentence boundary the text before it (trailing spaces and tabs skipped) is
//! walked backwards through the trie. Line and paragraph separators are not
//! skipped, so a hard break after an abbreviation stays. A full match that starts at a word
//! edge removes the boundary.

use super::iterator::{BreakIterator, RuleBreakIterator};
use crate::trie::{BuildOption, CharsTrie, CharsTrieBuilder};
use crate::{BreakError, TrieError};
use once_cell::sync::Lazy;
use std::ops::Range;
use tracing::trace;

const ENGLISH: &[&str] = &[
    "Mr.", "Mrs.", "Ms.", "Mx.", "Dr.", "Prof.", "Sr.", "Jr.", "St.", "Mt.", "Rev.", "Gen.", "Sgt.", "Capt.", "Lt.",
    "Col.", "Gov.", "Sen.", "Rep.", "Inc.", "Ltd.", "Co.", "Corp.", "Bros.", "No.", "Nos.", "Vol.", "vs.", "etc.",
    "e.g.", "i.e.", "cf.", "al.", "approx.", "Jan.", "Feb.", "Mar.", "Apr.", "Jun.", "Jul.", "Aug.", "Sep.",
    "Sept.", "Oct.", "Nov.", "Dec.", "U.S.", "U.K.", "Ph.D.", "a.m.", "p.m.",
];

static ENGLISH_SUPPRESSIONS: Lazy<Suppressions> =
    Lazy::new(|| Suppressions::new(ENGLISH.iter().copied()).expect("built-in abbreviations are unique"));

/// A set of abbreviations after which sentence breaks are suppressed.
#[derive(Debug, Clone)]
pub struct Suppressions {
    reversed: CharsTrie,
    len: usize,
}

impl Suppressions {
    pub fn new<'a>(abbreviations: impl IntoIterator<Item = &'a str>) -> Result<Self, TrieError> {
        let mut builder = CharsTrieBuilder::new();
        for abbreviation in abbreviations {
            let reversed: String = abbreviation.chars().rev().collect();
            builder.add(&reversed, 1)?;
        }
        let len = builder.len();
        Ok(Self { reversed: builder.build(BuildOption::Small)?, len })
    }

    /// Common English titles, month names and Latin abbreviations.
    pub fn english() -> &'static Suppressions {
        &ENGLISH_SUPPRESSIONS
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if `text[..offset]` (ignoring trailing spaces and tabs) ends with
    /// an abbreviation that starts at `start` or after a non-letter.
    fn suppresses(&self, text: &str, start: usize, offset: usize) -> bool {
        let before = text[start..offset].trim_end_matches([' ', '\t']);
        let mut trie = self.reversed.clone();
        trie.reset();
        let mut matched = false;
        let mut chars = before.char_indices().rev().peekable();
        while let Some((_, ch)) = chars.next() {
            let result = trie.next_code_point(ch);
            if !result.matches() {
                break;
            }
            if result.has_value() {
                let at_word_edge = chars.peek().is_none_or(|&(_, prev)| !prev.is_alphabetic());
                if at_word_edge {
                    matched = true;
                    break;
                }
            }
        }
        matched
    }
}

/// Sentence iterator that skips boundaries right after abbreviations.
#[derive(Debug, Clone)]
pub struct FilteredBreakIterator<'r, 't> {
    inner: RuleBreakIterator<'r, 't>,
    suppressions: &'r Suppressions,
}

impl<'r, 't> FilteredBreakIterator<'r, 't> {
    pub fn new(inner: RuleBreakIterator<'r, 't>, suppressions: &'r Suppressions) -> Self {
        Self { inner, suppressions }
    }

    pub fn inner(&self) -> &RuleBreakIterator<'r, 't> {
        &self.inner
    }

    /// Rule that placed the boundary at the current position.
    pub fn rule_name(&mut self) -> Option<&'static str> {
        self.inner.rule_name()
    }

    fn suppressed(&self, offset: usize) -> bool {
        let range = self.inner.range();
        if offset <= range.start || offset >= range.end {
            return false;
        }
        let hit = self.suppressions.suppresses(self.inner.text(), range.start, offset);
        if hit {
            trace!(offset, "sentence break suppressed");
        }
        hit
    }

    fn skip_forward(&mut self, found: Option<usize>) -> Option<usize> {
        let mut found = found;
        while let Some(offset) = found {
            if !self.suppressed(offset) {
                break;
            }
            found = self.inner.next();
        }
        found
    }

    fn skip_backward(&mut self, found: Option<usize>) -> Option<usize> {
        let mut found = found;
        while let Some(offset) = found {
            if !self.suppressed(offset) {
                break;
            }
            found = self.inner.previous();
        }
        found
    }
}

impl<'t> BreakIterator<'t> for FilteredBreakIterator<'_, 't> {
    fn text(&self) -> &'t str {
        self.inner.text()
    }

    fn range(&self) -> Range<usize> {
        self.inner.range()
    }

    fn set_text(&mut self, text: &'t str) {
        self.inner.set_text(text);
    }

    fn first(&mut self) -> usize {
        self.inner.first()
    }

    fn last(&mut self) -> usize {
        self.inner.last()
    }

    fn next(&mut self) -> Option<usize> {
        let found = self.inner.next();
        self.skip_forward(found)
    }

    fn previous(&mut self) -> Option<usize> {
        let found = self.inner.previous();
        self.skip_backward(found)
    }

    fn following(&mut self, offset: usize) -> Result<Option<usize>, BreakError> {
        let found = self.inner.following(offset)?;
        Ok(self.skip_forward(found))
    }

    fn preceding(&mut self, offset: usize) -> Result<Option<usize>, BreakError> {
        let found = self.inner.preceding(offset)?;
        Ok(self.skip_backward(found))
    }

    fn is_boundary(&mut self, offset: usize) -> Result<bool, BreakError> {
        if !self.inner.is_boundary(offset)? {
            // The inner iterator now sits on the following boundary.
            let found = Some(self.inner.current());
            self.skip_forward(found);
            return Ok(false);
        }
        if self.suppressed(offset) {
            let found = self.inner.next();
            self.skip_forward(found);
            return Ok(false);
        }
        Ok(true)
    }

    fn current(&self) -> usize {
        self.inner.current()
    }

    fn rule_status(&mut self) -> i32 {
        self.inner.rule_status()
    }

    fn rule_status_vec(&mut self) -> Vec<i32> {
        self.inner.rule_status_vec()
    }
}
