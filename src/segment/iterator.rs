//! Break iterators.

use super::cache::{BoundaryCache, Entry};
use super::rule_set::RuleSet;
use super::scanner::Scanner;
use crate::{BreakError, Segment};
use std::ops::Range;

/// Integer form of "no boundary in that direction", for callers that store
/// positions as signed integers. The Rust API returns `None` instead.
pub const DONE: i64 = -1;

/// Navigation over the boundaries of a text.
///
/// Every method agrees on one boundary set: repeated [`next`](Self::next) from
/// [`first`](Self::first), repeated [`previous`](Self::previous) from
/// [`last`](Self::last), [`following`](Self::following),
/// [`preceding`](Self::preceding) and [`is_boundary`](Self::is_boundary) all
/// report the same offsets. The start and end of the text are always
/// boundaries. Running off either edge returns `None`; offsets outside the text
/// are errors.
pub trait BreakIterator<'t> {
    /// The full text the iterator was given.
    fn text(&self) -> &'t str;

    /// Byte range of the text being segmented.
    fn range(&self) -> Range<usize>;

    /// Replace the text; the position moves to its start.
    fn set_text(&mut self, text: &'t str);

    fn first(&mut self) -> usize;

    fn last(&mut self) -> usize;

    /// Boundary after the current position.
    fn next(&mut self) -> Option<usize>;

    /// Boundary before the current position.
    fn previous(&mut self) -> Option<usize>;

    /// First boundary strictly after `offset`.
    fn following(&mut self, offset: usize) -> Result<Option<usize>, BreakError>;

    /// Last boundary strictly before `offset`.
    fn preceding(&mut self, offset: usize) -> Result<Option<usize>, BreakError>;

    /// Whether `offset` is a boundary. Afterwards the position is `offset` if it
    /// is one, otherwise the following boundary.
    fn is_boundary(&mut self, offset: usize) -> Result<bool, BreakError>;

    fn current(&self) -> usize;

    /// Status tag of the segment ending at the current position (0 at the start).
    fn rule_status(&mut self) -> i32;

    /// Every status tag of that segment, ascending.
    fn rule_status_vec(&mut self) -> Vec<i32>;

    /// Move `n` boundaries forward (or back, if negative). If any step runs off
    /// the text the position is left unchanged and `None` is returned.
    fn next_by(&mut self, n: i32) -> Option<usize> {
        let start = self.current();
        let mut result = Some(start);
        for _ in 0..n.unsigned_abs() {
            result = if n > 0 { self.next() } else { self.previous() };
            if result.is_none() {
                break;
            }
        }
        if result.is_none() {
            // `start` is a boundary, so this only restores the position.
            let _ = self.is_boundary(start);
        }
        result
    }
}

/// Rule-driven break iterator over borrowed text.
///
/// Cloning copies the position and boundary cache and shares the rules.
#[derive(Debug, Clone)]
pub struct RuleBreakIterator<'r, 't> {
    rules: &'r RuleSet,
    text: &'t str,
    start: usize,
    end: usize,
    position: usize,
    cache: BoundaryCache,
}

impl<'r, 't> RuleBreakIterator<'r, 't> {
    pub fn new(rules: &'r RuleSet, text: &'t str) -> Self {
        Self { rules, text, start: 0, end: text.len(), position: 0, cache: BoundaryCache::default() }
    }

    pub fn rules(&self) -> &'r RuleSet {
        self.rules
    }

    /// Segment only `text[range]`; the range must lie on char boundaries.
    pub fn set_text_range(&mut self, text: &'t str, range: Range<usize>) -> Result<(), BreakError> {
        if range.start > range.end || range.end > text.len() {
            return Err(BreakError::InvalidRange { range, len: text.len() });
        }
        for offset in [range.start, range.end] {
            if !text.is_char_boundary(offset) {
                return Err(BreakError::NotCharBoundary(offset));
            }
        }
        self.text = text;
        self.start = range.start;
        self.end = range.end;
        self.reset();
        Ok(())
    }

    /// Swap in a text with the same content (for example after the owner moved
    /// it), keeping the position and cached boundaries.
    pub fn refresh_text(&mut self, text: &'t str) -> Result<(), BreakError> {
        if text != self.text {
            return Err(BreakError::TextMismatch);
        }
        self.text = text;
        Ok(())
    }

    /// Back to the state right after the text was set.
    pub fn reset(&mut self) {
        self.position = self.start;
        self.cache.clear();
    }

    /// Name of the rule that produced the boundary at the current position.
    pub fn rule_name(&mut self) -> Option<&'static str> {
        if self.position == self.start {
            return Some("sot");
        }
        self.entry_at_position().rule
    }

    /// Every boundary, from the start of the range.
    pub fn boundaries(&self) -> Boundaries<'r, 't> {
        let mut iter = self.clone();
        iter.reset();
        Boundaries { iter, started: false }
    }

    /// Consecutive segments with their status tags.
    pub fn segments(&self) -> Segments<'r, 't> {
        let mut iter = self.clone();
        iter.reset();
        Segments { iter }
    }

    fn scanner(&self) -> Scanner<'r, 't> {
        Scanner::new(self.rules, self.text, self.start, self.end)
    }

    fn check_offset(&self, offset: usize) -> Result<(), BreakError> {
        if offset < self.start || offset > self.end {
            return Err(BreakError::OffsetOutOfRange { offset, range: self.start..self.end });
        }
        Ok(())
    }

    /// First cached boundary strictly after `offset`.
    fn entry_after(&mut self, offset: usize) -> Option<Entry> {
        let scanner = self.scanner();
        let mut i = self.cache.locate(&scanner, offset);
        if i + 1 >= self.cache.len() {
            if !self.cache.extend_forward(&scanner) {
                return None;
            }
            i = self.cache.index_le(offset);
        }
        Some(self.cache.get(i + 1))
    }

    /// Last boundary strictly before `offset`.
    fn entry_before(&mut self, offset: usize) -> Option<Entry> {
        let scanner = self.scanner();
        let mut i = self.cache.locate(&scanner, offset);
        if self.cache.get(i).offset < offset {
            return Some(self.cache.get(i));
        }
        if i == 0 {
            if !self.cache.extend_back(&scanner) {
                return None;
            }
            i = self.cache.index_le(offset);
        }
        Some(self.cache.get(i - 1))
    }

    /// Cache entry for the current position with its status filled in.
    fn entry_at_position(&mut self) -> Entry {
        let scanner = self.scanner();
        let mut i = self.cache.locate(&scanner, self.position);
        debug_assert_eq!(self.cache.get(i).offset, self.position);
        if self.cache.get(i).status.is_none() {
            self.cache.extend_back(&scanner);
            i = self.cache.index_le(self.position);
        }
        self.cache.get(i)
    }
}

impl<'t> BreakIterator<'t> for RuleBreakIterator<'_, 't> {
    fn text(&self) -> &'t str {
        self.text
    }

    fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    fn set_text(&mut self, text: &'t str) {
        self.text = text;
        self.start = 0;
        self.end = text.len();
        self.reset();
    }

    fn first(&mut self) -> usize {
        self.position = self.start;
        self.start
    }

    fn last(&mut self) -> usize {
        self.position = self.end;
        self.end
    }

    fn next(&mut self) -> Option<usize> {
        if self.position >= self.end {
            return None;
        }
        let entry = self.entry_after(self.position)?;
        self.position = entry.offset;
        Some(entry.offset)
    }

    fn previous(&mut self) -> Option<usize> {
        if self.position <= self.start {
            return None;
        }
        let entry = self.entry_before(self.position)?;
        self.position = entry.offset;
        Some(entry.offset)
    }

    fn following(&mut self, offset: usize) -> Result<Option<usize>, BreakError> {
        self.check_offset(offset)?;
        if offset >= self.end {
            self.position = self.end;
            return Ok(None);
        }
        Ok(self.entry_after(offset).map(|entry| {
            self.position = entry.offset;
            entry.offset
        }))
    }

    fn preceding(&mut self, offset: usize) -> Result<Option<usize>, BreakError> {
        self.check_offset(offset)?;
        if offset <= self.start {
            self.position = self.start;
            return Ok(None);
        }
        Ok(self.entry_before(offset).map(|entry| {
            self.position = entry.offset;
            entry.offset
        }))
    }

    fn is_boundary(&mut self, offset: usize) -> Result<bool, BreakError> {
        self.check_offset(offset)?;
        if offset == self.start || offset == self.end {
            self.position = offset;
            return Ok(true);
        }
        if self.text.is_char_boundary(offset) {
            let scanner = self.scanner();
            let i = self.cache.locate(&scanner, offset);
            if self.cache.get(i).offset == offset {
                self.position = offset;
                return Ok(true);
            }
        }
        self.position = self.entry_after(offset).map_or(self.end, |entry| entry.offset);
        Ok(false)
    }

    fn current(&self) -> usize {
        self.position
    }

    fn rule_status(&mut self) -> i32 {
        if self.position == self.start {
            return 0;
        }
        self.entry_at_position().status.unwrap_or(0)
    }

    fn rule_status_vec(&mut self) -> Vec<i32> {
        if self.position == self.start {
            return vec![0];
        }
        let position = self.position;
        match self.entry_before(position) {
            Some(prev) => self.scanner().segment_tags(prev.offset, position),
            None => vec![0],
        }
    }
}

impl PartialEq for RuleBreakIterator<'_, '_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.rules, other.rules)
            && self.text == other.text
            && self.start == other.start
            && self.end == other.end
            && self.position == other.position
    }
}

impl Eq for RuleBreakIterator<'_, '_> {}

/// Iterator over boundary offsets, start and end included.
#[derive(Debug, Clone)]
pub struct Boundaries<'r, 't> {
    iter: RuleBreakIterator<'r, 't>,
    started: bool,
}

impl Iterator for Boundaries<'_, '_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if !self.started {
            self.started = true;
            return Some(self.iter.first());
        }
        BreakIterator::next(&mut self.iter)
    }
}

/// Iterator over segments between consecutive boundaries.
#[derive(Debug, Clone)]
pub struct Segments<'r, 't> {
    iter: RuleBreakIterator<'r, 't>,
}

impl<'t> Iterator for Segments<'_, 't> {
    type Item = Segment<'t>;

    fn next(&mut self) -> Option<Segment<'t>> {
        let start = self.iter.current();
        let end = BreakIterator::next(&mut self.iter)?;
        Some(Segment {
            text: &self.iter.text[start..end],
            range: start..end,
            status: self.iter.rule_status(),
            rule: self.iter.rule_name().unwrap_or("any"),
        })
    }
}
