//! The generic forward scan.
//!
//! Starting from a known boundary, the scanner walks *units* (a significant
//! character plus any ignorables folded into it) and asks the rule set about
//! each candidate position between two units:
//!
//! ```text
//!   history (since last boundary)   candidate   lookahead
//!   ... c0  c1                          |       c2  c3 ...
//! ```
//!
//! The history is cleared at every boundary, so a scan started at any true
//! boundary reproduces exactly the boundaries of a scan from the text start.

use super::class::ClassId;
use super::rule_set::{Action, RuleSet};
use std::cell::OnceCell;
use tracing::trace;

/// A significant character and the ignorables folded into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Unit {
    pub start: usize,
    pub end: usize,
    /// Class used by the rules.
    pub class: ClassId,
    /// Raw class of the unit's last character.
    pub last_raw: ClassId,
}

/// A boundary found by a forward scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Boundary {
    pub offset: usize,
    /// Status of the segment that ends here.
    pub status: i32,
    pub rule: &'static str,
}

/// Scan context over `text[start..end]`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scanner<'r, 't> {
    rules: &'r RuleSet,
    text: &'t str,
    start: usize,
    end: usize,
}

impl<'r, 't> Scanner<'r, 't> {
    pub fn new(rules: &'r RuleSet, text: &'t str, start: usize, end: usize) -> Self {
        Self { rules, text, start, end }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        if pos >= self.end { None } else { self.text[pos..self.end].chars().next() }
    }

    fn char_before(&self, pos: usize) -> Option<char> {
        if pos <= self.start { None } else { self.text[self.start..pos].chars().next_back() }
    }

    /// The unit starting at `pos` (a char boundary below `end`).
    pub fn unit_at(&self, pos: usize) -> Unit {
        let rules = self.rules;
        let Some(ch) = self.char_at(pos) else {
            unreachable!("unit_at({pos}) past the end of the scan range");
        };
        let raw = rules.classify(ch);
        let class = if rules.ignorable.has(raw) { rules.orphan.unwrap_or(raw) } else { raw };
        let mut end = pos + ch.len_utf8();
        let mut last_raw = raw;
        if !rules.anchors.has(raw) {
            while let Some(next) = self.char_at(end) {
                let next_raw = rules.classify(next);
                if !rules.ignorable.has(next_raw) {
                    break;
                }
                end += next.len_utf8();
                last_raw = next_raw;
            }
        }
        Unit { start: pos, end, class, last_raw }
    }

    fn units_from(&self, pos: usize) -> impl Iterator<Item = Unit> + '_ {
        let mut pos = pos;
        std::iter::from_fn(move || {
            if pos >= self.end {
                return None;
            }
            let unit = self.unit_at(pos);
            pos = unit.end;
            Some(unit)
        })
    }

    /// The first boundary after `from`, which must itself be a boundary.
    pub fn next_boundary(&self, from: usize) -> Boundary {
        debug_assert!(from < self.end);
        let rules = self.rules;
        let mut history: Vec<ClassId> = Vec::new();
        let mut current = self.unit_at(from);
        loop {
            history.push(current.class);
            if current.end >= self.end {
                return Boundary { offset: self.end, status: rules.status.status(&history), rule: "eot" };
            }
            let next = self.unit_at(current.end);
            let window =
                Window { scanner: self, history: &history, prev_raw: current.last_raw, next, after: OnceCell::new() };
            let (action, rule) = rules.decide(&window);
            trace!(
                rules = rules.name,
                offset = next.start,
                prev = rules.class_name(current.class),
                next = rules.class_name(next.class),
                rule,
                ?action,
                "candidate"
            );
            if action == Action::Break {
                return Boundary { offset: next.start, status: rules.status.status(&history), rule };
            }
            current = next;
        }
    }

    /// True if `pos` is a boundary whatever precedes it.
    pub fn is_safe_point(&self, pos: usize) -> bool {
        if pos <= self.start || pos >= self.end {
            return true;
        }
        match (self.char_before(pos), self.char_at(pos)) {
            (Some(a), Some(b)) => self.rules.is_resync_pair(self.rules.classify(a), self.rules.classify(b)),
            _ => true,
        }
    }

    /// The greatest safe point at or before `pos`.
    pub fn safe_point_before(&self, pos: usize) -> usize {
        let mut pos = pos.min(self.end);
        while !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        while !self.is_safe_point(pos) {
            pos -= self.char_before(pos).map_or(1, char::len_utf8);
        }
        pos
    }

    /// All status tags of the segment `from..to`, both boundaries.
    pub fn segment_tags(&self, from: usize, to: usize) -> Vec<i32> {
        let classes: Vec<ClassId> = self.units_from(from).take_while(|u| u.start < to).map(|u| u.class).collect();
        self.rules.status.tags(&classes)
    }
}

/// What a rule guard can see around a candidate position.
pub struct Window<'a> {
    scanner: &'a Scanner<'a, 'a>,
    history: &'a [ClassId],
    prev_raw: ClassId,
    next: Unit,
    after: OnceCell<Option<ClassId>>,
}

impl<'a> Window<'a> {
    /// Class of the significant unit right before the candidate (`c1`).
    pub fn prev(&self) -> ClassId {
        self.history[self.history.len() - 1]
    }

    /// Class of the significant unit right after the candidate (`c2`).
    pub fn next(&self) -> ClassId {
        self.next.class
    }

    /// `before(1)` is `c1`, `before(2)` is `c0`; `None` past the last boundary.
    pub fn before(&self, n: usize) -> Option<ClassId> {
        self.history.len().checked_sub(n).map(|i| self.history[i])
    }

    /// `after(1)` is `c2`, `after(2)` is `c3`; `None` past the end of text.
    pub fn after(&self, n: usize) -> Option<ClassId> {
        match n {
            0 => None,
            1 => Some(self.next.class),
            2 => *self.after.get_or_init(|| self.ahead().nth(1)),
            _ => self.ahead().nth(n - 1),
        }
    }

    /// Raw class of the character right before the candidate, ignorables included.
    pub fn raw_prev(&self) -> ClassId {
        self.prev_raw
    }

    /// Classes since the last boundary, newest first.
    pub fn back(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.history.iter().rev().copied()
    }

    /// Classes from `c2` onward.
    pub fn ahead(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.scanner.units_from(self.next.start).map(|u| u.class)
    }

    /// Length of the run of classes in `set` ending at `c1`.
    pub fn count_back(&self, set: super::ClassSet) -> usize {
        self.back().take_while(|&c| set.has(c)).count()
    }

    /// First class before `c1`'s run of `skip` classes (`c1` included in the run).
    pub fn back_skipping(&self, skip: super::ClassSet) -> Option<ClassId> {
        self.back().find(|&c| !skip.has(c))
    }
}
