//! Window of consecutive known boundaries.
//!
//! The cache always holds a run of *adjacent* boundaries: no boundary exists
//! between two neighbouring entries. It grows forward by scanning from its last
//! entry and backward by restarting at the nearest safe point before its first
//! entry and scanning up to it. Far jumps reseed the cache at a safe point.
//!
//! Forward iteration costs one rule scan per boundary. A backward step or a
//! random-access query costs the distance back to the nearest safe point plus
//! the re-scan from there.

use super::scanner::Scanner;
use std::collections::VecDeque;
use tracing::debug;

const CAPACITY: usize = 256;
/// Jumps farther than this (in bytes) reseed instead of walking the cache.
const RESEED_DISTANCE: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Entry {
    pub offset: usize,
    /// Status of the segment ending here; unknown for a reseed point.
    pub status: Option<i32>,
    pub rule: Option<&'static str>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct BoundaryCache {
    entries: VecDeque<Entry>,
}

impl BoundaryCache {
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, i: usize) -> Entry {
        self.entries[i]
    }

    /// Index of the last entry at or before `offset`; the cache must cover it.
    pub fn index_le(&self, offset: usize) -> usize {
        let i = self.entries.partition_point(|e| e.offset <= offset);
        debug_assert!(i > 0, "offset {offset} below the cached range");
        i.saturating_sub(1)
    }

    /// Make the cache cover `offset` and return the index of the last entry at
    /// or before it.
    pub fn locate(&mut self, scanner: &Scanner<'_, '_>, offset: usize) -> usize {
        match (self.entries.front(), self.entries.back()) {
            (Some(front), Some(back)) => {
                let (front, back) = (front.offset, back.offset);
                if offset < front {
                    if front - offset > RESEED_DISTANCE {
                        self.reseed(scanner, offset);
                    } else {
                        while self.entries[0].offset > offset {
                            self.extend_back(scanner);
                        }
                    }
                } else if offset > back && offset - back > RESEED_DISTANCE {
                    self.reseed(scanner, offset);
                }
            }
            _ => self.reseed(scanner, offset),
        }
        while self.entries.back().is_some_and(|e| e.offset < offset) {
            if !self.extend_forward(scanner) {
                break;
            }
        }
        self.index_le(offset)
    }

    fn reseed(&mut self, scanner: &Scanner<'_, '_>, offset: usize) {
        let safe = scanner.safe_point_before(offset);
        debug!(offset, safe, "reseeding boundary cache");
        self.entries.clear();
        let at_start = safe == scanner.start();
        self.entries.push_back(Entry {
            offset: safe,
            status: at_start.then_some(0),
            rule: at_start.then_some("sot"),
        });
    }

    /// Append the boundary after the last entry; false at the end of text.
    pub fn extend_forward(&mut self, scanner: &Scanner<'_, '_>) -> bool {
        let Some(back) = self.entries.back() else {
            return false;
        };
        if back.offset >= scanner.end() {
            return false;
        }
        let b = scanner.next_boundary(back.offset);
        self.entries.push_back(Entry { offset: b.offset, status: Some(b.status), rule: Some(b.rule) });
        if self.entries.len() > CAPACITY {
            self.entries.pop_front();
        }
        true
    }

    /// Prepend the boundaries between the nearest safe point and the first
    /// entry, filling in the first entry's status; false at the text start.
    pub fn extend_back(&mut self, scanner: &Scanner<'_, '_>) -> bool {
        let Some(&front) = self.entries.front() else {
            return false;
        };
        if front.offset <= scanner.start() {
            return false;
        }
        let safe = scanner.safe_point_before(front.offset - 1);
        let at_start = safe == scanner.start();
        let mut found = vec![Entry { offset: safe, status: at_start.then_some(0), rule: at_start.then_some("sot") }];
        let mut at = safe;
        loop {
            let b = scanner.next_boundary(at);
            if b.offset >= front.offset {
                debug_assert_eq!(b.offset, front.offset, "re-scan from {safe} overshot a known boundary");
                let first = &mut self.entries[0];
                if first.status.is_none() {
                    first.status = Some(b.status);
                    first.rule = Some(b.rule);
                }
                break;
            }
            found.push(Entry { offset: b.offset, status: Some(b.status), rule: Some(b.rule) });
            at = b.offset;
        }
        debug!(safe, front = front.offset, added = found.len(), "extended boundary cache backward");
        let keep = found.len().min(CAPACITY / 2);
        for entry in found.into_iter().rev().take(keep) {
            self.entries.push_front(entry);
        }
        while self.entries.len() > CAPACITY {
            self.entries.pop_back();
        }
        true
    }
}
