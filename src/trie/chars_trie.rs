//! Read-only cursor over a serialized chars trie.
//!
//! A [`CharsTrie`] is an `(Arc<[u16]>, cursor)` pair: the unit array is shared
//! and immutable, the cursor (`pos`, `remaining_match_length`) is a small value
//! owned by each reader. Cloning a trie copies only the cursor and bumps the
//! reference count, so readers never alias each other's traversal state.
//!
//! Typical lookup:
//!
//! ```text
//! first(u0) ── next(u1) ── ... ── next(un)
//!     │                              │
//!     └─ NoMatch ends the walk        └─ FinalValue / IntermediateValue -> value()
//! ```

use super::encoding::*;
use super::iter::Entries;
use crate::TrieError;
use std::sync::Arc;

/// Outcome of consuming one unit (or inspecting the current position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrieResult {
    /// The input unit(s) did not continue a matching string; the cursor is dead
    /// until [`CharsTrie::reset`].
    NoMatch,
    /// The input continues a matching string but there is no value for the
    /// string so far.
    NoValue,
    /// The string so far has a value and no longer string continues it.
    FinalValue,
    /// The string so far has a value and longer strings continue it.
    IntermediateValue,
}

impl TrieResult {
    /// True for both value-bearing results.
    pub fn has_value(self) -> bool {
        matches!(self, TrieResult::FinalValue | TrieResult::IntermediateValue)
    }

    /// True if more input may continue the match.
    pub fn has_next(self) -> bool {
        matches!(self, TrieResult::NoValue | TrieResult::IntermediateValue)
    }

    /// True if the input consumed so far is (a prefix of) some stored string.
    pub fn matches(self) -> bool {
        self != TrieResult::NoMatch
    }

    fn for_value_lead(lead: u16) -> Self {
        if lead & VALUE_IS_FINAL != 0 { TrieResult::FinalValue } else { TrieResult::IntermediateValue }
    }
}

/// Saved traversal state; see [`CharsTrie::save_state`].
#[derive(Debug, Clone)]
pub struct TrieState {
    units: Arc<[u16]>,
    root: usize,
    pos: Option<usize>,
    remaining_match_length: i32,
}

/// Light-weight, cloneable reader over a serialized chars trie.
#[derive(Debug, Clone)]
pub struct CharsTrie {
    units: Arc<[u16]>,
    root: usize,
    /// `None` once a walk has failed.
    pos: Option<usize>,
    /// Remaining length of a pending linear-match node, minus one; -1 if none.
    remaining_match_length: i32,
}

impl CharsTrie {
    /// Wrap a serialized unit array; the root node is at offset 0.
    ///
    /// An empty array has no root node and is rejected as malformed.
    pub fn from_units(units: impl Into<Arc<[u16]>>) -> Result<Self, TrieError> {
        let units = units.into();
        if units.is_empty() {
            return Err(TrieError::Malformed("empty unit array"));
        }
        Ok(Self { units, root: 0, pos: Some(0), remaining_match_length: -1 })
    }

    /// Deserialize from big-endian bytes (two per unit).
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self, TrieError> {
        if bytes.len() % 2 != 0 {
            return Err(TrieError::Malformed("odd number of bytes"));
        }
        let units: Vec<u16> = bytes.chunks_exact(2).map(|pair| u16::from_be_bytes([pair[0], pair[1]])).collect();
        Self::from_units(units)
    }

    /// The shared serialized form.
    pub fn units(&self) -> &[u16] {
        &self.units
    }

    /// Serialized form as big-endian bytes.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        self.units.iter().flat_map(|u| u.to_be_bytes()).collect()
    }

    /// Return the cursor to the root.
    pub fn reset(&mut self) -> &mut Self {
        self.pos = Some(self.root);
        self.remaining_match_length = -1;
        self
    }

    /// Capture the cursor so it can be restored with [`reset_to_state`](Self::reset_to_state).
    pub fn save_state(&self) -> TrieState {
        TrieState {
            units: Arc::clone(&self.units),
            root: self.root,
            pos: self.pos,
            remaining_match_length: self.remaining_match_length,
        }
    }

    /// Restore a cursor captured from a trie over the same unit array and root.
    pub fn reset_to_state(&mut self, state: &TrieState) -> Result<&mut Self, TrieError> {
        if !Arc::ptr_eq(&self.units, &state.units) || self.root != state.root {
            return Err(TrieError::StateMismatch);
        }
        self.pos = state.pos;
        self.remaining_match_length = state.remaining_match_length;
        Ok(self)
    }

    /// Result for the string consumed so far, without consuming input.
    pub fn current(&self) -> TrieResult {
        let Some(pos) = self.pos else {
            return TrieResult::NoMatch;
        };
        let node = self.units[pos];
        if self.remaining_match_length < 0 && node >= MIN_VALUE_LEAD {
            TrieResult::for_value_lead(node)
        } else {
            TrieResult::NoValue
        }
    }

    /// Reset to the root and consume one unit.
    pub fn first(&mut self, unit: u16) -> TrieResult {
        self.remaining_match_length = -1;
        self.next_impl(self.root, unit)
    }

    /// Reset to the root and consume one code point (two units if supplementary).
    pub fn first_code_point(&mut self, c: char) -> TrieResult {
        let mut buf = [0u16; 2];
        match *c.encode_utf16(&mut buf) {
            [unit] => self.first(unit),
            [lead, trail] => {
                let result = self.first(lead);
                if result.has_next() { self.next(trail) } else { TrieResult::NoMatch }
            }
            _ => unreachable!("a char encodes to one or two UTF-16 units"),
        }
    }

    /// Consume one more unit.
    pub fn next(&mut self, unit: u16) -> TrieResult {
        let Some(mut pos) = self.pos else {
            return TrieResult::NoMatch;
        };
        let mut length = self.remaining_match_length;
        if length >= 0 {
            // Remaining part of a linear-match node.
            if unit == self.units[pos] {
                pos += 1;
                length -= 1;
                self.remaining_match_length = length;
                self.pos = Some(pos);
                let node = self.units[pos];
                return if length < 0 && node >= MIN_VALUE_LEAD {
                    TrieResult::for_value_lead(node)
                } else {
                    TrieResult::NoValue
                };
            }
            self.stop();
            return TrieResult::NoMatch;
        }
        self.next_impl(pos, unit)
    }

    /// Consume one more code point (two units if supplementary).
    pub fn next_code_point(&mut self, c: char) -> TrieResult {
        let mut buf = [0u16; 2];
        match *c.encode_utf16(&mut buf) {
            [unit] => self.next(unit),
            [lead, trail] => {
                let result = self.next(lead);
                if result.has_next() { self.next(trail) } else { TrieResult::NoMatch }
            }
            _ => unreachable!("a char encodes to one or two UTF-16 units"),
        }
    }

    /// Consume `seq[from..to]`, stopping at the first `NoMatch`.
    ///
    /// An empty range returns [`current`](Self::current).
    pub fn next_units(&mut self, seq: &[u16], from: usize, to: usize) -> TrieResult {
        let mut result = self.current();
        for &unit in &seq[from..to] {
            result = self.next(unit);
            if result == TrieResult::NoMatch {
                break;
            }
        }
        result
    }

    /// Consume a whole string as UTF-16.
    pub fn next_str(&mut self, s: &str) -> TrieResult {
        let mut result = self.current();
        for unit in s.encode_utf16() {
            result = self.next(unit);
            if result == TrieResult::NoMatch {
                break;
            }
        }
        result
    }

    /// Value for the string consumed so far.
    ///
    /// Only meaningful right after a result for which [`TrieResult::has_value`]
    /// holds; calling it elsewhere is a contract violation and returns `None`.
    pub fn value(&self) -> Option<i32> {
        let pos = self.pos?;
        if self.remaining_match_length >= 0 {
            return None;
        }
        let lead = self.units[pos];
        if lead < MIN_VALUE_LEAD {
            debug_assert!(false, "value() without a pending value");
            return None;
        }
        Some(if lead & VALUE_IS_FINAL != 0 {
            read_value(&self.units, pos + 1, lead & 0x7fff)
        } else {
            read_node_value(&self.units, pos + 1, lead)
        })
    }

    /// The value shared by every string reachable from here, if there is exactly one.
    ///
    /// Returns `None` when the cursor is dead, when nothing is reachable, or as
    /// soon as two different values are found.
    pub fn unique_value(&self) -> Option<i32> {
        let pos = self.pos?;
        // Skip the rest of a pending linear-match node.
        let start = (pos as i64 + self.remaining_match_length as i64 + 1) as usize;
        UniqueValueSearch::new(&self.units).run(start)
    }

    /// Append every unit that would continue the current match; returns how many.
    pub fn next_chars<E: Extend<u16>>(&self, out: &mut E) -> usize {
        let Some(mut pos) = self.pos else {
            return 0;
        };
        if self.remaining_match_length >= 0 {
            out.extend(Some(self.units[pos]));
            return 1;
        }
        let mut node = self.units[pos];
        pos += 1;
        if node >= MIN_VALUE_LEAD {
            if node & VALUE_IS_FINAL != 0 {
                return 0;
            }
            pos = skip_node_value(pos, node);
            node &= NODE_TYPE_MASK;
        }
        if node < MIN_LINEAR_MATCH {
            let mut length = node as usize;
            if length == 0 {
                length = self.units[pos] as usize;
                pos += 1;
            }
            length += 1;
            self.collect_branch_units(pos, length, out);
            length
        } else {
            // First unit of the linear-match node.
            out.extend(Some(self.units[pos]));
            1
        }
    }

    /// Depth-first enumeration of `(string, value)` pairs reachable from here.
    ///
    /// `max_len` of 0 means unlimited; otherwise strings are truncated to that
    /// many units and truncated entries report value `-1`.
    pub fn entries(&self, max_len: usize) -> Entries {
        Entries::new(Arc::clone(&self.units), self.pos, self.remaining_match_length, max_len)
    }

    fn stop(&mut self) {
        self.pos = None;
    }

    fn next_impl(&mut self, pos: usize, unit: u16) -> TrieResult {
        let units = Arc::clone(&self.units);
        let mut pos = pos;
        let mut node = units[pos];
        pos += 1;
        loop {
            if node < MIN_LINEAR_MATCH {
                return self.branch_next(&units, pos, node as usize, unit);
            } else if node < MIN_VALUE_LEAD {
                // Match the first of length+1 units.
                let length = (node - MIN_LINEAR_MATCH) as i32;
                if unit == units[pos] {
                    pos += 1;
                    self.remaining_match_length = length - 1;
                    self.pos = Some(pos);
                    let next = units[pos];
                    return if length == 0 && next >= MIN_VALUE_LEAD {
                        TrieResult::for_value_lead(next)
                    } else {
                        TrieResult::NoValue
                    };
                }
                break;
            } else if node & VALUE_IS_FINAL != 0 {
                // No further matching units.
                break;
            } else {
                // Skip intermediate value.
                pos = skip_node_value(pos, node);
                node &= NODE_TYPE_MASK;
            }
        }
        self.stop();
        TrieResult::NoMatch
    }

    fn branch_next(&mut self, units: &[u16], pos: usize, length: usize, unit: u16) -> TrieResult {
        let mut pos = pos;
        let mut length = length;
        if length == 0 {
            length = units[pos] as usize;
            pos += 1;
        }
        length += 1;
        // Binary search down to a short linear list.
        while length > MAX_BRANCH_LINEAR_SUB_NODE_LENGTH {
            let compare = units[pos];
            pos += 1;
            if unit < compare {
                length >>= 1;
                pos = jump_by_delta(units, pos);
            } else {
                length -= length >> 1;
                pos = skip_delta(units, pos);
            }
        }
        loop {
            if unit == units[pos] {
                pos += 1;
                let mut node = units[pos];
                let result = if node & VALUE_IS_FINAL != 0 {
                    // Leave the final value for value() to read.
                    TrieResult::FinalValue
                } else {
                    // The non-final value is a jump delta.
                    pos += 1;
                    let delta = read_value(units, pos, node) as usize;
                    pos = skip_value(pos, node) + delta;
                    node = units[pos];
                    if node >= MIN_VALUE_LEAD { TrieResult::for_value_lead(node) } else { TrieResult::NoValue }
                };
                self.pos = Some(pos);
                return result;
            }
            length -= 1;
            pos = skip_value_at(units, pos + 1);
            if length <= 1 {
                break;
            }
        }
        if unit == units[pos] {
            pos += 1;
            self.pos = Some(pos);
            let node = units[pos];
            if node >= MIN_VALUE_LEAD { TrieResult::for_value_lead(node) } else { TrieResult::NoValue }
        } else {
            self.stop();
            TrieResult::NoMatch
        }
    }

    fn collect_branch_units<E: Extend<u16>>(&self, pos: usize, length: usize, out: &mut E) {
        let mut pos = pos;
        let mut length = length;
        // Recursion depth is bounded by log2 of the fan-out.
        while length > MAX_BRANCH_LINEAR_SUB_NODE_LENGTH {
            pos += 1; // comparison unit
            self.collect_branch_units(jump_by_delta(&self.units, pos), length >> 1, out);
            length -= length >> 1;
            pos = skip_delta(&self.units, pos);
        }
        loop {
            out.extend(Some(self.units[pos]));
            pos = skip_value_at(&self.units, pos + 1);
            length -= 1;
            if length <= 1 {
                break;
            }
        }
        out.extend(Some(self.units[pos]));
    }
}

/// Explicit-stack search behind [`CharsTrie::unique_value`].
struct UniqueValueSearch<'a> {
    units: &'a [u16],
    found: Option<i32>,
}

enum Pending {
    Node(usize),
    Branch(usize, usize),
}

impl<'a> UniqueValueSearch<'a> {
    fn new(units: &'a [u16]) -> Self {
        Self { units, found: None }
    }

    /// Record `value`; false as soon as it differs from an earlier one.
    fn accept(&mut self, value: i32) -> bool {
        match self.found {
            Some(found) => found == value,
            None => {
                self.found = Some(value);
                true
            }
        }
    }

    fn run(mut self, start: usize) -> Option<i32> {
        let units = self.units;
        let mut stack = vec![Pending::Node(start)];
        while let Some(item) = stack.pop() {
            match item {
                Pending::Node(mut pos) => {
                    let mut node = units[pos];
                    pos += 1;
                    loop {
                        if node < MIN_LINEAR_MATCH {
                            let mut length = node as usize;
                            if length == 0 {
                                length = units[pos] as usize;
                                pos += 1;
                            }
                            stack.push(Pending::Branch(pos, length + 1));
                            break;
                        } else if node < MIN_VALUE_LEAD {
                            // Ignore the match units.
                            pos += (node - MIN_LINEAR_MATCH) as usize + 1;
                            node = units[pos];
                            pos += 1;
                        } else {
                            let is_final = node & VALUE_IS_FINAL != 0;
                            let value = if is_final {
                                read_value(units, pos, node & 0x7fff)
                            } else {
                                read_node_value(units, pos, node)
                            };
                            if !self.accept(value) {
                                return None;
                            }
                            if is_final {
                                break;
                            }
                            pos = skip_node_value(pos, node);
                            node &= NODE_TYPE_MASK;
                        }
                    }
                }
                Pending::Branch(mut pos, mut length) => {
                    while length > MAX_BRANCH_LINEAR_SUB_NODE_LENGTH {
                        pos += 1; // comparison unit
                        stack.push(Pending::Branch(jump_by_delta(units, pos), length >> 1));
                        length -= length >> 1;
                        pos = skip_delta(units, pos);
                    }
                    loop {
                        pos += 1; // comparison unit
                        let lead = units[pos];
                        pos += 1;
                        let is_final = lead & VALUE_IS_FINAL != 0;
                        let lead = lead & 0x7fff;
                        let value = read_value(units, pos, lead);
                        pos = skip_value(pos, lead);
                        if is_final {
                            if !self.accept(value) {
                                return None;
                            }
                        } else {
                            stack.push(Pending::Node(pos + value as usize));
                        }
                        length -= 1;
                        if length <= 1 {
                            break;
                        }
                    }
                    // The last unit's sub-node follows directly.
                    stack.push(Pending::Node(pos + 1));
                }
            }
        }
        self.found
    }
}
