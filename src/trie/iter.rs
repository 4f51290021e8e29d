//! Depth-first enumeration of a trie's `(string, value)` pairs.

use super::encoding::*;
use std::sync::Arc;

/// One enumerated entry.
///
/// When the enumeration was created with a maximum length and `key` had to be
/// cut at that length, `value` is `-1`. That marker cannot be told apart from
/// a stored value of `-1`; callers that store negative values and truncate
/// must keep that in mind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieEntry {
    pub key: Vec<u16>,
    pub value: i32,
}

impl TrieEntry {
    /// The key as a `String`; unpaired surrogates (possible after truncation)
    /// become U+FFFD.
    pub fn key_string(&self) -> String {
        String::from_utf16_lossy(&self.key)
    }
}

/// Branch-node backtracking frame.
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Position of the next (unit, value) pair to visit.
    pos: usize,
    /// Remaining branch length at `pos`.
    remaining: usize,
    /// Key length at the branch point.
    key_len: usize,
}

/// Iterator over [`TrieEntry`] values, created by [`CharsTrie::entries`](super::CharsTrie::entries).
#[derive(Debug, Clone)]
pub struct Entries {
    units: Arc<[u16]>,
    pos: Option<usize>,
    initial_pos: Option<usize>,
    remaining_match_length: i32,
    initial_remaining_match_length: i32,
    skip_value: bool,
    key: Vec<u16>,
    max_len: usize,
    value: i32,
    stack: Vec<Frame>,
}

impl Entries {
    pub(crate) fn new(units: Arc<[u16]>, pos: Option<usize>, remaining_match_length: i32, max_len: usize) -> Self {
        let mut entries = Self {
            units,
            pos,
            initial_pos: pos,
            remaining_match_length,
            initial_remaining_match_length: remaining_match_length,
            skip_value: false,
            key: Vec::new(),
            max_len,
            value: 0,
            stack: Vec::new(),
        };
        entries.take_pending_match();
        entries
    }

    /// Rewind to the state the enumeration was created with.
    pub fn reset(&mut self) -> &mut Self {
        self.pos = self.initial_pos;
        self.remaining_match_length = self.initial_remaining_match_length;
        self.skip_value = false;
        self.key.clear();
        self.stack.clear();
        self.take_pending_match();
        self
    }

    /// True if [`next`](Iterator::next) would produce another entry.
    pub fn has_next(&self) -> bool {
        self.pos.is_some() || !self.stack.is_empty()
    }

    /// Start from a pending linear-match node: its rest belongs to every key.
    fn take_pending_match(&mut self) {
        let Some(pos) = self.pos else {
            return;
        };
        if self.remaining_match_length < 0 {
            return;
        }
        let mut length = (self.remaining_match_length + 1) as usize;
        if self.max_len > 0 && length > self.max_len {
            // Leaves remaining_match_length >= 0 as the truncation signal.
            length = self.max_len;
        }
        self.key.extend_from_slice(&self.units[pos..pos + length]);
        self.pos = Some(pos + length);
        self.remaining_match_length -= length as i32;
    }

    fn at_max_len(&self) -> bool {
        self.max_len > 0 && self.key.len() == self.max_len
    }

    fn emit(&self) -> TrieEntry {
        TrieEntry { key: self.key.clone(), value: self.value }
    }

    fn truncate_and_stop(&mut self) -> Option<TrieEntry> {
        self.pos = None;
        self.value = -1;
        Some(self.emit())
    }

    /// Descend into a branch: push frames for the unvisited edges, append the
    /// first edge's unit and return its sub-node, or `None` after recording a
    /// final value.
    fn branch_next(&mut self, pos: usize, length: usize) -> Option<usize> {
        let units = Arc::clone(&self.units);
        let mut pos = pos;
        let mut length = length;
        while length > MAX_BRANCH_LINEAR_SUB_NODE_LENGTH {
            pos += 1; // comparison unit
            self.stack.push(Frame {
                pos: skip_delta(&units, pos),
                remaining: length - (length >> 1),
                key_len: self.key.len(),
            });
            length >>= 1;
            pos = jump_by_delta(&units, pos);
        }
        let unit = units[pos];
        pos += 1;
        let lead = units[pos];
        pos += 1;
        let is_final = lead & VALUE_IS_FINAL != 0;
        let lead = lead & 0x7fff;
        let value = read_value(&units, pos, lead);
        pos = skip_value(pos, lead);
        self.stack.push(Frame { pos, remaining: length - 1, key_len: self.key.len() });
        self.key.push(unit);
        if is_final {
            self.pos = None;
            self.value = value;
            None
        } else {
            Some(pos + value as usize)
        }
    }
}

impl Iterator for Entries {
    type Item = TrieEntry;

    fn next(&mut self) -> Option<TrieEntry> {
        let units = Arc::clone(&self.units);
        let mut pos = match self.pos {
            Some(pos) => pos,
            None => {
                // Continue with the next outbound edge of the innermost branch.
                let frame = self.stack.pop()?;
                self.key.truncate(frame.key_len);
                if frame.remaining > 1 {
                    match self.branch_next(frame.pos, frame.remaining) {
                        Some(pos) => pos,
                        None => return Some(self.emit()),
                    }
                } else {
                    self.key.push(units[frame.pos]);
                    frame.pos + 1
                }
            }
        };
        if self.remaining_match_length >= 0 {
            // Started inside a linear-match node longer than max_len.
            return self.truncate_and_stop();
        }
        loop {
            let mut node = units[pos];
            pos += 1;
            if node >= MIN_VALUE_LEAD {
                if self.skip_value {
                    pos = skip_node_value(pos, node);
                    node &= NODE_TYPE_MASK;
                    self.skip_value = false;
                } else {
                    let is_final = node & VALUE_IS_FINAL != 0;
                    self.value = if is_final {
                        read_value(&units, pos, node & 0x7fff)
                    } else {
                        read_node_value(&units, pos, node)
                    };
                    if is_final || self.at_max_len() {
                        self.pos = None;
                    } else {
                        // The value shares its lead unit with the next node;
                        // stay on the lead and skip the value next time.
                        self.pos = Some(pos - 1);
                        self.skip_value = true;
                    }
                    return Some(self.emit());
                }
            }
            if self.at_max_len() {
                return self.truncate_and_stop();
            }
            if node < MIN_LINEAR_MATCH {
                let mut length = node as usize;
                if length == 0 {
                    length = units[pos] as usize;
                    pos += 1;
                }
                match self.branch_next(pos, length + 1) {
                    Some(next) => pos = next,
                    None => return Some(self.emit()),
                }
            } else {
                let length = (node - MIN_LINEAR_MATCH) as usize + 1;
                if self.max_len > 0 && self.key.len() + length > self.max_len {
                    let take = self.max_len - self.key.len();
                    self.key.extend_from_slice(&units[pos..pos + take]);
                    return self.truncate_and_stop();
                }
                self.key.extend_from_slice(&units[pos..pos + length]);
                pos += length;
            }
        }
    }
}
