//! Builds serialized chars tries from `(string, value)` pairs.
//!
//! The sorted entries are turned into a node graph (linear-match runs, branch
//! heads, list branches and binary split branches), optionally hash-consing
//! identical sub-graphs, and the graph is then written back-to-front so every
//! jump is a forward delta.

use super::chars_trie::CharsTrie;
use super::encoding::*;
use crate::TrieError;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

/// Trade-off between build speed and output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildOption {
    /// Only identical final values are shared.
    Fast,
    /// Identical sub-tries are shared; slower, usually smaller.
    #[default]
    Small,
}

type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Edge {
    /// The only string through this unit ends right after it.
    Final(i32),
    Node(NodeId),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum NodeKind {
    FinalValue(i32),
    LinearMatch { units: Vec<u16>, value: Option<i32>, next: NodeId },
    BranchHead { length: usize, value: Option<i32>, next: NodeId },
    ListBranch { edges: Vec<(u16, Edge)> },
    SplitBranch { unit: u16, less_than: NodeId, greater_or_equal: NodeId },
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    /// 0: unmarked; < 0: right-edge number; > 0: written at this offset from the end.
    offset: i64,
    first_edge_number: i64,
}

/// Accumulates unique `(string, value)` pairs and compiles them into a [`CharsTrie`].
///
/// ```
/// use ruleseg::{BuildOption, CharsTrieBuilder, TrieResult};
///
/// let mut builder = CharsTrieBuilder::new();
/// builder.add("ab", 1)?.add("abc", 2)?;
/// let mut trie = builder.build(BuildOption::Small)?;
/// assert_eq!(trie.next_str("ab"), TrieResult::IntermediateValue);
/// assert_eq!(trie.value(), Some(1));
/// # Ok::<(), ruleseg::TrieError>(())
/// ```
#[derive(Debug, Default)]
pub struct CharsTrieBuilder {
    entries: BTreeMap<Vec<u16>, i32>,
    built: Option<Arc<[u16]>>,
}

impl CharsTrieBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a string; it must differ from every string added before.
    pub fn add(&mut self, key: &str, value: i32) -> Result<&mut Self, TrieError> {
        self.add_units(key.encode_utf16().collect(), value)
    }

    /// Add a UTF-16 unit sequence.
    pub fn add_units(&mut self, key: Vec<u16>, value: i32) -> Result<&mut Self, TrieError> {
        if self.built.is_some() {
            return Err(TrieError::AlreadyBuilt);
        }
        if self.entries.contains_key(&key) {
            return Err(TrieError::DuplicateKey(String::from_utf16_lossy(&key)));
        }
        self.entries.insert(key, value);
        Ok(self)
    }

    /// Compile the added entries.
    ///
    /// Building again without [`clear`](Self::clear) returns a trie over the
    /// same shared units.
    pub fn build(&mut self, option: BuildOption) -> Result<CharsTrie, TrieError> {
        CharsTrie::from_units(self.build_units(option)?)
    }

    /// Compile the added entries into their serialized form.
    pub fn build_units(&mut self, option: BuildOption) -> Result<Arc<[u16]>, TrieError> {
        if let Some(units) = &self.built {
            return Ok(Arc::clone(units));
        }
        if self.entries.is_empty() {
            return Err(TrieError::Empty);
        }
        let elements: Vec<(&[u16], i32)> = self.entries.iter().map(|(k, v)| (k.as_slice(), *v)).collect();
        let units: Arc<[u16]> = Compiler::new(&elements, option).compile().into();
        debug!(entries = elements.len(), units = units.len(), ?option, "built chars trie");
        self.built = Some(Arc::clone(&units));
        Ok(units)
    }

    /// Drop all entries so a new trie can be built. Tries built earlier keep
    /// their own shared units.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.built = None;
    }
}

/// One build: the node arena, the sharing registry and the output buffer.
struct Compiler<'e> {
    elements: &'e [(&'e [u16], i32)],
    share_nodes: bool,
    nodes: Vec<Node>,
    registry: HashMap<NodeKind, NodeId>,
    /// Written units in reverse order; reversed once at the end.
    out: Vec<u16>,
}

impl<'e> Compiler<'e> {
    fn new(elements: &'e [(&'e [u16], i32)], option: BuildOption) -> Self {
        Self {
            elements,
            share_nodes: option == BuildOption::Small,
            nodes: Vec::new(),
            registry: HashMap::new(),
            out: Vec::new(),
        }
    }

    fn compile(mut self) -> Vec<u16> {
        let root = self.make_node(0, self.elements.len(), 0);
        self.mark_right_edges_first(root, -1);
        self.write_node(root);
        self.out.reverse();
        self.out
    }

    fn key_len(&self, i: usize) -> usize {
        self.elements[i].0.len()
    }

    fn unit(&self, i: usize, index: usize) -> u16 {
        self.elements[i].0[index]
    }

    fn value(&self, i: usize) -> i32 {
        self.elements[i].1
    }

    // --- node graph ---

    fn register(&mut self, kind: NodeKind) -> NodeId {
        let share = self.share_nodes || matches!(kind, NodeKind::FinalValue(_));
        if share {
            if let Some(&id) = self.registry.get(&kind) {
                return id;
            }
        }
        let id = self.nodes.len();
        self.nodes.push(Node { kind: kind.clone(), offset: 0, first_edge_number: 0 });
        if share {
            self.registry.insert(kind, id);
        }
        id
    }

    /// Node for the elements `[start, limit)`, which share their first `index` units.
    fn make_node(&mut self, start: usize, limit: usize, index: usize) -> NodeId {
        let mut start = start;
        let mut value = None;
        if index == self.key_len(start) {
            // The first element ends here.
            let v = self.value(start);
            start += 1;
            if start == limit {
                return self.register(NodeKind::FinalValue(v));
            }
            value = Some(v);
        }
        let min_unit = self.unit(start, index);
        let max_unit = self.unit(limit - 1, index);
        let kind = if min_unit == max_unit {
            let mut last_index = self.limit_of_linear_match(start, limit - 1, index);
            let mut next = self.make_node(start, limit, last_index);
            let mut length = last_index - index;
            // Chunk long runs.
            while length > MAX_LINEAR_MATCH_LENGTH {
                last_index -= MAX_LINEAR_MATCH_LENGTH;
                length -= MAX_LINEAR_MATCH_LENGTH;
                let units = self.elements[start].0[last_index..last_index + MAX_LINEAR_MATCH_LENGTH].to_vec();
                next = self.register(NodeKind::LinearMatch { units, value: None, next });
            }
            let units = self.elements[start].0[index..index + length].to_vec();
            NodeKind::LinearMatch { units, value, next }
        } else {
            let length = self.count_units(start, limit, index);
            let next = self.make_branch_sub_node(start, limit, index, length);
            NodeKind::BranchHead { length, value, next }
        };
        self.register(kind)
    }

    /// Branch over `length` distinct units at `index`, split in halves above
    /// the linear-search threshold.
    fn make_branch_sub_node(&mut self, start: usize, limit: usize, index: usize, length: usize) -> NodeId {
        let mut start = start;
        let mut length = length;
        let mut splits: Vec<(u16, NodeId)> = Vec::new();
        while length > MAX_BRANCH_LINEAR_SUB_NODE_LENGTH {
            let i = self.skip_elements_by_units(start, index, length / 2);
            let middle = self.unit(i, index);
            let less_than = self.make_branch_sub_node(start, i, index, length / 2);
            splits.push((middle, less_than));
            start = i;
            length -= length / 2;
        }
        let mut edges = Vec::with_capacity(length);
        for n in 0..length {
            let unit = self.unit(start, index);
            let i = if n + 1 == length { limit } else { self.index_of_next_unit(start + 1, index, unit) };
            let edge = if start == i - 1 && index + 1 == self.key_len(start) {
                Edge::Final(self.value(start))
            } else {
                Edge::Node(self.make_node(start, i, index + 1))
            };
            edges.push((unit, edge));
            start = i;
        }
        let mut node = self.register(NodeKind::ListBranch { edges });
        while let Some((unit, less_than)) = splits.pop() {
            node = self.register(NodeKind::SplitBranch { unit, less_than, greater_or_equal: node });
        }
        node
    }

    fn limit_of_linear_match(&self, first: usize, last: usize, index: usize) -> usize {
        let min_len = self.key_len(first);
        let mut index = index + 1;
        while index < min_len && self.unit(first, index) == self.unit(last, index) {
            index += 1;
        }
        index
    }

    fn count_units(&self, start: usize, limit: usize, index: usize) -> usize {
        let mut length = 0;
        let mut i = start;
        while i < limit {
            let unit = self.unit(i, index);
            i += 1;
            while i < limit && self.unit(i, index) == unit {
                i += 1;
            }
            length += 1;
        }
        length
    }

    fn skip_elements_by_units(&self, i: usize, index: usize, count: usize) -> usize {
        let mut i = i;
        for _ in 0..count {
            let unit = self.unit(i, index);
            i = self.index_of_next_unit(i + 1, index, unit);
        }
        i
    }

    fn index_of_next_unit(&self, i: usize, index: usize, unit: u16) -> usize {
        let mut i = i;
        while self.unit(i, index) == unit {
            i += 1;
        }
        i
    }

    // --- right-edge marking ---

    /// Number the not-yet-written right edges so shared sub-nodes on them are
    /// written once, right where the edge ends.
    fn mark_right_edges_first(&mut self, id: NodeId, edge_number: i64) -> i64 {
        if self.nodes[id].offset != 0 {
            return edge_number;
        }
        let mut edge_number = edge_number;
        match self.nodes[id].kind.clone() {
            NodeKind::FinalValue(_) => {
                self.nodes[id].offset = edge_number;
            }
            NodeKind::LinearMatch { next, .. } | NodeKind::BranchHead { next, .. } => {
                edge_number = self.mark_right_edges_first(next, edge_number);
                self.nodes[id].offset = edge_number;
            }
            NodeKind::ListBranch { edges } => {
                self.nodes[id].first_edge_number = edge_number;
                let mut step = 0;
                for (_, edge) in edges.iter().rev() {
                    if let Edge::Node(child) = edge {
                        edge_number = self.mark_right_edges_first(*child, edge_number - step);
                    }
                    step = 1;
                }
                self.nodes[id].offset = edge_number;
            }
            NodeKind::SplitBranch { less_than, greater_or_equal, .. } => {
                self.nodes[id].first_edge_number = edge_number;
                edge_number = self.mark_right_edges_first(greater_or_equal, edge_number);
                edge_number = self.mark_right_edges_first(less_than, edge_number - 1);
                self.nodes[id].offset = edge_number;
            }
        }
        edge_number
    }

    // --- serialization ---

    fn write_unless_inside_right_edge(&mut self, id: NodeId, first_right: i64, last_right: i64) {
        // Edge numbers are negative with last_right <= first_right. Positive
        // offsets are already written; nodes on the pending right edge wait.
        let offset = self.nodes[id].offset;
        if offset < 0 && (offset < last_right || first_right < offset) {
            self.write_node(id);
        }
    }

    fn write_node(&mut self, id: NodeId) {
        let offset = match self.nodes[id].kind.clone() {
            NodeKind::FinalValue(value) => self.write_value_and_final(value, true),
            NodeKind::LinearMatch { units, value, next } => {
                self.write_node(next);
                self.write_units(&units);
                self.write_value_and_type(value, MIN_LINEAR_MATCH + units.len() as u16 - 1)
            }
            NodeKind::BranchHead { length, value, next } => {
                self.write_node(next);
                if length <= MIN_LINEAR_MATCH as usize {
                    self.write_value_and_type(value, (length - 1) as u16)
                } else {
                    self.write_unit((length - 1) as u16);
                    self.write_value_and_type(value, 0)
                }
            }
            NodeKind::ListBranch { edges } => self.write_list_branch(id, &edges),
            NodeKind::SplitBranch { unit, less_than, greater_or_equal } => {
                let first_edge_number = self.nodes[id].first_edge_number;
                let ge_offset = self.nodes[greater_or_equal].offset;
                self.write_unless_inside_right_edge(less_than, first_edge_number, ge_offset);
                // The greater-or-equal half follows directly; no jump.
                self.write_node(greater_or_equal);
                let target = self.nodes[less_than].offset;
                debug_assert!(target > 0);
                self.write_delta_to(target);
                self.write_unit(unit)
            }
        };
        self.nodes[id].offset = offset;
    }

    fn write_list_branch(&mut self, id: NodeId, edges: &[(u16, Edge)]) -> i64 {
        let first_edge_number = self.nodes[id].first_edge_number;
        let last = edges.len() - 1;
        let right_edge_number = match edges[last].1 {
            Edge::Node(child) => self.nodes[child].offset,
            Edge::Final(_) => first_edge_number,
        };
        // Sub-nodes in reverse order so the smallest unit gets the shortest delta.
        for (_, edge) in edges[..last].iter().rev() {
            if let Edge::Node(child) = edge {
                self.write_unless_inside_right_edge(*child, first_edge_number, right_edge_number);
            }
        }
        // The last unit's target follows directly.
        match edges[last].1 {
            Edge::Final(value) => {
                self.write_value_and_final(value, true);
            }
            Edge::Node(child) => self.write_node(child),
        }
        let mut offset = self.write_unit(edges[last].0);
        for (unit, edge) in edges[..last].iter().rev() {
            match edge {
                Edge::Final(value) => self.write_value_and_final(*value, true),
                Edge::Node(child) => {
                    let child_offset = self.nodes[*child].offset;
                    debug_assert!(child_offset > 0);
                    let delta = offset - child_offset;
                    debug_assert!((0..=i32::MAX as i64).contains(&delta));
                    self.write_value_and_final(delta as i32, false)
                }
            };
            offset = self.write_unit(*unit);
        }
        offset
    }

    fn written(&self) -> i64 {
        self.out.len() as i64
    }

    fn write_unit(&mut self, unit: u16) -> i64 {
        self.out.push(unit);
        self.written()
    }

    /// Prepend `units` keeping their order.
    fn write_units(&mut self, units: &[u16]) -> i64 {
        self.out.extend(units.iter().rev());
        self.written()
    }

    fn write_value_and_final(&mut self, value: i32, is_final: bool) -> i64 {
        let mut buf = [0u16; 3];
        let len = encode_value(value, is_final, &mut buf);
        self.write_units(&buf[..len])
    }

    fn write_value_and_type(&mut self, value: Option<i32>, node_type: u16) -> i64 {
        let mut buf = [0u16; 3];
        let len = encode_value_and_type(value, node_type, &mut buf);
        self.write_units(&buf[..len])
    }

    fn write_delta_to(&mut self, target: i64) -> i64 {
        let delta = self.written() - target;
        debug_assert!(delta >= 0);
        let mut buf = [0u16; 3];
        let len = encode_delta(delta as usize, &mut buf);
        self.write_units(&buf[..len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_entry_is_a_linear_match_then_final_value() {
        let mut builder = CharsTrieBuilder::new();
        builder.add("abc", 7).unwrap();
        let units = builder.build_units(BuildOption::Fast).unwrap();
        assert_eq!(&*units, &[MIN_LINEAR_MATCH + 2, 'a' as u16, 'b' as u16, 'c' as u16, VALUE_IS_FINAL | 7]);
    }

    #[test]
    fn empty_string_key_is_a_root_final_value() {
        let mut builder = CharsTrieBuilder::new();
        builder.add("", 3).unwrap();
        let mut trie = builder.build(BuildOption::Small).unwrap();
        assert_eq!(trie.current(), crate::TrieResult::FinalValue);
        assert_eq!(trie.value(), Some(3));
    }

    #[test]
    fn duplicate_and_lifecycle_errors() {
        let mut builder = CharsTrieBuilder::new();
        assert_eq!(builder.build(BuildOption::Fast).unwrap_err(), TrieError::Empty);
        builder.add("x", 1).unwrap();
        assert_eq!(builder.add("x", 2).unwrap_err(), TrieError::DuplicateKey("x".into()));
        let first = builder.build_units(BuildOption::Fast).unwrap();
        assert_eq!(builder.add("y", 2).unwrap_err(), TrieError::AlreadyBuilt);
        let again = builder.build_units(BuildOption::Fast).unwrap();
        assert!(Arc::ptr_eq(&first, &again));
        builder.clear();
        builder.add("y", 2).unwrap();
        assert_eq!(builder.len(), 1);
        // The earlier trie is untouched.
        assert_eq!(first.last(), Some(&(VALUE_IS_FINAL | 1)));
    }

    #[test]
    fn small_shares_common_suffixes() {
        let words = ["walking", "talking", "balking", "stalking", "chalking", "walked", "talked", "balked"];
        let build = |option| {
            let mut builder = CharsTrieBuilder::new();
            for w in words {
                let value = if w.ends_with("ing") { 1 } else { 2 };
                builder.add(w, value).unwrap();
            }
            builder.build_units(option).unwrap()
        };
        assert!(build(BuildOption::Small).len() < build(BuildOption::Fast).len());
    }
}
