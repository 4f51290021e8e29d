//! Compact, serialized string → integer trie over UTF-16 units.
//!
//! The trie is a flat `[u16]` array that can be embedded in other data and read
//! in place. It is built once by [`CharsTrieBuilder`] and then shared (via
//! `Arc`) by any number of [`CharsTrie`] cursors.
//!
//! ## Parts
//!
//! - `encoding.rs`: node lead-unit ranges and the 1/2/3-unit value and delta
//!   codecs.
//! - `chars_trie.rs`: the cursor (`first`/`next`/`current`/`value`), unique
//!   value detection, next-unit listing and state snapshots.
//! - `iter.rs`: depth-first enumeration with an explicit backtracking stack.
//! - `builder.rs`: node-graph construction, optional sub-trie sharing and
//!   back-to-front serialization.
//!
//! The break engine uses a trie of reversed abbreviations to suppress
//! sentence breaks (see `segment/filter.rs`).

#[path = "trie/builder.rs"]
mod builder;
#[path = "trie/chars_trie.rs"]
mod chars_trie;
#[path = "trie/encoding.rs"]
mod encoding;
#[path = "trie/iter.rs"]
mod iter;

pub use builder::{BuildOption, CharsTrieBuilder};
pub use chars_trie::{CharsTrie, TrieResult, TrieState};
pub use iter::{Entries, TrieEntry};
