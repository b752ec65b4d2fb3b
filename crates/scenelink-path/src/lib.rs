//! Scenelink path utilities: hierarchical scene paths and the prefix tree
//! that indexes them.
//!
//! Everything in this crate is payload-agnostic. `ScenePath` is the absolute
//! address of an item in a scene hierarchy; `PathTrie<T>` maps a set of such
//! paths to arbitrary payloads while answering ancestor/descendant
//! containment queries in time proportional to path depth. The pulled-subtree
//! semantics layered on top live in `scenelink-orphan`.

pub mod path;
pub mod trie;

pub use path::{PathParseError, ScenePath};
pub use trie::{PathTrie, TrieNode};
