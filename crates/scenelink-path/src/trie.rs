//! Prefix tree keyed by scene-path components.
//!
//! `PathTrie<T>` stores a payload at each indexed path and answers exact and
//! ancestor/descendant containment queries by walking one map level per path
//! component. Children are exclusively owned by their parent, so `Clone`
//! produces a fully independent deep copy — that is the snapshot mechanism
//! the undo layer in `scenelink-orphan` relies on.

use crate::path::ScenePath;
use std::collections::BTreeMap;

/// One node of the prefix tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieNode<T> {
    component: String,
    payload: Option<T>,
    children: BTreeMap<String, TrieNode<T>>,
}

impl<T> TrieNode<T> {
    fn new(component: &str) -> Self {
        Self {
            component: component.to_string(),
            payload: None,
            children: BTreeMap::new(),
        }
    }

    /// Path component this node answers to. Empty for the root.
    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn payload_mut(&mut self) -> Option<&mut T> {
        self.payload.as_mut()
    }

    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// Child nodes in component order.
    pub fn children(&self) -> impl Iterator<Item = &TrieNode<T>> {
        self.children.values()
    }

    /// Component names of the direct children, in order.
    pub fn child_components(&self) -> Vec<&str> {
        self.children.keys().map(String::as_str).collect()
    }

    pub fn child(&self, component: &str) -> Option<&TrieNode<T>> {
        self.children.get(component)
    }

    /// True iff this node or anything below it carries a payload.
    pub fn has_payload_below(&self) -> bool {
        self.payload.is_some() || self.children.values().any(TrieNode::has_payload_below)
    }

    fn collect<'a>(&'a self, prefix: &ScenePath, out: &mut Vec<(ScenePath, &'a T)>) {
        if let Some(payload) = &self.payload {
            out.push((prefix.clone(), payload));
        }
        for (component, child) in &self.children {
            child.collect(&prefix.append(component), out);
        }
    }
}

/// Prefix tree mapping scene paths to payloads.
///
/// The root never carries a payload; it addresses the hierarchy root `/`,
/// which is not an indexable item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTrie<T> {
    root: TrieNode<T>,
}

impl<T> Default for PathTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PathTrie<T> {
    pub fn new() -> Self {
        Self { root: TrieNode::new("") }
    }

    pub fn root(&self) -> &TrieNode<T> {
        &self.root
    }

    /// Store `payload` at `path`, creating intermediate nodes as needed.
    /// Returns the previous payload at that exact path, if any.
    pub fn insert(&mut self, path: &ScenePath, payload: T) -> Option<T> {
        let mut cursor = &mut self.root;
        for component in path.components() {
            cursor = cursor
                .children
                .entry(component.clone())
                .or_insert_with(|| TrieNode::new(component));
        }
        cursor.payload.replace(payload)
    }

    /// Take the payload stored exactly at `path`. Intermediate nodes left
    /// empty by the removal are retained; callers that persist the trie
    /// normalize them away.
    pub fn remove(&mut self, path: &ScenePath) -> Option<T> {
        let mut cursor = &mut self.root;
        for component in path.components() {
            cursor = cursor.children.get_mut(component)?;
        }
        cursor.payload.take()
    }

    /// Exact-path lookup; may return an internal (payload-free) node.
    pub fn node(&self, path: &ScenePath) -> Option<&TrieNode<T>> {
        let mut cursor = &self.root;
        for component in path.components() {
            cursor = cursor.child(component)?;
        }
        Some(cursor)
    }

    /// Mutable exact-path lookup.
    pub fn node_mut(&mut self, path: &ScenePath) -> Option<&mut TrieNode<T>> {
        let mut cursor = &mut self.root;
        for component in path.components() {
            cursor = cursor.children.get_mut(component)?;
        }
        Some(cursor)
    }

    /// Payload stored exactly at `path`, if any.
    pub fn payload(&self, path: &ScenePath) -> Option<&T> {
        self.node(path).and_then(TrieNode::payload)
    }

    /// True iff a payload-bearing node exists strictly below `path`.
    pub fn contains_descendant(&self, path: &ScenePath) -> bool {
        match self.node(path) {
            Some(node) => node.children.values().any(TrieNode::has_payload_below),
            None => false,
        }
    }

    /// True iff a payload-bearing node exists at or below `path`.
    pub fn contains_descendant_inclusive(&self, path: &ScenePath) -> bool {
        match self.node(path) {
            Some(node) => node.has_payload_below(),
            None => false,
        }
    }

    /// True iff a payload-bearing node exists on the chain from the root to
    /// `path`, `path` itself included.
    pub fn contains_ancestor_inclusive(&self, path: &ScenePath) -> bool {
        let mut cursor = &self.root;
        for component in path.components() {
            match cursor.children.get(component) {
                Some(child) => {
                    if child.payload.is_some() {
                        return true;
                    }
                    cursor = child;
                }
                None => return false,
            }
        }
        false
    }

    /// All `(path, payload)` entries in path order.
    pub fn iter(&self) -> Vec<(ScenePath, &T)> {
        let mut out = Vec::new();
        self.root.collect(&ScenePath::root(), &mut out);
        out
    }

    /// Number of payload-bearing nodes.
    pub fn len(&self) -> usize {
        self.iter().len()
    }

    pub fn is_empty(&self) -> bool {
        !self.root.has_payload_below()
    }

    pub fn clear(&mut self) {
        self.root = TrieNode::new("");
    }
}
