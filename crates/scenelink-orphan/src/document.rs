//! Persisted document form of the pull index.
//!
//! The document is a nested JSON object mirroring the tree. Structural keys
//! are path components prefixed with the reserved `/` marker; a node's pull
//! payload, if any, lives under the reserved `%pull` key:
//!
//! ```json
//! {
//!   "/world": {
//!     "/char": {
//!       "%pull": {
//!         "mirror": "node42",
//!         "variants": [ { "path": "/world", "selections": [["look", "red"]] } ]
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! The round-trip contract is semantic, not byte-for-byte: the same pulled
//! paths with the same payloads come back, while empty internal branches are
//! normalized away. Parsing is all-or-nothing — any malformed key or value
//! shape fails the whole document, and the caller substitutes an empty index
//! rather than accepting a partially populated one.

use crate::variant::PullRecord;
use scenelink_path::{PathTrie, ScenePath, TrieNode};
use serde_json::{Map, Value};
use thiserror::Error;

/// Marker prefixing every structural key.
pub const STRUCTURE_MARKER: char = '/';

/// Reserved key holding a node's pull payload.
pub const PAYLOAD_KEY: &str = "%pull";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document root must be a JSON object")]
    RootNotObject,
    #[error("node at `{path}` must be a JSON object")]
    NodeNotObject { path: String },
    #[error("unrecognized key `{key}` at `{path}`")]
    UnknownKey { path: String, key: String },
    #[error("empty path component at `{path}`")]
    EmptyComponent { path: String },
    #[error("the root cannot carry a pull payload")]
    PayloadAtRoot,
    #[error("pulled path `{path}` has nested structure in the document")]
    PayloadWithChildren { path: String },
    #[error("malformed pull payload at `{path}`: {message}")]
    MalformedPayload { path: String, message: String },
    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize the index to its persisted text form.
pub fn serialize(index: &PathTrie<PullRecord>) -> String {
    let value = Value::Object(node_to_map(index.root()));
    // Valid JSON by construction.
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
}

fn node_to_map(node: &TrieNode<PullRecord>) -> Map<String, Value> {
    let mut map = Map::new();
    if let Some(record) = node.payload() {
        if let Ok(payload) = serde_json::to_value(record) {
            map.insert(PAYLOAD_KEY.to_string(), payload);
        }
        return map;
    }
    for child in node.children() {
        // Empty internal chains left behind by removals are not persisted.
        if !child.has_payload_below() {
            continue;
        }
        map.insert(
            format!("{STRUCTURE_MARKER}{}", child.component()),
            Value::Object(node_to_map(child)),
        );
    }
    map
}

/// Parse the persisted text form back into an index.
pub fn deserialize(text: &str) -> Result<PathTrie<PullRecord>, DocumentError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(map) = value else {
        return Err(DocumentError::RootNotObject);
    };
    let mut index = PathTrie::new();
    read_node(&map, &ScenePath::root(), &mut index)?;
    Ok(index)
}

fn read_node(
    map: &Map<String, Value>,
    path: &ScenePath,
    index: &mut PathTrie<PullRecord>,
) -> Result<(), DocumentError> {
    let has_payload = map.contains_key(PAYLOAD_KEY);

    for (key, value) in map {
        if key == PAYLOAD_KEY {
            if path.is_root() {
                return Err(DocumentError::PayloadAtRoot);
            }
            let record: PullRecord = serde_json::from_value(value.clone()).map_err(|err| {
                DocumentError::MalformedPayload {
                    path: path.to_string(),
                    message: err.to_string(),
                }
            })?;
            index.insert(path, record);
            continue;
        }

        let Some(component) = key.strip_prefix(STRUCTURE_MARKER) else {
            return Err(DocumentError::UnknownKey {
                path: path.to_string(),
                key: key.clone(),
            });
        };
        if component.is_empty() || component.contains(STRUCTURE_MARKER) {
            return Err(DocumentError::EmptyComponent { path: path.to_string() });
        }
        // A pulled path owns its whole subtree; structure below it would
        // break the no-nesting invariant.
        if has_payload {
            return Err(DocumentError::PayloadWithChildren { path: path.to_string() });
        }
        let Value::Object(child_map) = value else {
            return Err(DocumentError::NodeNotObject {
                path: path.append(component).to_string(),
            });
        };
        read_node(child_map, &path.append(component), index)?;
    }
    Ok(())
}
