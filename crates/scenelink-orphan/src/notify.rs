//! Notification routing.
//!
//! Structural-change notifications arrive in two shapes: a composite batch
//! of `(kind, path)` sub-operations, and legacy single-path events whose
//! concrete subtype implies the kind. Both are decoded here, once, into
//! `StructuralChange` values; the rest of the crate never inspects notice
//! subtypes.
//!
//! Filtering is strict: an operation is dispatched only when a pulled path
//! exists *strictly below* its path. A pulled path's own node cannot
//! structurally change — pulled subtrees are edit-locked at the source.
//!
//! Rename/reparent is a known gap: `ObjectRenamed` and composite entries
//! tagged `Unsupported` are dropped here, never partially interpreted.

use crate::variant::PullRecord;
use scenelink_path::{PathTrie, ScenePath};
use tracing::debug;

/// Kind tag carried by composite sub-operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Add,
    Delete,
    SubtreeInvalidate,
    /// Anything the manager does not interpret (rename, reparent, ...).
    Unsupported,
}

/// One entry of a composite notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeOp {
    pub kind: OpKind,
    pub path: ScenePath,
}

impl CompositeOp {
    pub fn new(kind: OpKind, path: ScenePath) -> Self {
        Self { kind, path }
    }
}

/// Incoming notification, as delivered by the host's notification feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneNotice {
    /// Batched heterogeneous sub-operations with explicit paths.
    Composite(Vec<CompositeOp>),
    /// Legacy single-path events; the subtype implies the kind.
    ObjectAdded(ScenePath),
    ObjectRemoved(ScenePath),
    SubtreeInvalidated(ScenePath),
    /// Acknowledged but unhandled; dropped at this boundary.
    ObjectRenamed { from: ScenePath, to: ScenePath },
}

/// Normalized operation the consistency engine acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralChange {
    Added(ScenePath),
    Removed(ScenePath),
    SubtreeInvalidated(ScenePath),
}

/// Decode `notice` and keep only the operations that can affect a pulled
/// path in `index`.
pub fn route(notice: &SceneNotice, index: &PathTrie<PullRecord>) -> Vec<StructuralChange> {
    let mut changes = Vec::new();
    match notice {
        SceneNotice::Composite(ops) => {
            for op in ops {
                if let Some(change) = convert(op.kind, &op.path, index) {
                    changes.push(change);
                }
            }
        }
        SceneNotice::ObjectAdded(path) => {
            changes.extend(convert(OpKind::Add, path, index));
        }
        SceneNotice::ObjectRemoved(path) => {
            changes.extend(convert(OpKind::Delete, path, index));
        }
        SceneNotice::SubtreeInvalidated(path) => {
            changes.extend(convert(OpKind::SubtreeInvalidate, path, index));
        }
        SceneNotice::ObjectRenamed { from, to } => {
            debug!(%from, %to, "rename notification dropped (unhandled kind)");
        }
    }
    changes
}

fn convert(
    kind: OpKind,
    path: &ScenePath,
    index: &PathTrie<PullRecord>,
) -> Option<StructuralChange> {
    if !index.contains_descendant(path) {
        return None;
    }
    match kind {
        OpKind::Add => Some(StructuralChange::Added(path.clone())),
        OpKind::Delete => Some(StructuralChange::Removed(path.clone())),
        OpKind::SubtreeInvalidate => Some(StructuralChange::SubtreeInvalidated(path.clone())),
        OpKind::Unsupported => {
            debug!(%path, "unsupported composite operation dropped");
            None
        }
    }
}
