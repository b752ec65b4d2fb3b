//! The manager facade: owns the pull index and exposes the host-facing API.

use crate::document::{self, DocumentError};
use crate::engine;
use crate::memento::Memento;
use crate::notify::{route, SceneNotice, StructuralChange};
use crate::scene::{MirrorAccess, MirrorHandle, SceneAccess};
use crate::variant::{AncestorConfig, PullRecord};
use anyhow::Context;
use scenelink_path::{PathTrie, ScenePath};
use std::path::Path;
use tracing::{debug, warn};

/// Keeps pulled subtrees and their source hierarchy from both (or neither)
/// rendering the same logical content as the hierarchy mutates underneath
/// already-pulled paths.
///
/// Single-threaded by design: every call runs to completion on the thread
/// that delivers structural-change notifications. Reentrant mutation from
/// inside a dispatch is ruled out structurally — `handle` holds the manager
/// by unique borrow and the accessor traits carry no reference back to it.
#[derive(Debug, Default)]
pub struct OrphanManager {
    index: PathTrie<PullRecord>,
}

impl OrphanManager {
    pub fn new() -> Self {
        Self { index: PathTrie::new() }
    }

    // ========================================================================
    // Mutating API
    // ========================================================================

    /// Register a pulled path and capture its ancestor variant
    /// configuration from the live hierarchy.
    ///
    /// Precondition: no pulled path exists at or below `path` — a pulled
    /// subtree cannot contain another pulled subtree. Violation is a
    /// programming error: fatal in debug builds, ignored with a warning in
    /// release.
    pub fn add(&mut self, path: &ScenePath, mirror: MirrorHandle, scene: &dyn SceneAccess) {
        if self.index.contains_descendant_inclusive(path)
            || self.index.contains_ancestor_inclusive(path)
        {
            debug_assert!(false, "pull would nest with an existing pull: {path}");
            warn!(%path, "pull would nest with an existing pull; ignored");
            return;
        }
        let config = AncestorConfig::capture(path, scene);
        debug!(%path, handle = %mirror, "tracking pulled path");
        self.index.insert(path, PullRecord::new(mirror, config));
    }

    /// Forget a pulled path, returning a snapshot of the entire index as it
    /// was immediately before the removal.
    ///
    /// Precondition: a pull exists exactly at `path` (same failure policy
    /// as [`add`](Self::add); in release the returned memento then simply
    /// snapshots the unchanged state).
    pub fn remove(&mut self, path: &ScenePath) -> Memento {
        let memento = Memento::capture(&self.index);
        if self.index.remove(path).is_none() {
            debug_assert!(false, "removing a path that was never pulled: {path}");
            warn!(%path, "removing a path that was never pulled; ignored");
        } else {
            debug!(%path, "untracked pulled path");
        }
        memento
    }

    /// Replace the live index wholesale with a prior snapshot. The memento
    /// is consumed.
    pub fn restore(&mut self, memento: Memento) {
        self.index = memento.into_index();
    }

    /// Drop all tracked pulls. Invoked at host session boundaries (new
    /// session, before load).
    pub fn clear(&mut self) {
        self.index.clear();
    }

    // ========================================================================
    // Notification entry point
    // ========================================================================

    /// Observer entry point: decode, filter, and act on one notification.
    /// Runs to completion before the next notification is accepted.
    pub fn handle(
        &mut self,
        notice: &SceneNotice,
        scene: &mut dyn SceneAccess,
        mirror: &mut dyn MirrorAccess,
    ) {
        for change in route(notice, &self.index) {
            match change {
                StructuralChange::Added(path) => {
                    if let Some(node) = self.index.node(&path) {
                        engine::show_subtree(node, mirror);
                    }
                }
                StructuralChange::Removed(path) => {
                    if let Some(node) = self.index.node(&path) {
                        engine::hide_subtree(node, mirror);
                    }
                }
                StructuralChange::SubtreeInvalidated(path) => {
                    engine::reconcile_subtree(&self.index, &path, scene, mirror);
                }
            }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// All currently tracked pulled paths, in path order.
    pub fn pulled_paths(&self) -> Vec<ScenePath> {
        self.index.iter().into_iter().map(|(path, _)| path).collect()
    }

    /// The payload captured when `path` was pulled, if it is tracked.
    pub fn record(&self, path: &ScenePath) -> Option<&PullRecord> {
        self.index.payload(path)
    }

    /// True iff a pulled path exists at or below `path`. Callers use this
    /// to enforce the no-nesting precondition before pulling.
    pub fn has_pulled_descendants(&self, path: &ScenePath) -> bool {
        self.index.contains_descendant_inclusive(path)
    }

    /// True iff `path` is tracked and its mirror is currently hidden.
    pub fn is_orphaned(&self, path: &ScenePath, mirror: &dyn MirrorAccess) -> bool {
        self.index
            .payload(path)
            .map(|record| !mirror.is_visible(record.mirror()))
            .unwrap_or(false)
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Persisted text form of the index (nested-key document).
    pub fn serialize(&self) -> String {
        document::serialize(&self.index)
    }

    /// Parse a persisted document. All-or-nothing: on failure the caller is
    /// expected to fall back to an empty manager rather than keep a
    /// partially populated one.
    pub fn deserialize(text: &str) -> Result<Self, DocumentError> {
        Ok(Self { index: document::deserialize(text)? })
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, self.serialize())
            .with_context(|| format!("writing pull index to {}", path.display()))
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading pull index from {}", path.display()))?;
        Ok(Self::deserialize(&text)?)
    }
}
