//! Undo support: whole-index snapshots.
//!
//! `remove` captures the entire index as it exists immediately before the
//! removal. Snapshotting the whole tree instead of a per-node diff trades an
//! O(size) copy for correctness under arbitrary future restores — the host
//! undo stack can replay mementos in any order it likes and always land on a
//! state the index actually had.

use crate::variant::PullRecord;
use scenelink_path::{PathTrie, ScenePath};

/// Immutable snapshot of a prior index state. Consumed by
/// [`crate::OrphanManager::restore`]; independent of the live index (no
/// shared nodes).
#[derive(Debug, Clone)]
pub struct Memento {
    index: PathTrie<PullRecord>,
}

impl Memento {
    pub(crate) fn capture(index: &PathTrie<PullRecord>) -> Self {
        Self { index: index.clone() }
    }

    pub(crate) fn into_index(self) -> PathTrie<PullRecord> {
        self.index
    }

    /// Pulled paths recorded in the snapshot, for host-side introspection.
    pub fn pulled_paths(&self) -> Vec<ScenePath> {
        self.index.iter().into_iter().map(|(path, _)| path).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
