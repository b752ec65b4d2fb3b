//! Consistency engine: the recursive traversals that decide, for each
//! pulled path, whether its native mirror or its source item renders.
//!
//! Three entry points, driven by the routed operations:
//!
//! - `show_subtree` / `hide_subtree` for structural add/delete of an
//!   ancestor: a branch reappearing makes hidden pulled descendants visible
//!   again, a branch vanishing hides them.
//! - `reconcile_subtree` for subtree invalidation (variant reselection or
//!   deferred-content load/unload): re-derive each affected pull's ancestor
//!   configuration and compare it with the one captured at pull time.
//!
//! Failure semantics: invariant checks are fatal in debug builds and
//! best-effort skips in release; a live item that no longer resolves is a
//! normal terminal state (stay hidden), not an error.

use crate::scene::{MirrorAccess, SceneAccess};
use crate::variant::{AncestorConfig, PullRecord};
use scenelink_path::{PathTrie, ScenePath, TrieNode};
use tracing::{debug, warn};

pub(crate) fn show_subtree(node: &TrieNode<PullRecord>, mirror: &mut dyn MirrorAccess) {
    set_subtree_visibility(node, true, mirror);
}

pub(crate) fn hide_subtree(node: &TrieNode<PullRecord>, mirror: &mut dyn MirrorAccess) {
    set_subtree_visibility(node, false, mirror);
}

fn set_subtree_visibility(node: &TrieNode<PullRecord>, visible: bool, mirror: &mut dyn MirrorAccess) {
    if let Some(record) = node.payload() {
        if node.children().next().is_some() {
            debug_assert!(false, "pulled node has children in the index");
            warn!(handle = %record.mirror(), "pulled node has children in the index");
        }
        mirror.set_visible(record.mirror(), visible);
        return;
    }
    for child in node.children() {
        set_subtree_visibility(child, visible, mirror);
    }
}

/// Re-evaluate every pulled path under `path` after its subtree was
/// invalidated at the source.
pub(crate) fn reconcile_subtree(
    index: &PathTrie<PullRecord>,
    path: &ScenePath,
    scene: &mut dyn SceneAccess,
    mirror: &mut dyn MirrorAccess,
) {
    if !scene.exists(path) {
        debug!(%path, "reconcile target no longer resolves");
        return;
    }

    // Content unloaded: the whole branch is gone from the live hierarchy.
    let live_children = scene.children(path, true);
    if live_children.is_empty() {
        if let Some(node) = index.node(path) {
            hide_subtree(node, mirror);
        }
        return;
    }

    // Enumerate live children directly from the source, inactive ones
    // included. A variant switch can introduce a new child with the same
    // name as one pulled under a different variant, so no cached child list
    // is trustworthy here.
    let mut found_any = false;
    for component in &live_children {
        let child_path = path.append(component);
        if let Some(node) = index.node(&child_path) {
            found_any = true;
            recursive_switch(node, &child_path, scene, mirror);
        }
    }

    // None of the live children intersects the index: the configuration
    // changed entirely, so every pull below `path` goes dark.
    if !found_any {
        if let Some(node) = index.node(path) {
            hide_subtree(node, mirror);
        }
    }
}

/// Walk the index below `node`, deciding visibility at each pulled leaf.
///
/// Exactly one of {native mirror, source item} renders a pulled path's data
/// at any time: the mirror shows iff the item resolves and the live ancestor
/// configuration still matches the one captured at pull time, and the source
/// item's activation is authored to the opposite.
fn recursive_switch(
    node: &TrieNode<PullRecord>,
    path: &ScenePath,
    scene: &mut dyn SceneAccess,
    mirror: &mut dyn MirrorAccess,
) {
    if let Some(record) = node.payload() {
        if node.children().next().is_some() {
            debug_assert!(false, "pulled node has children in the index");
            warn!(%path, "pulled node has children in the index");
        }
        let exists = scene.exists(path);
        let visible =
            exists && AncestorConfig::capture(path, scene) == *record.ancestor_config();
        debug!(%path, exists, visible, "switch pulled path");
        mirror.set_visible(record.mirror(), visible);
        if exists {
            scene.set_active_override(path, !visible);
        }
        return;
    }

    for child in node.children() {
        // Child paths from a prior snapshot may no longer resolve; the leaf
        // case treats that as "stay hidden" rather than an error.
        let child_path = path.append(child.component());
        recursive_switch(child, &child_path, scene, mirror);
    }
}
