//! Behavioral tests for the consistency manager: pull tracking, undo,
//! notification handling, and reconciliation after variant switches.

mod common;

use common::{parse, FakeMirrors, FakeScene};
use proptest::prelude::*;
use scenelink_orphan::{OrphanManager, SceneNotice, VariantSelection};

/// Scene with one variant axis:
///
/// ```text
/// /world            (variant set "look", selection "red")
/// /world/char
/// /world/char/armL
/// /world/char/armR
/// /world/props
/// /world/props/crate
/// ```
fn red_world() -> FakeScene {
    let mut scene = FakeScene::new();
    for item in [
        "/world",
        "/world/char",
        "/world/char/armL",
        "/world/char/armR",
        "/world/props",
        "/world/props/crate",
    ] {
        scene.add_item(item);
    }
    scene.select_variant("/world", "look", "red");
    scene
}

// ============================================================================
// Pull registration
// ============================================================================

#[test]
fn add_captures_ancestor_config_at_pull_time() {
    let scene = red_world();
    let mut mirrors = FakeMirrors::new();
    let mut manager = OrphanManager::new();

    let handle = mirrors.create("m-armL");
    manager.add(&parse("/world/char/armL"), handle, &scene);

    let record = manager.record(&parse("/world/char/armL")).unwrap();
    let descriptors = record.ancestor_config().descriptors();
    assert_eq!(descriptors.len(), 2);
    assert_eq!(descriptors[0].path, parse("/world/char"));
    assert!(descriptors[0].selections.is_empty());
    assert_eq!(descriptors[1].path, parse("/world"));
    assert_eq!(
        descriptors[1].selections,
        vec![VariantSelection::new("look", "red")]
    );
}

#[test]
#[should_panic]
fn add_below_an_existing_pull_is_a_programming_error() {
    let scene = red_world();
    let mut mirrors = FakeMirrors::new();
    let mut manager = OrphanManager::new();

    manager.add(&parse("/world/char"), mirrors.create("m1"), &scene);
    manager.add(&parse("/world/char/armL"), mirrors.create("m2"), &scene);
}

#[test]
#[should_panic]
fn add_above_an_existing_pull_is_a_programming_error() {
    let scene = red_world();
    let mut mirrors = FakeMirrors::new();
    let mut manager = OrphanManager::new();

    manager.add(&parse("/world/char/armL"), mirrors.create("m1"), &scene);
    manager.add(&parse("/world/char"), mirrors.create("m2"), &scene);
}

#[test]
#[should_panic]
fn remove_of_an_untracked_path_is_a_programming_error() {
    let mut manager = OrphanManager::new();
    let _ = manager.remove(&parse("/world/char"));
}

// ============================================================================
// Undo round trip
// ============================================================================

#[test]
fn remove_then_restore_recovers_the_prior_state() {
    let scene = red_world();
    let mut mirrors = FakeMirrors::new();
    let mut manager = OrphanManager::new();

    manager.add(&parse("/world/char/armL"), mirrors.create("m1"), &scene);
    manager.add(&parse("/world/props/crate"), mirrors.create("m2"), &scene);
    let before_paths = manager.pulled_paths();
    let before_record = manager.record(&parse("/world/char/armL")).cloned();

    let memento = manager.remove(&parse("/world/char/armL"));
    assert_eq!(manager.pulled_paths(), vec![parse("/world/props/crate")]);
    assert_eq!(memento.pulled_paths(), before_paths);

    manager.restore(memento);
    assert_eq!(manager.pulled_paths(), before_paths);
    assert_eq!(
        manager.record(&parse("/world/char/armL")).cloned(),
        before_record
    );
}

#[test]
fn clear_resets_to_empty() {
    let scene = red_world();
    let mut mirrors = FakeMirrors::new();
    let mut manager = OrphanManager::new();
    assert!(manager.is_empty());

    manager.add(&parse("/world/char/armL"), mirrors.create("m1"), &scene);
    assert!(!manager.is_empty());
    assert!(manager.has_pulled_descendants(&parse("/world")));

    manager.clear();
    assert!(manager.is_empty());
    assert!(!manager.has_pulled_descendants(&parse("/world")));
}

// ============================================================================
// Structural add/delete notifications
// ============================================================================

#[test]
fn delete_of_an_ancestor_hides_pulled_descendants() {
    let mut scene = red_world();
    let mut mirrors = FakeMirrors::new();
    let mut manager = OrphanManager::new();

    manager.add(&parse("/world/char/armL"), mirrors.create("m1"), &scene);
    manager.add(&parse("/world/char/armR"), mirrors.create("m2"), &scene);
    manager.add(&parse("/world/props/crate"), mirrors.create("m3"), &scene);

    let notice = SceneNotice::ObjectRemoved(parse("/world/char"));
    manager.handle(&notice, &mut scene, &mut mirrors);

    assert!(!mirrors.visible("m1"));
    assert!(!mirrors.visible("m2"));
    // The sibling branch is untouched.
    assert!(mirrors.visible("m3"));
}

#[test]
fn add_of_an_ancestor_shows_pulled_descendants_again() {
    let mut scene = red_world();
    let mut mirrors = FakeMirrors::new();
    let mut manager = OrphanManager::new();

    manager.add(&parse("/world/char/armL"), mirrors.create("m1"), &scene);
    manager.handle(
        &SceneNotice::ObjectRemoved(parse("/world/char")),
        &mut scene,
        &mut mirrors,
    );
    assert!(!mirrors.visible("m1"));
    assert!(manager.is_orphaned(&parse("/world/char/armL"), &mirrors));

    manager.handle(
        &SceneNotice::ObjectAdded(parse("/world/char")),
        &mut scene,
        &mut mirrors,
    );
    assert!(mirrors.visible("m1"));
    assert!(!manager.is_orphaned(&parse("/world/char/armL"), &mirrors));
}

#[test]
fn notifications_about_unrelated_paths_are_ignored() {
    let mut scene = red_world();
    let mut mirrors = FakeMirrors::new();
    let mut manager = OrphanManager::new();

    manager.add(&parse("/world/char/armL"), mirrors.create("m1"), &scene);

    manager.handle(
        &SceneNotice::ObjectRemoved(parse("/world/props")),
        &mut scene,
        &mut mirrors,
    );
    // The pulled path itself is edit-locked; its own notice is filtered.
    manager.handle(
        &SceneNotice::ObjectRemoved(parse("/world/char/armL")),
        &mut scene,
        &mut mirrors,
    );
    assert!(mirrors.visible("m1"));
}

// ============================================================================
// Subtree invalidation
// ============================================================================

#[test]
fn invalidate_with_no_live_children_hides_the_branch_only() {
    let mut scene = red_world();
    let mut mirrors = FakeMirrors::new();
    let mut manager = OrphanManager::new();

    manager.add(&parse("/world/char/armL"), mirrors.create("m1"), &scene);
    manager.add(&parse("/world/props/crate"), mirrors.create("m2"), &scene);

    // Deferred content unloaded: /world/char is still there but childless.
    scene.remove_subtree("/world/char/armL");
    scene.remove_subtree("/world/char/armR");
    manager.handle(
        &SceneNotice::SubtreeInvalidated(parse("/world/char")),
        &mut scene,
        &mut mirrors,
    );

    assert!(!mirrors.visible("m1"));
    assert!(mirrors.visible("m2"));
}

#[test]
fn invalidate_with_no_tracked_live_children_hides_everything_below() {
    let mut scene = red_world();
    let mut mirrors = FakeMirrors::new();
    let mut manager = OrphanManager::new();

    manager.add(&parse("/world/char/armL"), mirrors.create("m1"), &scene);

    // The whole branch was replaced by one with different names.
    scene.remove_subtree("/world/char");
    scene.add_item("/world/beast");
    manager.handle(
        &SceneNotice::SubtreeInvalidated(parse("/world")),
        &mut scene,
        &mut mirrors,
    );

    assert!(!mirrors.visible("m1"));
}

#[test]
fn variant_switch_reconciles_both_pulls_exclusively() {
    let mut scene = red_world();
    let mut mirrors = FakeMirrors::new();
    let mut manager = OrphanManager::new();

    // Both pulls captured under look=red.
    manager.add(&parse("/world/char/armL"), mirrors.create("m-armL"), &scene);
    manager.add(&parse("/world/char/armR"), mirrors.create("m-armR"), &scene);

    // Switch look to blue. The blue variant brings a *new* armL under the
    // same name and has no armR at all.
    scene.select_variant("/world", "look", "blue");
    scene.remove_subtree("/world/char/armR");
    manager.handle(
        &SceneNotice::SubtreeInvalidated(parse("/world")),
        &mut scene,
        &mut mirrors,
    );

    // armL resolves but its stored config no longer matches: mirror hidden,
    // source reactivated so the blue variant renders it.
    assert!(!mirrors.visible("m-armL"));
    assert_eq!(scene.active_override("/world/char/armL"), Some(true));
    // armR no longer resolves: hidden, nothing to reactivate.
    assert!(!mirrors.visible("m-armR"));
    assert_eq!(scene.active_override("/world/char/armR"), None);

    // Switch back to red: the captured configs match again, the mirrors
    // take over, the sources deactivate.
    scene.select_variant("/world", "look", "red");
    scene.add_item("/world/char/armR");
    manager.handle(
        &SceneNotice::SubtreeInvalidated(parse("/world")),
        &mut scene,
        &mut mirrors,
    );

    assert!(mirrors.visible("m-armL"));
    assert_eq!(scene.active_override("/world/char/armL"), Some(false));
    assert!(mirrors.visible("m-armR"));
    assert_eq!(scene.active_override("/world/char/armR"), Some(false));
}

#[test]
fn invalidate_of_a_path_that_no_longer_resolves_is_a_no_op() {
    let mut scene = red_world();
    let mut mirrors = FakeMirrors::new();
    let mut manager = OrphanManager::new();

    manager.add(&parse("/world/char/armL"), mirrors.create("m1"), &scene);
    scene.remove_subtree("/world");

    manager.handle(
        &SceneNotice::SubtreeInvalidated(parse("/world")),
        &mut scene,
        &mut mirrors,
    );
    // Nothing to reconcile against; visibility is left alone.
    assert!(mirrors.visible("m1"));
}

// ============================================================================
// No-nesting invariant (property)
// ============================================================================

proptest! {
    #[test]
    fn tracked_paths_are_never_nested(
        candidates in proptest::collection::vec(
            proptest::collection::vec("[a-c]", 1..4),
            1..12
        )
    ) {
        let scene = FakeScene::new();
        let mut mirrors = FakeMirrors::new();
        let mut manager = OrphanManager::new();

        for (i, components) in candidates.iter().enumerate() {
            let path = scenelink_orphan::ScenePath::from_components(components.clone());
            let nests = manager.has_pulled_descendants(&path)
                || manager
                    .pulled_paths()
                    .iter()
                    .any(|pulled| path.starts_with(pulled));
            if nests {
                continue;
            }
            manager.add(&path, mirrors.create(&format!("m{i}")), &scene);

            let pulled = manager.pulled_paths();
            for a in &pulled {
                for b in &pulled {
                    prop_assert!(a == b || !a.starts_with(b));
                }
            }
        }

        // Tearing everything down one memento at a time stays consistent.
        for path in manager.pulled_paths() {
            let _ = manager.remove(&path);
        }
        prop_assert!(manager.is_empty());
    }
}
