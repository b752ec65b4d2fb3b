//! In-memory fakes for the collaborator contracts.

// Not every suite touches every helper.
#![allow(dead_code)]

use scenelink_orphan::{MirrorAccess, MirrorHandle, SceneAccess, ScenePath, VariantSelection};
use std::collections::BTreeMap;

/// Mutable stand-in for the live source hierarchy. Tests script topology
/// changes (variant switches, unloads) by editing it directly, then fire the
/// matching notification at the manager.
#[derive(Debug, Default)]
pub struct FakeScene {
    /// Item path -> authored active flag.
    items: BTreeMap<ScenePath, bool>,
    /// Activation opinions authored into the override layer.
    overrides: BTreeMap<ScenePath, bool>,
    /// Variant selections per path.
    variants: BTreeMap<ScenePath, Vec<VariantSelection>>,
}

impl FakeScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, path: &str) {
        self.items.insert(parse(path), true);
    }

    pub fn remove_subtree(&mut self, path: &str) {
        let root = parse(path);
        self.items.retain(|p, _| !p.starts_with(&root));
        self.variants.retain(|p, _| !p.starts_with(&root));
    }

    /// Replace the selection of `set` at `path`, appending if new.
    pub fn select_variant(&mut self, path: &str, set: &str, choice: &str) {
        let selections = self.variants.entry(parse(path)).or_default();
        match selections.iter_mut().find(|s| s.set == set) {
            Some(existing) => existing.choice = choice.to_string(),
            None => selections.push(VariantSelection::new(set, choice)),
        }
    }

    /// The opinion the engine authored for `path`, if any.
    pub fn active_override(&self, path: &str) -> Option<bool> {
        self.overrides.get(&parse(path)).copied()
    }

    fn effective_active(&self, path: &ScenePath) -> bool {
        // The override layer wins over the authored flag.
        self.overrides
            .get(path)
            .copied()
            .or_else(|| self.items.get(path).copied())
            .unwrap_or(false)
    }
}

impl SceneAccess for FakeScene {
    fn exists(&self, path: &ScenePath) -> bool {
        self.items.contains_key(path)
    }

    fn children(&self, path: &ScenePath, include_inactive: bool) -> Vec<String> {
        self.items
            .keys()
            .filter(|candidate| {
                candidate.is_descendant_of(path) && candidate.depth() == path.depth() + 1
            })
            .filter(|candidate| include_inactive || self.effective_active(candidate))
            .filter_map(|candidate| candidate.name().map(str::to_string))
            .collect()
    }

    fn variant_selections(&self, path: &ScenePath) -> Vec<VariantSelection> {
        self.variants.get(path).cloned().unwrap_or_default()
    }

    fn in_hierarchy(&self, path: &ScenePath) -> bool {
        !path.is_root()
    }

    fn set_active_override(&mut self, path: &ScenePath, active: bool) {
        self.overrides.insert(path.clone(), active);
    }
}

/// Visibility flags of the native mirrors.
#[derive(Debug, Default)]
pub struct FakeMirrors {
    visible: BTreeMap<String, bool>,
}

impl FakeMirrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly created mirror; pulls start out visible.
    pub fn create(&mut self, id: &str) -> MirrorHandle {
        self.visible.insert(id.to_string(), true);
        MirrorHandle::new(id)
    }

    pub fn visible(&self, id: &str) -> bool {
        self.visible.get(id).copied().unwrap_or(false)
    }
}

impl MirrorAccess for FakeMirrors {
    fn set_visible(&mut self, handle: &MirrorHandle, visible: bool) {
        self.visible.insert(handle.as_str().to_string(), visible);
    }

    fn is_visible(&self, handle: &MirrorHandle) -> bool {
        self.visible.get(handle.as_str()).copied().unwrap_or(false)
    }
}

pub fn parse(path: &str) -> ScenePath {
    path.parse().expect("test path")
}
