//! Collaborator contracts: the source hierarchy and the native mirrors.
//!
//! The consistency manager never owns scene or mirror state. Everything it
//! needs from the outside world comes through these two traits, passed in at
//! call sites. Both are synchronous; the manager runs on whatever thread
//! delivers structural-change notifications.

use crate::variant::VariantSelection;
use scenelink_path::ScenePath;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a native mirror created when a subtree was pulled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MirrorHandle(String);

impl MirrorHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MirrorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read access to the live source hierarchy, plus the single write the
/// engine performs against it: authoring an activation opinion into a
/// non-destructive override layer.
pub trait SceneAccess {
    /// True if a live item currently resolves at `path`.
    fn exists(&self, path: &ScenePath) -> bool;

    /// Component names of the live children of `path`.
    ///
    /// With `include_inactive` set, deactivated children must be included —
    /// pulled sources are deliberately deactivated, so an active-only
    /// enumeration would miss exactly the children the engine cares about.
    fn children(&self, path: &ScenePath, include_inactive: bool) -> Vec<String>;

    /// Ordered `(variant set, selection)` pairs currently in effect at
    /// `path`. Empty when the item has no variant sets.
    fn variant_selections(&self, path: &ScenePath) -> Vec<VariantSelection>;

    /// True while `path` is still inside the hierarchy this manager covers.
    /// The ancestor-configuration capture walk stops where this turns false.
    fn in_hierarchy(&self, path: &ScenePath) -> bool;

    /// Author an active/inactive opinion for `path` into an override layer,
    /// never by clobbering the strongest existing opinion in the source.
    fn set_active_override(&mut self, path: &ScenePath, active: bool);
}

/// Visibility control over the native mirrors of pulled subtrees.
pub trait MirrorAccess {
    fn set_visible(&mut self, handle: &MirrorHandle, visible: bool);

    fn is_visible(&self, handle: &MirrorHandle) -> bool;
}
