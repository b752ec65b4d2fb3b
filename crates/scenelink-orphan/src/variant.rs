//! Variant snapshots and the per-pull payload.
//!
//! When a subtree is pulled, the variant selections of every ancestor are
//! captured once and frozen inside the `PullRecord`. Reconciliation later
//! recomputes the same walk against the live hierarchy and compares the two
//! snapshots element-wise: a pulled mirror stays visible only while the
//! hierarchy still agrees with the configuration it was pulled under.

use crate::scene::{MirrorHandle, SceneAccess};
use scenelink_path::ScenePath;
use serde::{Deserialize, Serialize};

/// One `(variant set, selection)` pair. Serialized as a two-element tuple,
/// matching the persisted document shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSelection {
    pub set: String,
    pub choice: String,
}

impl VariantSelection {
    pub fn new(set: impl Into<String>, choice: impl Into<String>) -> Self {
        Self { set: set.into(), choice: choice.into() }
    }
}

impl Serialize for VariantSelection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.set, &self.choice).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for VariantSelection {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (set, choice) = <(String, String)>::deserialize(deserializer)?;
        Ok(Self { set, choice })
    }
}

/// The variant selections in effect at one ancestor path.
///
/// `selections` keeps capture order; equality is ordered, not set-wise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDescriptor {
    pub path: ScenePath,
    pub selections: Vec<VariantSelection>,
}

/// Ordered chain of ancestor variant descriptors, immediate parent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AncestorConfig {
    descriptors: Vec<VariantDescriptor>,
}

impl AncestorConfig {
    /// Walk from `path`'s parent toward the hierarchy root, recording the
    /// variant selections at each ancestor. The pulled path's own variants
    /// are excluded: once pulled, its structure is frozen. The walk stops at
    /// the root or wherever the path leaves the hierarchy the manager
    /// covers.
    pub fn capture(path: &ScenePath, scene: &dyn SceneAccess) -> Self {
        let mut descriptors = Vec::new();
        let mut cursor = path.parent();
        while let Some(ancestor) = cursor {
            if ancestor.is_root() || !scene.in_hierarchy(&ancestor) {
                break;
            }
            descriptors.push(VariantDescriptor {
                selections: scene.variant_selections(&ancestor),
                path: ancestor.clone(),
            });
            cursor = ancestor.parent();
        }
        Self { descriptors }
    }

    pub fn from_descriptors(descriptors: Vec<VariantDescriptor>) -> Self {
        Self { descriptors }
    }

    pub fn descriptors(&self) -> &[VariantDescriptor] {
        &self.descriptors
    }
}

/// Payload stored per pulled path: the native mirror plus the variant
/// configuration the pull was made under. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRecord {
    pub(crate) mirror: MirrorHandle,
    #[serde(rename = "variants")]
    pub(crate) ancestor_config: AncestorConfig,
}

impl PullRecord {
    pub fn new(mirror: MirrorHandle, ancestor_config: AncestorConfig) -> Self {
        Self { mirror, ancestor_config }
    }

    pub fn mirror(&self) -> &MirrorHandle {
        &self.mirror
    }

    pub fn ancestor_config(&self) -> &AncestorConfig {
        &self.ancestor_config
    }
}
