//! Orphaned-node consistency manager for pulled scene subtrees.
//!
//! When a subtree of a versioned, declarative scene hierarchy is "pulled"
//! into an independently editable native representation, the source subtree
//! is deactivated and the mirror takes over rendering. The hierarchy keeps
//! changing underneath already-pulled paths — siblings appear and vanish,
//! variant reselections invalidate whole branches, deferred content loads
//! and unloads. This crate decides, for a fixed set of pulled paths, which
//! side renders each one:
//!
//! ```text
//! notifications ──► router ──► consistency engine ──► index reads
//!                                      │
//!                                      ├──► mirror visibility (MirrorAccess)
//!                                      └──► source activation (SceneAccess)
//! ```
//!
//! The invariant everything here protects: a pulled subtree never contains
//! another pulled subtree, and exactly one of {native mirror, source item}
//! renders a pulled path's content at any time.
//!
//! Out of scope: how subtrees are pulled or pushed back, the notification
//! transport, the host undo framework beyond the [`Memento`] contract, and
//! deciding which paths should be pulled in the first place.

pub mod document;
mod engine;
pub mod manager;
pub mod memento;
pub mod notify;
pub mod scene;
pub mod variant;

pub use document::DocumentError;
pub use manager::OrphanManager;
pub use memento::Memento;
pub use notify::{CompositeOp, OpKind, SceneNotice, StructuralChange};
pub use scene::{MirrorAccess, MirrorHandle, SceneAccess};
pub use variant::{AncestorConfig, PullRecord, VariantDescriptor, VariantSelection};

pub use scenelink_path::{PathParseError, PathTrie, ScenePath};
