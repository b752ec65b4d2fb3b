//! Absolute hierarchical scene paths.
//!
//! A `ScenePath` is an immutable, ordered sequence of string components with
//! the usual ancestor/prefix operations. The textual form is `/`-separated
//! and always absolute; the hierarchy root is `/` (zero components).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathParseError {
    #[error("scene path must be absolute (start with '/'): `{text}`")]
    NotAbsolute { text: String },
    #[error("scene path has an empty component: `{text}`")]
    EmptyComponent { text: String },
}

/// Absolute path of an item in the scene hierarchy.
///
/// Ordered and hashable so it can serve as a map key; serialized as its
/// textual form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScenePath {
    components: Vec<String>,
}

impl ScenePath {
    /// The hierarchy root, `/`.
    pub fn root() -> Self {
        Self { components: Vec::new() }
    }

    /// Build a path from pre-split components. Components must not contain
    /// the `/` separator (programming error, checked in debug builds);
    /// embedded separators would make the textual form re-parse as a
    /// different, deeper path.
    pub fn from_components<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let components: Vec<String> = components.into_iter().map(Into::into).collect();
        debug_assert!(
            components.iter().all(|c| !c.is_empty() && !c.contains('/')),
            "path component is empty or contains a separator"
        );
        Self { components }
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn is_root(&self) -> bool {
        self.components.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.components.len()
    }

    /// Last component, if any.
    pub fn name(&self) -> Option<&str> {
        self.components.last().map(String::as_str)
    }

    /// Parent path; `None` for the root.
    pub fn parent(&self) -> Option<ScenePath> {
        if self.components.is_empty() {
            return None;
        }
        Some(ScenePath {
            components: self.components[..self.components.len() - 1].to_vec(),
        })
    }

    /// New path with `component` appended. Same separator precondition as
    /// [`from_components`](Self::from_components).
    pub fn append(&self, component: &str) -> ScenePath {
        debug_assert!(
            !component.is_empty() && !component.contains('/'),
            "path component is empty or contains a separator"
        );
        let mut components = self.components.clone();
        components.push(component.to_string());
        ScenePath { components }
    }

    /// True iff `self` is `other` or lies below it.
    pub fn starts_with(&self, other: &ScenePath) -> bool {
        self.components.len() >= other.components.len()
            && self.components[..other.components.len()] == other.components[..]
    }

    /// Strict descendant test (`self` below `other`, not equal).
    pub fn is_descendant_of(&self, other: &ScenePath) -> bool {
        self.components.len() > other.components.len() && self.starts_with(other)
    }
}

impl fmt::Display for ScenePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.components.is_empty() {
            return write!(f, "/");
        }
        for component in &self.components {
            write!(f, "/{component}")?;
        }
        Ok(())
    }
}

impl FromStr for ScenePath {
    type Err = PathParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let Some(rest) = text.strip_prefix('/') else {
            return Err(PathParseError::NotAbsolute { text: text.to_string() });
        };
        if rest.is_empty() {
            return Ok(ScenePath::root());
        }
        let mut components = Vec::new();
        for component in rest.split('/') {
            if component.is_empty() {
                return Err(PathParseError::EmptyComponent { text: text.to_string() });
            }
            components.push(component.to_string());
        }
        Ok(ScenePath { components })
    }
}

impl Serialize for ScenePath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScenePath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
