//! Typed architecture model.
//!
//! An [`Architecture`] is a tree of [`Boundary`] values that own their
//! [`Container`]s, nested boundaries, and [`Relation`]s. Relations refer to
//! containers by name; resolving those names is the job of the index
//! ([`Architecture::container_map`]) and the structural validator.
//!
//! The model holds no back-references, so ownership is strictly top-down.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

mod index;
mod load;

pub use index::{ContainerRef, RelationRef};
pub use load::LoadError;

/// Arbitrary key/value pairs attached to model elements.
pub type Metadata = BTreeMap<String, String>;

/// The full architecture document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Architecture {
    /// Schema version of the document.
    #[serde(default)]
    pub version: i64,
    /// Top-level boundaries, in declaration order.
    #[serde(default)]
    pub boundaries: Vec<Boundary>,
    /// Containers declared outside any boundary.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub externals: Vec<Container>,
    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: Metadata,
}

/// A logical grouping of containers and relations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Boundary {
    /// Boundary name.
    #[serde(default)]
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Free-form labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Owning team or person.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner: String,
    /// Containers declared directly in this boundary.
    #[serde(default)]
    pub containers: Vec<Container>,
    /// Nested child boundaries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub boundaries: Vec<Boundary>,
    /// Relations declared at this boundary's level.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<Relation>,
    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: Metadata,
}

/// A service, database, or external dependency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Container {
    /// Container name, unique across the whole architecture.
    #[serde(default)]
    pub name: String,
    /// Container type.
    #[serde(rename = "type", default)]
    pub kind: ContainerType,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Owning team or person.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner: String,
    /// Implementation technology (e.g. `postgres`, `go`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub technology: String,
    /// Protocol the container speaks.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub protocol: String,
    /// Capability labels consulted by rules (e.g. `acl`, `repo`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: Metadata,
}

impl Container {
    /// Returns true if any of this container's tags is in `allowed`.
    #[must_use]
    pub fn has_any_tag<S: AsRef<str>>(&self, allowed: &[S]) -> bool {
        self.tags
            .iter()
            .any(|tag| allowed.iter().any(|a| a.as_ref() == tag))
    }
}

/// Supported container kinds.
///
/// Unknown names are kept in [`ContainerType::Other`] so the structural
/// validator can report them instead of the loader rejecting the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContainerType {
    /// An internal service.
    Service,
    /// A data store.
    Database,
    /// A system outside the architecture's control.
    External,
    /// Any unrecognized value, including the empty string.
    Other(String),
}

impl ContainerType {
    /// Returns the canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Service => "service",
            Self::Database => "database",
            Self::External => "external",
            Self::Other(s) => s,
        }
    }

    /// Returns true for the three known container types.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for ContainerType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for ContainerType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "service" => Self::Service,
            "database" => Self::Database,
            "external" => Self::External,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for ContainerType {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<ContainerType> for String {
    fn from(t: ContainerType) -> Self {
        match t {
            ContainerType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported relation kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationKind {
    /// Synchronous call.
    Sync,
    /// Asynchronous message.
    Async,
    /// Database access.
    Db,
    /// Any unrecognized value, including the empty string.
    Other(String),
}

impl RelationKind {
    /// Returns the canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sync => "sync",
            Self::Async => "async",
            Self::Db => "db",
            Self::Other(s) => s,
        }
    }

    /// Returns true for the three known relation kinds.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for RelationKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for RelationKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "sync" => Self::Sync,
            "async" => Self::Async,
            "db" => Self::Db,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for RelationKind {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<RelationKind> for String {
    fn from(k: RelationKind) -> Self {
        match k {
            RelationKind::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed dependency between two containers, by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Relation {
    /// Source container name.
    #[serde(default)]
    pub from: String,
    /// Destination container name.
    #[serde(default)]
    pub to: String,
    /// Relation kind.
    #[serde(default)]
    pub kind: RelationKind,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Wire protocol (e.g. `https://gateway.payments`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub protocol: String,
    /// Free-form labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: Metadata,
}
