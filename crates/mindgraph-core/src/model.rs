//! Core data structures for the knowledge graph

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque, stable topic identifier assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(String);

impl TopicId {
    pub fn new(id: impl Into<String>) -> Self {
        TopicId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TopicId {
    fn from(id: &str) -> Self {
        TopicId(id.to_string())
    }
}

/// 2-D layout hint, conventionally within [-1000, 1000] per axis.
///
/// Exactly `(0, 0)` means "never positioned" by store convention.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    /// Integer-pixel granularity used for change detection. Rounding absorbs
    /// floating-point jitter from drag interactions.
    pub fn rounded(&self) -> (i64, i64) {
        (self.x.round() as i64, self.y.round() as i64)
    }

    /// The `(0, 0)` sentinel counts as unset.
    pub fn is_unset(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// What kind of knowledge a topic represents. Presentation metadata only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Concept,
    Skill,
    Project,
    Resource,
    Goal,
    #[default]
    General,
}

impl Category {
    /// Map a stored label onto the closed set. Anything unknown or absent
    /// collapses to `General`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("concept") => Category::Concept,
            Some("skill") => Category::Skill,
            Some("project") => Category::Project,
            Some("resource") => Category::Resource,
            Some("goal") => Category::Goal,
            _ => Category::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Concept => "concept",
            Category::Skill => "skill",
            Category::Project => "project",
            Category::Resource => "resource",
            Category::Goal => "goal",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of relationship an edge represents.
///
/// The kind is edge payload, never edge identity: reconciliation compares
/// endpoint pairs only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Prerequisite,
    Follows,
    Similar,
    Opposite,
    Parent,
    Child,
    #[default]
    Related,
}

impl RelationKind {
    /// Bidirectional kinds render arrowheads at both ends. Presentation
    /// metadata only.
    pub fn is_bidirectional(&self) -> bool {
        matches!(
            self,
            RelationKind::Similar | RelationKind::Opposite | RelationKind::Related
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Prerequisite => "prerequisite",
            RelationKind::Follows => "follows",
            RelationKind::Similar => "similar",
            RelationKind::Opposite => "opposite",
            RelationKind::Parent => "parent",
            RelationKind::Child => "child",
            RelationKind::Related => "related",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A relation label outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown relation kind: {0}")]
pub struct UnknownRelationKind(pub String);

impl FromStr for RelationKind {
    type Err = UnknownRelationKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prerequisite" => Ok(RelationKind::Prerequisite),
            "follows" => Ok(RelationKind::Follows),
            "similar" => Ok(RelationKind::Similar),
            "opposite" => Ok(RelationKind::Opposite),
            "parent" => Ok(RelationKind::Parent),
            "child" => Ok(RelationKind::Child),
            "related" => Ok(RelationKind::Related),
            other => Err(UnknownRelationKind(other.to_string())),
        }
    }
}

/// A single topic in the knowledge graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    /// Layout hint. `None` when the store has never persisted one.
    pub position: Option<Position>,
}

/// Edge identity: the ordered endpoint pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    pub source: TopicId,
    pub target: TopicId,
}

impl EdgeKey {
    pub fn new(source: TopicId, target: TopicId) -> Self {
        EdgeKey { source, target }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}
