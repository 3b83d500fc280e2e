//! The remote graph store seam

use async_trait::async_trait;
use mindgraph_core::{Position, RelationKind, Topic, TopicId};
use thiserror::Error;

/// An outgoing relationship as reported by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEdge {
    pub target: TopicId,
    pub kind: RelationKind,
}

/// Failure of any store operation.
///
/// The sync layer treats these as opaque; status codes and variants are never
/// interpreted there, only surfaced.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("unknown topic: {0}")]
    UnknownTopic(TopicId),
    #[error("edge already exists: {0} -> {1}")]
    DuplicateEdge(TopicId, TopicId),
    #[error("no edge: {0} -> {1}")]
    MissingEdge(TopicId, TopicId),
    #[error("invalid edge: {0}")]
    InvalidEdge(String),
}

/// CRUD surface of the persisted knowledge graph.
///
/// Network and auth concerns live behind this trait. The store owns
/// referential integrity: deleting a topic cascades to its edges, and an
/// ordered pair holds at most one edge.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// All topics visible to the session.
    async fn list_topics(&self) -> Result<Vec<Topic>, StoreError>;

    /// Outgoing edges of a single topic.
    async fn list_outgoing_edges(&self, id: &TopicId) -> Result<Vec<OutgoingEdge>, StoreError>;

    async fn create_edge(
        &self,
        source: &TopicId,
        target: &TopicId,
        kind: RelationKind,
    ) -> Result<(), StoreError>;

    async fn delete_edge(&self, source: &TopicId, target: &TopicId) -> Result<(), StoreError>;

    /// Persist a new position for one topic. Other fields are untouched.
    async fn update_position(&self, id: &TopicId, position: Position) -> Result<(), StoreError>;
}
