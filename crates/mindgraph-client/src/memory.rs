//! In-memory graph store for tests and offline use

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mindgraph_core::{Position, RelationKind, Topic, TopicId};

use crate::store::{GraphStore, OutgoingEdge, StoreError};

/// Store backend holding the graph in process memory.
///
/// Enforces the same rules as the persistent backend: endpoints must exist,
/// self-edges are rejected, and an ordered pair holds at most one edge.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<State>,
}

#[derive(Default)]
struct State {
    topics: BTreeMap<TopicId, Topic>,
    edges: BTreeMap<(TopicId, TopicId), RelationKind>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn with_topics(topics: Vec<Topic>) -> Self {
        let store = MemoryStore::new();
        for topic in topics {
            store.insert_topic(topic);
        }
        store
    }

    /// Seed a topic directly, bypassing the API surface.
    pub fn insert_topic(&self, topic: Topic) {
        let mut state = self.inner.lock().expect("memory store poisoned");
        state.topics.insert(topic.id.clone(), topic);
    }

    /// Seed an edge directly, bypassing validation.
    pub fn insert_edge(&self, source: TopicId, target: TopicId, kind: RelationKind) {
        let mut state = self.inner.lock().expect("memory store poisoned");
        state.edges.insert((source, target), kind);
    }

    pub fn edge_count(&self) -> usize {
        self.inner.lock().expect("memory store poisoned").edges.len()
    }

    pub fn contains_edge(&self, source: &TopicId, target: &TopicId) -> bool {
        let state = self.inner.lock().expect("memory store poisoned");
        state.edges.contains_key(&(source.clone(), target.clone()))
    }

    pub fn relation(&self, source: &TopicId, target: &TopicId) -> Option<RelationKind> {
        let state = self.inner.lock().expect("memory store poisoned");
        state.edges.get(&(source.clone(), target.clone())).copied()
    }

    pub fn position(&self, id: &TopicId) -> Option<Position> {
        let state = self.inner.lock().expect("memory store poisoned");
        state.topics.get(id).and_then(|t| t.position)
    }
}

#[async_trait]
impl GraphStore for MemoryStore {
    async fn list_topics(&self) -> Result<Vec<Topic>, StoreError> {
        let state = self.inner.lock().expect("memory store poisoned");
        Ok(state.topics.values().cloned().collect())
    }

    async fn list_outgoing_edges(&self, id: &TopicId) -> Result<Vec<OutgoingEdge>, StoreError> {
        let state = self.inner.lock().expect("memory store poisoned");
        if !state.topics.contains_key(id) {
            return Err(StoreError::UnknownTopic(id.clone()));
        }
        Ok(state
            .edges
            .iter()
            .filter(|((source, _), _)| source == id)
            .map(|((_, target), kind)| OutgoingEdge {
                target: target.clone(),
                kind: *kind,
            })
            .collect())
    }

    async fn create_edge(
        &self,
        source: &TopicId,
        target: &TopicId,
        kind: RelationKind,
    ) -> Result<(), StoreError> {
        let mut state = self.inner.lock().expect("memory store poisoned");
        if source == target {
            return Err(StoreError::InvalidEdge(format!(
                "self edge on {source} is not allowed"
            )));
        }
        if !state.topics.contains_key(source) {
            return Err(StoreError::UnknownTopic(source.clone()));
        }
        if !state.topics.contains_key(target) {
            return Err(StoreError::UnknownTopic(target.clone()));
        }
        let key = (source.clone(), target.clone());
        if state.edges.contains_key(&key) {
            return Err(StoreError::DuplicateEdge(source.clone(), target.clone()));
        }
        state.edges.insert(key, kind);
        Ok(())
    }

    async fn delete_edge(&self, source: &TopicId, target: &TopicId) -> Result<(), StoreError> {
        let mut state = self.inner.lock().expect("memory store poisoned");
        match state.edges.remove(&(source.clone(), target.clone())) {
            Some(_) => Ok(()),
            None => Err(StoreError::MissingEdge(source.clone(), target.clone())),
        }
    }

    async fn update_position(&self, id: &TopicId, position: Position) -> Result<(), StoreError> {
        let mut state = self.inner.lock().expect("memory store poisoned");
        match state.topics.get_mut(id) {
            Some(topic) => {
                topic.position = Some(position);
                Ok(())
            }
            None => Err(StoreError::UnknownTopic(id.clone())),
        }
    }
}
