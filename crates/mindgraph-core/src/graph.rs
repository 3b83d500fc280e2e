//! Working copy and baseline graph state

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::model::{EdgeKey, Position, RelationKind, Topic, TopicId};

/// The user-editable in-memory graph.
///
/// Edges live in an ordered map keyed by `(source, target)`, so at most one
/// edge exists per ordered pair and re-connecting an existing pair overwrites
/// its kind rather than adding a second edge.
#[derive(Debug, Clone, Default)]
pub struct WorkingGraph {
    topics: BTreeMap<TopicId, Topic>,
    edges: BTreeMap<EdgeKey, RelationKind>,
}

impl WorkingGraph {
    pub fn new() -> Self {
        WorkingGraph::default()
    }

    /// Insert or replace a topic.
    pub fn insert_topic(&mut self, topic: Topic) {
        self.topics.insert(topic.id.clone(), topic);
    }

    pub fn topic(&self, id: &TopicId) -> Option<&Topic> {
        self.topics.get(id)
    }

    pub fn contains_topic(&self, id: &TopicId) -> bool {
        self.topics.contains_key(id)
    }

    /// Iterate over all topics in id order.
    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.topics.values()
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Connect two topics. Last write wins on the kind for an existing pair.
    pub fn connect(&mut self, source: TopicId, target: TopicId, kind: RelationKind) {
        self.edges.insert(EdgeKey::new(source, target), kind);
    }

    /// Remove the edge between two topics. Returns the removed kind when the
    /// pair was connected.
    pub fn disconnect(&mut self, source: &TopicId, target: &TopicId) -> Option<RelationKind> {
        self.edges
            .remove(&EdgeKey::new(source.clone(), target.clone()))
    }

    /// The relation kind stored for an ordered pair, if any.
    pub fn relation(&self, source: &TopicId, target: &TopicId) -> Option<RelationKind> {
        self.edges
            .get(&EdgeKey::new(source.clone(), target.clone()))
            .copied()
    }

    /// Iterate over all edges in key order.
    pub fn edges(&self) -> impl Iterator<Item = (&EdgeKey, &RelationKind)> {
        self.edges.iter()
    }

    /// The edge-identity set.
    pub fn edge_keys(&self) -> BTreeSet<EdgeKey> {
        self.edges.keys().cloned().collect()
    }

    /// Move a topic to a new position. Returns false when the id is unknown.
    pub fn move_topic(&mut self, id: &TopicId, position: Position) -> bool {
        match self.topics.get_mut(id) {
            Some(topic) => {
                topic.position = Some(position);
                true
            }
            None => false,
        }
    }
}

/// The last graph state known to match the remote store: edge identities and
/// per-topic positions.
#[derive(Debug, Clone, Default)]
pub struct Baseline {
    edges: BTreeSet<EdgeKey>,
    positions: HashMap<TopicId, Position>,
}

impl Baseline {
    /// Project a graph onto its synchronizable state. Topics without a
    /// position contribute no map entry.
    pub fn of(graph: &WorkingGraph) -> Self {
        Baseline {
            edges: graph.edge_keys(),
            positions: graph
                .topics()
                .filter_map(|t| t.position.map(|p| (t.id.clone(), p)))
                .collect(),
        }
    }

    pub fn edges(&self) -> &BTreeSet<EdgeKey> {
        &self.edges
    }

    /// Last-persisted position for a topic, if one is known.
    pub fn position(&self, id: &TopicId) -> Option<Position> {
        self.positions.get(id).copied()
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }
}
