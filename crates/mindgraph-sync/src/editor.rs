//! Editing session: working copy, baseline, and reconciliation

use std::sync::Arc;

use futures_util::future::join_all;
use mindgraph_client::GraphStore;
use mindgraph_core::{
    is_dirty, Baseline, GraphDiff, Position, RelationKind, TopicId, WorkingGraph,
};

use crate::error::{LoadError, SaveError};
use crate::snapshot::load_snapshot;

/// A single-user editing session over the remote graph.
///
/// Holds the mutable working copy and the baseline it is compared against.
/// `save` and `reload` take `&mut self`, so a second save can never be in
/// flight on the same session.
pub struct EditorSession {
    store: Arc<dyn GraphStore>,
    working: WorkingGraph,
    baseline: Baseline,
}

impl EditorSession {
    /// Open a session by loading a fresh snapshot.
    pub async fn open(store: Arc<dyn GraphStore>) -> Result<Self, LoadError> {
        let snapshot = load_snapshot(Arc::clone(&store)).await?;
        Ok(EditorSession {
            store,
            working: snapshot.graph,
            baseline: snapshot.baseline,
        })
    }

    pub fn graph(&self) -> &WorkingGraph {
        &self.working
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    /// Derived, never stored: recomputed from working copy and baseline.
    pub fn is_dirty(&self) -> bool {
        is_dirty(&self.working, &self.baseline)
    }

    /// Connect two topics in the working copy. Reconnecting an existing pair
    /// overwrites its kind.
    pub fn connect(&mut self, source: TopicId, target: TopicId, kind: RelationKind) {
        self.working.connect(source, target, kind);
    }

    /// Remove an edge from the working copy.
    pub fn disconnect(&mut self, source: &TopicId, target: &TopicId) -> Option<RelationKind> {
        self.working.disconnect(source, target)
    }

    /// Move a topic in the working copy. Returns false for an unknown id.
    pub fn move_topic(&mut self, id: &TopicId, position: Position) -> bool {
        self.working.move_topic(id, position)
    }

    /// Reconcile the store with the working copy.
    ///
    /// Computes the diff and applies it in three phases — edge creations,
    /// edge deletions, position updates — each issued concurrently and
    /// awaited as a whole. Every call must succeed; on the first failure the
    /// save fails, nothing is rolled back, and the baseline stays put, so a
    /// retry recomputes whatever is still unapplied. On full success the
    /// baseline advances and the session is clean. Saving with no changes is
    /// a harmless no-op.
    pub async fn save(&mut self) -> Result<GraphDiff, SaveError> {
        let diff = GraphDiff::compute(&self.working, &self.baseline);
        if diff.is_empty() {
            return Ok(diff);
        }

        let store = &self.store;

        let creations = diff.added.iter().map(|(key, kind)| async move {
            store
                .create_edge(&key.source, &key.target, *kind)
                .await
                .map_err(|source| SaveError::CreateEdge {
                    key: key.clone(),
                    source,
                })
        });
        for result in join_all(creations).await {
            result?;
        }

        let deletions = diff.removed.iter().map(|key| async move {
            store
                .delete_edge(&key.source, &key.target)
                .await
                .map_err(|source| SaveError::DeleteEdge {
                    key: key.clone(),
                    source,
                })
        });
        for result in join_all(deletions).await {
            result?;
        }

        let updates = diff.moved.iter().map(|(id, position)| async move {
            store
                .update_position(id, *position)
                .await
                .map_err(|source| SaveError::UpdatePosition {
                    id: id.clone(),
                    source,
                })
        });
        for result in join_all(updates).await {
            result?;
        }

        self.baseline = Baseline::of(&self.working);
        tracing::info!(
            added = diff.added.len(),
            removed = diff.removed.len(),
            moved = diff.moved.len(),
            "graph changes saved"
        );
        Ok(diff)
    }

    /// Discard all local edits and reload from the store. On load failure
    /// the session keeps its previous state.
    pub async fn reload(&mut self) -> Result<(), LoadError> {
        let snapshot = load_snapshot(Arc::clone(&self.store)).await?;
        self.working = snapshot.graph;
        self.baseline = snapshot.baseline;
        Ok(())
    }
}
