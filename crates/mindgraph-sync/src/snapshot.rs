//! Snapshot loading from the remote store

use std::sync::Arc;

use mindgraph_client::GraphStore;
use mindgraph_core::{fallback_position, Baseline, Position, TopicId, WorkingGraph};

use crate::error::LoadError;

/// A consistent in-memory copy of the persisted graph, plus the baseline it
/// establishes.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub graph: WorkingGraph,
    pub baseline: Baseline,
    /// Topics that had no usable stored position and received a fallback.
    pub backfilled: Vec<TopicId>,
}

/// Pull all topics and their outgoing edges into one snapshot.
///
/// The topic list is fetched once; failure there aborts the load. Edge
/// fetches then run one topic at a time, and a single failure only costs
/// that topic its outgoing edges. Topics without a usable position (none
/// stored, or the `(0, 0)` sentinel) are placed on the fallback circle and
/// queued for best-effort persistence on a detached task.
pub async fn load_snapshot(store: Arc<dyn GraphStore>) -> Result<Snapshot, LoadError> {
    let topics = store.list_topics().await.map_err(LoadError::Topics)?;
    let total = topics.len();

    let mut graph = WorkingGraph::new();
    let mut backfilled = Vec::new();
    for (index, mut topic) in topics.into_iter().enumerate() {
        if topic.position.is_none_or(|p| p.is_unset()) {
            topic.position = Some(fallback_position(index, total));
            backfilled.push(topic.id.clone());
        }
        graph.insert_topic(topic);
    }

    let ids: Vec<TopicId> = graph.topics().map(|t| t.id.clone()).collect();
    for id in ids {
        match store.list_outgoing_edges(&id).await {
            Ok(edges) => {
                for edge in edges {
                    graph.connect(id.clone(), edge.target, edge.kind);
                }
            }
            Err(err) => {
                tracing::warn!(topic = %id, error = %err, "edge fetch failed; topic loads edge-less");
            }
        }
    }

    let baseline = Baseline::of(&graph);

    if !backfilled.is_empty() {
        tracing::debug!(count = backfilled.len(), "assigned fallback positions");
        spawn_backfill(Arc::clone(&store), &graph, backfilled.clone());
    }

    Ok(Snapshot {
        graph,
        baseline,
        backfilled,
    })
}

/// Persist computed fallback positions without blocking the load. The task
/// is never awaited; failures are logged and dropped.
fn spawn_backfill(store: Arc<dyn GraphStore>, graph: &WorkingGraph, ids: Vec<TopicId>) {
    let updates: Vec<(TopicId, Position)> = ids
        .into_iter()
        .filter_map(|id| {
            let position = graph.topic(&id).and_then(|t| t.position)?;
            Some((id, position))
        })
        .collect();

    tokio::spawn(async move {
        for (id, position) in updates {
            if let Err(err) = store.update_position(&id, position).await {
                tracing::debug!(topic = %id, error = %err, "fallback position persistence failed");
            }
        }
    });
}
