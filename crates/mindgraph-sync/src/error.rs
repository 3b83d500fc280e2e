//! Error taxonomy for snapshot loads and saves

use mindgraph_client::StoreError;
use mindgraph_core::{EdgeKey, TopicId};
use thiserror::Error;

/// Fatal snapshot-load failure. The caller's working copy is left untouched;
/// retry is user-initiated.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch topics: {0}")]
    Topics(#[source] StoreError),
}

/// Reconciliation failure. The baseline is not advanced, the dirty flag
/// stays set, and already-applied mutations are not rolled back; re-invoking
/// save recomputes the remaining diff.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to create edge {key}: {source}")]
    CreateEdge {
        key: EdgeKey,
        #[source]
        source: StoreError,
    },
    #[error("failed to delete edge {key}: {source}")]
    DeleteEdge {
        key: EdgeKey,
        #[source]
        source: StoreError,
    },
    #[error("failed to update position of {id}: {source}")]
    UpdatePosition {
        id: TopicId,
        #[source]
        source: StoreError,
    },
}
