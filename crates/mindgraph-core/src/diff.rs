//! Diff computation between working copy and baseline

use serde::{Deserialize, Serialize};

use crate::graph::{Baseline, WorkingGraph};
use crate::model::{EdgeKey, Position, RelationKind, TopicId};

/// The minimal mutation set that brings the remote store in line with the
/// working copy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphDiff {
    /// Edges present in the working copy but not the baseline.
    pub added: Vec<(EdgeKey, RelationKind)>,
    /// Edges present in the baseline but not the working copy.
    pub removed: Vec<EdgeKey>,
    /// Topics whose rounded position differs from the baseline.
    pub moved: Vec<(TopicId, Position)>,
}

impl GraphDiff {
    /// Compute edge and position changes by identity. Pure: the same inputs
    /// always yield the same diff, in deterministic order.
    ///
    /// An edge whose endpoints are unchanged but whose kind differs produces
    /// no entry — identity is the ordered pair alone, so kind-only edits are
    /// invisible to reconciliation and silently dropped on save.
    pub fn compute(working: &WorkingGraph, baseline: &Baseline) -> Self {
        let working_keys = working.edge_keys();

        let mut diff = GraphDiff::default();
        for (key, kind) in working.edges() {
            if !baseline.edges().contains(key) {
                diff.added.push((key.clone(), *kind));
            }
        }
        for key in baseline.edges().difference(&working_keys) {
            diff.removed.push(key.clone());
        }
        for topic in working.topics() {
            let (Some(current), Some(original)) = (topic.position, baseline.position(&topic.id))
            else {
                continue;
            };
            if current.rounded() != original.rounded() {
                diff.moved.push((topic.id.clone(), current));
            }
        }
        diff
    }

    /// True when there is nothing to reconcile.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.moved.is_empty()
    }
}

/// True when the working copy differs from the baseline in edge identities
/// or rounded positions.
///
/// Topics missing from the baseline position map are skipped, not treated as
/// dirty. The position scan is short-circuited when edges already differ.
pub fn is_dirty(working: &WorkingGraph, baseline: &Baseline) -> bool {
    if working.edge_keys() != *baseline.edges() {
        return true;
    }
    working.topics().any(|topic| {
        match (topic.position, baseline.position(&topic.id)) {
            (Some(current), Some(original)) => current.rounded() != original.rounded(),
            _ => false,
        }
    })
}
