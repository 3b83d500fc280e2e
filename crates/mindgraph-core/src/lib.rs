//! Mindgraph Core — graph data model, change detection, and diff engine

pub mod diff;
pub mod graph;
pub mod layout;
pub mod model;


pub use diff::{is_dirty, GraphDiff};
pub use graph::{Baseline, WorkingGraph};
pub use layout::fallback_position;
pub use model::{Category, EdgeKey, Position, RelationKind, Topic, TopicId, UnknownRelationKind};
