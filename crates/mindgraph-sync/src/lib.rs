//! Mindgraph Sync — snapshot loading and working-copy reconciliation

pub mod editor;
pub mod error;
pub mod snapshot;


pub use editor::EditorSession;
pub use error::{LoadError, SaveError};
pub use snapshot::{load_snapshot, Snapshot};
