//! Mindgraph Client — remote graph store implementations

pub mod http;
pub mod memory;
pub mod session;
pub mod store;

#[cfg(test)]
pub mod tests;

pub use http::HttpStore;
pub use memory::MemoryStore;
pub use session::Session;
pub use store::{GraphStore, OutgoingEdge, StoreError};
