//! Concrete dependency-graph implementations.
//!
//! - [`InMemoryGraph`]: owned adjacency maps, also usable as a provider
//! - [`JsonGraphProvider`]: loads a precomputed [`GraphSnapshot`] from disk

pub mod memory;
pub mod snapshot;

pub use memory::InMemoryGraph;
pub use snapshot::{ClassEntry, GraphSnapshot, JsonGraphProvider};
