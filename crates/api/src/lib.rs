pub mod error;
pub mod graph;
pub mod models;

// Re-export commonly used types
pub use error::{ApiError, ApiResult, GraphError, GraphResult};
pub use graph::{DependencyGraph, GraphProvider};
pub use models::*;
