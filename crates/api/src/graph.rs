//! The dependency-graph capability consumed by the resolver.
//!
//! Computing the graph (bytecode analysis, classpath scanning) lives behind
//! these traits, so the analysis backend can be swapped without touching
//! traversal logic.

use crate::error::GraphResult;
use crate::models::{ArtifactLocation, ClassRef};

/// A read-only snapshot of class-level dependencies.
pub trait DependencyGraph: Send + Sync {
    /// Whether the class is a key of the direct-dependency map.
    fn contains(&self, class: &ClassRef) -> GraphResult<bool>;

    /// Classes directly referenced by `class`. Unknown classes have none.
    fn direct_dependencies(&self, class: &ClassRef) -> GraphResult<Vec<ClassRef>>;

    /// Archive or directory defining `class`, if known.
    fn location_of(&self, class: &ClassRef) -> GraphResult<Option<ArtifactLocation>>;

    /// Every class in the scanned universe.
    fn known_classes(&self) -> GraphResult<Vec<ClassRef>>;
}

/// Builds a fresh graph for each resolution run.
pub trait GraphProvider: Send + Sync {
    fn load(&self) -> GraphResult<Box<dyn DependencyGraph>>;

    /// Provider name (for logging/debugging)
    fn name(&self) -> &str;
}
