//! JSON interchange format for a precomputed dependency graph.
//!
//! ```json
//! {
//!   "classes": {
//!     "com.example.Root": { "location": "/lib/root.jar", "dependencies": ["com.example.A"] },
//!     "com.example.A":    { "location": "file:///classes/a/", "dependencies": [] }
//!   }
//! }
//! ```
//!
//! Locations are URIs or paths; a trailing `/` marks a class directory and
//! relative paths are resolved against the snapshot file's directory.

use super::InMemoryGraph;
use crate::error::Result;
use classpack_api::{
    ApiError, ApiResult, ArtifactLocation, DependencyGraph, GraphError, GraphProvider, GraphResult,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct GraphSnapshot {
    /// Fully-qualified class name -> entry.
    #[serde(default)]
    pub classes: BTreeMap<String, ClassEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct ClassEntry {
    /// Archive or directory defining the class. Classes without one are ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Classes referenced directly by this class.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl GraphSnapshot {
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Builds the graph; relative locations are joined onto `base`.
    pub fn into_graph(&self, base: Option<&Path>) -> ApiResult<InMemoryGraph> {
        let mut graph = InMemoryGraph::new();

        for (name, entry) in &self.classes {
            match &entry.location {
                Some(raw) => {
                    graph.add_class(name.as_str(), resolve_location(raw, base)?);
                }
                None => debug!("Skipping {} without a location", name),
            }
        }

        for (name, entry) in &self.classes {
            for dep in &entry.dependencies {
                graph.add_dependency(name.as_str(), dep.as_str());
            }
        }

        Ok(graph)
    }

    pub fn schema() -> schemars::Schema {
        schemars::schema_for!(GraphSnapshot)
    }
}

fn resolve_location(raw: &str, base: Option<&Path>) -> ApiResult<ArtifactLocation> {
    match ArtifactLocation::parse(raw) {
        Ok(location) => Ok(location),
        Err(err) => {
            let Some(base) = base else {
                return Err(err);
            };
            let mut joined = base.join(raw).to_string_lossy().into_owned();
            if raw.ends_with('/') && !joined.ends_with('/') {
                joined.push('/');
            }
            ArtifactLocation::parse(&joined).map_err(|_| {
                ApiError::InvalidLocation(format!("{raw} (relative to {})", base.display()))
            })
        }
    }
}

/// Loads a [`GraphSnapshot`] file each time a graph is requested.
pub struct JsonGraphProvider {
    path: PathBuf,
    name: String,
}

impl JsonGraphProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("json:{}", path.display());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GraphProvider for JsonGraphProvider {
    fn load(&self) -> GraphResult<Box<dyn DependencyGraph>> {
        let unavailable = |reason: String| {
            warn!("Failed to load dependency graph {}: {}", self.path.display(), reason);
            GraphError::Unavailable(format!("{}: {}", self.path.display(), reason))
        };

        let snapshot =
            GraphSnapshot::from_path(&self.path).map_err(|e| unavailable(e.to_string()))?;
        let base = std::path::absolute(&self.path)
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf));
        let graph = snapshot
            .into_graph(base.as_deref())
            .map_err(|e| unavailable(e.to_string()))?;

        debug!(
            "Loaded dependency graph from {}: {} classes, {} edges",
            self.path.display(),
            graph.class_count(),
            graph.edge_count()
        );
        Ok(Box::new(graph))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
