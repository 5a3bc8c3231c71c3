//! Class dependency resolution.
//!
//! Given root classes, finds every artifact (archive or class directory)
//! backing their transitive dependencies:
//! 1. Closure over the dependency graph, seeded with the roots' direct dependencies
//! 2. Literal substring exclusions
//! 3. Only `file:` locations survive
//! 4. Optionally, class directories are packed into archives (see [`crate::archive`])

pub mod filter;
pub mod traversal;

use crate::archive::archive_directories;
use crate::config::ResolverConfig;
use crate::error::Result;
use classpack_api::{ArtifactLocation, ClassRef, DependencyGraph, GraphProvider};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};

pub use filter::{apply_exclusions, retain_local};
pub use traversal::{Traversal, collect_locations};

/// Resolves the local artifact locations needed by `roots`.
///
/// Pure over its inputs: no filesystem access, no archiving.
pub fn resolve(
    roots: &[ClassRef],
    exclusions: &[String],
    graph: &dyn DependencyGraph,
) -> Result<BTreeSet<ArtifactLocation>> {
    let mut locations = collect_locations(graph, roots)?;
    apply_exclusions(&mut locations, exclusions);
    retain_local(&mut locations);
    Ok(locations)
}

/// Builder-style entry point used by deployment tooling.
#[derive(Debug, Clone, Default)]
pub struct ClassDependencyResolver {
    classes: Vec<ClassRef>,
    exclusions: Vec<String>,
    config: ResolverConfig,
}

impl ClassDependencyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Add root classes. May be called repeatedly.
    pub fn with_classes<I, C>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ClassRef>,
    {
        self.classes.extend(classes.into_iter().map(Into::into));
        self
    }

    /// Add exclusion substrings. May be called repeatedly.
    pub fn excluding<I, S>(mut self, exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions.extend(exclusions.into_iter().map(Into::into));
        self
    }

    pub fn classes(&self) -> &[ClassRef] {
        &self.classes
    }

    pub fn exclusions(&self) -> &[String] {
        &self.exclusions
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Loads a fresh graph from `provider` and resolves against it.
    ///
    /// With `create_archives`, every directory in the result is replaced by
    /// a temporary archive of its contents, owned by the returned value.
    pub fn process(
        &self,
        provider: &dyn GraphProvider,
        create_archives: bool,
    ) -> Result<Resolution> {
        self.config.validate()?;

        debug!("Loading dependency graph from {}", provider.name());
        let graph = provider.load()?;
        let locations = resolve(&self.classes, &self.exclusions, graph.as_ref())?;
        drop(graph);

        let resolution = if create_archives {
            let outcome = archive_directories(locations, &self.config.archive)?;
            Resolution {
                locations: outcome.locations,
                workspace: outcome.workspace,
            }
        } else {
            Resolution::new(locations)
        };

        info!(
            "Resolved {} artifact(s) for {} root class(es)",
            resolution.len(),
            self.classes.len()
        );
        Ok(resolution)
    }
}

/// Outcome of a resolution run.
///
/// Archives built for class directories live in `workspace`; they are
/// removed (best effort) when this value is dropped unless [`persist`] is
/// called.
///
/// [`persist`]: Resolution::persist
#[derive(Debug)]
pub struct Resolution {
    locations: BTreeSet<ArtifactLocation>,
    workspace: Option<TempDir>,
}

impl Resolution {
    pub fn new(locations: BTreeSet<ArtifactLocation>) -> Self {
        Self {
            locations,
            workspace: None,
        }
    }

    pub fn locations(&self) -> &BTreeSet<ArtifactLocation> {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn contains(&self, location: &ArtifactLocation) -> bool {
        self.locations.contains(location)
    }

    /// Temporary directory holding generated archives, if any were built.
    pub fn workspace_path(&self) -> Option<&Path> {
        self.workspace.as_ref().map(TempDir::path)
    }

    /// Absolute local paths, in location order, for handing to a deploy step.
    pub fn deployment_paths(&self) -> Vec<String> {
        self.locations
            .iter()
            .filter_map(ArtifactLocation::to_file_path)
            .map(|path| path.to_string_lossy().into_owned())
            .collect()
    }

    /// Keeps generated archives on disk and returns the locations together
    /// with the workspace path.
    pub fn persist(self) -> (BTreeSet<ArtifactLocation>, Option<PathBuf>) {
        let workspace = self.workspace.map(TempDir::keep);
        (self.locations, workspace)
    }
}
