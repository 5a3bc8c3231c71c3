use classpack_api::{ArtifactLocation, ClassRef, DependencyGraph, GraphProvider, GraphResult};
use std::collections::{BTreeMap, BTreeSet};

/// Dependency graph held entirely in memory.
///
/// Only classes with a known location become keys of the dependency map;
/// edges pointing at unknown classes are kept but lead nowhere.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGraph {
    dependencies: BTreeMap<ClassRef, BTreeSet<ClassRef>>,
    locations: BTreeMap<ClassRef, ArtifactLocation>,
}

impl InMemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class and the artifact that defines it.
    pub fn add_class(
        &mut self,
        class: impl Into<ClassRef>,
        location: ArtifactLocation,
    ) -> &mut Self {
        let class = class.into();
        self.dependencies.entry(class.clone()).or_default();
        self.locations.insert(class, location);
        self
    }

    /// Record that `from` references `to`. Ignored when `from` is unknown.
    pub fn add_dependency(
        &mut self,
        from: impl Into<ClassRef>,
        to: impl Into<ClassRef>,
    ) -> &mut Self {
        let from = from.into();
        if let Some(targets) = self.dependencies.get_mut(&from) {
            targets.insert(to.into());
        }
        self
    }

    pub fn class_count(&self) -> usize {
        self.dependencies.len()
    }

    pub fn edge_count(&self) -> usize {
        self.dependencies.values().map(BTreeSet::len).sum()
    }

    /// Distinct artifact locations across all known classes.
    pub fn distinct_locations(&self) -> BTreeSet<&ArtifactLocation> {
        self.locations.values().collect()
    }

    /// Dependency targets that are not themselves known classes.
    pub fn dangling_references(&self) -> BTreeSet<&ClassRef> {
        self.dependencies
            .values()
            .flatten()
            .filter(|target| !self.dependencies.contains_key(*target))
            .collect()
    }
}

impl DependencyGraph for InMemoryGraph {
    fn contains(&self, class: &ClassRef) -> GraphResult<bool> {
        Ok(self.dependencies.contains_key(class))
    }

    fn direct_dependencies(&self, class: &ClassRef) -> GraphResult<Vec<ClassRef>> {
        Ok(self
            .dependencies
            .get(class)
            .map(|targets| targets.iter().cloned().collect())
            .unwrap_or_default())
    }

    fn location_of(&self, class: &ClassRef) -> GraphResult<Option<ArtifactLocation>> {
        Ok(self.locations.get(class).cloned())
    }

    fn known_classes(&self) -> GraphResult<Vec<ClassRef>> {
        Ok(self.dependencies.keys().cloned().collect())
    }
}

impl GraphProvider for InMemoryGraph {
    fn load(&self) -> GraphResult<Box<dyn DependencyGraph>> {
        Ok(Box::new(self.clone()))
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}
