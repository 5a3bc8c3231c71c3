use classpack_api::{ArtifactLocation, ClassRef, DependencyGraph, GraphResult};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Bookkeeping for one closure run. Never shared between runs.
#[derive(Debug, Default)]
pub struct Traversal {
    seen: HashSet<ClassRef>,
    levels: usize,
}

impl Traversal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> usize {
        self.seen.len()
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Breadth-first closure starting at `frontier`, collecting the location
    /// of every class reached.
    pub fn accumulate(
        &mut self,
        graph: &dyn DependencyGraph,
        mut frontier: BTreeSet<ClassRef>,
        accumulated: &mut BTreeSet<ArtifactLocation>,
    ) -> GraphResult<()> {
        while !frontier.is_empty() {
            self.levels += 1;
            let mut next = BTreeSet::new();

            for class in frontier {
                if self.seen.contains(&class) {
                    continue;
                }

                if let Some(location) = graph.location_of(&class)? {
                    accumulated.insert(location);
                }
                next.extend(graph.direct_dependencies(&class)?);
                self.seen.insert(class);
            }

            next.retain(|class| !self.seen.contains(class));
            frontier = next;
        }
        Ok(())
    }
}

/// Locations reachable from the direct dependencies of `roots`.
///
/// The roots themselves only contribute a location when something else
/// depends on them. Roots unknown to the graph are skipped. An empty root
/// set yields the location of every known class.
pub fn collect_locations(
    graph: &dyn DependencyGraph,
    roots: &[ClassRef],
) -> GraphResult<BTreeSet<ArtifactLocation>> {
    let mut accumulated = BTreeSet::new();

    if roots.is_empty() {
        for class in graph.known_classes()? {
            if let Some(location) = graph.location_of(&class)? {
                accumulated.insert(location);
            }
        }
        debug!("No roots given, using all {} known locations", accumulated.len());
        return Ok(accumulated);
    }

    let mut seeds = BTreeSet::new();
    for root in roots {
        if graph.contains(root)? {
            seeds.extend(graph.direct_dependencies(root)?);
        } else {
            debug!("Skipping unknown root class {}", root);
        }
    }

    let mut traversal = Traversal::new();
    traversal.accumulate(graph, seeds, &mut accumulated)?;
    debug!(
        "Closure visited {} classes over {} levels, {} locations",
        traversal.visited(),
        traversal.levels(),
        accumulated.len()
    );

    Ok(accumulated)
}
