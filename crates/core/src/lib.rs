pub mod archive;
pub mod config;
pub mod deployment;
pub mod error;
pub mod graph;
pub mod logging;
pub mod resolver;

pub use archive::{ArchiveOutcome, archive_directories};
pub use config::{ArchiveConfig, LogConfig, ResolverConfig};
pub use deployment::DeploymentCollection;
pub use error::{ClasspackError, Result};
pub use graph::{GraphSnapshot, InMemoryGraph, JsonGraphProvider};
pub use resolver::{ClassDependencyResolver, Resolution, resolve};
