//! Resolver configuration.
//!
//! Every value has a default; `from_env` lets deployments override them
//! without code changes:
//! - `CLASSPACK_TEMP_DIR`: parent directory for archive workspaces
//! - `CLASSPACK_ARCHIVE_SUFFIX`: suffix appended to archived directory names
//! - `CLASSPACK_LOG_DIR`: directory for rolling log files

use crate::error::{ClasspackError, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_ARCHIVE_SUFFIX: &str = "-dir.jar";
pub const DEFAULT_TEMP_PREFIX: &str = "dependency-resolver";
pub const DEFAULT_LOG_DIR: &str = ".classpack/logs";

pub const ENV_TEMP_DIR: &str = "CLASSPACK_TEMP_DIR";
pub const ENV_ARCHIVE_SUFFIX: &str = "CLASSPACK_ARCHIVE_SUFFIX";
pub const ENV_LOG_DIR: &str = "CLASSPACK_LOG_DIR";

#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    pub archive: ArchiveConfig,
    pub log: LogConfig,
}

impl ResolverConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup (env, tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = non_empty(ENV_TEMP_DIR) {
            config.archive.temp_root = Some(PathBuf::from(dir));
        }
        if let Some(suffix) = non_empty(ENV_ARCHIVE_SUFFIX) {
            config.archive.suffix = suffix;
        }
        if let Some(dir) = non_empty(ENV_LOG_DIR) {
            config.log.dir = Some(PathBuf::from(dir));
        }
        config
    }

    pub fn validate(&self) -> Result<()> {
        self.archive.validate()
    }
}

#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    /// Appended to the directory name: `classes` -> `classes-dir.jar`.
    pub suffix: String,
    /// Prefix of the per-run temporary directory.
    pub temp_prefix: String,
    /// Parent of the per-run temporary directory; system temp dir if unset.
    pub temp_root: Option<PathBuf>,
}

impl ArchiveConfig {
    pub fn validate(&self) -> Result<()> {
        if self.suffix.is_empty() {
            return Err(ClasspackError::Config(
                "archive suffix must not be empty".to_string(),
            ));
        }
        if self.suffix.contains(['/', '\\']) {
            return Err(ClasspackError::Config(format!(
                "archive suffix must not contain path separators: {}",
                self.suffix
            )));
        }
        Ok(())
    }

    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_ARCHIVE_SUFFIX.to_string(),
            temp_prefix: DEFAULT_TEMP_PREFIX.to_string(),
            temp_root: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub dir: Option<PathBuf>,
}

impl LogConfig {
    pub fn resolved_dir(&self) -> PathBuf {
        if let Some(dir) = &self.dir {
            return dir.clone();
        }
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Path::new(&home).join(DEFAULT_LOG_DIR)
    }
}
