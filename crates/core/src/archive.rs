//! Turns class directories into standalone archives.
//!
//! Every directory-backed location is zipped into a per-run temporary
//! workspace as `<dirname><suffix>`, with entries named by their path
//! relative to the directory root. Other locations pass through untouched.

use crate::config::ArchiveConfig;
use crate::error::{ClasspackError, Result};
use classpack_api::ArtifactLocation;
use rayon::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Fallback name for directories without a final component (e.g. `/`).
const UNNAMED_DIRECTORY: &str = "classes";

/// Result of [`archive_directories`].
///
/// `workspace` owns the generated archives; dropping it deletes them.
#[derive(Debug)]
pub struct ArchiveOutcome {
    pub locations: BTreeSet<ArtifactLocation>,
    pub workspace: Option<TempDir>,
}

/// A single directory scheduled for archiving.
#[derive(Debug, Clone)]
struct ArchivePlan {
    source: PathBuf,
    target: PathBuf,
}

/// Replaces each directory location with a freshly built archive.
///
/// Without directory locations this returns the input as-is and touches
/// nothing on disk.
pub fn archive_directories(
    locations: BTreeSet<ArtifactLocation>,
    config: &ArchiveConfig,
) -> Result<ArchiveOutcome> {
    config.validate()?;

    let (directories, mut kept): (BTreeSet<_>, BTreeSet<_>) =
        locations.into_iter().partition(ArtifactLocation::is_directory);

    if directories.is_empty() {
        return Ok(ArchiveOutcome {
            locations: kept,
            workspace: None,
        });
    }

    let workspace = create_workspace(config)?;
    let root = std::path::absolute(workspace.path())
        .map_err(|e| ClasspackError::archive(workspace.path(), e))?;
    let plans = plan_archives(&directories, &root, &config.suffix);

    let archives = plans
        .par_iter()
        .map(|plan| -> Result<ArtifactLocation> {
            let entries =
                write_archive_or_discard(&plan.source, &plan.target, Some(root.as_path()))?;
            info!(
                "Archived {} ({} entries) into {}",
                plan.source.display(),
                entries,
                plan.target.display()
            );
            Ok(ArtifactLocation::from_file_path(&plan.target)?)
        })
        .collect::<Result<Vec<_>>>()?;

    kept.extend(archives);

    Ok(ArchiveOutcome {
        locations: kept,
        workspace: Some(workspace),
    })
}

fn create_workspace(config: &ArchiveConfig) -> Result<TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(&config.temp_prefix);

    let workspace = match &config.temp_root {
        Some(root) => builder
            .tempdir_in(root)
            .map_err(|e| ClasspackError::archive(root, e))?,
        None => builder
            .tempdir()
            .map_err(|e| ClasspackError::archive(std::env::temp_dir(), e))?,
    };
    debug!("Created archive workspace {}", workspace.path().display());
    Ok(workspace)
}

/// Assigns each directory a distinct archive name inside `root`.
fn plan_archives(
    directories: &BTreeSet<ArtifactLocation>,
    root: &Path,
    suffix: &str,
) -> Vec<ArchivePlan> {
    let mut taken = HashSet::new();

    directories
        .iter()
        .filter_map(|location| {
            let source = location.to_file_path()?;
            let stem = location
                .display_name()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| UNNAMED_DIRECTORY.to_string());

            let mut file_name = format!("{stem}{suffix}");
            let mut counter = 1;
            while !taken.insert(file_name.clone()) {
                file_name = disambiguate(&stem, suffix, counter);
                counter += 1;
            }

            Some(ArchivePlan {
                source,
                target: root.join(file_name),
            })
        })
        .collect()
}

/// `b` + `-dir.jar` + 1 -> `b-dir-1.jar`
fn disambiguate(stem: &str, suffix: &str, counter: usize) -> String {
    match suffix.rfind('.') {
        Some(dot) if dot > 0 => format!("{stem}{}-{counter}{}", &suffix[..dot], &suffix[dot..]),
        _ => format!("{stem}{suffix}-{counter}"),
    }
}

fn write_archive_or_discard(
    source: &Path,
    target: &Path,
    skip: Option<&Path>,
) -> Result<usize> {
    let result = write_archive(source, target, skip);
    if result.is_err() {
        let _ = std::fs::remove_file(target);
    }
    result
}

/// Writes every regular file under `source` into a zip at `target`.
/// Returns the number of entries written.
///
/// `target` and anything under `skip` (the archive workspace) are never
/// written as entries, even when they sit inside `source`.
pub fn write_archive(source: &Path, target: &Path, skip: Option<&Path>) -> Result<usize> {
    let file = File::create(target).map_err(|e| ClasspackError::archive(target, e))?;
    let mut writer = ZipWriter::new(BufWriter::new(file));
    let mut entries = 0;

    let walker = WalkDir::new(source)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let path = e.path();
            path != target && !skip.is_some_and(|root| path.starts_with(root))
        });

    for entry in walker {
        let entry = entry?;
        let path = entry.path();

        // Follows symlinks; directories are implied by entry names.
        if !path.is_file() {
            continue;
        }

        let relative = path
            .strip_prefix(source)
            .map_err(|e| ClasspackError::archive(path, std::io::Error::other(e)))?;
        let size = std::fs::metadata(path)
            .map_err(|e| ClasspackError::archive(path, e))?
            .len();

        let options = SimpleFileOptions::default().large_file(size >= u32::MAX as u64);
        writer.start_file(entry_name(relative), options)?;

        let mut input = File::open(path).map_err(|e| ClasspackError::archive(path, e))?;
        std::io::copy(&mut input, &mut writer).map_err(|e| ClasspackError::archive(path, e))?;
        entries += 1;
    }

    let mut sink = writer.finish()?;
    std::io::Write::flush(&mut sink).map_err(|e| ClasspackError::archive(target, e))?;
    Ok(entries)
}

/// Zip entry names always use `/`, whatever the host separator.
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
