use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

pub const FILE_SCHEME: &str = "file";

/// Where a class is defined: a packaged archive, a class directory, or some
/// non-local location (`jrt:`, `http:` ...).
///
/// Equality is by the normalized URL, so `file:///lib/./a.jar` and
/// `file:///lib/a.jar` are the same location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactLocation(Url);

impl ArtifactLocation {
    /// Location of an archive file. The path must be absolute.
    pub fn from_file_path(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        Url::from_file_path(path)
            .map(Self)
            .map_err(|_| ApiError::InvalidLocation(path.display().to_string()))
    }

    /// Location of a class directory. The path must be absolute.
    pub fn from_directory_path(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        Url::from_directory_path(path)
            .map(Self)
            .map_err(|_| ApiError::InvalidLocation(path.display().to_string()))
    }

    /// Parses either a URI (`file:///lib/a.jar`, `jrt:/java.base`) or an
    /// absolute filesystem path. Paths ending in a separator are directories.
    pub fn parse(raw: &str) -> ApiResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ApiError::InvalidLocation(raw.to_string()));
        }

        if Path::new(trimmed).is_absolute() {
            return if trimmed.ends_with('/') || trimmed.ends_with(std::path::MAIN_SEPARATOR) {
                Self::from_directory_path(trimmed)
            } else {
                Self::from_file_path(trimmed)
            };
        }

        Url::parse(trimmed)
            .map(Self)
            .map_err(|e| ApiError::InvalidLocation(format!("{trimmed}: {e}")))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    pub fn is_file_scheme(&self) -> bool {
        self.0.scheme().eq_ignore_ascii_case(FILE_SCHEME)
    }

    /// Local filesystem path, if this is a `file:` location.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if !self.is_file_scheme() {
            return None;
        }
        self.0.to_file_path().ok()
    }

    /// True when this is a `file:` location that is a directory right now.
    pub fn is_directory(&self) -> bool {
        self.to_file_path().is_some_and(|path| path.is_dir())
    }

    /// Final path component, ignoring a trailing slash.
    pub fn display_name(&self) -> Option<String> {
        if let Some(path) = self.to_file_path() {
            return path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned());
        }
        self.0
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string)
    }
}

impl fmt::Display for ArtifactLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl TryFrom<String> for ArtifactLocation {
    type Error = ApiError;

    fn try_from(raw: String) -> ApiResult<Self> {
        Self::parse(&raw)
    }
}

impl From<ArtifactLocation> for String {
    fn from(location: ArtifactLocation) -> Self {
        location.0.into()
    }
}
