use crate::resolver::Resolution;
use classpack_api::{ApiError, ApiResult, ArtifactLocation};
use serde::{Deserialize, Serialize};

/// A named set of artifacts handed to a deploy operation.
///
/// The name identifies what requested the deployment (typically the
/// configuration class that declared the anchors).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeploymentCollection {
    name: String,
    artifacts: Vec<ArtifactLocation>,
}

impl DeploymentCollection {
    pub fn new(name: impl Into<String>, artifacts: Vec<ArtifactLocation>) -> ApiResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ApiError::InvalidArgument(
                "deployment name is required".to_string(),
            ));
        }
        Ok(Self { name, artifacts })
    }

    pub fn from_resolution(name: impl Into<String>, resolution: &Resolution) -> ApiResult<Self> {
        Self::new(name, resolution.locations().iter().cloned().collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn artifacts(&self) -> &[ArtifactLocation] {
        &self.artifacts
    }

    /// Local filesystem paths, in order. Non-local artifacts are skipped.
    pub fn paths(&self) -> Vec<String> {
        self.artifacts
            .iter()
            .filter_map(ArtifactLocation::to_file_path)
            .map(|path| path.to_string_lossy().into_owned())
            .collect()
    }
}
