#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid artifact location: {0}")]
    InvalidLocation(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failures of the dependency-graph capability.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Dependency graph unavailable: {0}")]
    Unavailable(String),
}

pub type GraphResult<T> = std::result::Result<T, GraphError>;
