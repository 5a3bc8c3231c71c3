use classpack_api::{ApiError, GraphError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClasspackError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("Archive I/O error at {}: {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClasspackError {
    pub(crate) fn archive(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ClasspackError::Archive {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClasspackError>;
