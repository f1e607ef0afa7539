use std::path::PathBuf;

use starschema_core::storage::RepositoryError;
use starschema_core::transform::TransformError;
use thiserror::Error;

/// Errors raised by the ETL pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to read source file {}: {source}", path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl PipelineError {
    /// Short category name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Source { .. } => "source",
            PipelineError::Transform(err) => err.kind(),
            PipelineError::Repository(_) => "storage",
        }
    }
}
