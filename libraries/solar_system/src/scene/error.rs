use crate::error::BuildError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneLoadError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_yaml::Error),
    #[error("Cannot build scene: {0}")]
    BuildError(#[from] BuildError),
}
