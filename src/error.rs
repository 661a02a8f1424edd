//! Error types for the command line

use std::path::PathBuf;
use thiserror::Error;

use crate::scene::SceneError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Preview(#[from] spotlight_overlay::PreviewError),

    #[error("failed to serialize output")]
    Json(#[from] serde_json::Error),

    #[error("overlay is disabled in scene {path}")]
    NothingToRender { path: PathBuf },
}
