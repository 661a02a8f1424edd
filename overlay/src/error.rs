//! Error types for preview rendering

use std::path::PathBuf;
use thiserror::Error;

/// Errors while painting or saving a preview
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("invalid preview size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("invalid color '{value}'")]
    Color {
        value: String,
        #[source]
        source: csscolorparser::ParseColorError,
    },

    #[error("failed to write PNG to {path}")]
    EncodePng {
        path: PathBuf,
        #[source]
        source: png::EncodingError,
    },
}
