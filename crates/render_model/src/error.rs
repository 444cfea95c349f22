//! Error types for render model

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Image export failed: {0}")]
    ExportFailed(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
