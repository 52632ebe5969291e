use std::path::PathBuf;

use shade_core::shadow::TextureError;

/// Errors that can occur while rendering a preview.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// I/O error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode an input image.
    #[error("Image decode error for {path}: {message}")]
    ImageDecode { path: PathBuf, message: String },

    /// Failed to encode the output image.
    #[error("Image encode error for {path}: {message}")]
    ImageEncode { path: PathBuf, message: String },

    /// Decoded shadow map could not be wrapped as a depth texture.
    #[error("Shadow map error: {0}")]
    ShadowMap(#[from] TextureError),

    /// Configuration validation failed.
    #[error("Validation error: {0}")]
    Validation(String),
}
