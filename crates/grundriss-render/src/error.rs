//! Render error types.

use thiserror::Error;

/// Errors from the raster pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid raster size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    PngEncode(#[from] png::EncodingError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
