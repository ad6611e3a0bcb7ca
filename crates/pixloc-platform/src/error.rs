//! Common error types for pixloc-platform.

use pixloc_core::CaptureError;
use thiserror::Error;

/// Platform-level errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("display unavailable: {0}")]
    DisplayUnavailable(String),
    #[error("capture failed: {0}")]
    CaptureFailed(String),
    #[error("region {width}x{height} at ({x}, {y}) is outside the screen")]
    RegionOutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(String),
    #[error("cursor position unavailable: {0}")]
    CursorUnavailable(String),
}

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;

impl From<PlatformError> for CaptureError {
    fn from(err: PlatformError) -> Self {
        CaptureError::Backend(err.to_string())
    }
}
