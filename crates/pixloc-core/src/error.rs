//! Common error types for pixloc-core.

use thiserror::Error;

/// Errors raised while building a [`PixelGrid`](crate::PixelGrid) from raw pixels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("region {width}x{height} is empty")]
    EmptyRegion { width: u32, height: u32 },
    #[error("expected {expected} pixels, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Errors surfaced by the display collaborator at snapshot time.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("capture failed: {0}")]
    Backend(String),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Result type for capture operations.
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Errors raised while parsing a bitmask needle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("bitmask is empty")]
    Empty,
    #[error("bitmask row {row} is empty")]
    EmptyRow { row: usize },
    #[error("bitmask row {row} contains invalid character {ch:?} (expected '*' or '_')")]
    InvalidChar { row: usize, ch: char },
    #[error("bitmask row {row} has width {actual}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Errors raised while parsing an `r,g,b` color triple.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("expected three comma-separated channels, got {0:?}")]
    Format(String),
    #[error("channel {0:?} is not a number between 0 and 255")]
    Channel(String),
}
