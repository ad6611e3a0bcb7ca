//! pixloc-core: pixel scanning and bitmask pattern matching.
//!
//! Design goal: keep this crate platform-agnostic. A region is captured once
//! through the [`ScreenCapture`] trait (implemented in `pixloc-platform`),
//! and every scan afterwards runs against the in-memory [`PixelGrid`].

mod bitmask;
mod color;
mod error;
mod grid;
mod report;
mod scanner;

pub use bitmask::{BitmaskLine, BitmaskPattern, MATCH, MISS};
pub use color::{Color, ColorMatcher, Rgb8, CHANNEL_MAX};
pub use error::{CaptureError, CaptureResult, ColorParseError, GridError, PatternError};
pub use grid::{PixelGrid, Region, ScreenCapture};
pub use report::{CoordinateConvention, Report};
pub use scanner::{GridMatch, Orientation, PixelScanner};
