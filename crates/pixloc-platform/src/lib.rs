//! pixloc-platform: platform-specific I/O boundary for pixloc.
//!
//! This crate provides:
//! - One-shot screen region capture implementing [`pixloc_core::ScreenCapture`]
//! - Global mouse cursor position
//!
//! ## Module Structure
//!
//! - `error` - Common error types
//! - `capture` - Region capture (GDI / Core Graphics / X11)
//! - `cursor` - Cursor position (enigo / X11)

mod capture;
mod cursor;
mod error;

pub use capture::DisplayCapture;
pub use cursor::{cursor_position, CursorPosition};
pub use error::{PlatformError, PlatformResult};
