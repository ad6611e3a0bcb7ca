//! Global mouse cursor position.
//!
//! Platform implementations:
//! - Windows/macOS: `enigo` (`enigo_impl.rs`)
//! - Linux/BSD: X11 `QueryPointer` via x11rb (`x11.rs`)

#[cfg(any(windows, target_os = "macos"))]
mod enigo_impl;

#[cfg(not(any(windows, target_os = "macos")))]
mod x11;

use crate::PlatformResult;

/// Current mouse position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorPosition {
    pub x: i32,
    pub y: i32,
}

/// Read the current global cursor position in screen coordinates.
pub fn cursor_position() -> PlatformResult<CursorPosition> {
    #[cfg(any(windows, target_os = "macos"))]
    {
        enigo_impl::cursor_position()
    }
    #[cfg(not(any(windows, target_os = "macos")))]
    {
        x11::cursor_position()
    }
}
