//! Cursor position via `enigo`.

use enigo::{Enigo, Mouse, Settings};
use tracing::debug;

use super::CursorPosition;
use crate::{PlatformError, PlatformResult};

pub fn cursor_position() -> PlatformResult<CursorPosition> {
    let settings = Settings::default();
    let enigo = Enigo::new(&settings)
        .map_err(|e| PlatformError::CursorUnavailable(format!("failed to create Enigo: {e}")))?;
    let (x, y) = enigo
        .location()
        .map_err(|e| PlatformError::CursorUnavailable(e.to_string()))?;
    debug!(x, y, "cursor position");
    Ok(CursorPosition { x, y })
}
