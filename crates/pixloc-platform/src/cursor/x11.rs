//! Cursor position via X11 `QueryPointer` on the root window.

use tracing::debug;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::ConnectionExt;

use super::CursorPosition;
use crate::{PlatformError, PlatformResult};

pub fn cursor_position() -> PlatformResult<CursorPosition> {
    let (conn, screen_num) =
        x11rb::connect(None).map_err(|e| PlatformError::DisplayUnavailable(e.to_string()))?;
    let root = conn.setup().roots[screen_num].root;

    let reply = conn
        .query_pointer(root)
        .map_err(|e| PlatformError::CursorUnavailable(e.to_string()))?
        .reply()
        .map_err(|e| PlatformError::CursorUnavailable(e.to_string()))?;

    let position = CursorPosition {
        x: i32::from(reply.root_x),
        y: i32::from(reply.root_y),
    };
    debug!(x = position.x, y = position.y, "cursor position");
    Ok(position)
}
