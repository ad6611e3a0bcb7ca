//! X11 implementation of region capture using `GetImage` on the root window.

use pixloc_core::{Color, Region};
use tracing::debug;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{ConnectionExt, ImageFormat, ImageOrder};

use super::{decode_packed, ChannelLayout, PackedImage};
use crate::{PlatformError, PlatformResult};

pub fn capture_region(region: Region) -> PlatformResult<Vec<Color>> {
    let (conn, screen_num) =
        x11rb::connect(None).map_err(|e| PlatformError::DisplayUnavailable(e.to_string()))?;
    let setup = conn.setup();
    let screen = &setup.roots[screen_num];

    let out_of_bounds = || PlatformError::RegionOutOfBounds {
        x: region.x,
        y: region.y,
        width: region.width,
        height: region.height,
    };
    let x = i16::try_from(region.x).map_err(|_| out_of_bounds())?;
    let y = i16::try_from(region.y).map_err(|_| out_of_bounds())?;
    let width = u16::try_from(region.width).map_err(|_| out_of_bounds())?;
    let height = u16::try_from(region.height).map_err(|_| out_of_bounds())?;
    if region.x < 0
        || region.y < 0
        || i64::from(region.x) + i64::from(width) > i64::from(screen.width_in_pixels)
        || i64::from(region.y) + i64::from(height) > i64::from(screen.height_in_pixels)
    {
        return Err(out_of_bounds());
    }

    let reply = conn
        .get_image(ImageFormat::Z_PIXMAP, screen.root, x, y, width, height, !0)
        .map_err(|e| PlatformError::CaptureFailed(e.to_string()))?
        .reply()
        .map_err(|e| PlatformError::CaptureFailed(e.to_string()))?;

    let format = setup
        .pixmap_formats
        .iter()
        .find(|f| f.depth == reply.depth)
        .ok_or_else(|| {
            PlatformError::UnsupportedFormat(format!("no pixmap format for depth {}", reply.depth))
        })?;
    if format.bits_per_pixel != 32 {
        return Err(PlatformError::UnsupportedFormat(format!(
            "{} bits per pixel at depth {}",
            format.bits_per_pixel, reply.depth
        )));
    }

    let visual = screen
        .allowed_depths
        .iter()
        .flat_map(|d| &d.visuals)
        .find(|v| v.visual_id == reply.visual)
        .ok_or_else(|| {
            PlatformError::UnsupportedFormat(format!("unknown visual {:#x}", reply.visual))
        })?;
    let layout = channel_layout(
        visual.red_mask,
        visual.green_mask,
        visual.blue_mask,
        setup.image_byte_order,
    )?;
    debug!(depth = reply.depth, ?layout, "decoding ZPixmap");

    decode_packed(
        PackedImage {
            data: &reply.data,
            width: usize::from(width),
            height: usize::from(height),
            bytes_per_row: row_stride(usize::from(width), 32, usize::from(format.scanline_pad)),
            layout,
        },
        region.width,
        region.height,
    )
}

/// Byte positions of the channels inside a 32-bit pixel, from the visual's
/// masks. Only byte-aligned 8-bit channels are supported.
fn channel_layout(
    red_mask: u32,
    green_mask: u32,
    blue_mask: u32,
    order: ImageOrder,
) -> PlatformResult<ChannelLayout> {
    let byte = |mask: u32| {
        let shift = mask.trailing_zeros();
        if mask == 0 || shift % 8 != 0 || mask >> shift != 0xff {
            return Err(PlatformError::UnsupportedFormat(format!(
                "channel mask {mask:#010x}"
            )));
        }
        let from_lsb = (shift / 8) as usize;
        Ok(if order == ImageOrder::LSB_FIRST {
            from_lsb
        } else {
            3 - from_lsb
        })
    };
    Ok(ChannelLayout {
        red: byte(red_mask)?,
        green: byte(green_mask)?,
        blue: byte(blue_mask)?,
    })
}

/// Bytes per scanline, padded to `scanline_pad` bits.
fn row_stride(width: usize, bits_per_pixel: usize, scanline_pad: usize) -> usize {
    let pad = scanline_pad.max(8);
    (width * bits_per_pixel).div_ceil(pad) * pad / 8
}
