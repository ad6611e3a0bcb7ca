//! Screen region capture.
//!
//! Platform implementations:
//! - Windows: GDI `BitBlt` + `GetDIBits` (`windows.rs`)
//! - macOS: Core Graphics `CGDisplay::image_for_rect` (`macos.rs`)
//! - Linux/BSD: X11 `GetImage` via x11rb (`x11.rs`)
//!
//! Every backend hands a packed 32-bit buffer to [`decode_packed`], which
//! lifts it into the 16-bit [`Color`] model row by row.

use pixloc_core::{CaptureResult, Color, Region, ScreenCapture};
use tracing::debug;

use crate::{PlatformError, PlatformResult};

#[cfg(windows)]
mod windows;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(not(any(windows, target_os = "macos")))]
mod x11;

/// Byte positions of the color channels inside one 32-bit pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChannelLayout {
    pub red: usize,
    pub green: usize,
    pub blue: usize,
}

impl ChannelLayout {
    /// `B G R X` in memory (GDI DIBs, Core Graphics).
    #[cfg(any(windows, target_os = "macos", test))]
    pub const BGRX: Self = Self {
        red: 2,
        green: 1,
        blue: 0,
    };
    /// `X R G B` in memory.
    #[cfg(test)]
    pub const XRGB: Self = Self {
        red: 1,
        green: 2,
        blue: 3,
    };
}

/// Packed 32-bit image as handed back by a backend.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PackedImage<'a> {
    pub data: &'a [u8],
    pub width: usize,
    pub height: usize,
    pub bytes_per_row: usize,
    pub layout: ChannelLayout,
}

/// Decode a packed image onto a `width x height` grid.
///
/// The image must cover the grid exactly or be a whole-number multiple of it
/// on both axes (Retina backing stores); the top-left source pixel of each
/// block is used. Anything else means the backend clipped the region.
pub(crate) fn decode_packed(
    image: PackedImage<'_>,
    width: u32,
    height: u32,
) -> PlatformResult<Vec<Color>> {
    let (width, height) = (width as usize, height as usize);
    if image.width == 0 || image.height == 0 || image.bytes_per_row < image.width * 4 {
        return Err(PlatformError::UnsupportedFormat(format!(
            "{}x{} image with {} bytes per row",
            image.width, image.height, image.bytes_per_row
        )));
    }
    let scale = image_scale(image.width, image.height, width, height).ok_or_else(|| {
        PlatformError::CaptureFailed(format!(
            "backend returned a {}x{} image for a {width}x{height} region",
            image.width, image.height
        ))
    })?;
    let needed = (image.height - 1) * image.bytes_per_row + image.width * 4;
    if image.data.len() < needed {
        return Err(PlatformError::CaptureFailed(format!(
            "image buffer holds {} bytes, expected at least {}",
            image.data.len(),
            needed
        )));
    }

    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        let row = &image.data[y * scale * image.bytes_per_row..];
        for x in 0..width {
            let sx = x * scale * 4;
            let px = &row[sx..sx + 4];
            pixels.push(Color::from_rgb8(
                px[image.layout.red],
                px[image.layout.green],
                px[image.layout.blue],
            ));
        }
    }
    Ok(pixels)
}

/// Whole-number factor between image and grid, shared by both axes.
fn image_scale(
    image_width: usize,
    image_height: usize,
    width: usize,
    height: usize,
) -> Option<usize> {
    if width == 0 || height == 0 || image_width % width != 0 || image_height % height != 0 {
        return None;
    }
    let scale = image_width / width;
    (scale > 0 && image_height / height == scale).then_some(scale)
}

/// Captures regions of the primary display.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisplayCapture;

impl DisplayCapture {
    pub fn new() -> Self {
        Self
    }

    /// Capture `region` and return row-major pixels.
    pub fn capture_region(&self, region: Region) -> PlatformResult<Vec<Color>> {
        debug!(?region, "capturing screen region");

        #[cfg(windows)]
        {
            windows::capture_region(region)
        }
        #[cfg(target_os = "macos")]
        {
            macos::capture_region(region)
        }
        #[cfg(not(any(windows, target_os = "macos")))]
        {
            x11::capture_region(region)
        }
    }
}

impl ScreenCapture for DisplayCapture {
    fn capture(&self, region: Region) -> CaptureResult<Vec<Color>> {
        Ok(self.capture_region(region)?)
    }
}
