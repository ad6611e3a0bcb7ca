//! macOS implementation of region capture using Core Graphics.
//!
//! `image_for_rect` works in points; on Retina displays the returned image
//! is larger than the region and gets downsampled onto the logical grid.
//! Regions past the display edge are rejected up front, since Core Graphics
//! would silently clip them.

use core_graphics::display::CGDisplay;
use core_graphics::geometry::{CGPoint, CGRect, CGSize};
use pixloc_core::{Color, Region};

use super::{decode_packed, ChannelLayout, PackedImage};
use crate::{PlatformError, PlatformResult};

pub fn capture_region(region: Region) -> PlatformResult<Vec<Color>> {
    let display = CGDisplay::main();
    let bounds = display.bounds();
    if f64::from(region.x) < bounds.origin.x
        || f64::from(region.y) < bounds.origin.y
        || f64::from(region.x) + f64::from(region.width) > bounds.origin.x + bounds.size.width
        || f64::from(region.y) + f64::from(region.height) > bounds.origin.y + bounds.size.height
    {
        return Err(PlatformError::RegionOutOfBounds {
            x: region.x,
            y: region.y,
            width: region.width,
            height: region.height,
        });
    }

    let rect = CGRect::new(
        &CGPoint::new(f64::from(region.x), f64::from(region.y)),
        &CGSize::new(f64::from(region.width), f64::from(region.height)),
    );

    let image = display.image_for_rect(rect).ok_or_else(|| {
        PlatformError::CaptureFailed(
            "CGDisplayCreateImageForRect returned null (screen recording permission?)".into(),
        )
    })?;

    if image.bits_per_pixel() != 32 {
        return Err(PlatformError::UnsupportedFormat(format!(
            "{} bits per pixel",
            image.bits_per_pixel()
        )));
    }

    let data = image.data();
    decode_packed(
        PackedImage {
            data: data.bytes(),
            width: image.width(),
            height: image.height(),
            bytes_per_row: image.bytes_per_row(),
            layout: ChannelLayout::BGRX,
        },
        region.width,
        region.height,
    )
}
