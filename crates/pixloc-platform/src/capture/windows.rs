//! Windows implementation of region capture using GDI.

use std::ptr;

use pixloc_core::{Color, Region};
use windows_sys::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC,
    GetDIBits, ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS,
    RGBQUAD, SRCCOPY,
};

use super::{decode_packed, ChannelLayout, PackedImage};
use crate::{PlatformError, PlatformResult};

/// Copy the region into a memory bitmap and read it back as top-down BGRA.
pub fn capture_region(region: Region) -> PlatformResult<Vec<Color>> {
    let width = i32::try_from(region.width)
        .map_err(|_| out_of_bounds(region))?;
    let height = i32::try_from(region.height)
        .map_err(|_| out_of_bounds(region))?;
    let mut buffer = vec![0u8; region.area() * 4];

    unsafe {
        let hdc_screen = GetDC(ptr::null_mut()); // null = entire screen
        if hdc_screen.is_null() {
            return Err(PlatformError::DisplayUnavailable("GetDC returned null".into()));
        }

        let hdc_mem = CreateCompatibleDC(hdc_screen);
        if hdc_mem.is_null() {
            ReleaseDC(ptr::null_mut(), hdc_screen);
            return Err(PlatformError::CaptureFailed("CreateCompatibleDC failed".into()));
        }

        let hbitmap = CreateCompatibleBitmap(hdc_screen, width, height);
        if hbitmap.is_null() {
            DeleteDC(hdc_mem);
            ReleaseDC(ptr::null_mut(), hdc_screen);
            return Err(PlatformError::CaptureFailed("CreateCompatibleBitmap failed".into()));
        }

        let old_bitmap = SelectObject(hdc_mem, hbitmap);
        let copied = BitBlt(
            hdc_mem, 0, 0, width, height, hdc_screen, region.x, region.y, SRCCOPY,
        );
        // GetDIBits requires the bitmap to be deselected first.
        SelectObject(hdc_mem, old_bitmap);

        let mut bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width,
                biHeight: -height, // Top-down
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB,
                biSizeImage: 0,
                biXPelsPerMeter: 0,
                biYPelsPerMeter: 0,
                biClrUsed: 0,
                biClrImportant: 0,
            },
            bmiColors: [RGBQUAD {
                rgbBlue: 0,
                rgbGreen: 0,
                rgbRed: 0,
                rgbReserved: 0,
            }],
        };

        let lines = if copied != 0 {
            GetDIBits(
                hdc_mem,
                hbitmap,
                0,
                height as u32,
                buffer.as_mut_ptr() as *mut _,
                &mut bmi,
                DIB_RGB_COLORS,
            )
        } else {
            0
        };

        // Cleanup
        DeleteObject(hbitmap);
        DeleteDC(hdc_mem);
        ReleaseDC(ptr::null_mut(), hdc_screen);

        if copied == 0 {
            return Err(PlatformError::CaptureFailed("BitBlt failed".into()));
        }
        if lines != height {
            return Err(PlatformError::CaptureFailed(format!(
                "GetDIBits returned {lines} of {height} lines"
            )));
        }
    }

    // 32-bit DIB rows are already DWORD aligned.
    decode_packed(
        PackedImage {
            data: &buffer,
            width: region.width as usize,
            height: region.height as usize,
            bytes_per_row: region.width as usize * 4,
            layout: ChannelLayout::BGRX,
        },
        region.width,
        region.height,
    )
}

fn out_of_bounds(region: Region) -> PlatformError {
    PlatformError::RegionOutOfBounds {
        x: region.x,
        y: region.y,
        width: region.width,
        height: region.height,
    }
}
