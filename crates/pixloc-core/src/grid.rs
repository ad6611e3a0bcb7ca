//! One-shot snapshot of a rectangular screen region.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::Color;
use crate::error::{CaptureResult, GridError};

/// Absolute rectangle on screen: origin plus extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Number of pixels covered.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Display collaborator that turns a region into raw pixels.
///
/// Implementations return `region.area()` colors in row-major order. This is
/// the only point where pixloc talks to a display.
pub trait ScreenCapture {
    fn capture(&self, region: Region) -> CaptureResult<Vec<Color>>;
}

/// Immutable in-memory snapshot addressed by local `(x, y)` offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    region: Region,
    pixels: Vec<Color>,
}

impl PixelGrid {
    /// Take the snapshot. The source is queried exactly once.
    pub fn capture<S: ScreenCapture + ?Sized>(source: &S, region: Region) -> CaptureResult<Self> {
        if region.is_empty() {
            return Err(GridError::EmptyRegion {
                width: region.width,
                height: region.height,
            }
            .into());
        }
        let pixels = source.capture(region)?;
        let grid = Self::from_pixels(region, pixels)?;
        debug!(?region, "captured region");
        Ok(grid)
    }

    /// Build a grid from row-major pixels.
    pub fn from_pixels(region: Region, pixels: Vec<Color>) -> Result<Self, GridError> {
        if region.is_empty() {
            return Err(GridError::EmptyRegion {
                width: region.width,
                height: region.height,
            });
        }
        if pixels.len() != region.area() {
            return Err(GridError::SizeMismatch {
                expected: region.area(),
                actual: pixels.len(),
            });
        }
        Ok(Self { region, pixels })
    }

    /// Build a grid by evaluating `f` at every local offset.
    pub fn from_fn(
        region: Region,
        mut f: impl FnMut(u32, u32) -> Color,
    ) -> Result<Self, GridError> {
        let mut pixels = Vec::with_capacity(region.area());
        for y in 0..region.height {
            for x in 0..region.width {
                pixels.push(f(x, y));
            }
        }
        Self::from_pixels(region, pixels)
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn width(&self) -> u32 {
        self.region.width
    }

    pub fn height(&self) -> u32 {
        self.region.height
    }

    /// Color at a local offset.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn at(&self, x: u32, y: u32) -> Color {
        self.get(x, y).unwrap_or_else(|| {
            panic!(
                "pixel ({x}, {y}) outside {}x{} grid",
                self.region.width, self.region.height
            )
        })
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        (x < self.region.width && y < self.region.height).then(|| self.pixels[self.index(x, y)])
    }

    /// One row of pixels, left to right.
    pub fn row(&self, y: u32) -> &[Color] {
        let start = self.index(0, y);
        &self.pixels[start..start + self.region.width as usize]
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Color> + '_ {
        self.pixels.iter().copied()
    }

    /// Translate a local offset into an absolute screen coordinate.
    pub fn absolute(&self, x: u32, y: u32) -> (i64, i64) {
        (
            i64::from(self.region.x) + i64::from(x),
            i64::from(self.region.y) + i64::from(y),
        )
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.region.width as usize + x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CaptureError;
    use std::cell::Cell;

    /// Fake display painting a diagonal gradient, counting calls.
    struct Gradient {
        calls: Cell<usize>,
    }

    impl ScreenCapture for Gradient {
        fn capture(&self, region: Region) -> CaptureResult<Vec<Color>> {
            self.calls.set(self.calls.get() + 1);
            let mut out = Vec::new();
            for y in 0..region.height as i32 {
                for x in 0..region.width as i32 {
                    let v = ((region.x + x) + (region.y + y)) as u16;
                    out.push(Color::new(v, v, v));
                }
            }
            Ok(out)
        }
    }

    struct Broken;

    impl ScreenCapture for Broken {
        fn capture(&self, _region: Region) -> CaptureResult<Vec<Color>> {
            Err(CaptureError::Backend("display unavailable".into()))
        }
    }

    struct Short;

    impl ScreenCapture for Short {
        fn capture(&self, _region: Region) -> CaptureResult<Vec<Color>> {
            Ok(vec![Color::default()])
        }
    }

    #[test]
    fn test_capture_queries_source_once() {
        let source = Gradient { calls: Cell::new(0) };
        let grid = PixelGrid::capture(&source, Region::new(10, 20, 4, 3)).unwrap();
        assert_eq!(source.calls.get(), 1);

        // Repeated reads are served from the snapshot.
        for _ in 0..3 {
            assert_eq!(grid.at(0, 0), Color::new(30, 30, 30));
            assert_eq!(grid.at(3, 2), Color::new(35, 35, 35));
        }
        assert_eq!(source.calls.get(), 1);
    }

    #[test]
    fn test_capture_failure_propagates() {
        let err = PixelGrid::capture(&Broken, Region::new(0, 0, 2, 2)).unwrap_err();
        assert!(matches!(err, CaptureError::Backend(_)));
        assert!(err.to_string().contains("display unavailable"));
    }

    #[test]
    fn test_capture_rejects_wrong_pixel_count() {
        let err = PixelGrid::capture(&Short, Region::new(0, 0, 2, 2)).unwrap_err();
        assert!(matches!(
            err,
            CaptureError::Grid(GridError::SizeMismatch { expected: 4, actual: 1 })
        ));
    }

    #[test]
    fn test_empty_region_rejected() {
        assert!(matches!(
            PixelGrid::from_pixels(Region::new(0, 0, 0, 5), vec![]),
            Err(GridError::EmptyRegion { .. })
        ));
        assert!(PixelGrid::capture(&Broken, Region::new(0, 0, 3, 0)).is_err());
    }

    #[test]
    fn test_get_and_row() {
        let grid = PixelGrid::from_fn(Region::new(0, 0, 3, 2), |x, y| {
            Color::new(x as u16, y as u16, 0)
        })
        .unwrap();
        assert_eq!(grid.get(2, 1), Some(Color::new(2, 1, 0)));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(
            grid.row(1),
            &[Color::new(0, 1, 0), Color::new(1, 1, 0), Color::new(2, 1, 0)]
        );
        assert_eq!(grid.pixels().count(), 6);
    }

    #[test]
    #[should_panic(expected = "outside 3x2 grid")]
    fn test_out_of_bounds_panics_instead_of_wrapping() {
        let grid = PixelGrid::from_fn(Region::new(0, 0, 3, 2), |_, _| Color::default()).unwrap();
        // (3, 0) would alias (0, 1) in the flat buffer.
        let _ = grid.at(3, 0);
    }

    #[test]
    fn test_absolute_translation() {
        let grid = PixelGrid::from_fn(Region::new(-5, 100, 2, 2), |_, _| Color::default()).unwrap();
        assert_eq!(grid.absolute(0, 0), (-5, 100));
        assert_eq!(grid.absolute(1, 1), (-4, 101));
    }

    #[test]
    fn test_region_serializes() {
        let json = serde_json::to_string(&Region::new(1, 2, 3, 4)).unwrap();
        assert_eq!(json, r#"{"x":1,"y":2,"width":3,"height":4}"#);
    }
}
