//! Scans over a captured [`PixelGrid`]: uniaxial runs, dominant color,
//! bitmask rendering and 2D bitmask search.
//!
//! Every operation reads the in-memory snapshot only; nothing here talks to
//! a display.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::bitmask::{BitmaskLine, BitmaskPattern};
use crate::color::{ColorMatcher, Rgb8};
use crate::grid::PixelGrid;

/// Axis of a uniaxial scan, derived from the grid shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Single row: results are x offsets.
    Horizontal,
    /// Single column: results are y offsets.
    Vertical,
}

/// Local offset of a bitmask match (top-left corner of the needle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMatch {
    pub x: u32,
    pub y: u32,
}

pub struct PixelScanner {
    grid: PixelGrid,
    matcher: ColorMatcher,
}

impl PixelScanner {
    pub fn new(grid: PixelGrid, matcher: ColorMatcher) -> Self {
        Self { grid, matcher }
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn matcher(&self) -> &ColorMatcher {
        &self.matcher
    }

    /// Height 1 reads as a row; anything else as a column.
    pub fn orientation(&self) -> Orientation {
        if self.grid.height() == 1 {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    /// Every pixel in row-major order as its 8-bit triple. Matching is not
    /// evaluated.
    pub fn trace_uniaxial(&self) -> Vec<Rgb8> {
        self.grid.pixels().map(|c| c.to_rgb8()).collect()
    }

    /// Offset of the pixel completing the first run of `run_length`
    /// consecutive matches, or `None` if no such run exists.
    ///
    /// The offset is x for a single-row grid and y otherwise. A run length
    /// of zero never completes.
    pub fn scan_uniaxial(&self, run_length: u32) -> Option<u32> {
        let orientation = self.orientation();
        let mut found = 0u32;

        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                if !self.matcher.matches(self.grid.at(x, y)) {
                    found = 0;
                    continue;
                }
                found += 1;
                if found == run_length {
                    let offset = match orientation {
                        Orientation::Horizontal => x,
                        Orientation::Vertical => y,
                    };
                    debug!(run_length, offset, ?orientation, "run found");
                    return Some(offset);
                }
            }
        }

        debug!(run_length, "no run found");
        None
    }

    /// Most frequent 8-bit color in the grid.
    ///
    /// Ties resolve to the lexicographically smallest `r,g,b` string, so
    /// `"10,0,0"` wins over `"9,0,0"`.
    pub fn trace_main_color(&self) -> Option<Rgb8> {
        let mut tally: BTreeMap<String, (Rgb8, usize)> = BTreeMap::new();
        for color in self.grid.pixels() {
            let rgb = color.to_rgb8();
            tally.entry(rgb.to_string()).or_insert((rgb, 0)).1 += 1;
        }

        let mut best: Option<(Rgb8, usize)> = None;
        for &(rgb, count) in tally.values() {
            if best.map_or(true, |(_, max)| count > max) {
                best = Some((rgb, count));
            }
        }

        debug!(distinct = tally.len(), ?best, "tallied colors");
        best.map(|(rgb, _)| rgb)
    }

    /// Render row `y` in the bitmask alphabet.
    pub fn bitmask_line(&self, y: u32) -> BitmaskLine {
        BitmaskLine::from_matches(self.grid.row(y).iter().map(|c| self.matcher.matches(*c)))
    }

    /// All rows rendered, top to bottom.
    pub fn trace_bitmask(&self) -> Vec<BitmaskLine> {
        (0..self.grid.height()).map(|y| self.bitmask_line(y)).collect()
    }

    /// First occurrence of `needle` in the rendered grid.
    ///
    /// Candidates are visited row by row, then left to right within a row;
    /// the search stops at the first complete match. A needle larger than
    /// the grid in either dimension never matches.
    pub fn find_bitmask(&self, needle: &BitmaskPattern) -> Option<GridMatch> {
        let mut rows = RowCache::new(self);
        let found = self.search(&mut rows, needle);
        debug!(
            target = %self.matcher.target().to_rgb8(),
            needle_width = needle.width(),
            needle_height = needle.height(),
            rows_rendered = rows.computed(),
            ?found,
            "bitmask search finished"
        );
        found
    }

    fn search(&self, rows: &mut RowCache<'_>, needle: &BitmaskPattern) -> Option<GridMatch> {
        let last_col = (self.grid.width() as usize).checked_sub(needle.width())?;
        let last_top = (self.grid.height() as usize).checked_sub(needle.height())?;
        let head = needle.row(0);

        for top in 0..=last_top {
            let offsets: Vec<usize> = occurrences(rows.fetch(top), head, last_col).collect();

            for col in offsets {
                let rest_matches = (1..needle.height())
                    .all(|i| rows.matches_at(top + i, col, needle.row(i)));
                if rest_matches {
                    return Some(GridMatch {
                        x: col as u32,
                        y: top as u32,
                    });
                }
            }
        }
        None
    }
}

/// Left-to-right, possibly overlapping, offsets of `needle` in `haystack`
/// no greater than `last`.
fn occurrences<'a>(
    haystack: &'a str,
    needle: &'a str,
    last: usize,
) -> impl Iterator<Item = usize> + 'a {
    let mut from = 0;
    std::iter::from_fn(move || {
        if from > last {
            return None;
        }
        let found = from + haystack.get(from..)?.find(needle)?;
        if found > last {
            return None;
        }
        from = found + 1;
        Some(found)
    })
}

/// Lazily rendered bitmask rows.
///
/// `lines.len()` is the next row to render; fetching row `n` renders every
/// missing row up to `n` in order, so each row is rendered at most once.
struct RowCache<'a> {
    scanner: &'a PixelScanner,
    lines: Vec<BitmaskLine>,
}

impl<'a> RowCache<'a> {
    fn new(scanner: &'a PixelScanner) -> Self {
        Self {
            scanner,
            lines: Vec::new(),
        }
    }

    fn fetch(&mut self, row: usize) -> &str {
        while self.lines.len() <= row {
            let y = self.lines.len() as u32;
            let line = self.scanner.bitmask_line(y);
            trace!(y, line = line.as_str(), "rendered bitmask row");
            self.lines.push(line);
        }
        self.lines[row].as_str()
    }

    fn matches_at(&mut self, row: usize, offset: usize, expected: &str) -> bool {
        let line = self.fetch(row);
        line.get(offset..offset + expected.len()) == Some(expected)
    }

    fn computed(&self) -> usize {
        self.lines.len()
    }
}
