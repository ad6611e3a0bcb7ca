//! Textual results as printed on stdout.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bitmask::BitmaskLine;
use crate::color::Rgb8;
use crate::grid::PixelGrid;
use crate::scanner::{GridMatch, Orientation};

/// How a bitmask match is translated into a reported screen coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateConvention {
    /// `origin + offset`: the top-left pixel of the match.
    #[default]
    Exact,
    /// `origin + offset - 1` on both axes, as printed by older pixloc builds.
    Legacy,
}

impl CoordinateConvention {
    pub fn apply(self, grid: &PixelGrid, found: GridMatch) -> (i64, i64) {
        let (x, y) = grid.absolute(found.x, found.y);
        match self {
            CoordinateConvention::Exact => (x, y),
            CoordinateConvention::Legacy => (x - 1, y - 1),
        }
    }
}

/// Result of one pixloc invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Uniaxial find: `x:<n>;` / `y:<n>;`, `-1` when not found.
    Run {
        orientation: Orientation,
        offset: Option<u32>,
    },
    /// Uniaxial trace: one `r,g,b` line per pixel.
    Colors(Vec<Rgb8>),
    /// Dominant color: a single `r,g,b` line.
    MainColor(Option<Rgb8>),
    /// Bitmask trace: rows comma-terminated except the last.
    Bitmask(Vec<BitmaskLine>),
    /// Bitmask find: `x=<n>; y=<n>;`, `-1` on both axes when not found.
    Location(Option<(i64, i64)>),
    /// Mouse cursor position.
    Cursor { x: i32, y: i32 },
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Run {
                orientation,
                offset,
            } => {
                let axis = match orientation {
                    Orientation::Horizontal => "x",
                    Orientation::Vertical => "y",
                };
                let offset = offset.map_or(-1, i64::from);
                write!(f, "{axis}:{offset};")
            }
            Report::Colors(colors) => {
                for c in colors {
                    writeln!(f, "{c}")?;
                }
                Ok(())
            }
            Report::MainColor(color) => match color {
                Some(c) => writeln!(f, "{c}"),
                None => Ok(()),
            },
            Report::Bitmask(lines) => {
                let last = lines.len().saturating_sub(1);
                for (i, line) in lines.iter().enumerate() {
                    let sep = if i < last { "," } else { "" };
                    writeln!(f, "{line}{sep}")?;
                }
                Ok(())
            }
            Report::Location(found) => {
                let (x, y) = found.unwrap_or((-1, -1));
                writeln!(f, "x={x}; y={y};")
            }
            Report::Cursor { x, y } => writeln!(f, "x={x}; y={y};"),
        }
    }
}
