//! Execute a resolved request: one capture, one scan, one report.

use std::io::Write;

use anyhow::Context;
use pixloc_core::{ColorMatcher, PixelGrid, PixelScanner, Region, Report, ScreenCapture};
use pixloc_platform::{CursorPosition, PlatformResult};
use tracing::debug;

use crate::options::{Operation, Origin, Request, ScanRequest};

pub fn run(
    request: &Request,
    capture: &dyn ScreenCapture,
    cursor: &dyn Fn() -> PlatformResult<CursorPosition>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let request = match request {
        Request::TraceMouse => {
            let pos = cursor().context("failed to read cursor position")?;
            write!(out, "{}", Report::Cursor { x: pos.x, y: pos.y })?;
            return Ok(out.flush()?);
        }
        Request::Scan(request) => request,
    };

    let (x, y) = match request.origin {
        Origin::Point { x, y } => (x, y),
        Origin::Mouse => {
            let pos = cursor().context("failed to read cursor position")?;
            if request.echo_cursor {
                write!(out, "{}", Report::Cursor { x: pos.x, y: pos.y })?;
            }
            (pos.x, pos.y)
        }
    };

    let region = Region::new(x, y, request.width, request.height);
    let grid = PixelGrid::capture(capture, region).context("failed to capture screen region")?;
    let report = scan(request, grid);
    write!(out, "{report}")?;
    Ok(out.flush()?)
}

/// Run the requested operation against a captured grid.
pub fn scan(request: &ScanRequest, grid: PixelGrid) -> Report {
    let matcher = ColorMatcher::from_rgb8(request.color, request.tolerance);
    debug!(
        color = %request.color,
        tolerance = request.tolerance,
        operation = ?request.operation,
        "scanning"
    );
    let scanner = PixelScanner::new(grid, matcher);

    match &request.operation {
        Operation::TraceColors => Report::Colors(scanner.trace_uniaxial()),
        Operation::FindRun { run_length } => Report::Run {
            orientation: scanner.orientation(),
            offset: scanner.scan_uniaxial(*run_length),
        },
        Operation::TraceMainColor => Report::MainColor(scanner.trace_main_color()),
        Operation::TraceBitmask => Report::Bitmask(scanner.trace_bitmask()),
        Operation::FindBitmask { needle, convention } => Report::Location(
            scanner
                .find_bitmask(needle)
                .map(|found| convention.apply(scanner.grid(), found)),
        ),
    }
}
