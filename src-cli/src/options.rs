//! Resolve and validate command line arguments into a request.

use std::str::FromStr;

use pixloc_core::{BitmaskPattern, ColorParseError, CoordinateConvention, PatternError, Rgb8};
use thiserror::Error;

use crate::cli::Args;
use crate::mode::ScanMode;
use crate::settings::Settings;

#[derive(Debug, Error)]
pub enum UsageError {
    #[error("unknown mode {0:?}")]
    UnknownMode(String),
    #[error("starting coordinate (--from) is required")]
    MissingFrom,
    #[error("invalid starting coordinate {0:?}, expected x,y or mouse")]
    InvalidFrom(String),
    #[error("scanning range (--range) is required")]
    MissingRange,
    #[error("invalid range {range:?} for mode \"{mode}\", expected {expected}")]
    InvalidRange {
        range: String,
        mode: ScanMode,
        expected: &'static str,
    },
    #[error("color (--color) is required for mode \"{0}\"")]
    MissingColor(ScanMode),
    #[error("invalid color: {0}")]
    InvalidColor(#[from] ColorParseError),
    #[error("valid amount of pixels to find (--amount > 0) is required")]
    MissingAmount,
    #[error("bitmask (--bitmask) is required for mode \"{0}\"")]
    MissingBitmask(ScanMode),
    #[error("invalid bitmask: {0}")]
    InvalidBitmask(#[from] PatternError),
}

/// Where the captured region starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Point { x: i32, y: i32 },
    Mouse,
}

impl FromStr for Origin {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "mouse" {
            return Ok(Origin::Mouse);
        }
        let (x, y) = parse_pair(s).ok_or_else(|| UsageError::InvalidFrom(s.to_string()))?;
        let x = i32::try_from(x).map_err(|_| UsageError::InvalidFrom(s.to_string()))?;
        let y = i32::try_from(y).map_err(|_| UsageError::InvalidFrom(s.to_string()))?;
        Ok(Origin::Point { x, y })
    }
}

/// What to do with the captured region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    TraceColors,
    FindRun { run_length: u32 },
    TraceMainColor,
    TraceBitmask,
    FindBitmask {
        needle: BitmaskPattern,
        convention: CoordinateConvention,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub origin: Origin,
    pub width: u32,
    pub height: u32,
    pub color: Rgb8,
    pub tolerance: u8,
    pub operation: Operation,
    /// Print the cursor position first when the origin came from the mouse.
    pub echo_cursor: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Print the cursor position and exit; nothing is captured.
    TraceMouse,
    Scan(ScanRequest),
}

pub fn resolve(args: &Args, settings: &Settings) -> Result<Request, UsageError> {
    let mode: ScanMode = args.mode.parse()?;
    if mode == ScanMode::TraceMouse {
        return Ok(Request::TraceMouse);
    }

    let origin: Origin = args.from.as_deref().ok_or(UsageError::MissingFrom)?.parse()?;
    let range = args.range.as_deref().ok_or(UsageError::MissingRange)?;
    let (width, height) = resolve_range(mode, range)?;

    let color = match args.color.as_deref() {
        Some(c) => c.parse::<Rgb8>()?,
        None if mode.requires_color() => return Err(UsageError::MissingColor(mode)),
        None => Rgb8::default(),
    };

    let run_length = args.amount.filter(|n| *n > 0);
    if mode.requires_run_length() && run_length.is_none() {
        return Err(UsageError::MissingAmount);
    }
    let bitmask = args.bitmask.as_deref();
    if mode.requires_bitmask() && bitmask.is_none() {
        return Err(UsageError::MissingBitmask(mode));
    }

    let operation = match mode {
        ScanMode::TraceHorizontal | ScanMode::TraceVertical => Operation::TraceColors,
        ScanMode::FindColorHorizontal | ScanMode::FindColorVertical => Operation::FindRun {
            run_length: run_length.unwrap_or(1),
        },
        ScanMode::TraceMainColor => Operation::TraceMainColor,
        ScanMode::TraceBitmask => Operation::TraceBitmask,
        ScanMode::FindBitmask => {
            let needle = bitmask.unwrap_or_default().parse()?;
            let convention = if args.legacy_coordinates || settings.legacy_coordinates {
                CoordinateConvention::Legacy
            } else {
                CoordinateConvention::Exact
            };
            Operation::FindBitmask { needle, convention }
        }
        ScanMode::TraceMouse => return Ok(Request::TraceMouse),
    };

    Ok(Request::Scan(ScanRequest {
        origin,
        width,
        height,
        color,
        tolerance: args.tolerance.unwrap_or(settings.tolerance),
        operation,
        echo_cursor: origin == Origin::Mouse && mode.is_trace(),
    }))
}

/// `width,height` for tuple modes; a single length along the mode's axis
/// otherwise.
fn resolve_range(mode: ScanMode, range: &str) -> Result<(u32, u32), UsageError> {
    let invalid = |expected| UsageError::InvalidRange {
        range: range.to_string(),
        mode,
        expected,
    };

    if mode.is_tuple_range() {
        return parse_pair(range)
            .filter(|(w, h)| *w > 0 && *h > 0)
            .ok_or_else(|| invalid("width,height"));
    }

    let length = range
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| invalid("a positive length"))?;
    Ok(if mode.is_horizontal() {
        (length, 1)
    } else {
        (1, length)
    })
}

fn parse_pair(s: &str) -> Option<(u32, u32)> {
    let (a, b) = s.split_once(',')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["pixloc"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn scan(extra: &[&str]) -> ScanRequest {
        match resolve(&args(extra), &Settings::default()).unwrap() {
            Request::Scan(req) => req,
            other => panic!("expected scan request, got {other:?}"),
        }
    }

    #[test]
    fn test_origin_parse() {
        assert_eq!("mouse".parse::<Origin>().unwrap(), Origin::Mouse);
        assert_eq!("0,60".parse::<Origin>().unwrap(), Origin::Point { x: 0, y: 60 });
        assert!(matches!("-1,5".parse::<Origin>(), Err(UsageError::InvalidFrom(_))));
        assert!(matches!("12".parse::<Origin>(), Err(UsageError::InvalidFrom(_))));
    }

    #[test]
    fn test_range_per_mode() {
        assert_eq!(resolve_range(ScanMode::TraceHorizontal, "100").unwrap(), (100, 1));
        assert_eq!(resolve_range(ScanMode::FindColorVertical, "40").unwrap(), (1, 40));
        assert_eq!(resolve_range(ScanMode::TraceBitmask, "64,32").unwrap(), (64, 32));
        assert!(resolve_range(ScanMode::TraceBitmask, "64").is_err());
        assert!(resolve_range(ScanMode::TraceHorizontal, "64,32").is_err());
        assert!(resolve_range(ScanMode::TraceHorizontal, "0").is_err());
        assert!(resolve_range(ScanMode::TraceMainColor, "0,4").is_err());
    }

    #[test]
    fn test_find_run_request() {
        let req = scan(&[
            "--mode", "find color horizontal", "--from", "0,60", "--range", "100",
            "--color", "188,188,188", "--amount", "8",
        ]);
        assert_eq!(req.origin, Origin::Point { x: 0, y: 60 });
        assert_eq!((req.width, req.height), (100, 1));
        assert_eq!(req.color, Rgb8::new(188, 188, 188));
        assert_eq!(req.operation, Operation::FindRun { run_length: 8 });
        assert_eq!(req.tolerance, 0);
        assert!(!req.echo_cursor);
    }

    #[test]
    fn test_find_run_requires_positive_amount() {
        let base = ["--mode", "find color vertical", "--from", "1,1", "--range", "10", "--color", "1,2,3"];
        assert!(matches!(
            resolve(&args(&base), &Settings::default()),
            Err(UsageError::MissingAmount)
        ));
        let mut zero = base.to_vec();
        zero.extend_from_slice(&["--amount", "0"]);
        assert!(matches!(
            resolve(&args(&zero), &Settings::default()),
            Err(UsageError::MissingAmount)
        ));
    }

    #[test]
    fn test_color_required_only_where_needed() {
        let err = resolve(
            &args(&["--mode", "trace bitmask", "--from", "0,0", "--range", "4,4"]),
            &Settings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, UsageError::MissingColor(ScanMode::TraceBitmask)));

        let req = scan(&["--mode", "trace main color", "--from", "0,0", "--range", "4,4"]);
        assert_eq!(req.operation, Operation::TraceMainColor);
        assert_eq!(req.color, Rgb8::default());
    }

    #[test]
    fn test_find_bitmask_request() {
        let req = scan(&[
            "--mode", "find bitmask", "--from", "0,60", "--range", "128,32", "--color",
            "188,188,188", "--bitmask", "*__,**_,***,**_,*__",
        ]);
        let Operation::FindBitmask { needle, convention } = req.operation else {
            panic!("expected bitmask search");
        };
        assert_eq!((needle.width(), needle.height()), (3, 5));
        assert_eq!(convention, CoordinateConvention::Exact);
    }

    #[test]
    fn test_bitmask_errors() {
        let base = ["--mode", "find bitmask", "--from", "0,0", "--range", "8,8", "--color", "0,0,0"];
        assert!(matches!(
            resolve(&args(&base), &Settings::default()),
            Err(UsageError::MissingBitmask(_))
        ));
        let mut bad = base.to_vec();
        bad.extend_from_slice(&["--bitmask", "*#*"]);
        assert!(matches!(
            resolve(&args(&bad), &Settings::default()),
            Err(UsageError::InvalidBitmask(PatternError::InvalidChar { .. }))
        ));
    }

    #[test]
    fn test_settings_supply_defaults() {
        let settings = Settings {
            tolerance: 9,
            legacy_coordinates: true,
        };
        let argv = args(&[
            "--mode", "find bitmask", "--from", "0,0", "--range", "8,8", "--color", "0,0,0",
            "--bitmask", "*",
        ]);
        let Request::Scan(req) = resolve(&argv, &settings).unwrap() else {
            panic!("expected scan request");
        };
        assert_eq!(req.tolerance, 9);
        assert!(matches!(
            req.operation,
            Operation::FindBitmask {
                convention: CoordinateConvention::Legacy,
                ..
            }
        ));

        // Flags win over settings.
        let argv = args(&[
            "--mode", "trace bitmask", "--from", "0,0", "--range", "8,8", "--color", "0,0,0",
            "--tolerance", "2",
        ]);
        let Request::Scan(req) = resolve(&argv, &settings).unwrap() else {
            panic!("expected scan request");
        };
        assert_eq!(req.tolerance, 2);
    }

    #[test]
    fn test_trace_mouse_needs_nothing_else() {
        let req = resolve(&args(&["--mode", "trace mouse"]), &Settings::default()).unwrap();
        assert_eq!(req, Request::TraceMouse);
    }

    #[test]
    fn test_mouse_origin_echo_only_in_trace_modes() {
        let traced = scan(&["--mode", "trace horizontal", "--from", "mouse", "--range", "10"]);
        assert!(traced.echo_cursor);

        let found = scan(&[
            "--mode", "find color horizontal", "--from", "mouse", "--range", "10", "--color",
            "1,1,1", "--amount", "1",
        ]);
        assert_eq!(found.origin, Origin::Mouse);
        assert!(!found.echo_cursor);
    }

    #[test]
    fn test_unknown_mode_and_missing_from() {
        assert!(matches!(
            resolve(&args(&["--mode", "find all"]), &Settings::default()),
            Err(UsageError::UnknownMode(_))
        ));
        assert!(matches!(
            resolve(&args(&["--mode", "trace vertical", "--range", "5"]), &Settings::default()),
            Err(UsageError::MissingFrom)
        ));
    }
}
