use std::path::PathBuf;

use clap::{ArgAction, Parser};

pub const USAGE_EXAMPLES: &str = "\
Usage examples:
  pixloc --mode \"trace horizontal\" --from 0,60 --range 100
  pixloc --mode \"trace vertical\" --from 0,60 --range 100
  pixloc --mode \"trace bitmask\" --from 0,60 --range 64,64 --color 188,188,188
  pixloc --mode \"trace main color\" --from 0,60 --range 64,64
  pixloc --mode \"trace mouse\"
  pixloc --mode \"find color horizontal\" --from 0,60 --range 100 --color 188,188,188 --amount 8
  pixloc --mode \"find color horizontal\" --from mouse --range 100 --color 188,188,188 --amount 8
  pixloc --mode \"find color vertical\" --from 0,60 --range 100 --color 188,188,188 --amount 8
  pixloc --mode \"find bitmask\" --from 0,60 --range 128,32 --color 188,188,188 --bitmask *__,**_,***,**_,*__";

/// pixloc - locate pixels or bitmask patterns of a given color on screen.
#[derive(Parser, Debug)]
#[command(name = "pixloc", version, about, after_help = USAGE_EXAMPLES)]
pub struct Args {
    /// Operating mode, e.g. "find bitmask" (see usage examples).
    #[arg(short, long)]
    pub mode: String,

    /// Starting coordinate `x,y`, or `mouse` for the cursor position.
    #[arg(short, long)]
    pub from: Option<String>,

    /// Amount of pixels to scan: `n` for line modes, `width,height` otherwise.
    #[arg(short, long)]
    pub range: Option<String>,

    /// RGB color to find, `r,g,b` with channels 0-255.
    #[arg(short, long)]
    pub color: Option<String>,

    /// Amount of consecutive pixels of the given color to find.
    #[arg(short, long)]
    pub amount: Option<u32>,

    /// Pixel mask to find: rows separated by `,`; `*` = given color, `_` = other colors.
    #[arg(short, long)]
    pub bitmask: Option<String>,

    /// Color tolerance per channel (0-255).
    #[arg(short, long)]
    pub tolerance: Option<u8>,

    /// Settings file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report bitmask matches one pixel up and left of the match, like older pixloc builds.
    #[arg(long)]
    pub legacy_coordinates: bool,

    /// Increase log verbosity (-v debug, -vv trace). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
