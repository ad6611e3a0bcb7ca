//! pixloc: locate pixels or bitmask patterns of a given color on screen.

mod cli;
mod logging;
mod mode;
mod options;
mod run;
mod settings;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use pixloc_platform::{cursor_position, DisplayCapture};

fn try_main(args: &cli::Args) -> anyhow::Result<()> {
    let settings = settings::load(args.config.as_deref())?;
    let request = options::resolve(args, &settings)?;
    tracing::debug!(?request, "resolved request");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run::run(&request, &DisplayCapture::new(), &cursor_position, &mut out)
}

fn main() -> ExitCode {
    let args = cli::Args::parse();
    logging::init(args.verbose);

    match try_main(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}\nFor help run: pixloc -h\n");
            ExitCode::FAILURE
        }
    }
}
