//! Logging setup. Stdout carries results, so logs go to stderr.

use tracing_subscriber::EnvFilter;

const CRATES: [&str; 3] = ["pixloc_cli", "pixloc_core", "pixloc_platform"];

/// Filter directives for a `-v` count; `RUST_LOG` takes precedence.
pub fn default_directives(verbose: u8) -> String {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn init(verbose: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(verbose).into()),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
