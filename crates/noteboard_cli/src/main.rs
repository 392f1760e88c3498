//! `noteboard` binary entry point.
//!
//! # Responsibility
//! - Parse arguments and hand off to [`noteboard_cli::run`].

use anyhow::Result;
use clap::Parser;
use noteboard_cli::cli::args::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    noteboard_cli::run(args, &mut out)
}
