//! api-toolkit CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::process::ExitCode;

use api_toolkit_cli_lib::Cli;
use clap::Parser;
use console::style;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = api_toolkit::observability::init(cli.verbose) {
        eprintln!("{} {err:#}", style("warning:").yellow().for_stderr());
    }

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", style("error:").red().bold().for_stderr());
            ExitCode::FAILURE
        }
    }
}
