//! `copo` command-line entry point.

use clap::Parser;
use copo_cli::cli::{Cli, Command};
use copo_cli::logging::init_logging;

mod commands;
mod summary;

use crate::commands::{run_codes, run_matrix, run_report};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&cli.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Matrix(args) => finish(run_matrix(args), args.strict),
        Command::Report(args) => finish(run_report(args), args.strict),
        Command::Codes => match run_codes() {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

fn finish(result: anyhow::Result<commands::RunOutcome>, strict: bool) -> i32 {
    match result {
        Ok(outcome) => {
            print_summary(&outcome);
            i32::from(strict && outcome.has_errors())
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}
