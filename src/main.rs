use assemblify::cli::{args::Args, commands};
use clap::Parser;
use colored::Colorize;
use std::process;

/// Run completed but at least one output could not be written
const EXIT_BRANCH_FAILED: i32 = 2;

fn main() {
    let args = Args::parse();

    match commands::run(args) {
        Ok(report) if report.has_failures() => process::exit(EXIT_BRANCH_FAILED),
        Ok(_report) => process::exit(0),
        Err(error) => {
            eprintln!("{} {:#}", "Error:".red().bold(), error);
            process::exit(1);
        }
    }
}
