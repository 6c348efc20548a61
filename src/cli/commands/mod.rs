//! Command implementations for the assemblify CLI
//!
//! Each command lives in its own module; `shared` holds the logging and
//! configuration plumbing they have in common.

pub mod process;
pub mod shared;

use crate::app::services::pipeline::RunReport;
use crate::cli::args::Args;
use anyhow::Context;

/// Main command runner
///
/// Dispatches to the subcommand handler, `process` when none was given.
pub fn run(args: Args) -> anyhow::Result<RunReport> {
    let process_args = args.get_command();
    process::run_process(process_args).context("Conversion aborted")
}
