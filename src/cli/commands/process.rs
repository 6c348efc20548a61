//! Process command implementation
//!
//! Loads configuration, runs the conversion pipeline with a console event
//! sink, and prints the final summary.

use super::shared::{format_size, load_configuration, setup_logging};
use crate::app::services::pipeline::{BranchOutcome, Pipeline, RunReport};
use crate::cli::args::ProcessArgs;
use crate::cli::input::ConsoleSink;
use crate::Result;
use colored::Colorize;
use tracing::{debug, info};

/// Process command runner
///
/// 1. Set up logging and configuration
/// 2. Run the pipeline against the configured working directory
/// 3. Print the summary report
pub fn run_process(args: ProcessArgs) -> Result<RunReport> {
    setup_logging(&args)?;

    info!("Starting assemblify");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    let filter = config.filter_config();
    let output_directory = config.output_path();
    let mut sink = ConsoleSink::stdio(config.assume_yes);

    let report = Pipeline::new(
        &filter,
        &config.working_directory,
        &output_directory,
        &mut sink,
    )
    .run()?;

    generate_final_report(&report);

    Ok(report)
}

/// Print the human-readable run summary
fn generate_final_report(report: &RunReport) {
    println!();
    println!("{}", "Conversion complete".bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   • Archive: {}", report.archive.display());
    println!("   • Output directory: {}", report.output_directory.display());
    print_branch("BOM", &report.bom);
    print_branch("CPL", &report.cpl);
    println!("   • Processing time: {:.2?}", report.elapsed);

    if report.has_failures() {
        println!("{}", "Some outputs were not written, see errors above".red());
    }
    println!();
}

fn print_branch(label: &str, outcome: &BranchOutcome) {
    match outcome {
        BranchOutcome::Written {
            stats,
            rows_skipped,
        } => println!(
            "   • {}: {} rows written, {} skipped -> {} ({})",
            label,
            stats.rows_written,
            rows_skipped,
            stats.path.display(),
            format_size(stats.bytes_written)
        ),
        BranchOutcome::Skipped { reason } => {
            println!("   • {}: {} ({})", label, "skipped".yellow(), reason)
        }
        BranchOutcome::Failed { error } => {
            println!("   • {}: {} ({})", label, "failed".red(), error)
        }
    }
}
