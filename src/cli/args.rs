//! Command-line argument definitions for assemblify
//!
//! Defines the CLI interface using the clap derive API. `process` is the only
//! subcommand and also runs when no subcommand is given.

use crate::config::ManufacturerProfile;
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the CAM output converter
///
/// Converts the newest CAM output archive in a directory into the BOM and
/// CPL spreadsheets an assembly service expects.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "assemblify",
    version,
    about = "Convert PCB CAM output into assembly-service BOM and CPL spreadsheets",
    long_about = "Finds the newest CAM output zip archive in the working directory, extracts \
                  the BOM and pick-and-place CSV files from it, filters components by \
                  designator prefix, and writes BOM.xlsx and CPL.xlsx in the column layout \
                  of the selected assembly service.",
    args_conflicts_with_subcommands = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub process: ProcessArgs,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert the newest CAM archive (default command)
    Process(ProcessArgs),
}

/// Arguments for the process command
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Designator prefixes to keep (comma-separated list)
    ///
    /// A row is kept when its designator field starts with one of the
    /// prefixes. Without this option every row is kept.
    #[arg(
        short = 'p',
        long = "prefix",
        value_name = "LIST",
        help = "Comma-separated designator prefixes to keep, e.g. C,R,U"
    )]
    pub prefixes: Option<DesignatorPrefixes>,

    /// Target assembly service
    #[arg(
        short = 's',
        long = "service",
        value_enum,
        value_name = "SERVICE",
        help = "Assembly service whose file layout is produced"
    )]
    pub service: Option<ManufacturerProfile>,

    /// Directory searched for the CAM output archive
    ///
    /// Defaults to the current directory.
    #[arg(
        short = 'w',
        long = "working-dir",
        value_name = "PATH",
        help = "Directory containing the CAM output zip archive"
    )]
    pub working_directory: Option<PathBuf>,

    /// Output directory for the generated workbooks
    ///
    /// Defaults to a directory named after the service inside the working
    /// directory, e.g. `./JLCPCB`.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output directory for BOM.xlsx and CPL.xlsx"
    )]
    pub output_directory: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// `<config dir>/assemblify/config.toml`.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Continue past every warning without asking
    #[arg(short = 'y', long = "yes", help = "Answer yes to every confirmation prompt")]
    pub assume_yes: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only errors are logged. Pipeline messages are still printed.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress log output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Wrapper for parsing comma-separated designator prefix lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignatorPrefixes {
    pub prefixes: Vec<String>,
}

impl FromStr for DesignatorPrefixes {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let prefixes: Vec<String> = s
            .split(',')
            .map(|prefix| prefix.trim().to_string())
            .filter(|prefix| !prefix.is_empty())
            .collect();

        if let Some(prefix) = prefixes
            .iter()
            .find(|prefix| prefix.chars().any(char::is_whitespace))
        {
            return Err(Error::configuration(format!(
                "Designator prefix '{}' contains whitespace",
                prefix
            )));
        }

        Ok(DesignatorPrefixes { prefixes })
    }
}

impl Args {
    /// Arguments of the command to run, `process` when none was given
    pub fn get_command(self) -> ProcessArgs {
        match self.command {
            Some(Commands::Process(process_args)) => process_args,
            None => self.process,
        }
    }
}

impl ProcessArgs {
    /// Validate the process command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(working_directory) = &self.working_directory {
            if !working_directory.is_dir() {
                return Err(Error::configuration(format!(
                    "Working directory does not exist or is not a directory: {}",
                    working_directory.display()
                )));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.is_file() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
