//! Assemblify Library
//!
//! A Rust library for turning the CAM output of a PCB design tool into the
//! spreadsheets an automated assembly service expects.
//!
//! This library provides tools for:
//! - Locating the newest CAM output archive in a working directory
//! - Extracting the BOM and pick-and-place CSV documents from the archive
//! - Resolving CSV columns from the header row rather than fixed positions
//! - Filtering components by a designator-prefix allowlist
//! - Writing BOM and CPL workbooks in the target manufacturer's column schema
//! - Reporting progress and skipped rows through a structured event stream

use std::path::PathBuf;

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod archive_extractor;
        pub mod archive_locator;
        pub mod csv_table;
        pub mod pipeline;
        pub mod row_filter;
        pub mod xlsx_writer;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod input;
}

// Re-export commonly used types
pub use app::models::{DocumentKind, Layer, OutputKind};
pub use app::services::pipeline::{Pipeline, PipelineEvent, RunReport};
pub use config::{Config, FilterConfig, ManufacturerProfile};

/// Result type alias for assemblify operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the CAM-to-assembly pipeline
///
/// Archive-level errors abort the whole run. Document-level errors only
/// abort the branch (BOM or CPL) that raised them, see [`Error::is_fatal`].
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// No `.zip` archive in the working directory
    #[error("No zip archive (CAM output) found in {}", directory.display())]
    NoArchiveFound { directory: PathBuf },

    /// The archive could not be opened or one of its entries could not be read
    #[error("Failed to read archive '{}': {source}", archive.display())]
    ArchiveRead {
        archive: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// A column required by the consuming step is not in the header row
    #[error("{kind}: required column '{column}' not found in header row")]
    MissingRequiredColumn { kind: DocumentKind, column: String },

    /// A data row could not be turned into a record
    #[error("{kind}: malformed row at line {line}: {reason}")]
    MalformedRow {
        kind: DocumentKind,
        line: u64,
        reason: String,
    },

    /// The delimited text itself could not be read (e.g. invalid UTF-8)
    #[error("{kind}: CSV decoding failed: {source}")]
    Csv {
        kind: DocumentKind,
        #[source]
        source: csv::Error,
    },

    /// Writing an output workbook failed
    #[error("Failed to write {kind} output file '{}': {source}", path.display())]
    OutputWrite {
        kind: OutputKind,
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The collaborator declined to continue after a confirmation request
    #[error("Run stopped by user: {message}")]
    Declined { message: String },
}

impl Error {
    /// Create an archive read error
    pub fn archive_read(archive: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        Self::ArchiveRead {
            archive: archive.into(),
            source,
        }
    }

    /// Create a missing required column error
    pub fn missing_column(kind: DocumentKind, column: impl Into<String>) -> Self {
        Self::MissingRequiredColumn {
            kind,
            column: column.into(),
        }
    }

    /// Create a malformed row error
    pub fn malformed_row(kind: DocumentKind, line: u64, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            kind,
            line,
            reason: reason.into(),
        }
    }

    /// Create an output write error
    pub fn output_write(
        kind: OutputKind,
        path: impl Into<PathBuf>,
        source: rust_xlsxwriter::XlsxError,
    ) -> Self {
        Self::OutputWrite {
            kind,
            path: path.into(),
            source,
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a declined error
    pub fn declined(message: impl Into<String>) -> Self {
        Self::Declined {
            message: message.into(),
        }
    }

    /// Whether this error ends the whole run rather than a single document
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::NoArchiveFound { .. }
            | Self::ArchiveRead { .. }
            | Self::Io { .. }
            | Self::Configuration { .. }
            | Self::Declined { .. } => true,
            Self::MissingRequiredColumn { .. }
            | Self::MalformedRow { .. }
            | Self::Csv { .. }
            | Self::OutputWrite { .. } => false,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
