//! Run outcome reporting

use crate::Error;
use crate::app::services::xlsx_writer::WritingStats;
use std::path::PathBuf;
use std::time::Duration;

/// Terminal outcome of one output branch (BOM or CPL)
#[derive(Debug)]
pub enum BranchOutcome {
    /// Output workbook written
    Written {
        stats: WritingStats,
        rows_skipped: usize,
    },
    /// No source document, nothing written
    Skipped { reason: String },
    /// A document-level error ended this branch
    Failed { error: Error },
}

impl BranchOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, BranchOutcome::Failed { .. })
    }

    /// Path of the written workbook, if any
    pub fn output_path(&self) -> Option<&PathBuf> {
        match self {
            BranchOutcome::Written { stats, .. } => Some(&stats.path),
            _ => None,
        }
    }

    /// Data rows written, zero unless the branch succeeded
    pub fn rows_written(&self) -> usize {
        match self {
            BranchOutcome::Written { stats, .. } => stats.rows_written,
            _ => 0,
        }
    }
}

/// Summary of a completed pipeline run
#[derive(Debug)]
pub struct RunReport {
    /// Archive the documents were taken from
    pub archive: PathBuf,
    pub output_directory: PathBuf,
    pub bom: BranchOutcome,
    pub cpl: BranchOutcome,
    pub elapsed: Duration,
}

impl RunReport {
    /// Whether any branch ended with a document-level error
    pub fn has_failures(&self) -> bool {
        self.bom.is_failed() || self.cpl.is_failed()
    }
}
