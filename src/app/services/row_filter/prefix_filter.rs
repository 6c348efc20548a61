//! Prefix allowlist filtering
//!
//! A row is kept when its designator field starts with one of the allowed
//! prefixes (or no prefixes are configured) and, for BOM rows, it carries a
//! part number. A missing part number always wins over a prefix mismatch.

use crate::app::models::{BomRecord, PlacementRecord, SkipReason};
use crate::config::FilterConfig;
use tracing::debug;

/// Record shapes the prefix filter understands
pub trait FilterableRecord {
    /// Full designator field, possibly a comma-joined list
    fn designators(&self) -> &str;

    /// Supplier part number, `None` when the record kind has no such field
    fn part_number(&self) -> Option<&str>;
}

impl FilterableRecord for BomRecord {
    fn designators(&self) -> &str {
        &self.designators
    }

    fn part_number(&self) -> Option<&str> {
        Some(&self.part_number)
    }
}

impl FilterableRecord for PlacementRecord {
    fn designators(&self) -> &str {
        &self.designator
    }

    fn part_number(&self) -> Option<&str> {
        None
    }
}

/// Outcome of classifying one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Include,
    Skip(SkipReason),
}

/// Classify a record against the filter configuration
pub fn classify<R: FilterableRecord>(record: &R, config: &FilterConfig) -> FilterDecision {
    if record.part_number().is_some_and(str::is_empty) {
        return FilterDecision::Skip(SkipReason::PartNumberMissing);
    }

    if config.allows(record.designators()) {
        FilterDecision::Include
    } else {
        FilterDecision::Skip(SkipReason::PrefixFiltered)
    }
}

/// A record left out of the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Source line of the row
    pub line: u64,
    pub designators: String,
    pub reason: SkipReason,
}

/// Kept records in source order plus the classified skips
#[derive(Debug, Clone, PartialEq)]
pub struct FilterReport<R> {
    pub included: Vec<R>,
    pub skipped: Vec<SkippedRow>,
}

impl<R> FilterReport<R> {
    /// Number of rows skipped for the given reason
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped
            .iter()
            .filter(|skipped| skipped.reason == reason)
            .count()
    }
}

impl<R> Default for FilterReport<R> {
    fn default() -> Self {
        Self {
            included: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Filter `(line, record)` pairs, preserving source order
pub fn filter_records<R, I>(records: I, config: &FilterConfig) -> FilterReport<R>
where
    R: FilterableRecord,
    I: IntoIterator<Item = (u64, R)>,
{
    let mut report = FilterReport::default();

    for (line, record) in records {
        match classify(&record, config) {
            FilterDecision::Include => report.included.push(record),
            FilterDecision::Skip(reason) => {
                debug!(
                    "Line {}: designator(s) \"{}\" skipped ({})",
                    line,
                    record.designators(),
                    reason
                );
                report.skipped.push(SkippedRow {
                    line,
                    designators: record.designators().to_string(),
                    reason,
                });
            }
        }
    }

    report
}
