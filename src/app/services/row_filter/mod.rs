//! Designator-prefix filtering for component rows
//!
//! Decides, per record, whether it goes into the output table or is skipped,
//! and why. Classification is pure; reporting the skips is left to the caller.

pub mod prefix_filter;

#[cfg(test)]
mod tests;

pub use prefix_filter::{
    FilterDecision, FilterReport, FilterableRecord, SkippedRow, classify, filter_records,
};
