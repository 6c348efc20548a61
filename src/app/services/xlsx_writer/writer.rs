//! Workbook serialization
//!
//! Row 1 holds the header, data rows start at row 2 in table order. An
//! empty table still produces a valid header-only workbook.

use super::config::{WriterConfig, WritingStats};
use super::table::{CellValue, OutputRow, OutputTable};
use crate::{Error, Result};
use rust_xlsxwriter::{Workbook, XlsxError};
use std::path::Path;
use tracing::debug;

/// Build an in-memory workbook for a table
pub fn build_workbook<R: OutputRow>(
    table: &OutputTable<R>,
    config: &WriterConfig,
) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&config.sheet_name)?;

    let header_format = config.header_format();
    for (col, title) in table.header().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }

    for (index, cells) in table.cell_rows().iter().enumerate() {
        let row = (index + 1) as u32;
        for (col, cell) in cells.iter().enumerate() {
            match cell {
                CellValue::Text(text) => worksheet.write_string(row, col as u16, text)?,
                CellValue::Number(number) => worksheet.write_number(row, col as u16, *number)?,
            };
        }
    }

    Ok(workbook)
}

/// Write a table to an `.xlsx` file
///
/// Failures are reported as [`Error::OutputWrite`] for the table's kind.
pub fn write_table<R: OutputRow>(
    table: &OutputTable<R>,
    path: &Path,
    config: &WriterConfig,
) -> Result<WritingStats> {
    config.validate().map_err(Error::configuration)?;

    debug!(
        "Writing {} rows to {} output {}",
        table.len(),
        table.kind(),
        path.display()
    );

    let mut workbook =
        build_workbook(table, config).map_err(|e| Error::output_write(table.kind(), path, e))?;
    workbook
        .save(path)
        .map_err(|e| Error::output_write(table.kind(), path, e))?;

    let bytes_written = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    debug!(
        "{} output saved to {} ({} rows)",
        table.kind(),
        path.display(),
        table.len()
    );

    Ok(WritingStats {
        path: path.to_path_buf(),
        rows_written: table.len(),
        bytes_written,
    })
}

/// Serialize a table to workbook bytes without touching the filesystem
pub fn write_table_to_buffer<R: OutputRow>(
    table: &OutputTable<R>,
    config: &WriterConfig,
) -> Result<Vec<u8>> {
    config.validate().map_err(Error::configuration)?;

    let mut workbook = build_workbook(table, config)
        .map_err(|e| Error::output_write(table.kind(), table.kind().to_string(), e))?;
    workbook
        .save_to_buffer()
        .map_err(|e| Error::output_write(table.kind(), table.kind().to_string(), e))
}
