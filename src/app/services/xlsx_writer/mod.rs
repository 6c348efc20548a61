//! Spreadsheet output for assembly services
//!
//! Output tables are accumulated in source order and serialized to a single
//! sheet workbook whose first row is the manufacturer's fixed header.
//!
//! # Architecture
//!
//! - [`config`] - Workbook layout settings and write statistics
//! - [`table`] - The in-memory [`OutputTable`] and the cell conversion of records
//! - [`writer`] - Serialization of a table to an `.xlsx` file or buffer
//!
//! # Basic Usage
//!
//! ```rust
//! use assemblify::app::models::{BomRecord, OutputKind};
//! use assemblify::app::services::xlsx_writer::{OutputTable, WriterConfig, write_table};
//! use assemblify::ManufacturerProfile;
//!
//! # fn example(records: Vec<BomRecord>) -> assemblify::Result<()> {
//! let profile = ManufacturerProfile::Jlcpcb;
//! let mut table = OutputTable::new(OutputKind::Bom, profile.bom_header());
//! table.extend(records);
//!
//! let stats = write_table(&table, std::path::Path::new("BOM.xlsx"), &WriterConfig::default())?;
//! println!("Wrote {} rows", stats.rows_written);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod table;
pub mod writer;

#[cfg(test)]
mod tests;

pub use config::{WriterConfig, WritingStats};
pub use table::{CellValue, OutputRow, OutputTable};
pub use writer::{build_workbook, write_table, write_table_to_buffer};
