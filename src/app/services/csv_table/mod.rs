//! Header-resolved CSV tables for CAM output documents
//!
//! The CAM exporter writes `;`-separated UTF-8 text with every field wrapped
//! in double quotes. Quotes are stripped rather than interpreted, since the
//! format never embeds the separator inside a field.
//!
//! ## Architecture
//!
//! - [`parser`] - Turns a [`RawDocument`](crate::app::models::RawDocument) into a [`CsvTable`]
//!   with a header row and a lazy row stream
//! - [`column_mapping`] - Resolves logical fields to physical column indices,
//!   by header name or by fixed position as each field declares
//! - [`record_parser`] - Builds typed BOM and placement records from rows
//!
//! ## Usage
//!
//! ```rust
//! use assemblify::app::models::{DocumentKind, RawDocument};
//! use assemblify::app::services::csv_table::{CsvTable, record_parser};
//!
//! # fn example() -> assemblify::Result<()> {
//! let csv = "\"Qty\";\"Value\";\"Device\";\"Package\";\"Parts\";\"LCSC\"\n\
//!            \"1\";\"10k\";\"R-EU\";\"0402\";\"R1\";\"C25744\"\n";
//! let document = RawDocument::new(DocumentKind::Bom, "BOM.csv", csv.as_bytes().to_vec());
//!
//! let table = CsvTable::parse(&document)?;
//! let mapping = table.resolve(record_parser::BOM_SCHEMA)?;
//! for row in table.rows() {
//!     let record = record_parser::parse_bom_record(&row?, &mapping)?;
//!     println!("{} -> {}", record.designators, record.part_number);
//! }
//! # Ok(())
//! # }
//! ```

pub mod column_mapping;
pub mod parser;
pub mod record_parser;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::{ColumnAccess, ColumnMapping, ColumnSpec};
pub use parser::{CsvRow, CsvTable, Rows};
