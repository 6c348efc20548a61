//! Test utilities for CSV table parsing
//!
//! Builders for the `;`-separated, fully quoted text the CAM exporter writes.

use crate::app::models::{DocumentKind, RawDocument};


/// Header of the exporter's BOM layout
pub const BOM_HEADER: &str = r#""Qty";"Value";"Device";"Package";"Parts";"Description";"LCSC""#;

/// Header of a pick-and-place document
pub const PNP_HEADER: &str = r#""Designator";"Mid X";"Mid Y";"Rotation";"Value";"Package""#;

/// Quote and join fields the way the exporter does
pub fn quoted_line(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|field| format!("\"{}\"", field))
        .collect::<Vec<_>>()
        .join(";")
}

/// Build a document from a header and data lines
pub fn create_document(kind: DocumentKind, header: &str, lines: &[String]) -> RawDocument {
    let mut content = String::from(header);
    content.push('\n');
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    RawDocument::new(kind, "test.csv", content.into_bytes())
}

/// BOM data line in the exporter's layout
pub fn bom_line(value: &str, package: &str, parts: &str, lcsc: &str) -> String {
    quoted_line(&["1", value, "DEVICE", package, parts, "", lcsc])
}
