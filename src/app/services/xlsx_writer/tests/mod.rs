//! Tests for output tables and workbook serialization
//!
//! Workbooks are read back by opening the `.xlsx` container and inspecting
//! the sheet and shared string XML parts.


use crate::app::models::{BomRecord, Layer, PlacementRecord};
use std::io::{Cursor, Read};

pub fn bom_record(value: &str, designators: &str, footprint: &str, part: &str) -> BomRecord {
    BomRecord {
        value: value.to_string(),
        designators: designators.to_string(),
        footprint: footprint.to_string(),
        part_number: part.to_string(),
    }
}

pub fn placement(designator: &str, x: f64, y: f64, layer: Layer, rotation: f64) -> PlacementRecord {
    PlacementRecord {
        designator: designator.to_string(),
        mid_x: x,
        mid_y: y,
        layer,
        rotation,
    }
}

/// Read one part of an `.xlsx` container as text
pub fn read_part(workbook: &[u8], part: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(workbook)).unwrap();
    let mut entry = archive.by_name(part).unwrap();
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    content
}

/// Number of `<row` elements in the first worksheet
pub fn sheet_row_count(workbook: &[u8]) -> usize {
    read_part(workbook, "xl/worksheets/sheet1.xml")
        .matches("<row ")
        .count()
}
