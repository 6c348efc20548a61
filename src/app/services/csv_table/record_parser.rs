//! Typed record extraction from CAM CSV rows
//!
//! The BOM deliberately mixes access modes: the part number column is found
//! by header name, while value, footprint and designators are read from the
//! exporter's fixed column positions. Pick-and-place columns are all found
//! by name.

use super::column_mapping::{ColumnMapping, ColumnSpec};
use super::parser::CsvRow;
use crate::app::models::{BomRecord, Layer, PlacementRecord};
use crate::constants::{LENGTH_UNIT_SUFFIX, bom_columns, pnp_columns};
use crate::{Error, Result};

/// Logical field names shared by the schemas below
pub mod fields {
    pub const VALUE: &str = "value";
    pub const FOOTPRINT: &str = "footprint";
    pub const DESIGNATORS: &str = "designators";
    pub const PART_NUMBER: &str = "part_number";
    pub const DESIGNATOR: &str = "designator";
    pub const MID_X: &str = "mid_x";
    pub const MID_Y: &str = "mid_y";
    pub const ROTATION: &str = "rotation";
}

/// Column schema of the BOM document
pub const BOM_SCHEMA: &[ColumnSpec] = &[
    ColumnSpec::positional(fields::VALUE, bom_columns::VALUE_POSITION),
    ColumnSpec::positional(fields::FOOTPRINT, bom_columns::FOOTPRINT_POSITION),
    ColumnSpec::positional(fields::DESIGNATORS, bom_columns::DESIGNATORS_POSITION),
    ColumnSpec::named(fields::PART_NUMBER, bom_columns::PART_NUMBER),
];

/// Column schema of the pick-and-place documents
pub const PNP_SCHEMA: &[ColumnSpec] = &[
    ColumnSpec::named(fields::DESIGNATOR, pnp_columns::DESIGNATOR),
    ColumnSpec::named(fields::MID_X, pnp_columns::MID_X),
    ColumnSpec::named(fields::MID_Y, pnp_columns::MID_Y),
    ColumnSpec::named(fields::ROTATION, pnp_columns::ROTATION),
];

/// Build a BOM record from a data row
pub fn parse_bom_record(row: &CsvRow, mapping: &ColumnMapping) -> Result<BomRecord> {
    Ok(BomRecord {
        value: mapping.field(row, fields::VALUE)?.to_string(),
        designators: mapping.field(row, fields::DESIGNATORS)?.to_string(),
        footprint: mapping.field(row, fields::FOOTPRINT)?.to_string(),
        part_number: mapping.field(row, fields::PART_NUMBER)?.to_string(),
    })
}

/// Build a placement record from a data row of a front or back document
pub fn parse_placement_record(
    row: &CsvRow,
    mapping: &ColumnMapping,
    layer: Layer,
) -> Result<PlacementRecord> {
    Ok(PlacementRecord {
        designator: mapping.field(row, fields::DESIGNATOR)?.to_string(),
        mid_x: parse_number(row, mapping, fields::MID_X)?,
        mid_y: parse_number(row, mapping, fields::MID_Y)?,
        layer,
        rotation: parse_number(row, mapping, fields::ROTATION)?,
    })
}

/// Parse a decimal field, tolerating surrounding whitespace and a `mm` unit
fn parse_number(row: &CsvRow, mapping: &ColumnMapping, field: &str) -> Result<f64> {
    let raw = mapping.field(row, field)?;
    let trimmed = raw.trim();
    let number = trimmed
        .strip_suffix(LENGTH_UNIT_SUFFIX)
        .unwrap_or(trimmed)
        .trim_end();

    let invalid = |reason: String| {
        Error::malformed_row(
            mapping.kind(),
            row.line,
            format!("invalid number for {}: '{}' ({})", field, raw, reason),
        )
    };

    let value = number.parse::<f64>().map_err(|e| invalid(e.to_string()))?;
    if !value.is_finite() {
        return Err(invalid("not a finite value".to_string()));
    }
    Ok(value)
}
