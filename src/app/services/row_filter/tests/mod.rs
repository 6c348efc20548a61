//! Tests for the prefix filter
//!
//! Fixtures build records directly; CSV parsing is covered elsewhere.


use crate::app::models::{BomRecord, Layer, PlacementRecord};
use crate::config::{FilterConfig, ManufacturerProfile};

/// Create a BOM record with a throwaway value and footprint
pub fn bom_record(designators: &str, part_number: &str) -> BomRecord {
    BomRecord {
        value: "VAL".to_string(),
        designators: designators.to_string(),
        footprint: "0402".to_string(),
        part_number: part_number.to_string(),
    }
}

/// Create a top side placement record at the origin
pub fn placement(designator: &str) -> PlacementRecord {
    PlacementRecord {
        designator: designator.to_string(),
        mid_x: 0.0,
        mid_y: 0.0,
        layer: Layer::Top,
        rotation: 0.0,
    }
}

/// Create a JLCPCB filter config from a prefix list
pub fn filter_config(prefixes: &[&str]) -> FilterConfig {
    FilterConfig::new(prefixes.iter().copied(), ManufacturerProfile::Jlcpcb)
}
