//! Application constants for assemblify
//!
//! This module contains the archive naming conventions, CSV format details,
//! column layouts and output schemas used throughout the pipeline.

// =============================================================================
// Archive Discovery and Entry Names
// =============================================================================

/// File extension of CAM output archives (case-sensitive, no leading dot)
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Archive entry suffix identifying the bill of materials
pub const BOM_ENTRY_SUFFIX: &str = "BOM.csv";

/// Archive entry suffix identifying the top side pick-and-place data
pub const PNP_FRONT_ENTRY_SUFFIX: &str = "PnP_front.csv";

/// Archive entry suffix identifying the bottom side pick-and-place data
pub const PNP_BACK_ENTRY_SUFFIX: &str = "PnP_back.csv";

// =============================================================================
// CSV Format
// =============================================================================

/// Field separator used by the CAM exporter
pub const CSV_DELIMITER: u8 = b';';

/// Quote character, stripped from fields rather than interpreted
pub const CSV_QUOTE: char = '"';

/// UTF-8 byte order mark some exporters prepend to the document
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Source column layout of the BOM document
///
/// The exporter writes `Qty;Value;Device;Package;Parts;Description;...`.
/// Only the part number column is looked up by header name; value, footprint
/// and designators are read from their fixed positions in this layout.
pub mod bom_columns {
    /// Component value (e.g. `100n`, `10k`)
    pub const VALUE_POSITION: usize = 1;

    /// Package / footprint name
    pub const FOOTPRINT_POSITION: usize = 3;

    /// Comma-joined reference designators
    pub const DESIGNATORS_POSITION: usize = 4;

    /// Header name of the supplier part number column
    pub const PART_NUMBER: &str = "LCSC";
}

/// Header names of the pick-and-place document columns
pub mod pnp_columns {
    pub const DESIGNATOR: &str = "Designator";
    pub const MID_X: &str = "Mid X";
    pub const MID_Y: &str = "Mid Y";
    pub const ROTATION: &str = "Rotation";
}

/// Unit suffix tolerated on coordinate values
pub const LENGTH_UNIT_SUFFIX: &str = "mm";

// =============================================================================
// Output Schemas
// =============================================================================

/// Name of the single worksheet in every output workbook
pub const OUTPUT_SHEET_NAME: &str = "Sheet1";

/// JLCPCB output schemas
pub mod jlcpcb {
    /// Output directory name, created below the working directory
    pub const DIRECTORY_NAME: &str = "JLCPCB";

    pub const BOM_FILE_NAME: &str = "BOM.xlsx";
    pub const CPL_FILE_NAME: &str = "CPL.xlsx";

    pub const BOM_HEADER: &[&str] = &["Comment", "Designator", "Footprint", "LCSC Part #"];
    pub const CPL_HEADER: &[&str] = &["Designator", "Mid X", "Mid Y", "Layer", "Rotation"];
}

// =============================================================================
// Logging
// =============================================================================

/// Tracing target used for the default log filter
pub const LOG_TARGET: &str = "assemblify";

/// Directory name below the user config directory holding `config.toml`
pub const CONFIG_DIR_NAME: &str = "assemblify";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";
