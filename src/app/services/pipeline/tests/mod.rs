//! Tests for the pipeline orchestrator
//!
//! Each test builds a CAM output archive in a temporary working directory
//! and runs the whole pipeline against it with a recording sink.

mod orchestrator_tests;

use super::{EventLog, Pipeline, RunReport, RunState};
use crate::Result;
use crate::config::{FilterConfig, ManufacturerProfile};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const BOM_HEADER: &str = r#""Qty";"Value";"Device";"Package";"Parts";"Description";"LCSC""#;

pub const PNP_HEADER: &str = r#""Designator";"Mid X";"Mid Y";"Rotation";"Value";"Package""#;

/// Write a zip archive with the given (entry name, content) pairs
pub fn write_archive(directory: &Path, name: &str, entries: &[(&str, String)]) -> PathBuf {
    let path = directory.join(name);
    let mut zip = ZipWriter::new(File::create(&path).unwrap());
    for (entry, content) in entries {
        zip.start_file(*entry, SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
    path
}

fn quoted(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|field| format!("\"{}\"", field))
        .collect::<Vec<_>>()
        .join(";")
}

/// BOM document from (value, package, parts, lcsc) rows
pub fn bom_content(rows: &[(&str, &str, &str, &str)]) -> String {
    let mut content = format!("{}\n", BOM_HEADER);
    for (value, package, parts, lcsc) in rows {
        content.push_str(&quoted(&["1", value, "DEVICE", package, parts, "", lcsc]));
        content.push('\n');
    }
    content
}

/// Pick-and-place document from (designator, x, y, rotation) rows
pub fn pnp_content(rows: &[(&str, &str, &str, &str)]) -> String {
    let mut content = format!("{}\n", PNP_HEADER);
    for (designator, x, y, rotation) in rows {
        content.push_str(&quoted(&[designator, x, y, rotation, "VAL", "PKG"]));
        content.push('\n');
    }
    content
}

pub fn filter_config(prefixes: &[&str]) -> FilterConfig {
    FilterConfig::new(prefixes.iter().copied(), ManufacturerProfile::Jlcpcb)
}

/// Run a pipeline with an [`EventLog`] sink
pub fn run_logged(
    working_directory: &Path,
    output_directory: &Path,
    filter: &FilterConfig,
) -> (Result<RunReport>, EventLog, RunState) {
    let mut log = EventLog::new();
    let (result, state) = {
        let mut pipeline = Pipeline::new(filter, working_directory, output_directory, &mut log);
        let result = pipeline.run();
        (result, pipeline.state())
    };
    (result, log, state)
}

/// Read one part of a written `.xlsx` file as text
pub fn read_part(workbook: &Path, part: &str) -> String {
    let mut archive = zip::ZipArchive::new(File::open(workbook).unwrap()).unwrap();
    let mut entry = archive.by_name(part).unwrap();
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    content
}

/// Shared strings of a written workbook
pub fn shared_strings(workbook: &Path) -> String {
    read_part(workbook, "xl/sharedStrings.xml")
}

/// Number of rows in the first worksheet, header included
pub fn sheet_row_count(workbook: &Path) -> usize {
    read_part(workbook, "xl/worksheets/sheet1.xml")
        .matches("<row ")
        .count()
}
