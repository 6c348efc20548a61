//! In-memory output tables
//!
//! An [`OutputTable`] only grows: records are appended in the order they are
//! received and the table is serialized once.

use crate::app::models::{BomRecord, OutputKind, PlacementRecord};

/// A single spreadsheet cell value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// Conversion of a record into one row of cells, in header column order
pub trait OutputRow {
    fn cells(&self) -> Vec<CellValue>;
}

impl OutputRow for BomRecord {
    fn cells(&self) -> Vec<CellValue> {
        vec![
            self.value.as_str().into(),
            self.designators.as_str().into(),
            self.footprint.as_str().into(),
            self.part_number.as_str().into(),
        ]
    }
}

impl OutputRow for PlacementRecord {
    fn cells(&self) -> Vec<CellValue> {
        vec![
            self.designator.as_str().into(),
            self.mid_x.into(),
            self.mid_y.into(),
            CellValue::Text(self.layer.to_string()),
            self.rotation.into(),
        ]
    }
}

/// Ordered records plus the fixed header schema they are written under
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTable<R> {
    kind: OutputKind,
    header: &'static [&'static str],
    rows: Vec<R>,
}

impl<R: OutputRow> OutputTable<R> {
    pub fn new(kind: OutputKind, header: &'static [&'static str]) -> Self {
        Self {
            kind,
            header,
            rows: Vec::new(),
        }
    }

    pub fn kind(&self) -> OutputKind {
        self.kind
    }

    pub fn header(&self) -> &'static [&'static str] {
        self.header
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Append a record after all previously appended ones
    pub fn push(&mut self, record: R) {
        self.rows.push(record);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell values of every data row, in order
    pub fn cell_rows(&self) -> Vec<Vec<CellValue>> {
        self.rows.iter().map(OutputRow::cells).collect()
    }
}

impl<R: OutputRow> Extend<R> for OutputTable<R> {
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        self.rows.extend(iter);
    }
}
