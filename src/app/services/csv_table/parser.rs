//! CSV table parsing for CAM output documents
//!
//! The first record of a document is always taken as the header row. The
//! remaining records are read lazily: row arity is not checked up front, a
//! short row only fails when a missing field is read from it.

use csv::StringRecord;
use tracing::debug;

use super::column_mapping::{ColumnMapping, ColumnSpec};
use crate::app::models::{DocumentKind, RawDocument};
use crate::constants::{CSV_DELIMITER, CSV_QUOTE, UTF8_BOM};
use crate::{Error, Result};

/// One data row with its 1-based source line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub line: u64,
    pub fields: Vec<String>,
}

impl CsvRow {
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A line holding nothing but whitespace
    fn is_blank(&self) -> bool {
        self.fields.len() <= 1 && self.fields.iter().all(|field| field.trim().is_empty())
    }
}

/// A CAM CSV document with its header row read
pub struct CsvTable<'a> {
    kind: DocumentKind,
    header: Vec<String>,
    reader: csv::Reader<&'a [u8]>,
}

impl<'a> CsvTable<'a> {
    /// Parse a raw document, reading only the header row
    pub fn parse(document: &'a RawDocument) -> Result<Self> {
        Self::from_bytes(document.kind, &document.bytes)
    }

    /// Parse delimited text of the given kind, reading only the header row
    pub fn from_bytes(kind: DocumentKind, bytes: &'a [u8]) -> Result<Self> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(CSV_DELIMITER)
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(bytes);

        let mut record = StringRecord::new();
        let has_header = reader
            .read_record(&mut record)
            .map_err(|source| Error::Csv { kind, source })?;

        let header = if has_header {
            strip_quotes(&record)
        } else {
            Vec::new()
        };
        debug!("{} header: {:?}", kind, header);

        Ok(Self {
            kind,
            header,
            reader,
        })
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Header fields with quotes stripped
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Resolve a column schema against this table's header
    pub fn resolve(&self, schema: &[ColumnSpec]) -> Result<ColumnMapping> {
        ColumnMapping::resolve(self.kind, &self.header, schema)
    }

    /// Consume the table into its lazy data row stream
    pub fn rows(self) -> Rows<'a> {
        Rows {
            kind: self.kind,
            records: self.reader.into_records(),
        }
    }
}

/// Lazy stream of data rows, blank lines skipped
pub struct Rows<'a> {
    kind: DocumentKind,
    records: csv::StringRecordsIntoIter<&'a [u8]>,
}

impl Iterator for Rows<'_> {
    type Item = Result<CsvRow>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(source) => {
                    return Some(Err(Error::Csv {
                        kind: self.kind,
                        source,
                    }));
                }
            };

            let row = CsvRow {
                line: record.position().map_or(0, |position| position.line()),
                fields: strip_quotes(&record),
            };

            if row.is_blank() {
                continue;
            }

            return Some(Ok(row));
        }
    }
}

/// Remove every quote character from each field of a record
fn strip_quotes(record: &StringRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| field.replace(CSV_QUOTE, ""))
        .collect()
}
