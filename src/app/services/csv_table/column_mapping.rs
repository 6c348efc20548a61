//! Column schema resolution for CAM CSV documents
//!
//! Each consuming step declares the logical fields it needs and how each one
//! is located: by exact header name, or by fixed position in the exporter's
//! column layout. Resolution runs once per document against the header row.

use super::parser::CsvRow;
use crate::app::models::DocumentKind;
use crate::{Error, Result};
use std::collections::HashMap;

/// How a logical field is located in the source document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnAccess {
    /// Exact, case-sensitive match against a header field
    Named(&'static str),
    /// Fixed zero-based column position, header content is not checked
    Positional(usize),
}

/// A logical field required by a consuming step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub field: &'static str,
    pub access: ColumnAccess,
}

impl ColumnSpec {
    pub const fn named(field: &'static str, column: &'static str) -> Self {
        Self {
            field,
            access: ColumnAccess::Named(column),
        }
    }

    pub const fn positional(field: &'static str, index: usize) -> Self {
        Self {
            field,
            access: ColumnAccess::Positional(index),
        }
    }
}

/// Resolved logical field to physical column index mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    kind: DocumentKind,
    field_to_index: HashMap<&'static str, usize>,
}

impl ColumnMapping {
    /// Resolve a schema against a header row
    ///
    /// Named fields take the first header field with that exact name. A named
    /// field missing from the header makes the whole document unusable.
    /// Positional fields always resolve; a row too short for them is reported
    /// when the field is read.
    pub fn resolve(kind: DocumentKind, header: &[String], schema: &[ColumnSpec]) -> Result<Self> {
        let mut field_to_index = HashMap::with_capacity(schema.len());

        for spec in schema {
            let index = match spec.access {
                ColumnAccess::Named(column) => header
                    .iter()
                    .position(|name| name == column)
                    .ok_or_else(|| Error::missing_column(kind, column))?,
                ColumnAccess::Positional(index) => index,
            };
            field_to_index.insert(spec.field, index);
        }

        Ok(Self {
            kind,
            field_to_index,
        })
    }

    /// Document kind this mapping was resolved for
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Get the physical index of a logical field
    pub fn index(&self, field: &str) -> Option<usize> {
        self.field_to_index.get(field).copied()
    }

    /// Read a logical field from a row
    ///
    /// A row with too few fields is a [`Error::MalformedRow`] at that row's
    /// line, never an empty default.
    pub fn field<'r>(&self, row: &'r CsvRow, field: &str) -> Result<&'r str> {
        let index = self.index(field).ok_or_else(|| {
            Error::configuration(format!(
                "Field '{}' is not part of the {} column schema",
                field, self.kind
            ))
        })?;

        row.get(index).ok_or_else(|| {
            Error::malformed_row(
                self.kind,
                row.line,
                format!(
                    "expected column {} ({}), row has {} fields",
                    index + 1,
                    field,
                    row.len()
                ),
            )
        })
    }
}
