//! Workbook layout settings and write statistics

use crate::constants::OUTPUT_SHEET_NAME;
use rust_xlsxwriter::{Color, Format};
use std::path::PathBuf;

/// Layout settings for output workbooks
#[derive(Debug, Clone, PartialEq)]
pub struct WriterConfig {
    /// Name of the single worksheet
    pub sheet_name: String,

    /// Render header cells in bold
    pub header_bold: bool,

    /// Header cell fill, `None` for no fill
    pub header_fill: Option<Color>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            sheet_name: OUTPUT_SHEET_NAME.to_string(),
            header_bold: true,
            header_fill: Some(Color::Yellow),
        }
    }
}

impl WriterConfig {
    /// Cell format applied to the header row
    pub fn header_format(&self) -> Format {
        let mut format = Format::new();
        if self.header_bold {
            format = format.set_bold();
        }
        if let Some(color) = self.header_fill {
            format = format.set_background_color(color);
        }
        format
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.sheet_name.is_empty() {
            return Err("Sheet name cannot be empty".to_string());
        }
        if self.sheet_name.chars().count() > 31 {
            return Err(format!(
                "Sheet name '{}' exceeds 31 characters",
                self.sheet_name
            ));
        }
        Ok(())
    }
}

/// Statistics for one written workbook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WritingStats {
    pub path: PathBuf,
    /// Data rows, header excluded
    pub rows_written: usize,
    pub bytes_written: u64,
}
