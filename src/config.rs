//! Configuration management and validation.
//!
//! Provides the run configuration (working directory, output location,
//! prefix allowlist and target manufacturer), layered loading from a TOML
//! file, and the immutable [`FilterConfig`] handed to the pipeline.

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, jlcpcb};
use crate::{Error, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Assembly services an output profile exists for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ManufacturerProfile {
    /// JLCPCB SMT assembly
    #[default]
    Jlcpcb,
}

impl ManufacturerProfile {
    /// Directory created below the working directory for this profile's outputs
    pub fn directory_name(self) -> &'static str {
        match self {
            ManufacturerProfile::Jlcpcb => jlcpcb::DIRECTORY_NAME,
        }
    }

    pub fn bom_file_name(self) -> &'static str {
        match self {
            ManufacturerProfile::Jlcpcb => jlcpcb::BOM_FILE_NAME,
        }
    }

    pub fn cpl_file_name(self) -> &'static str {
        match self {
            ManufacturerProfile::Jlcpcb => jlcpcb::CPL_FILE_NAME,
        }
    }

    /// Header row of the BOM workbook
    pub fn bom_header(self) -> &'static [&'static str] {
        match self {
            ManufacturerProfile::Jlcpcb => jlcpcb::BOM_HEADER,
        }
    }

    /// Header row of the CPL workbook
    pub fn cpl_header(self) -> &'static [&'static str] {
        match self {
            ManufacturerProfile::Jlcpcb => jlcpcb::CPL_HEADER,
        }
    }
}

impl fmt::Display for ManufacturerProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.directory_name())
    }
}

/// Immutable filtering configuration for one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    prefixes: Vec<String>,
    profile: ManufacturerProfile,
}

impl FilterConfig {
    /// Create a filter config; duplicate prefixes are dropped, order is kept
    pub fn new<I, S>(prefixes: I, profile: ManufacturerProfile) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for prefix in prefixes {
            let prefix = prefix.into();
            if !unique.contains(&prefix) {
                unique.push(prefix);
            }
        }
        Self {
            prefixes: unique,
            profile,
        }
    }

    /// Allowed designator prefixes, empty means "match all"
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn profile(&self) -> ManufacturerProfile {
        self.profile
    }

    /// Whether a designator field passes the prefix allowlist
    ///
    /// The test runs against the whole field, so `C1,C2,R5` is only allowed
    /// by a prefix of its first designator.
    pub fn allows(&self, designators: &str) -> bool {
        self.prefixes.is_empty()
            || self
                .prefixes
                .iter()
                .any(|prefix| designators.starts_with(prefix.as_str()))
    }
}

/// Run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory searched for the CAM archive
    pub working_directory: PathBuf,

    /// Output directory, defaults to `<working_directory>/<profile>`
    pub output_directory: Option<PathBuf>,

    /// Designator prefixes to keep (empty keeps everything)
    pub prefixes: Vec<String>,

    /// Target assembly service
    pub profile: ManufacturerProfile,

    /// Answer every confirmation request with "continue"
    pub assume_yes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            working_directory: PathBuf::from("."),
            output_directory: None,
            prefixes: Vec::new(),
            profile: ManufacturerProfile::default(),
            assume_yes: false,
        }
    }
}

impl Config {
    /// Default config file location (`<config dir>/assemblify/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load a configuration file in TOML format
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        toml::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Invalid config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load configuration from defaults, then the config file if one is given
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let config = match config_file {
            Some(path) => {
                debug!("Loading config file: {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !self.working_directory.is_dir() {
            return Err(Error::configuration(format!(
                "Working directory is not a directory: {}",
                self.working_directory.display()
            )));
        }

        if self.prefixes.iter().any(|prefix| prefix.is_empty()) {
            return Err(Error::configuration(
                "Designator prefixes cannot be empty strings",
            ));
        }

        Ok(())
    }

    /// Directory the output workbooks are written to
    pub fn output_path(&self) -> PathBuf {
        match &self.output_directory {
            Some(path) => path.clone(),
            None => self
                .working_directory
                .join(self.profile.directory_name()),
        }
    }

    /// Filtering configuration for the pipeline
    pub fn filter_config(&self) -> FilterConfig {
        FilterConfig::new(self.prefixes.iter().cloned(), self.profile)
    }
}
