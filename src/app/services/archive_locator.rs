//! Archive discovery for CAM output
//!
//! Finds the most recently created `.zip` archive in a working directory.
//! Only directory metadata is read.

use crate::constants::ARCHIVE_EXTENSION;
use crate::{Error, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

/// A candidate archive and the timestamp used to rank it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveCandidate {
    pub path: PathBuf,
    pub created: SystemTime,
}

/// Archive discovery component
#[derive(Debug)]
pub struct ArchiveLocator {
    directory: PathBuf,
}

impl ArchiveLocator {
    /// Create a locator for `.zip` archives in `directory`
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// List every archive in the directory, in file name order
    pub fn candidates(&self) -> Result<Vec<ArchiveCandidate>> {
        let directory = self.directory.to_str().ok_or_else(|| {
            Error::configuration(format!(
                "Working directory is not valid UTF-8: {}",
                self.directory.display()
            ))
        })?;
        let pattern = format!(
            "{}/*.{}",
            glob::Pattern::escape(directory),
            ARCHIVE_EXTENSION
        );
        debug!("Searching for archives matching: {}", pattern);

        let paths = glob::glob(&pattern)
            .map_err(|e| Error::configuration(format!("Invalid archive pattern: {}", e)))?;

        let mut candidates = Vec::new();
        for entry in paths {
            let path = entry.map_err(|e| {
                let message = format!("Failed to read directory entry {}", e.path().display());
                Error::io(message, std::io::Error::from(e))
            })?;

            let metadata = std::fs::metadata(&path).map_err(|e| {
                Error::io(format!("Failed to read metadata of {}", path.display()), e)
            })?;
            if !metadata.is_file() {
                continue;
            }

            // Not every filesystem records a birth time
            let created = metadata
                .created()
                .or_else(|_| metadata.modified())
                .map_err(|e| {
                    Error::io(format!("No timestamp available for {}", path.display()), e)
                })?;

            candidates.push(ArchiveCandidate { path, created });
        }

        Ok(candidates)
    }

    /// Return the archive with the latest creation time
    ///
    /// Ties go to the first archive in file name order.
    pub fn locate(&self) -> Result<PathBuf> {
        let candidates = self.candidates()?;
        debug!("Found {} archive candidates", candidates.len());

        let newest = select_newest(candidates).ok_or_else(|| Error::NoArchiveFound {
            directory: self.directory.clone(),
        })?;

        info!(
            "Using CAM archive {} (created {})",
            newest.path.display(),
            DateTime::<Local>::from(newest.created).format("%Y-%m-%d %H:%M:%S")
        );

        Ok(newest.path)
    }
}

/// Pick the newest candidate, keeping the earliest one on equal timestamps
fn select_newest(candidates: Vec<ArchiveCandidate>) -> Option<ArchiveCandidate> {
    let mut newest: Option<ArchiveCandidate> = None;
    for candidate in candidates {
        match &newest {
            Some(current) if candidate.created <= current.created => {}
            _ => newest = Some(candidate),
        }
    }
    newest
}
