//! CSV document extraction from CAM output archives
//!
//! Opens a zip archive, classifies each entry by name suffix and reads the
//! BOM and pick-and-place documents fully into memory. Entries that match
//! none of the known suffixes are ignored; for each kind the first matching
//! entry wins.

use crate::app::models::{DocumentKind, ExtractedDocuments, RawDocument};
use crate::{Error, Result};
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::{debug, info, warn};
use zip::ZipArchive;
use zip::result::ZipError;

/// Upper bound for the buffer reserved from an entry's declared size
const PREALLOCATION_LIMIT: u64 = 1 << 20;

/// Extract the known CSV documents from the archive at `archive_path`
///
/// Any I/O or archive-format error aborts the extraction. The archive
/// handle is dropped on every return path.
pub fn extract_documents(archive_path: &Path) -> Result<ExtractedDocuments> {
    info!("Reading CAM output archive {}", archive_path.display());

    let file = File::open(archive_path)
        .map_err(|e| Error::archive_read(archive_path, ZipError::from(e)))?;

    extract_from_reader(file).map_err(|source| Error::archive_read(archive_path, source))
}

/// Extract the known CSV documents from any seekable zip stream
pub fn extract_from_reader<R: Read + Seek>(
    reader: R,
) -> std::result::Result<ExtractedDocuments, ZipError> {
    let mut archive = ZipArchive::new(reader)?;
    let mut documents = ExtractedDocuments::default();

    debug!("Archive contains {} entries", archive.len());

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        let Some(kind) = DocumentKind::classify_entry(&name) else {
            debug!("Ignoring archive entry {}", name);
            continue;
        };

        if documents.get(kind).is_some() {
            warn!("Ignoring duplicate {} entry {}", kind, name);
            continue;
        }

        // The declared size is untrusted, read_to_end grows past the hint
        let mut bytes = Vec::with_capacity(entry.size().min(PREALLOCATION_LIMIT) as usize);
        entry.read_to_end(&mut bytes)?;
        debug!("Extracted {} ({} bytes) from {}", kind, bytes.len(), name);

        documents.insert_first(RawDocument::new(kind, name, bytes));
    }

    Ok(documents)
}
