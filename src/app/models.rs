//! Core data models for CAM output processing
//!
//! Documents extracted from the archive, the typed records built from their
//! rows, and the small enums that tag them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{BOM_ENTRY_SUFFIX, PNP_BACK_ENTRY_SUFFIX, PNP_FRONT_ENTRY_SUFFIX};

/// Logical kind of a source document inside the CAM archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    Bom,
    PnpFront,
    PnpBack,
}

impl DocumentKind {
    /// All kinds, in the order entry names are tested against them
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::Bom,
        DocumentKind::PnpFront,
        DocumentKind::PnpBack,
    ];

    /// Archive entry name suffix identifying this kind
    pub fn entry_suffix(self) -> &'static str {
        match self {
            DocumentKind::Bom => BOM_ENTRY_SUFFIX,
            DocumentKind::PnpFront => PNP_FRONT_ENTRY_SUFFIX,
            DocumentKind::PnpBack => PNP_BACK_ENTRY_SUFFIX,
        }
    }

    /// Classify an archive entry name, first matching suffix wins
    pub fn classify_entry(name: &str) -> Option<DocumentKind> {
        Self::ALL
            .into_iter()
            .find(|kind| name.ends_with(kind.entry_suffix()))
    }

    /// Board layer a pick-and-place document describes
    pub fn layer(self) -> Option<Layer> {
        match self {
            DocumentKind::Bom => None,
            DocumentKind::PnpFront => Some(Layer::Top),
            DocumentKind::PnpBack => Some(Layer::Bottom),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentKind::Bom => "BOM",
            DocumentKind::PnpFront => "PnP-Front",
            DocumentKind::PnpBack => "PnP-Back",
        };
        f.write_str(name)
    }
}

/// Output artifact produced by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputKind {
    Bom,
    Cpl,
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputKind::Bom => f.write_str("BOM"),
            OutputKind::Cpl => f.write_str("CPL"),
        }
    }
}

/// Board side a component is placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Top,
    Bottom,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Top => f.write_str("Top"),
            Layer::Bottom => f.write_str("Bottom"),
        }
    }
}

/// Raw bytes of one archive entry, tagged with its logical kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub kind: DocumentKind,
    /// Full entry name inside the archive
    pub entry_name: String,
    pub bytes: Vec<u8>,
}

impl RawDocument {
    pub fn new(kind: DocumentKind, entry_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            kind,
            entry_name: entry_name.into(),
            bytes,
        }
    }
}

/// Documents found in a CAM archive, any of which may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedDocuments {
    pub bom: Option<RawDocument>,
    pub pnp_front: Option<RawDocument>,
    pub pnp_back: Option<RawDocument>,
}

impl ExtractedDocuments {
    /// Slot for a given document kind
    pub fn get(&self, kind: DocumentKind) -> Option<&RawDocument> {
        match kind {
            DocumentKind::Bom => self.bom.as_ref(),
            DocumentKind::PnpFront => self.pnp_front.as_ref(),
            DocumentKind::PnpBack => self.pnp_back.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: DocumentKind) -> &mut Option<RawDocument> {
        match kind {
            DocumentKind::Bom => &mut self.bom,
            DocumentKind::PnpFront => &mut self.pnp_front,
            DocumentKind::PnpBack => &mut self.pnp_back,
        }
    }

    /// Store a document unless its slot is already taken
    ///
    /// Returns `false` when an earlier entry of the same kind was kept.
    pub fn insert_first(&mut self, document: RawDocument) -> bool {
        let slot = self.slot_mut(document.kind);
        if slot.is_some() {
            return false;
        }
        *slot = Some(document);
        true
    }

    /// Number of documents present
    pub fn len(&self) -> usize {
        DocumentKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind).is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One surviving BOM row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomRecord {
    pub value: String,
    /// Possibly comma-joined list, e.g. `C1,C2,C3`
    pub designators: String,
    pub footprint: String,
    pub part_number: String,
}

/// One surviving pick-and-place row
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRecord {
    pub designator: String,
    pub mid_x: f64,
    pub mid_y: f64,
    pub layer: Layer,
    pub rotation: f64,
}

/// Why a row was left out of the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    /// The row has no supplier part number
    PartNumberMissing,
    /// The designator field does not start with an allowed prefix
    PrefixFiltered,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::PartNumberMissing => f.write_str("part number missing"),
            SkipReason::PrefixFiltered => f.write_str("not in the prefix list"),
        }
    }
}
