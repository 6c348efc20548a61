//! Pipeline state machine
//!
//! `Idle -> ArchiveLocated -> Extracted -> BomProcessed -> PnpProcessed -> Done`,
//! with `Aborted` reachable from any state on a fatal error. The BOM and CPL
//! branches own their documents, tables and outputs; a document-level error
//! in one branch is recorded in the report and the other branch still runs.

use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};

use super::events::{Decision, EventLevel, EventSink, PipelineEvent};
use super::report::{BranchOutcome, RunReport};
use crate::app::models::{DocumentKind, OutputKind, RawDocument, SkipReason};
use crate::app::services::archive_extractor::extract_documents;
use crate::app::services::archive_locator::ArchiveLocator;
use crate::app::services::csv_table::CsvTable;
use crate::app::services::csv_table::record_parser::{
    BOM_SCHEMA, PNP_SCHEMA, parse_bom_record, parse_placement_record,
};
use crate::app::services::row_filter::{SkippedRow, filter_records};
use crate::app::services::xlsx_writer::{OutputTable, WriterConfig, write_table};
use crate::config::FilterConfig;
use crate::{Error, Result};

/// Pipeline progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    ArchiveLocated,
    Extracted,
    BomProcessed,
    PnpProcessed,
    Done,
    Aborted,
}

/// One conversion run over a working directory
pub struct Pipeline<'a> {
    filter: &'a FilterConfig,
    working_directory: PathBuf,
    output_directory: PathBuf,
    writer_config: WriterConfig,
    sink: &'a mut dyn EventSink,
    state: RunState,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline reading from `working_directory` and writing to `output_directory`
    pub fn new(
        filter: &'a FilterConfig,
        working_directory: impl Into<PathBuf>,
        output_directory: impl Into<PathBuf>,
        sink: &'a mut dyn EventSink,
    ) -> Self {
        Self {
            filter,
            working_directory: working_directory.into(),
            output_directory: output_directory.into(),
            writer_config: WriterConfig::default(),
            sink,
            state: RunState::Idle,
        }
    }

    /// Override the workbook layout settings
    pub fn with_writer_config(mut self, writer_config: WriterConfig) -> Self {
        self.writer_config = writer_config;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Run the pipeline to completion
    ///
    /// Returns `Err` only for fatal errors (no archive, unreadable archive,
    /// output directory not creatable, or the collaborator declining).
    /// Document-level errors are reported in the returned [`RunReport`].
    pub fn run(&mut self) -> Result<RunReport> {
        let start_time = Instant::now();
        info!(
            "Starting conversion in {} (profile {}, prefixes {:?})",
            self.working_directory.display(),
            self.filter.profile(),
            self.filter.prefixes()
        );

        match self.run_stages(start_time) {
            Ok(report) => {
                self.transition(RunState::Done);
                Ok(report)
            }
            Err(run_error) => {
                self.transition(RunState::Aborted);
                error!("Run aborted: {}", run_error);
                self.sink.emit(&PipelineEvent::error(run_error.to_string()));
                Err(run_error)
            }
        }
    }

    fn run_stages(&mut self, start_time: Instant) -> Result<RunReport> {
        let archive = ArchiveLocator::new(&self.working_directory).locate()?;
        self.transition(RunState::ArchiveLocated);

        let documents = extract_documents(&archive)?;
        for kind in DocumentKind::ALL {
            if let Some(document) = documents.get(kind) {
                self.notify(
                    PipelineEvent::info(format!(
                        "{} data extracted from {}",
                        kind, document.entry_name
                    ))
                    .for_document(kind),
                )?;
            }
        }
        self.transition(RunState::Extracted);

        if !documents.is_empty() {
            self.prepare_output_directory()?;
        }

        let bom = self.bom_branch(documents.bom.as_ref())?;
        self.transition(RunState::BomProcessed);

        let cpl = self.cpl_branch(documents.pnp_front.as_ref(), documents.pnp_back.as_ref())?;
        self.transition(RunState::PnpProcessed);

        Ok(RunReport {
            archive,
            output_directory: self.output_directory.clone(),
            bom,
            cpl,
            elapsed: start_time.elapsed(),
        })
    }

    /// Create the output directory if it does not exist yet
    fn prepare_output_directory(&self) -> Result<()> {
        std::fs::create_dir_all(&self.output_directory).map_err(|e| {
            Error::io(
                format!(
                    "Failed to create output directory {}",
                    self.output_directory.display()
                ),
                e,
            )
        })?;
        debug!(
            "Output directory ready: {}",
            self.output_directory.display()
        );
        Ok(())
    }

    fn bom_branch(&mut self, document: Option<&RawDocument>) -> Result<BranchOutcome> {
        let Some(document) = document else {
            self.notify(
                PipelineEvent::warning("No BOM data found in CAM output, BOM output skipped")
                    .for_document(DocumentKind::Bom)
                    .confirm(),
            )?;
            return Ok(BranchOutcome::Skipped {
                reason: "no BOM document in archive".to_string(),
            });
        };

        let result = self.process_bom(document);
        self.settle(OutputKind::Bom, result)
    }

    fn process_bom(&mut self, document: &RawDocument) -> Result<BranchOutcome> {
        let table = CsvTable::parse(document)?;
        let mapping = table.resolve(BOM_SCHEMA)?;

        let records = table
            .rows()
            .map(|row| {
                let row = row?;
                let record = parse_bom_record(&row, &mapping)?;
                Ok((row.line, record))
            })
            .collect::<Result<Vec<_>>>()?;
        debug!("BOM: {} data rows read", records.len());

        let report = filter_records(records, self.filter);
        self.report_skips(DocumentKind::Bom, &report.skipped)?;

        let profile = self.filter.profile();
        let mut output = OutputTable::new(OutputKind::Bom, profile.bom_header());
        output.extend(report.included);

        let path = self.output_directory.join(profile.bom_file_name());
        let stats = write_table(&output, &path, &self.writer_config)?;
        self.notify(PipelineEvent::info(format!(
            "BOM output file saved to {} ({} rows)",
            path.display(),
            stats.rows_written
        )))?;

        Ok(BranchOutcome::Written {
            stats,
            rows_skipped: report.skipped.len(),
        })
    }

    fn cpl_branch(
        &mut self,
        front: Option<&RawDocument>,
        back: Option<&RawDocument>,
    ) -> Result<BranchOutcome> {
        let sides: Vec<&RawDocument> = [front, back].into_iter().flatten().collect();

        match sides.as_slice() {
            [] => {
                self.notify(
                    PipelineEvent::warning("No PnP data found in CAM output, CPL output skipped")
                        .confirm(),
                )?;
                return Ok(BranchOutcome::Skipped {
                    reason: "no PnP documents in archive".to_string(),
                });
            }
            [only] => {
                self.notify(
                    PipelineEvent::warning(format!(
                        "Only one PnP side present ({}), other side skipped",
                        only.kind
                    ))
                    .for_document(only.kind),
                )?;
            }
            _ => {}
        }

        let result = self.process_cpl(&sides);
        self.settle(OutputKind::Cpl, result)
    }

    fn process_cpl(&mut self, sides: &[&RawDocument]) -> Result<BranchOutcome> {
        let profile = self.filter.profile();
        let mut output = OutputTable::new(OutputKind::Cpl, profile.cpl_header());
        let mut rows_skipped = 0;

        for document in sides {
            let layer = document.kind.layer().ok_or_else(|| {
                Error::configuration(format!(
                    "{} is not a pick-and-place document",
                    document.kind
                ))
            })?;

            let table = CsvTable::parse(document)?;
            let mapping = table.resolve(PNP_SCHEMA)?;

            let records = table
                .rows()
                .map(|row| {
                    let row = row?;
                    let record = parse_placement_record(&row, &mapping, layer)?;
                    Ok((row.line, record))
                })
                .collect::<Result<Vec<_>>>()?;
            debug!("{}: {} data rows read", document.kind, records.len());

            let report = filter_records(records, self.filter);
            self.report_skips(document.kind, &report.skipped)?;

            rows_skipped += report.skipped.len();
            output.extend(report.included);
        }

        let path = self.output_directory.join(profile.cpl_file_name());
        let stats = write_table(&output, &path, &self.writer_config)?;
        self.notify(PipelineEvent::info(format!(
            "CPL output file saved to {} ({} rows)",
            path.display(),
            stats.rows_written
        )))?;

        Ok(BranchOutcome::Written {
            stats,
            rows_skipped,
        })
    }

    /// Turn a document-level error into a failed branch, pass fatal ones on
    fn settle(&mut self, kind: OutputKind, result: Result<BranchOutcome>) -> Result<BranchOutcome> {
        match result {
            Ok(outcome) => Ok(outcome),
            Err(branch_error) if branch_error.is_fatal() => Err(branch_error),
            Err(branch_error) => {
                let mut event =
                    PipelineEvent::error(format!("{} output not written: {}", kind, branch_error));
                if let Some((document, line)) = error_location(&branch_error) {
                    event = event.for_document(document);
                    if let Some(line) = line {
                        event = event.at_line(line);
                    }
                }
                self.notify(event)?;
                Ok(BranchOutcome::Failed {
                    error: branch_error,
                })
            }
        }
    }

    fn report_skips(&mut self, kind: DocumentKind, skipped: &[SkippedRow]) -> Result<()> {
        for row in skipped {
            let message = format!("Designator(s) \"{}\" skipped ({})", row.designators, row.reason);
            let event = match row.reason {
                SkipReason::PartNumberMissing => PipelineEvent::warning(message).confirm(),
                SkipReason::PrefixFiltered => PipelineEvent::info(message),
            };
            self.notify(event.for_document(kind).at_line(row.line))?;
        }
        Ok(())
    }

    /// Log an event, pass it to the sink, and honour a refusal to continue
    fn notify(&mut self, event: PipelineEvent) -> Result<()> {
        match event.level {
            EventLevel::Info => info!("{}", event),
            EventLevel::Warning => warn!("{}", event),
            EventLevel::Error => error!("{}", event),
        }

        let decision = self.sink.emit(&event);
        if event.requires_confirmation && decision == Decision::Abort {
            return Err(Error::declined(event.message));
        }
        Ok(())
    }

    fn transition(&mut self, next: RunState) {
        debug!("Pipeline state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Document and line an error refers to, when it carries them
fn error_location(error: &Error) -> Option<(DocumentKind, Option<u64>)> {
    match error {
        Error::MissingRequiredColumn { kind, .. } => Some((*kind, None)),
        Error::MalformedRow { kind, line, .. } => Some((*kind, Some(*line))),
        Error::Csv { kind, source } => Some((*kind, source.position().map(|p| p.line()))),
        _ => None,
    }
}
