//! Tests for pipeline sequencing, branch isolation and event reporting

use super::*;
use crate::Error;
use crate::app::models::DocumentKind;
use crate::app::services::pipeline::{BranchOutcome, Decision, EventLevel, PipelineEvent};
use tempfile::TempDir;

fn full_archive(directory: &Path) -> PathBuf {
    write_archive(
        directory,
        "board.zip",
        &[
            (
                "CAMOutputs/Assembly/board_BOM.csv",
                bom_content(&[
                    ("10k", "R0402", "R1 R2", "C25744"),
                    ("100n", "C0402", "C1", "C1525"),
                ]),
            ),
            (
                "CAMOutputs/Assembly/board_PnP_front.csv",
                pnp_content(&[("R1", "1.0", "2.0", "90"), ("C1", "3.5", "4.25", "0")]),
            ),
            (
                "CAMOutputs/Assembly/board_PnP_back.csv",
                pnp_content(&[("R2", "5.0mm", "6.0mm", "180")]),
            ),
        ],
    )
}

#[test]
fn test_full_run_writes_both_outputs() {
    let work = TempDir::new().unwrap();
    let output = work.path().join("JLCPCB");
    full_archive(work.path());

    let (result, log, state) = run_logged(work.path(), &output, &filter_config(&[]));
    let report = result.unwrap();

    assert_eq!(state, RunState::Done);
    assert!(!report.has_failures());
    assert_eq!(report.bom.rows_written(), 2);
    assert_eq!(report.cpl.rows_written(), 3);
    assert_eq!(report.archive, work.path().join("board.zip"));

    let bom_path = output.join("BOM.xlsx");
    let cpl_path = output.join("CPL.xlsx");
    assert_eq!(report.bom.output_path(), Some(&bom_path));
    assert_eq!(report.cpl.output_path(), Some(&cpl_path));
    assert_eq!(sheet_row_count(&bom_path), 3);
    assert_eq!(sheet_row_count(&cpl_path), 4);

    let bom_strings = shared_strings(&bom_path);
    assert!(bom_strings.contains("LCSC Part #"));
    assert!(bom_strings.contains("R1 R2"));
    assert!(bom_strings.contains("C25744"));

    let cpl_strings = shared_strings(&cpl_path);
    assert!(cpl_strings.contains("Top"));
    assert!(cpl_strings.contains("Bottom"));

    let extracted: Vec<_> = log
        .at_level(EventLevel::Info)
        .into_iter()
        .filter(|event| event.message.contains("extracted"))
        .map(|event| event.document)
        .collect();
    assert_eq!(
        extracted,
        vec![
            Some(DocumentKind::Bom),
            Some(DocumentKind::PnpFront),
            Some(DocumentKind::PnpBack)
        ]
    );
    assert!(log.at_level(EventLevel::Warning).is_empty());
    assert!(log.at_level(EventLevel::Error).is_empty());
}

#[test]
fn test_prefix_filter_applies_to_both_outputs() {
    let work = TempDir::new().unwrap();
    let output = work.path().join("out");
    full_archive(work.path());

    let (result, log, _) = run_logged(work.path(), &output, &filter_config(&["R"]));
    let report = result.unwrap();

    assert_eq!(report.bom.rows_written(), 1);
    assert_eq!(report.cpl.rows_written(), 2);
    match &report.bom {
        BranchOutcome::Written { rows_skipped, .. } => assert_eq!(*rows_skipped, 1),
        other => panic!("Expected written BOM, got {other:?}"),
    }

    let skip = log
        .events()
        .iter()
        .find(|event| event.message == "Designator(s) \"C1\" skipped (not in the prefix list)")
        .expect("prefix skip event");
    assert_eq!(skip.level, EventLevel::Info);
    assert!(!skip.requires_confirmation);
    assert!(skip.line.is_some());

    assert!(!shared_strings(&output.join("CPL.xlsx")).contains("C1"));
}

#[test]
fn test_missing_part_number_requests_confirmation() {
    let work = TempDir::new().unwrap();
    let output = work.path().join("out");
    write_archive(
        work.path(),
        "board.zip",
        &[(
            "BOM.csv",
            bom_content(&[("10k", "R0402", "R1", "C25744"), ("DNP", "TP", "TP1", "")]),
        )],
    );

    let (result, log, _) = run_logged(work.path(), &output, &filter_config(&[]));
    let report = result.unwrap();

    assert_eq!(report.bom.rows_written(), 1);

    let warning = log
        .at_level(EventLevel::Warning)
        .into_iter()
        .find(|event| event.message.contains("TP1"))
        .cloned()
        .expect("missing part number warning");
    assert_eq!(
        warning,
        PipelineEvent::warning("Designator(s) \"TP1\" skipped (part number missing)")
            .confirm()
            .for_document(DocumentKind::Bom)
            .at_line(3)
    );
}

#[test]
fn test_declined_confirmation_aborts_run() {
    let work = TempDir::new().unwrap();
    let output = work.path().join("out");
    write_archive(
        work.path(),
        "board.zip",
        &[("BOM.csv", bom_content(&[("DNP", "TP", "TP1", "")]))],
    );

    let filter = filter_config(&[]);
    let mut seen = Vec::new();
    let mut sink = |event: &PipelineEvent| {
        seen.push(event.level);
        if event.requires_confirmation {
            Decision::Abort
        } else {
            Decision::Continue
        }
    };

    let (result, state) = {
        let mut pipeline = Pipeline::new(&filter, work.path(), &output, &mut sink);
        let result = pipeline.run();
        (result, pipeline.state())
    };

    let error = result.unwrap_err();
    assert!(matches!(error, Error::Declined { .. }));
    assert!(error.is_fatal());
    assert_eq!(state, RunState::Aborted);
    assert!(!output.join("BOM.xlsx").exists());
    assert_eq!(seen.last(), Some(&EventLevel::Error));
}

#[test]
fn test_missing_bom_skips_bom_branch_only() {
    let work = TempDir::new().unwrap();
    let output = work.path().join("out");
    write_archive(
        work.path(),
        "board.zip",
        &[("PnP_front.csv", pnp_content(&[("R1", "1", "2", "0")]))],
    );

    let (result, log, _) = run_logged(work.path(), &output, &filter_config(&[]));
    let report = result.unwrap();

    assert!(matches!(report.bom, BranchOutcome::Skipped { .. }));
    assert!(!output.join("BOM.xlsx").exists());
    assert_eq!(report.cpl.rows_written(), 1);
    assert!(output.join("CPL.xlsx").exists());

    let bom_warning = log
        .at_level(EventLevel::Warning)
        .into_iter()
        .find(|event| event.message.contains("No BOM data"))
        .expect("missing BOM warning");
    assert!(bom_warning.requires_confirmation);
}

#[test]
fn test_single_pnp_side_warns_without_confirmation() {
    let work = TempDir::new().unwrap();
    let output = work.path().join("out");
    write_archive(
        work.path(),
        "board.zip",
        &[
            ("BOM.csv", bom_content(&[("10k", "R0402", "R1", "C25744")])),
            ("PnP_back.csv", pnp_content(&[("R1", "1", "2", "270")])),
        ],
    );

    let (result, log, _) = run_logged(work.path(), &output, &filter_config(&[]));
    let report = result.unwrap();

    assert_eq!(report.cpl.rows_written(), 1);
    let strings = shared_strings(&output.join("CPL.xlsx"));
    assert!(strings.contains("Bottom"));
    assert!(!strings.contains(">Top<"));

    let notice = log
        .at_level(EventLevel::Warning)
        .into_iter()
        .find(|event| event.message.contains("Only one PnP side"))
        .expect("single side warning");
    assert!(!notice.requires_confirmation);
    assert_eq!(notice.document, Some(DocumentKind::PnpBack));
}

#[test]
fn test_no_pnp_documents_skips_cpl() {
    let work = TempDir::new().unwrap();
    let output = work.path().join("out");
    write_archive(
        work.path(),
        "board.zip",
        &[("BOM.csv", bom_content(&[("10k", "R0402", "R1", "C25744")]))],
    );

    let (result, log, _) = run_logged(work.path(), &output, &filter_config(&[]));
    let report = result.unwrap();

    assert_eq!(report.bom.rows_written(), 1);
    assert!(matches!(report.cpl, BranchOutcome::Skipped { .. }));
    assert!(!output.join("CPL.xlsx").exists());
    assert!(log.contains("No PnP data found"));
}

#[test]
fn test_missing_column_fails_only_its_branch() {
    let work = TempDir::new().unwrap();
    let output = work.path().join("out");
    write_archive(
        work.path(),
        "board.zip",
        &[
            ("BOM.csv", "\"Qty\";\"Value\";\"Device\";\"Package\";\"Parts\"\n\"1\";\"10k\";\"R\";\"R0402\";\"R1\"\n".to_string()),
            ("PnP_front.csv", pnp_content(&[("R1", "1", "2", "0")])),
        ],
    );

    let (result, log, state) = run_logged(work.path(), &output, &filter_config(&[]));
    let report = result.unwrap();

    assert_eq!(state, RunState::Done);
    assert!(report.has_failures());
    match &report.bom {
        BranchOutcome::Failed {
            error: Error::MissingRequiredColumn { kind, column },
        } => {
            assert_eq!(*kind, DocumentKind::Bom);
            assert_eq!(column, "LCSC");
        }
        other => panic!("Expected MissingRequiredColumn, got {other:?}"),
    }
    assert!(!output.join("BOM.xlsx").exists());
    assert_eq!(report.cpl.rows_written(), 1);

    let errors = log.at_level(EventLevel::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].document, Some(DocumentKind::Bom));
}

#[test]
fn test_malformed_placement_row_fails_cpl() {
    let work = TempDir::new().unwrap();
    let output = work.path().join("out");
    write_archive(
        work.path(),
        "board.zip",
        &[
            ("BOM.csv", bom_content(&[("10k", "R0402", "R1", "C25744")])),
            (
                "PnP_front.csv",
                pnp_content(&[("R1", "1", "2", "0"), ("R2", "abc", "2", "0")]),
            ),
        ],
    );

    let (result, log, _) = run_logged(work.path(), &output, &filter_config(&[]));
    let report = result.unwrap();

    assert_eq!(report.bom.rows_written(), 1);
    match &report.cpl {
        BranchOutcome::Failed {
            error: Error::MalformedRow { kind, line, .. },
        } => {
            assert_eq!(*kind, DocumentKind::PnpFront);
            assert_eq!(*line, 3);
        }
        other => panic!("Expected MalformedRow, got {other:?}"),
    }
    assert!(!output.join("CPL.xlsx").exists());

    let error_event = log.at_level(EventLevel::Error)[0].clone();
    assert_eq!(error_event.document, Some(DocumentKind::PnpFront));
    assert_eq!(error_event.line, Some(3));
}

#[test]
fn test_no_archive_is_fatal() {
    let work = TempDir::new().unwrap();
    let output = work.path().join("out");
    std::fs::write(work.path().join("notes.txt"), "no archive here").unwrap();

    let (result, log, state) = run_logged(work.path(), &output, &filter_config(&[]));

    assert!(matches!(result, Err(Error::NoArchiveFound { .. })));
    assert_eq!(state, RunState::Aborted);
    assert!(!output.exists());
    assert_eq!(log.at_level(EventLevel::Error).len(), 1);
}

#[test]
fn test_archive_without_documents_creates_nothing() {
    let work = TempDir::new().unwrap();
    let output = work.path().join("out");
    write_archive(work.path(), "board.zip", &[("board.GTL", "gerber".to_string())]);

    let (result, _, _) = run_logged(work.path(), &output, &filter_config(&[]));
    let report = result.unwrap();

    assert!(matches!(report.bom, BranchOutcome::Skipped { .. }));
    assert!(matches!(report.cpl, BranchOutcome::Skipped { .. }));
    assert!(!output.exists());
}

#[test]
fn test_new_pipeline_is_idle() {
    let filter = filter_config(&[]);
    let mut log = EventLog::new();
    let pipeline = Pipeline::new(&filter, ".", "out", &mut log);

    assert_eq!(pipeline.state(), RunState::Idle);
    assert_eq!(pipeline.output_directory(), Path::new("out"));
}
