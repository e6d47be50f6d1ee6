//! End-to-end session scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use copo_engine::{
    CoAverageScorer, EDIT_REJECTED_MESSAGE, PARSE_FAILED_MESSAGE, PayloadScorer, ReportSession,
    SCORING_FAILED_MESSAGE, Scorer, ScorerKind, ScoringError, ScoringRequest,
};
use copo_model::{AttainmentKind, AttainmentResult, FooterLabel, OutcomeCode};
use tempfile::TempDir;

fn temp_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn code(raw: &str) -> OutcomeCode {
    OutcomeCode::parse(raw).expect("known code")
}

fn header() -> String {
    (1..=15)
        .map(|n| format!("PO{n}"))
        .collect::<Vec<_>>()
        .join(",")
}

struct FailingScorer;

impl Scorer for FailingScorer {
    fn score(&self, _request: &ScoringRequest<'_>) -> Result<AttainmentResult, ScoringError> {
        Err(ScoringError::Failed {
            message: "collaborator unreachable".to_string(),
        })
    }
}

#[test]
fn upload_with_header_row_is_normalized() {
    let dir = TempDir::new().expect("temp dir");
    let contents = format!(
        "{}\n1,2,3,0,1,2,3,0,1,2,3,0,1,2,3\n{}",
        header(),
        "0,0,0,0,0,0,0,0,0,0,0,0,0,0,0\n".repeat(5)
    );
    let path = temp_file(&dir, "mapping.csv", &contents);

    let mut session = ReportSession::new();
    let matrix = session.load_matrix_file(&path).expect("load mapping");
    assert_eq!(
        matrix.rows()[0],
        [1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0]
    );
    assert!(matrix.rows()[1..].iter().flatten().all(|value| *value == 0.0));
    assert_eq!(session.footer(), FooterLabel::Average);
    assert_eq!(session.message(), None);
}

#[test]
fn unreadable_upload_keeps_previous_matrix() {
    let dir = TempDir::new().expect("temp dir");
    let good = temp_file(&dir, "mapping.csv", "3,3,3\n");
    let bad = temp_file(&dir, "mapping.xlsx", "binary");

    let mut session = ReportSession::new();
    session.load_matrix_file(&good).expect("load mapping");
    let before = session.matrix().clone();
    assert!(session.load_matrix_file(&bad).is_err());
    assert_eq!(session.matrix(), &before);
    assert_eq!(session.message(), Some(PARSE_FAILED_MESSAGE));
}

#[test]
fn rejected_edit_sets_message_and_keeps_cell() {
    let mut session = ReportSession::new();
    session.edit_cell(0, 0, "2").expect("valid edit");
    assert!(session.edit_cell(0, 0, "4").is_err());
    assert_eq!(session.matrix().get(0, 0), Some(2.0));
    assert_eq!(session.message(), Some(EDIT_REJECTED_MESSAGE));

    session.edit_cell(0, 1, "1.5").expect("valid edit");
    assert_eq!(session.message(), None);
}

#[test]
fn direct_payload_blends_pso_alias() {
    let dir = TempDir::new().expect("temp dir");
    let direct = temp_file(
        &dir,
        "direct.json",
        r#"{"co_values": {"CO1": 80}, "po_values": {"PO13": 80}, "type": "direct"}"#,
    );

    let mut session = ReportSession::new();
    session
        .calculate(AttainmentKind::Direct, &PayloadScorer, &direct)
        .expect("direct scoring");
    let blended = session.blended();
    let pso1 = blended.get(code("PSO1")).expect("PSO1");
    assert_eq!(pso1.final_value, 64.0);
    assert_eq!(session.footer(), FooterLabel::Mapping);
}

#[test]
fn direct_and_indirect_combine() {
    let dir = TempDir::new().expect("temp dir");
    let direct = temp_file(&dir, "direct.json", r#"{"po_values": {"PO1": 70}}"#);
    let indirect = temp_file(&dir, "indirect.json", r#"{"po_values": {"PO1": 50}}"#);

    let mut session = ReportSession::new();
    session
        .calculate(AttainmentKind::Direct, &ScorerKind::Auto, &direct)
        .expect("direct scoring");
    session
        .calculate(AttainmentKind::Indirect, &ScorerKind::Auto, &indirect)
        .expect("indirect scoring");
    let po1 = *session.blended().get(code("PO1")).expect("PO1");
    assert!((po1.final_value - 66.0).abs() < 1e-9);
    assert_eq!(session.footer(), FooterLabel::IndirectAttainment);
    assert_eq!(session.latest(), Some(AttainmentKind::Indirect));
}

#[test]
fn failed_scoring_keeps_prior_result() {
    let dir = TempDir::new().expect("temp dir");
    let direct = temp_file(&dir, "direct.json", r#"{"po_values": {"PO2": 60}}"#);

    let mut session = ReportSession::new();
    session
        .calculate(AttainmentKind::Direct, &PayloadScorer, &direct)
        .expect("direct scoring");
    let err = session
        .calculate(AttainmentKind::Direct, &FailingScorer, Path::new("marks.csv"))
        .unwrap_err();
    assert!(matches!(err, ScoringError::Failed { .. }));
    assert_eq!(session.message(), Some(SCORING_FAILED_MESSAGE));
    assert_eq!(session.direct().and_then(|r| r.po_value(code("PO2"))), Some(60.0));
    assert!(!session.is_calculating());
}

#[test]
fn mismatched_payload_type_is_a_scoring_failure() {
    let dir = TempDir::new().expect("temp dir");
    let payload = temp_file(&dir, "survey.json", r#"{"po_values": {}, "type": "indirect"}"#);

    let mut session = ReportSession::new();
    let err = session
        .calculate(AttainmentKind::Direct, &PayloadScorer, &payload)
        .unwrap_err();
    assert!(matches!(err, ScoringError::Model(_)));
    assert!(session.direct().is_none());
    assert_eq!(session.footer(), FooterLabel::Average);
}

#[test]
fn unrecognized_payload_type_is_stored_on_its_channel() {
    let dir = TempDir::new().expect("temp dir");
    let payload = temp_file(&dir, "final.json", r#"{"po_values": {"PO1": 70}, "type": "final"}"#);

    let mut session = ReportSession::new();
    session
        .calculate(AttainmentKind::Direct, &PayloadScorer, &payload)
        .expect("payload accepted");
    assert_eq!(
        session.direct().map(|direct| direct.kind),
        Some(AttainmentKind::Direct)
    );
    assert_eq!(
        session.direct().and_then(|direct| direct.po_value(code("PO1"))),
        Some(70.0)
    );
    assert_eq!(session.footer(), FooterLabel::Mapping);
    assert_eq!(session.message(), None);
}

#[test]
fn second_calculation_while_pending_is_busy() {
    let mut session = ReportSession::new();
    let pending = session
        .begin_calculation(AttainmentKind::Direct)
        .expect("first call starts");
    assert!(session.is_calculating());
    assert!(matches!(
        session.begin_calculation(AttainmentKind::Indirect),
        Err(ScoringError::Busy(AttainmentKind::Direct))
    ));

    let result = AttainmentResult::new(AttainmentKind::Direct).with_po("PO3", 90.0);
    session
        .finish_calculation(pending, Ok(result))
        .expect("settles");
    assert!(!session.is_calculating());
    assert!(session.begin_calculation(AttainmentKind::Indirect).is_ok());
}

#[test]
fn indirect_request_carries_direct_context() {
    let mut session = ReportSession::new();
    let pending = session
        .begin_calculation(AttainmentKind::Direct)
        .expect("starts");
    assert!(pending.request(Path::new("x.json")).direct80.is_none());
    let result = AttainmentResult::new(AttainmentKind::Direct).with_po("PO1", 50.0);
    session.finish_calculation(pending, Ok(result)).expect("settles");

    let pending = session
        .begin_calculation(AttainmentKind::Indirect)
        .expect("starts");
    let request = pending.request(Path::new("survey.csv"));
    let context = request.direct80.expect("direct context");
    assert_eq!(context.get(&code("PO1")), Some(&40.0));
}

#[test]
fn survey_table_needs_every_co_column() {
    let dir = TempDir::new().expect("temp dir");
    let survey = temp_file(&dir, "survey.csv", "CO1,CO2\n3,2\n");
    let marks = temp_file(&dir, "marks.csv", "CO1,CO2\n60,80\n");

    let mut session = ReportSession::new();
    session.edit_cell(0, 0, "3").expect("valid edit");
    session.edit_cell(1, 1, "2").expect("valid edit");

    assert!(
        session
            .calculate(AttainmentKind::Indirect, &CoAverageScorer, &survey)
            .is_err()
    );
    session
        .calculate(AttainmentKind::Direct, &CoAverageScorer, &marks)
        .expect("direct from CO table");
    let direct = session.direct().expect("direct result");
    assert_eq!(direct.po_value(code("PO1")), Some(60.0));
    assert_eq!(direct.po_value(code("PO2")), Some(80.0));
    assert_eq!(direct.po_value(code("PSO1")), Some(0.0));
}
