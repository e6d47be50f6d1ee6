//! Integration tests for report assembly and writers.

use std::fs;

use copo_engine::ReportSession;
use copo_model::{AttainmentKind, AttainmentResult, CourseInfo, CourseOutcome};
use copo_report::{
    combined_csv, render_html, session_report, write_combined_csv, write_html_report,
    write_json_report,
};
use tempfile::TempDir;

fn scored_session() -> ReportSession {
    let mut session = ReportSession::new();
    session.edit_cell(0, 0, "3").expect("valid edit");
    session.edit_cell(1, 0, "1").expect("valid edit");

    let pending = session
        .begin_calculation(AttainmentKind::Direct)
        .expect("starts");
    let direct = AttainmentResult::new(AttainmentKind::Direct)
        .with_co(CourseOutcome::new(0).unwrap(), 72.5)
        .with_po("PO1", 70.0)
        .with_po("PSO1", 80.0);
    session
        .finish_calculation(pending, Ok(direct))
        .expect("direct stored");

    let pending = session
        .begin_calculation(AttainmentKind::Indirect)
        .expect("starts");
    let indirect = AttainmentResult::new(AttainmentKind::Indirect).with_po("PO1", 50.0);
    session
        .finish_calculation(pending, Ok(indirect))
        .expect("indirect stored");
    session
}

fn course() -> CourseInfo {
    CourseInfo {
        subject: Some("Data & Systems".to_string()),
        department: Some("Computer Engineering".to_string()),
        ..CourseInfo::default()
    }
}

#[test]
fn session_report_labels_latest_kind() {
    let session = scored_session();
    let view = session_report(&session, &course());
    assert_eq!(view.mapping.footer.label, "Indirect Attainment");
    assert!((view.mapping.footer.values[0] - 4.0 / 6.0).abs() < 1e-12);

    let direct = view.direct.as_ref().expect("direct section");
    assert_eq!(direct.co_series.len(), 1);
    assert_eq!(direct.comparison_label, "Indirect Attainment");
    assert_eq!(direct.po_series[12].label, "PSO1");
    assert_eq!(direct.po_series[12].value, 80.0);

    let rounded = view.rounded();
    assert_eq!(rounded.mapping.footer.values[0], 0.67);
    assert_eq!(rounded.combined[0].final_value, 66.0);
    assert_eq!(rounded.combined[12].final_value, 64.0);
}

#[test]
fn combined_csv_lists_codes_in_column_order() {
    let session = scored_session();
    let csv = combined_csv(&session.blended().values).expect("render csv");
    let head: Vec<&str> = csv.lines().take(3).collect();
    insta::assert_snapshot!(head.join("\n"), @r"
    code,direct80,indirect20,final
    PO1,56.00,10.00,66.00
    PO2,0.00,0.00,0.00
    ");
    assert_eq!(csv.lines().count(), 16);
    assert!(csv.contains("PSO1,64.00,0.00,64.00"));
}

#[test]
fn json_report_is_rounded_and_timestamped() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("out").join("report.json");
    let view = session_report(&scored_session(), &course());
    write_json_report(&path, &view).expect("write json");

    let contents = fs::read_to_string(&path).expect("read json");
    let json: serde_json::Value = serde_json::from_str(&contents).expect("parse json");
    assert!(json["generated_at"].as_str().is_some());
    assert_eq!(json["footer"], "Indirect Attainment");
    assert_eq!(json["combined"][0]["code"], "PO1");
    assert_eq!(json["combined"][0]["final"], 66.0);
    assert_eq!(json["direct"]["type"], "direct");
    assert_eq!(json["course"]["subject"], "Data & Systems");
}

#[test]
fn html_report_escapes_text_and_marks_footer() {
    let view = session_report(&scored_session(), &course()).rounded();
    let html = render_html(&view, "2026-01-01T00:00:00Z").expect("render html");
    assert!(html.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(html.contains("CO-PO-PSO Attainment Report: Data &amp; Systems"));
    assert!(html.contains("<th>PSO3</th>"));
    assert!(html.contains("<tr class=\"footer\">"));
    assert!(html.contains("<td>Indirect Attainment</td>"));
    assert!(html.contains("Final PO/PSO Attainment"));
    assert!(html.contains("Generated 2026-01-01T00:00:00Z"));
}

#[test]
fn writers_create_files() {
    let dir = TempDir::new().expect("temp dir");
    let session = scored_session();
    let view = session_report(&session, &CourseInfo::default());

    let html_path = dir.path().join("report.html");
    write_html_report(&html_path, &view).expect("write html");
    assert!(fs::read_to_string(&html_path).expect("read html").contains("<html"));

    let csv_path = dir.path().join("nested").join("combined.csv");
    write_combined_csv(&csv_path, &view.combined).expect("write csv");
    let csv = fs::read_to_string(&csv_path).expect("read csv");
    assert!(csv.starts_with("code,direct80,indirect20,final"));
}
