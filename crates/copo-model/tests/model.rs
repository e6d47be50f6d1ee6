//! Tests for attainment payload decoding and model serialization.

use copo_model::{
    AttainmentKind, AttainmentPayload, AttainmentResult, CourseInfo, CourseOutcome,
    MappingMatrix, ModelError, OutcomeCode,
};

fn payload(json: &str) -> AttainmentPayload {
    serde_json::from_str(json).expect("parse payload")
}

#[test]
fn payload_with_empty_po_list_reads_as_no_values() {
    let payload = payload(r#"{"co_values": {"CO1": 70.0}, "po_values": [], "type": "direct"}"#);
    let result =
        AttainmentResult::from_payload(payload, AttainmentKind::Direct).expect("direct result");
    assert!(result.po_values.is_empty());
    assert_eq!(result.co_value(CourseOutcome::new(0).unwrap()), Some(70.0));
}

#[test]
fn payload_without_type_takes_channel_kind() {
    let payload = payload(r#"{"co_values": {}, "po_values": {"PO1": 55.5}}"#);
    let result = AttainmentResult::from_payload(payload, AttainmentKind::Indirect)
        .expect("indirect result");
    assert_eq!(result.kind, AttainmentKind::Indirect);
    assert_eq!(result.po_value(OutcomeCode::new(0).unwrap()), Some(55.5));
}

#[test]
fn payload_with_conflicting_type_is_rejected() {
    let payload = payload(r#"{"co_values": {}, "po_values": {}, "type": "indirect"}"#);
    let err = AttainmentResult::from_payload(payload, AttainmentKind::Direct).unwrap_err();
    assert_eq!(
        err,
        ModelError::KindMismatch {
            expected: AttainmentKind::Direct,
            found: AttainmentKind::Indirect,
        }
    );
}

#[test]
fn payload_with_unrecognized_type_takes_channel_kind() {
    let payload = payload(r#"{"po_values": {"PO4": 55}, "type": "survey"}"#);
    let result =
        AttainmentResult::from_payload(payload, AttainmentKind::Indirect).expect("indirect result");
    assert_eq!(result.kind, AttainmentKind::Indirect);
    assert_eq!(result.po_value(OutcomeCode::parse("PO4").unwrap()), Some(55.0));
}

#[test]
fn payload_drops_nulls_and_unknown_cos() {
    let payload = payload(
        r#"{"co_values": {"CO1": null, "CO9": 3.0, "co2": 40}, "po_values": {"pso1": 12, "PO2": null}}"#,
    );
    let result =
        AttainmentResult::from_payload(payload, AttainmentKind::Direct).expect("direct result");
    assert_eq!(result.co_values.len(), 1);
    assert_eq!(result.co_value(CourseOutcome::new(1).unwrap()), Some(40.0));
    assert_eq!(result.po_values.len(), 1);
    assert_eq!(result.po_value(OutcomeCode::parse("PO13").unwrap()), Some(12.0));
}

#[test]
fn result_serializes_with_type_field() {
    let result = AttainmentResult::new(AttainmentKind::Direct)
        .with_co(CourseOutcome::new(0).unwrap(), 66.0)
        .with_po("po1", 1.5);
    let json = serde_json::to_value(&result).expect("serialize");
    assert_eq!(json["type"], "direct");
    assert_eq!(json["co_values"]["CO1"], 66.0);
    assert_eq!(json["po_values"]["PO1"], 1.5);

    let back: AttainmentResult = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, result);
}

#[test]
fn payload_from_result_keeps_kind() {
    let result = AttainmentResult::new(AttainmentKind::Indirect).with_po("PSO2", 4.0);
    let payload = AttainmentPayload::from(&result);
    assert_eq!(payload.kind.as_deref(), Some("indirect"));
    assert_eq!(payload.po_values.get("PSO2"), Some(&Some(4.0)));
}

#[test]
fn matrix_deserialization_validates_range() {
    let mut rows = vec![vec![0.0; 15]; 6];
    rows[1][3] = 3.5;
    let json = serde_json::to_string(&rows).expect("serialize rows");
    assert!(serde_json::from_str::<MappingMatrix>(&json).is_err());

    rows[1][3] = 2.0;
    let json = serde_json::to_string(&rows).expect("serialize rows");
    let matrix: MappingMatrix = serde_json::from_str(&json).expect("valid matrix");
    assert_eq!(matrix.get(1, 3), Some(2.0));
}

#[test]
fn course_info_lists_only_set_fields() {
    let mut course = CourseInfo {
        subject: Some("Data Structures".to_string()),
        class: Some("SE".to_string()),
        ..CourseInfo::default()
    };
    assert_eq!(
        course.header_fields(),
        vec![("Class", "SE"), ("Subject", "Data Structures")]
    );
    assert!(!course.is_empty());

    course
        .outcomes
        .insert(CourseOutcome::new(2).unwrap(), "Apply trees".to_string());
    assert_eq!(
        course.outcome_statement(CourseOutcome::new(2).unwrap()),
        Some("Apply trees")
    );
    assert!(CourseInfo::default().is_empty());
}
