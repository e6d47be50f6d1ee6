//! Property tests for normalization, averaging and blending.

use copo_engine::{blend, column_averages, normalize, propose_edit};
use copo_model::{
    AttainmentKind, AttainmentResult, CO_COUNT, MappingMatrix, OutcomeCode, PO_COUNT,
};
use proptest::prelude::*;

fn raw_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        (-10.0f64..10.0).prop_map(|value| value.to_string()),
        (0u8..5).prop_map(|value| value.to_string()),
        Just(String::new()),
        Just("n/a".to_string()),
        Just("PO1".to_string()),
        Just("inf".to_string()),
    ]
}

fn raw_table() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec(raw_cell(), 0..20), 0..10)
}

fn matrix() -> impl Strategy<Value = MappingMatrix> {
    prop::collection::vec(prop::collection::vec(0.0f64..=3.0, PO_COUNT), CO_COUNT).prop_map(
        |rows| MappingMatrix::try_from(rows).expect("generated rows are in range"),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn normalize_always_yields_valid_matrix(rows in raw_table()) {
        let matrix = normalize(&rows);
        prop_assert_eq!(matrix.rows().len(), CO_COUNT);
        for value in matrix.rows().iter().flatten() {
            prop_assert!((0.0..=3.0).contains(value), "cell {value} out of range");
        }
    }

    #[test]
    fn normalize_is_idempotent(matrix in matrix()) {
        let again = normalize(matrix.rows());
        prop_assert_eq!(again, matrix);
    }

    #[test]
    fn column_average_is_sum_over_six(matrix in matrix()) {
        let averages = column_averages(&matrix);
        for col in 0..PO_COUNT {
            let sum: f64 = matrix.column(col).sum();
            prop_assert!((averages[col] - sum / 6.0).abs() < 1e-12);
        }
    }

    #[test]
    fn blend_follows_eighty_twenty(d in 0.0f64..100.0, i in 0.0f64..100.0, col in 0usize..PO_COUNT) {
        let code = OutcomeCode::new(col).expect("column in range");
        let direct = AttainmentResult::new(AttainmentKind::Direct).with_po(&code.po_key(), d);
        let indirect = AttainmentResult::new(AttainmentKind::Indirect).with_po(&code.label(), i);
        let blended = blend(Some(&direct), Some(&indirect));
        let value = blended.get(code).expect("every code is blended");
        prop_assert!((value.final_value - (d * 0.8 + i * 0.2)).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_edits_never_change_matrix(
        matrix in matrix(),
        row in 0usize..CO_COUNT,
        col in 0usize..PO_COUNT,
        value in prop_oneof![-100.0f64..-0.001, 3.001f64..100.0],
    ) {
        prop_assert!(propose_edit(&matrix, row, col, &value).is_err());
    }

    #[test]
    fn in_range_edit_touches_one_cell(
        matrix in matrix(),
        row in 0usize..CO_COUNT,
        col in 0usize..PO_COUNT,
        value in 0.0f64..=3.0,
    ) {
        let edited = propose_edit(&matrix, row, col, &value).expect("in range");
        for r in 0..CO_COUNT {
            for c in 0..PO_COUNT {
                let expected = if (r, c) == (row, col) { value } else { matrix.rows()[r][c] };
                prop_assert_eq!(edited.rows()[r][c], expected);
            }
        }
    }
}
