use std::collections::BTreeMap;

use copo_model::{CourseOutcome, MappingMatrix, OutcomeCode};

/// Derives PO attainment from CO attainment, weighting each CO by its
/// mapping strength: `po[c] = sum(M[r][c] * co[r]) / sum(M[r][c])`.
///
/// Columns with no mapping weight yield 0. Missing CO values count as 0.
/// Keys are `PO1`..`PO15`, with `PSO1`..`PSO3` added as copies of the last
/// three so either naming finds them.
pub fn derive_po_values(
    matrix: &MappingMatrix,
    co_values: &BTreeMap<CourseOutcome, f64>,
) -> BTreeMap<String, f64> {
    let mut po_values = BTreeMap::new();
    for code in OutcomeCode::all() {
        let mut weighted = 0.0;
        let mut weight_sum = 0.0;
        for co in CourseOutcome::all() {
            let weight = matrix.weight(co, code);
            weighted += weight * co_values.get(&co).copied().unwrap_or(0.0);
            weight_sum += weight;
        }
        let value = if weight_sum == 0.0 {
            0.0
        } else {
            weighted / weight_sum
        };
        po_values.insert(code.po_key(), value);
        if let Some(alias) = code.pso_key() {
            po_values.insert(alias, value);
        }
    }
    po_values
}
