//! 80/20 combination of direct and indirect attainment.

use std::collections::BTreeMap;

use copo_model::{
    AttainmentKind, AttainmentResult, BlendedAttainment, BlendedValue, ComparisonPoint,
    OutcomeCode, PO_COUNT,
};

/// PO/PSO value of `result` for `code`, 0 when the result or value is absent.
pub fn po_or_zero(result: Option<&AttainmentResult>, code: OutcomeCode) -> f64 {
    result
        .and_then(|result| result.po_value(code))
        .unwrap_or(0.0)
}

/// Blends direct and indirect PO/PSO attainment over all 15 codes.
///
/// Either side may be absent and then contributes 0. Values keep full
/// precision.
pub fn blend(
    direct: Option<&AttainmentResult>,
    indirect: Option<&AttainmentResult>,
) -> BlendedAttainment {
    let values = OutcomeCode::all()
        .map(|code| {
            let direct80 = po_or_zero(direct, code) * AttainmentKind::Direct.weight();
            let indirect20 = po_or_zero(indirect, code) * AttainmentKind::Indirect.weight();
            BlendedValue {
                code,
                direct80,
                indirect20,
                final_value: direct80 + indirect20,
            }
        })
        .collect();
    BlendedAttainment { values }
}

/// Weighted direct share per code, handed to the indirect scorer as context.
pub fn direct80(direct: Option<&AttainmentResult>) -> BTreeMap<OutcomeCode, f64> {
    OutcomeCode::all()
        .map(|code| (code, po_or_zero(direct, code) * AttainmentKind::Direct.weight()))
        .collect()
}

/// Pairs each column's mapping average with the measured attainment.
pub fn comparison(
    averages: &[f64; PO_COUNT],
    attainment: Option<&AttainmentResult>,
) -> Vec<ComparisonPoint> {
    OutcomeCode::all()
        .map(|code| ComparisonPoint {
            code,
            mapping: averages[code.column()],
            attainment: po_or_zero(attainment, code),
        })
        .collect()
}
