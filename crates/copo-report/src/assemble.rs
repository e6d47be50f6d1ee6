//! Reshapes engine output into display tables and chart series.

use copo_engine::{ReportSession, comparison, po_or_zero};
use copo_model::{
    AttainmentKind, AttainmentResult, AttainmentSection, BlendedAttainment, CourseInfo,
    CourseOutcome, FooterLabel, LabeledRow, MappingMatrix, MappingTable, OutcomeCode, PO_COUNT,
    ReportView, SeriesPoint,
};

/// Everything the assembler reads. Nothing here is recomputed.
#[derive(Debug, Clone, Copy)]
pub struct ReportInputs<'a> {
    pub matrix: &'a MappingMatrix,
    pub averages: &'a [f64; PO_COUNT],
    pub direct: Option<&'a AttainmentResult>,
    pub indirect: Option<&'a AttainmentResult>,
    pub blended: &'a BlendedAttainment,
    /// Kind of the most recent result. When unset, a present direct result
    /// wins over an indirect one.
    pub latest: Option<AttainmentKind>,
    pub course: &'a CourseInfo,
}

pub fn assemble(inputs: &ReportInputs<'_>) -> ReportView {
    let latest = inputs
        .latest
        .or_else(|| inputs.direct.map(|result| result.kind))
        .or_else(|| inputs.indirect.map(|result| result.kind));
    let footer = FooterLabel::for_latest(latest);
    let has_attainment = inputs.direct.is_some() || inputs.indirect.is_some();

    ReportView {
        course: inputs.course.clone(),
        footer,
        mapping: mapping_table(inputs.matrix, inputs.averages, footer),
        direct: inputs
            .direct
            .map(|result| section(result, AttainmentKind::Direct, inputs.averages, footer)),
        indirect: inputs
            .indirect
            .map(|result| section(result, AttainmentKind::Indirect, inputs.averages, footer)),
        combined: if has_attainment {
            inputs.blended.values.clone()
        } else {
            Vec::new()
        },
        sources: Vec::new(),
    }
}

/// Assembles the current state of a session.
pub fn session_report(session: &ReportSession, course: &CourseInfo) -> ReportView {
    let averages = session.column_averages();
    let blended = session.blended();
    assemble(&ReportInputs {
        matrix: session.matrix(),
        averages: &averages,
        direct: session.direct(),
        indirect: session.indirect(),
        blended: &blended,
        latest: session.latest(),
        course,
    })
}

fn mapping_table(
    matrix: &MappingMatrix,
    averages: &[f64; PO_COUNT],
    footer: FooterLabel,
) -> MappingTable {
    MappingTable {
        columns: OutcomeCode::all().map(OutcomeCode::label).collect(),
        rows: CourseOutcome::all()
            .zip(matrix.rows())
            .map(|(co, values)| LabeledRow {
                label: co.label(),
                values: values.to_vec(),
            })
            .collect(),
        footer: LabeledRow {
            label: footer.row_label().to_string(),
            values: averages.to_vec(),
        },
    }
}

fn section(
    result: &AttainmentResult,
    kind: AttainmentKind,
    averages: &[f64; PO_COUNT],
    footer: FooterLabel,
) -> AttainmentSection {
    let co_series = CourseOutcome::all()
        .filter_map(|co| {
            result.co_value(co).map(|value| SeriesPoint {
                label: co.label(),
                value,
            })
        })
        .collect();
    let po_series: Vec<SeriesPoint> = OutcomeCode::all()
        .map(|code| SeriesPoint {
            label: code.label(),
            value: po_or_zero(Some(result), code),
        })
        .collect();
    let weighted_series = po_series
        .iter()
        .map(|point| SeriesPoint {
            label: point.label.clone(),
            value: point.value * kind.weight(),
        })
        .collect();
    AttainmentSection {
        kind,
        co_series,
        po_series,
        weighted_series,
        comparison: comparison(averages, Some(result)),
        comparison_label: footer.series_label().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copo_engine::{blend, column_averages};

    #[test]
    fn footer_defaults_to_average_without_results() {
        let matrix = MappingMatrix::zeroed();
        let averages = column_averages(&matrix);
        let blended = blend(None, None);
        let course = CourseInfo::default();
        let view = assemble(&ReportInputs {
            matrix: &matrix,
            averages: &averages,
            direct: None,
            indirect: None,
            blended: &blended,
            latest: None,
            course: &course,
        });
        assert_eq!(view.mapping.footer.label, "Average");
        assert_eq!(view.mapping.rows.len(), 6);
        assert!(view.combined.is_empty());
        assert!(view.direct.is_none());
    }

    #[test]
    fn direct_result_without_latest_uses_mapping_label() {
        let matrix = MappingMatrix::zeroed();
        let averages = column_averages(&matrix);
        let direct = AttainmentResult::new(AttainmentKind::Direct).with_po("PO2", 50.0);
        let blended = blend(Some(&direct), None);
        let course = CourseInfo::default();
        let view = assemble(&ReportInputs {
            matrix: &matrix,
            averages: &averages,
            direct: Some(&direct),
            indirect: None,
            blended: &blended,
            latest: None,
            course: &course,
        });
        assert_eq!(view.footer, FooterLabel::Mapping);
        let section = view.direct.expect("direct section");
        assert_eq!(section.comparison_label, "CO-PO-PSO Mapping");
        assert_eq!(section.po_series[1].value, 50.0);
        assert_eq!(section.weighted_series[1].value, 40.0);
        assert_eq!(view.combined.len(), PO_COUNT);
    }
}
