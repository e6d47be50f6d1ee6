//! Display-ready report structures.
//!
//! Values are kept at full precision; [`ReportView::rounded`] applies the
//! two-decimal presentation rounding right before rendering.

use serde::{Deserialize, Serialize};

use crate::attainment::AttainmentKind;
use crate::blend::{BlendedValue, ComparisonPoint};
use crate::course::CourseInfo;

/// Rounds to two decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Label of the synthetic row under the six CO mapping rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FooterLabel {
    /// No attainment computed yet.
    #[serde(rename = "Average")]
    Average,
    /// Latest result is direct attainment.
    #[serde(rename = "CO-PO-PSO Mapping")]
    Mapping,
    /// Latest result is indirect attainment.
    #[serde(rename = "Indirect Attainment")]
    IndirectAttainment,
}

impl FooterLabel {
    /// Picks the label from the kind of the most recent attainment result.
    pub fn for_latest(latest: Option<AttainmentKind>) -> Self {
        match latest {
            None => Self::Average,
            Some(AttainmentKind::Direct) => Self::Mapping,
            Some(AttainmentKind::Indirect) => Self::IndirectAttainment,
        }
    }

    pub fn row_label(self) -> &'static str {
        match self {
            Self::Average => "Average",
            Self::Mapping => "CO-PO-PSO Mapping",
            Self::IndirectAttainment => "Indirect Attainment",
        }
    }

    /// Name of the mapping series in the mapping-vs-attainment comparison.
    pub fn series_label(self) -> &'static str {
        match self {
            Self::Average => "Average Mapping Value",
            Self::Mapping => "CO-PO-PSO Mapping",
            Self::IndirectAttainment => "Indirect Attainment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledRow {
    pub label: String,
    pub values: Vec<f64>,
}

/// The six CO rows plus the footer row of column averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingTable {
    pub columns: Vec<String>,
    pub rows: Vec<LabeledRow>,
    pub footer: LabeledRow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// Charts and tables derived from one attainment result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttainmentSection {
    #[serde(rename = "type")]
    pub kind: AttainmentKind,
    /// CO1..CO6 attainment; COs the producer did not report are omitted.
    pub co_series: Vec<SeriesPoint>,
    /// PO1..PO12, PSO1..PSO3; absent values read as 0.
    pub po_series: Vec<SeriesPoint>,
    /// PO series scaled by the kind's weight (x0.8 direct, x0.2 indirect).
    pub weighted_series: Vec<SeriesPoint>,
    /// Column mapping averages next to the PO series.
    pub comparison: Vec<ComparisonPoint>,
    pub comparison_label: String,
}

/// A file that fed the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub role: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportView {
    pub course: CourseInfo,
    pub footer: FooterLabel,
    pub mapping: MappingTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct: Option<AttainmentSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indirect: Option<AttainmentSection>,
    /// 80/20 blend; empty until some attainment exists.
    pub combined: Vec<BlendedValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceFile>,
}

impl ReportView {
    /// Copy with every number rounded to two decimals.
    #[must_use]
    pub fn rounded(&self) -> Self {
        let mut view = self.clone();
        round_row(&mut view.mapping.footer);
        for row in &mut view.mapping.rows {
            round_row(row);
        }
        for section in [&mut view.direct, &mut view.indirect]
            .into_iter()
            .flatten()
        {
            round_section(section);
        }
        for value in &mut view.combined {
            value.direct80 = round2(value.direct80);
            value.indirect20 = round2(value.indirect20);
            value.final_value = round2(value.final_value);
        }
        view
    }
}

fn round_row(row: &mut LabeledRow) {
    for value in &mut row.values {
        *value = round2(*value);
    }
}

fn round_section(section: &mut AttainmentSection) {
    for point in section
        .co_series
        .iter_mut()
        .chain(section.po_series.iter_mut())
        .chain(section.weighted_series.iter_mut())
    {
        point.value = round2(point.value);
    }
    for point in &mut section.comparison {
        point.mapping = round2(point.mapping);
        point.attainment = round2(point.attainment);
    }
}
