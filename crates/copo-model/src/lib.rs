//! Data model for CO-PO-PSO outcome attainment.

pub mod attainment;
pub mod blend;
pub mod codes;
pub mod course;
pub mod error;
pub mod matrix;
pub mod report;

pub use attainment::{AttainmentKind, AttainmentPayload, AttainmentResult};
pub use blend::{BlendedAttainment, BlendedValue, ComparisonPoint};
pub use codes::{
    CO_COUNT, CourseOutcome, OutcomeCode, PO_COUNT, PROGRAM_OUTCOME_COUNT, lookup, resolve_code,
};
pub use course::CourseInfo;
pub use error::{ModelError, Result};
pub use matrix::{MAX_WEIGHT, MIN_WEIGHT, MappingMatrix, clamp_weight, is_valid_weight};
pub use report::{
    AttainmentSection, FooterLabel, LabeledRow, MappingTable, ReportView, SeriesPoint,
    SourceFile, round2,
};
