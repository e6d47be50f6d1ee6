//! Attainment engine: matrix normalization, column averages, PO derivation,
//! 80/20 blending and the report session that threads them together.

pub mod aggregate;
pub mod blend;
pub mod derive;
pub mod normalize;
pub mod scoring;
pub mod session;

pub use aggregate::{column_averages, column_means};
pub use blend::{blend, comparison, direct80, po_or_zero};
pub use derive::derive_po_values;
pub use normalize::{RawCell, coerce_edit, coerce_weight, normalize, propose_edit};
pub use scoring::{
    CoAverageScorer, PayloadScorer, Scorer, ScorerKind, ScoringError, ScoringRequest,
};
pub use session::{
    EDIT_REJECTED_MESSAGE, PARSE_FAILED_MESSAGE, PendingCalculation, ReportSession,
    SCORING_FAILED_MESSAGE,
};
