//! External scoring collaborators.
//!
//! A scorer receives the current mapping matrix and one input file (marks
//! for direct attainment, survey responses for indirect) and answers with an
//! [`AttainmentResult`] of the requested kind.

use std::collections::BTreeMap;
use std::path::Path;

use copo_ingest::{IngestError, read_attainment_payload, read_co_scores};
use copo_model::{AttainmentKind, AttainmentResult, MappingMatrix, ModelError, OutcomeCode};
use thiserror::Error;
use tracing::{debug, info};

use crate::derive::derive_po_values;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("a {0} calculation is already in progress")]
    Busy(AttainmentKind),
    #[error("scorer failed: {message}")]
    Failed { message: String },
}

/// One scoring call.
#[derive(Debug, Clone, Copy)]
pub struct ScoringRequest<'a> {
    pub kind: AttainmentKind,
    pub matrix: &'a MappingMatrix,
    pub input: &'a Path,
    /// Direct share (x0.8) per code, supplied with indirect requests.
    pub direct80: Option<&'a BTreeMap<OutcomeCode, f64>>,
}

pub trait Scorer {
    fn score(&self, request: &ScoringRequest<'_>) -> Result<AttainmentResult, ScoringError>;
}

/// Reads a precomputed collaborator response from a JSON file.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadScorer;

impl Scorer for PayloadScorer {
    fn score(&self, request: &ScoringRequest<'_>) -> Result<AttainmentResult, ScoringError> {
        let payload = read_attainment_payload(request.input)?;
        let result = AttainmentResult::from_payload(payload, request.kind)?;
        debug!(
            kind = %request.kind,
            co = result.co_values.len(),
            po = result.po_values.len(),
            "read attainment payload"
        );
        Ok(result)
    }
}

/// Averages per-CO score columns and derives PO values from the matrix.
///
/// Direct requests accept any subset of the CO columns; indirect (survey)
/// requests need all six.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoAverageScorer;

impl Scorer for CoAverageScorer {
    fn score(&self, request: &ScoringRequest<'_>) -> Result<AttainmentResult, ScoringError> {
        let scores = read_co_scores(request.input)?;
        if request.kind == AttainmentKind::Indirect {
            scores.require_all()?;
        }
        let po_values = derive_po_values(request.matrix, &scores.means);
        info!(
            kind = %request.kind,
            path = %request.input.display(),
            responses = scores.responses,
            "averaged CO scores"
        );
        Ok(AttainmentResult {
            kind: request.kind,
            co_values: scores.means,
            po_values,
        })
    }
}

/// Which scorer handles an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScorerKind {
    /// `.json` files are payloads, anything else a CO score table.
    #[default]
    Auto,
    Payload,
    CoAverage,
}

impl ScorerKind {
    pub fn resolve(self, input: &Path) -> Self {
        match self {
            Self::Auto => {
                let is_json = input
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
                if is_json {
                    Self::Payload
                } else {
                    Self::CoAverage
                }
            }
            other => other,
        }
    }
}

impl Scorer for ScorerKind {
    fn score(&self, request: &ScoringRequest<'_>) -> Result<AttainmentResult, ScoringError> {
        match self.resolve(request.input) {
            Self::Payload => PayloadScorer.score(request),
            _ => CoAverageScorer.score(request),
        }
    }
}
