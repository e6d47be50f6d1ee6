//! State of one report session: the current matrix, the latest direct and
//! indirect results, and the message shown to the user.
//!
//! Every failure is recoverable. A failed step keeps the prior state and
//! records a message; it never clears data that was already shown.

use std::collections::BTreeMap;
use std::path::Path;

use copo_ingest::{IngestError, read_table};
use copo_model::{
    AttainmentKind, AttainmentResult, BlendedAttainment, FooterLabel, MappingMatrix, ModelError,
    OutcomeCode, PO_COUNT, Result as ModelResult,
};
use tracing::{info, info_span, warn};

use crate::aggregate::column_averages;
use crate::blend::{blend, direct80};
use crate::normalize::{RawCell, normalize, propose_edit};
use crate::scoring::{Scorer, ScoringError, ScoringRequest};

pub const PARSE_FAILED_MESSAGE: &str =
    "Failed to parse file. Please upload a valid Excel or CSV file with mapping values (0-3).";
pub const EDIT_REJECTED_MESSAGE: &str = "Please enter mapping values between 0-3";
pub const SCORING_FAILED_MESSAGE: &str = "Failed to process the data. Please try again.";

/// A scoring call that has been started but not yet settled.
///
/// Holds a snapshot of the matrix and direct context taken when the call
/// began, so the request matches the state the user submitted.
#[derive(Debug)]
pub struct PendingCalculation {
    kind: AttainmentKind,
    matrix: MappingMatrix,
    direct80: Option<BTreeMap<OutcomeCode, f64>>,
}

impl PendingCalculation {
    pub fn kind(&self) -> AttainmentKind {
        self.kind
    }

    pub fn request<'a>(&'a self, input: &'a Path) -> ScoringRequest<'a> {
        ScoringRequest {
            kind: self.kind,
            matrix: &self.matrix,
            input,
            direct80: self.direct80.as_ref(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ReportSession {
    matrix: MappingMatrix,
    direct: Option<AttainmentResult>,
    indirect: Option<AttainmentResult>,
    latest: Option<AttainmentKind>,
    message: Option<String>,
    in_flight: Option<AttainmentKind>,
}

impl ReportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matrix(&self) -> &MappingMatrix {
        &self.matrix
    }

    pub fn direct(&self) -> Option<&AttainmentResult> {
        self.direct.as_ref()
    }

    pub fn indirect(&self) -> Option<&AttainmentResult> {
        self.indirect.as_ref()
    }

    pub fn result(&self, kind: AttainmentKind) -> Option<&AttainmentResult> {
        match kind {
            AttainmentKind::Direct => self.direct(),
            AttainmentKind::Indirect => self.indirect(),
        }
    }

    /// Kind of the most recently stored result.
    pub fn latest(&self) -> Option<AttainmentKind> {
        self.latest
    }

    pub fn latest_result(&self) -> Option<&AttainmentResult> {
        self.latest.and_then(|kind| self.result(kind))
    }

    pub fn footer(&self) -> FooterLabel {
        FooterLabel::for_latest(self.latest)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_calculating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Replaces the matrix with the normalized form of `rows`.
    pub fn load_matrix<R, C>(&mut self, rows: &[R]) -> &MappingMatrix
    where
        R: AsRef<[C]>,
        C: RawCell,
    {
        self.matrix = normalize(rows);
        self.message = None;
        &self.matrix
    }

    /// Reads and normalizes a mapping table. On failure the previous matrix
    /// stays in place and the parse message is set.
    pub fn load_matrix_file(&mut self, path: &Path) -> Result<&MappingMatrix, IngestError> {
        let _span = info_span!("load_matrix", path = %path.display()).entered();
        match read_table(path) {
            Ok(table) => {
                info!(rows = table.rows.len(), "loaded mapping table");
                Ok(self.load_matrix(&table.rows))
            }
            Err(error) => {
                warn!(%error, "keeping previous mapping matrix");
                self.message = Some(PARSE_FAILED_MESSAGE.to_string());
                Err(error)
            }
        }
    }

    /// Applies one cell edit after validating it against `[0, 3]`.
    pub fn edit_cell<C: RawCell + ?Sized>(
        &mut self,
        row: usize,
        col: usize,
        raw: &C,
    ) -> ModelResult<()> {
        match propose_edit(&self.matrix, row, col, raw) {
            Ok(matrix) => {
                self.matrix = matrix;
                self.message = None;
                Ok(())
            }
            Err(error) => {
                warn!(row, col, %error, "rejected mapping edit");
                self.message = Some(EDIT_REJECTED_MESSAGE.to_string());
                Err(error)
            }
        }
    }

    pub fn column_averages(&self) -> [f64; PO_COUNT] {
        column_averages(&self.matrix)
    }

    pub fn blended(&self) -> BlendedAttainment {
        blend(self.direct(), self.indirect())
    }

    /// Starts a scoring call. Fails with [`ScoringError::Busy`] while another
    /// call is unsettled; session state is left untouched in that case.
    pub fn begin_calculation(
        &mut self,
        kind: AttainmentKind,
    ) -> Result<PendingCalculation, ScoringError> {
        if let Some(running) = self.in_flight {
            return Err(ScoringError::Busy(running));
        }
        self.in_flight = Some(kind);
        let direct80 = (kind == AttainmentKind::Indirect).then(|| direct80(self.direct()));
        Ok(PendingCalculation {
            kind,
            matrix: self.matrix.clone(),
            direct80,
        })
    }

    /// Settles a scoring call. A result replaces the stored snapshot of its
    /// kind wholesale; a failure keeps every prior snapshot.
    pub fn finish_calculation(
        &mut self,
        pending: PendingCalculation,
        outcome: Result<AttainmentResult, ScoringError>,
    ) -> Result<(), ScoringError> {
        self.in_flight = None;
        let outcome = outcome.and_then(|result| {
            if result.kind == pending.kind {
                Ok(result)
            } else {
                Err(ScoringError::Model(ModelError::KindMismatch {
                    expected: pending.kind,
                    found: result.kind,
                }))
            }
        });
        match outcome {
            Ok(result) => {
                info!(
                    kind = %pending.kind,
                    co = result.co_values.len(),
                    po = result.po_values.len(),
                    "stored attainment"
                );
                match pending.kind {
                    AttainmentKind::Direct => self.direct = Some(result),
                    AttainmentKind::Indirect => self.indirect = Some(result),
                }
                self.latest = Some(pending.kind);
                self.message = None;
                Ok(())
            }
            Err(error) => {
                warn!(kind = %pending.kind, %error, "scoring failed, keeping previous results");
                self.message = Some(SCORING_FAILED_MESSAGE.to_string());
                Err(error)
            }
        }
    }

    /// Runs one blocking scoring call against `scorer`.
    pub fn calculate<S: Scorer + ?Sized>(
        &mut self,
        kind: AttainmentKind,
        scorer: &S,
        input: &Path,
    ) -> Result<(), ScoringError> {
        let _span = info_span!("calculate", %kind, input = %input.display()).entered();
        let pending = self.begin_calculation(kind)?;
        let outcome = scorer.score(&pending.request(input));
        self.finish_calculation(pending, outcome)
    }
}
