//! Coercion of uploaded tables into a [`MappingMatrix`].

use copo_model::{CO_COUNT, MappingMatrix, PO_COUNT, Result, clamp_weight};
use tracing::debug;

/// A cell of an uploaded table before validation.
pub trait RawCell {
    /// The cell's number, or `None` when it holds no parseable number.
    /// NaN never counts as a number.
    fn number(&self) -> Option<f64>;

    fn is_blank(&self) -> bool;

    /// Non-blank cells without a number mark a header row.
    fn is_text(&self) -> bool {
        !self.is_blank() && self.number().is_none()
    }
}

impl RawCell for str {
    // "inf" and "infinity" parse as numbers, so they never mark a header on
    // their own; coercion turns them into 0.
    fn number(&self) -> Option<f64> {
        self.trim()
            .parse::<f64>()
            .ok()
            .filter(|value| !value.is_nan())
    }

    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl RawCell for String {
    fn number(&self) -> Option<f64> {
        self.as_str().number()
    }

    fn is_blank(&self) -> bool {
        self.as_str().is_blank()
    }
}

impl RawCell for &str {
    fn number(&self) -> Option<f64> {
        (**self).number()
    }

    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl RawCell for f64 {
    fn number(&self) -> Option<f64> {
        (!self.is_nan()).then_some(*self)
    }

    fn is_blank(&self) -> bool {
        false
    }

    fn is_text(&self) -> bool {
        false
    }
}

impl RawCell for Option<f64> {
    fn number(&self) -> Option<f64> {
        self.and_then(|value| value.number())
    }

    fn is_blank(&self) -> bool {
        self.is_none()
    }

    fn is_text(&self) -> bool {
        false
    }
}

/// Shapes any table into a 6x15 matrix of weights in `[0, 3]`.
///
/// A first row holding any text cell is a header and is skipped. The next
/// six rows supply CO1..CO6; each contributes its first fifteen cells.
/// Unparseable, non-finite and negative cells read as 0, values above 3 are
/// clamped to 3 and missing cells or rows are zero-filled. Never fails.
pub fn normalize<R, C>(rows: &[R]) -> MappingMatrix
where
    R: AsRef<[C]>,
    C: RawCell,
{
    let skip = usize::from(has_header(rows));
    if skip == 1 {
        debug!("skipping header row");
    }
    let mut cells = [[0.0; PO_COUNT]; CO_COUNT];
    for (target, row) in cells.iter_mut().zip(rows.iter().skip(skip)) {
        for (cell, raw) in target.iter_mut().zip(row.as_ref()) {
            *cell = coerce_weight(raw);
        }
    }
    MappingMatrix::from_cells_clamped(cells)
}

fn has_header<R, C>(rows: &[R]) -> bool
where
    R: AsRef<[C]>,
    C: RawCell,
{
    rows.first()
        .is_some_and(|row| row.as_ref().iter().any(RawCell::is_text))
}

/// Upload coercion for one cell: anything without a usable number is 0.
pub fn coerce_weight<C: RawCell + ?Sized>(raw: &C) -> f64 {
    raw.number().map_or(0.0, clamp_weight)
}

/// Edit coercion: text without a number reads as 0; numbers are kept as-is
/// so that out-of-range input can be rejected instead of clamped.
pub fn coerce_edit<C: RawCell + ?Sized>(raw: &C) -> f64 {
    raw.number().unwrap_or(0.0)
}

/// Validates one proposed edit against `[0, 3]`.
///
/// Returns the updated matrix, or the rejection. `matrix` itself is never
/// modified, so a rejected edit leaves the caller's matrix as it was.
pub fn propose_edit<C: RawCell + ?Sized>(
    matrix: &MappingMatrix,
    row: usize,
    col: usize,
    raw: &C,
) -> Result<MappingMatrix> {
    matrix.with_cell(row, col, coerce_edit(raw))
}
