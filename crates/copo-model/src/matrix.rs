//! The CO x PO/PSO mapping matrix.

use serde::{Deserialize, Serialize};

use crate::codes::{CO_COUNT, CourseOutcome, OutcomeCode, PO_COUNT};
use crate::error::{ModelError, Result};

/// Lowest accepted mapping weight.
pub const MIN_WEIGHT: f64 = 0.0;

/// Highest accepted mapping weight.
pub const MAX_WEIGHT: f64 = 3.0;

/// Returns true when `value` is a finite weight in `[0, 3]`.
pub fn is_valid_weight(value: f64) -> bool {
    value.is_finite() && (MIN_WEIGHT..=MAX_WEIGHT).contains(&value)
}

/// Forces a raw number into `[0, 3]`: non-finite or negative values become 0
/// and values above 3 become 3.
pub fn clamp_weight(value: f64) -> f64 {
    if !value.is_finite() || value < MIN_WEIGHT {
        MIN_WEIGHT
    } else {
        value.min(MAX_WEIGHT)
    }
}

/// Six course-outcome rows by fifteen outcome columns, every cell in `[0, 3]`.
///
/// The shape and range are enforced on every constructor, so a value of this
/// type is always a valid matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct MappingMatrix {
    cells: [[f64; PO_COUNT]; CO_COUNT],
}

impl Default for MappingMatrix {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl MappingMatrix {
    pub fn zeroed() -> Self {
        Self {
            cells: [[0.0; PO_COUNT]; CO_COUNT],
        }
    }

    /// Builds a matrix from fixed-size rows, rejecting out-of-range cells.
    pub fn from_cells(cells: [[f64; PO_COUNT]; CO_COUNT]) -> Result<Self> {
        for (row, values) in cells.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                if !is_valid_weight(*value) {
                    return Err(ModelError::CellOutOfRange {
                        row,
                        col,
                        value: *value,
                    });
                }
            }
        }
        Ok(Self { cells })
    }

    /// Builds a matrix, passing every cell through [`clamp_weight`].
    pub fn from_cells_clamped(mut cells: [[f64; PO_COUNT]; CO_COUNT]) -> Self {
        for value in cells.iter_mut().flatten() {
            *value = clamp_weight(*value);
        }
        Self { cells }
    }

    pub fn rows(&self) -> &[[f64; PO_COUNT]; CO_COUNT] {
        &self.cells
    }

    pub fn row_count(&self) -> usize {
        CO_COUNT
    }

    pub fn column_count(&self) -> usize {
        PO_COUNT
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row).and_then(|values| values.get(col)).copied()
    }

    pub fn weight(&self, co: CourseOutcome, code: OutcomeCode) -> f64 {
        self.cells[co.index()][code.column()]
    }

    /// Iterates the six weights of one column, top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        self.cells
            .iter()
            .filter_map(move |values| values.get(col).copied())
    }

    /// Returns a copy with one cell replaced, or an error when the value or
    /// coordinates are invalid. `self` is never modified.
    pub fn with_cell(&self, row: usize, col: usize, value: f64) -> Result<Self> {
        if row >= CO_COUNT || col >= PO_COUNT {
            return Err(ModelError::IndexOutOfBounds { row, col });
        }
        if !is_valid_weight(value) {
            return Err(ModelError::CellOutOfRange { row, col, value });
        }
        let mut next = self.clone();
        next.cells[row][col] = value;
        Ok(next)
    }
}

impl TryFrom<Vec<Vec<f64>>> for MappingMatrix {
    type Error = ModelError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        if rows.len() != CO_COUNT {
            return Err(ModelError::Shape {
                message: format!("expected {CO_COUNT} rows, got {}", rows.len()),
            });
        }
        let mut cells = [[0.0; PO_COUNT]; CO_COUNT];
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != PO_COUNT {
                return Err(ModelError::Shape {
                    message: format!(
                        "row {row} has {} columns, expected {PO_COUNT}",
                        values.len()
                    ),
                });
            }
            cells[row].copy_from_slice(&values);
        }
        Self::from_cells(cells)
    }
}

impl From<MappingMatrix> for Vec<Vec<f64>> {
    fn from(matrix: MappingMatrix) -> Self {
        matrix.cells.iter().map(|row| row.to_vec()).collect()
    }
}
