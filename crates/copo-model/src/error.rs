use thiserror::Error;

use crate::attainment::AttainmentKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("mapping value {value} at row {row}, column {col} is outside the range 0-3")]
    CellOutOfRange { row: usize, col: usize, value: f64 },
    #[error("cell ({row}, {col}) is outside the 6x15 mapping matrix")]
    IndexOutOfBounds { row: usize, col: usize },
    #[error("invalid matrix shape: {message}")]
    Shape { message: String },
    #[error("unknown outcome code: {0}")]
    UnknownCode(String),
    #[error("expected {expected} attainment, payload declares {found}")]
    KindMismatch {
        expected: AttainmentKind,
        found: AttainmentKind,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
