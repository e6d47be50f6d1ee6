//! Course outcome (CO) and program outcome (PO/PSO) identifiers.
//!
//! The mapping matrix has 15 outcome columns. The first twelve are program
//! outcomes PO1..PO12; the trailing three are program-specific outcomes that
//! scoring services report either as PO13..PO15 or as PSO1..PSO3. Both names
//! refer to the same column, and every lookup goes through [`lookup`] so the
//! two spellings never drift apart.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Number of course outcomes (matrix rows).
pub const CO_COUNT: usize = 6;

/// Number of outcome columns, PSOs included.
pub const PO_COUNT: usize = 15;

/// Number of plain program outcomes before the PSO columns start.
pub const PROGRAM_OUTCOME_COUNT: usize = 12;

/// A course outcome, CO1..CO6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CourseOutcome(usize);

impl CourseOutcome {
    /// Builds a course outcome from a zero-based row index.
    pub fn new(index: usize) -> Option<Self> {
        (index < CO_COUNT).then_some(Self(index))
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..CO_COUNT).map(Self)
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn label(self) -> String {
        format!("CO{}", self.0 + 1)
    }

    /// Parses `CO1`..`CO6`, ignoring case and surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_ascii_uppercase();
        let number = upper.strip_prefix("CO")?.parse::<usize>().ok()?;
        number.checked_sub(1).and_then(Self::new)
    }
}

impl fmt::Display for CourseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CO{}", self.0 + 1)
    }
}

impl From<CourseOutcome> for String {
    fn from(value: CourseOutcome) -> Self {
        value.label()
    }
}

impl TryFrom<String> for CourseOutcome {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(ModelError::UnknownCode(value))
    }
}

/// A program outcome column, PO1..PO12 followed by PSO1..PSO3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct OutcomeCode(usize);

impl OutcomeCode {
    /// Builds an outcome code from a zero-based matrix column.
    pub fn new(column: usize) -> Option<Self> {
        (column < PO_COUNT).then_some(Self(column))
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..PO_COUNT).map(Self)
    }

    pub fn column(self) -> usize {
        self.0
    }

    pub fn is_pso(self) -> bool {
        self.0 >= PROGRAM_OUTCOME_COUNT
    }

    /// Display label: `PO1`..`PO12`, then `PSO1`..`PSO3`.
    pub fn label(self) -> String {
        match self.pso_number() {
            Some(number) => format!("PSO{number}"),
            None => format!("PO{}", self.0 + 1),
        }
    }

    /// Column key as the matrix numbers it: `PO1`..`PO15`.
    pub fn po_key(self) -> String {
        format!("PO{}", self.0 + 1)
    }

    /// `PSO1`..`PSO3` for the trailing columns, `None` otherwise.
    pub fn pso_key(self) -> Option<String> {
        self.pso_number().map(|number| format!("PSO{number}"))
    }

    fn pso_number(self) -> Option<usize> {
        self.is_pso().then(|| self.0 - PROGRAM_OUTCOME_COUNT + 1)
    }

    /// Parses either naming: `PO1`..`PO15` or `PSO1`..`PSO3`.
    ///
    /// `parse("PSO1")` and `parse("PO13")` yield the same code.
    pub fn parse(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_ascii_uppercase();
        if let Some(rest) = upper.strip_prefix("PSO") {
            let number = rest.parse::<usize>().ok()?;
            if number == 0 || number > PO_COUNT - PROGRAM_OUTCOME_COUNT {
                return None;
            }
            return Some(Self(PROGRAM_OUTCOME_COUNT + number - 1));
        }
        let number = upper.strip_prefix("PO")?.parse::<usize>().ok()?;
        number.checked_sub(1).and_then(Self::new)
    }
}

impl fmt::Display for OutcomeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<OutcomeCode> for String {
    fn from(value: OutcomeCode) -> Self {
        value.label()
    }
}

impl TryFrom<String> for OutcomeCode {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(ModelError::UnknownCode(value))
    }
}

/// Resolves a raw key from a scoring payload to its outcome column.
pub fn resolve_code(key: &str) -> Option<OutcomeCode> {
    OutcomeCode::parse(key)
}

/// Finds the value recorded for `code`, accepting either naming.
///
/// The `POn` key is tried first, then the `PSOk` alias. Any finite value,
/// zero included, counts as present.
pub fn lookup(values: &BTreeMap<String, f64>, code: OutcomeCode) -> Option<f64> {
    std::iter::once(code.po_key())
        .chain(code.pso_key())
        .find_map(|key| values.get(&key).copied().filter(|value| value.is_finite()))
}
