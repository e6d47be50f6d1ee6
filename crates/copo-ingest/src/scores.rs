//! Per-CO score tables: one column per course outcome, one row per student
//! or survey response.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use copo_model::CourseOutcome;

use crate::error::{IngestError, Result};
use crate::table::{RawTable, read_table};

/// Column means of the `CO1`..`CO6` columns found in a score table.
#[derive(Debug, Clone, PartialEq)]
pub struct CoScores {
    pub path: PathBuf,
    pub means: BTreeMap<CourseOutcome, f64>,
    /// Number of data rows below the header.
    pub responses: usize,
}

impl CoScores {
    pub fn missing(&self) -> Vec<CourseOutcome> {
        CourseOutcome::all()
            .filter(|co| !self.means.contains_key(co))
            .collect()
    }

    /// Fails unless all six CO columns were present.
    pub fn require_all(&self) -> Result<()> {
        let missing = self.missing();
        if missing.is_empty() {
            return Ok(());
        }
        Err(IngestError::MissingColumns {
            path: self.path.clone(),
            missing: missing.into_iter().map(CourseOutcome::label).collect(),
            expected: CourseOutcome::all().map(CourseOutcome::label).collect(),
        })
    }
}

/// Reads a score table and averages each CO column.
pub fn read_co_scores(path: &Path) -> Result<CoScores> {
    let table = read_table(path)?;
    co_scores_from_table(&table, path)
}

/// The first row is the header. Non-numeric cells are skipped; a CO column
/// without any numeric cell averages to 0. Fails when no CO column exists.
pub fn co_scores_from_table(table: &RawTable, path: &Path) -> Result<CoScores> {
    let missing_all = || IngestError::MissingColumns {
        path: path.to_path_buf(),
        missing: CourseOutcome::all().map(CourseOutcome::label).collect(),
        expected: CourseOutcome::all().map(CourseOutcome::label).collect(),
    };
    let Some((header, rows)) = table.rows.split_first() else {
        return Err(missing_all());
    };

    let mut columns: BTreeMap<CourseOutcome, usize> = BTreeMap::new();
    for (index, name) in header.iter().enumerate() {
        if let Some(co) = CourseOutcome::parse(name) {
            if columns.contains_key(&co) {
                warn!(path = %path.display(), column = %name, "duplicate CO column ignored");
                continue;
            }
            columns.insert(co, index);
        }
    }
    if columns.is_empty() {
        return Err(missing_all());
    }

    let mut means = BTreeMap::new();
    for (co, index) in columns {
        let values: Vec<f64> = rows
            .iter()
            .filter_map(|row| row.get(index))
            .filter_map(|cell| cell.parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .collect();
        let mean = if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        };
        means.insert(co, mean);
    }
    debug!(
        path = %path.display(),
        columns = means.len(),
        responses = rows.len(),
        "averaged CO columns"
    );
    Ok(CoScores {
        path: path.to_path_buf(),
        means,
        responses: rows.len(),
    })
}
