//! `--set` cell edit arguments.

use std::fmt;
use std::str::FromStr;

use copo_model::{CO_COUNT, CourseOutcome, OutcomeCode, PO_COUNT};

/// One requested matrix edit. The value stays raw text so it goes through
/// the same coercion and range check as an interactive edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub row: usize,
    pub col: usize,
    pub raw: String,
}

impl CellEdit {
    pub fn cell_label(&self) -> String {
        let co = CourseOutcome::new(self.row).map_or_else(|| self.row.to_string(), |co| co.label());
        let code =
            OutcomeCode::new(self.col).map_or_else(|| self.col.to_string(), |code| code.label());
        format!("{co}:{code}")
    }
}

impl fmt::Display for CellEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.cell_label(), self.raw)
    }
}

impl FromStr for CellEdit {
    type Err = String;

    /// Accepts `CO2:PO5=2.5`, `CO1:PSO1=3`, or zero-based `1,4=2.5`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (cell, raw) = input
            .split_once('=')
            .ok_or_else(|| format!("expected CELL=VALUE, got `{input}`"))?;
        let (row, col) = if let Some((co, code)) = cell.split_once(':') {
            let row = CourseOutcome::parse(co)
                .ok_or_else(|| format!("unknown course outcome `{}`", co.trim()))?;
            let col = OutcomeCode::parse(code)
                .ok_or_else(|| format!("unknown outcome code `{}`", code.trim()))?;
            (row.index(), col.column())
        } else {
            let (row, col) = cell
                .split_once(',')
                .ok_or_else(|| format!("expected CO<n>:PO<n> or ROW,COL, got `{cell}`"))?;
            let row: usize = row
                .trim()
                .parse()
                .map_err(|_| format!("invalid row index `{}`", row.trim()))?;
            let col: usize = col
                .trim()
                .parse()
                .map_err(|_| format!("invalid column index `{}`", col.trim()))?;
            if row >= CO_COUNT || col >= PO_COUNT {
                return Err(format!(
                    "cell {row},{col} is outside the {CO_COUNT}x{PO_COUNT} matrix"
                ));
            }
            (row, col)
        };
        Ok(Self {
            row,
            col,
            raw: raw.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_and_indexed_cells() {
        let named: CellEdit = "CO2:PO5=2.5".parse().unwrap();
        assert_eq!((named.row, named.col, named.raw.as_str()), (1, 4, "2.5"));

        let pso: CellEdit = "co1:pso1=3".parse().unwrap();
        assert_eq!((pso.row, pso.col), (0, 12));

        let indexed: CellEdit = " 5, 14 = 1".parse().unwrap();
        assert_eq!((indexed.row, indexed.col, indexed.raw.as_str()), (5, 14, "1"));
        assert_eq!(indexed.to_string(), "CO6:PSO3=1");
    }

    #[test]
    fn rejects_malformed_cells() {
        assert!("CO2:PO5".parse::<CellEdit>().is_err());
        assert!("CO7:PO1=1".parse::<CellEdit>().is_err());
        assert!("CO1:PSO4=1".parse::<CellEdit>().is_err());
        assert!("6,0=1".parse::<CellEdit>().is_err());
        assert!("a,b=1".parse::<CellEdit>().is_err());
    }
}
