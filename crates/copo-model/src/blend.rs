use serde::{Deserialize, Serialize};

use crate::codes::OutcomeCode;

/// 80% direct + 20% indirect attainment for one PO/PSO code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendedValue {
    pub code: OutcomeCode,
    pub direct80: f64,
    pub indirect20: f64,
    #[serde(rename = "final")]
    pub final_value: f64,
}

/// Blended attainment over PO1..PO12, PSO1..PSO3 in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlendedAttainment {
    pub values: Vec<BlendedValue>,
}

impl BlendedAttainment {
    pub fn get(&self, code: OutcomeCode) -> Option<&BlendedValue> {
        self.values.iter().find(|value| value.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlendedValue> {
        self.values.iter()
    }
}

/// Declared mapping strength of a column next to its measured attainment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPoint {
    pub code: OutcomeCode,
    pub mapping: f64,
    pub attainment: f64,
}
