//! Attainment results produced by the direct and indirect scoring services.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::codes::{CourseOutcome, OutcomeCode, lookup};
use crate::error::{ModelError, Result};

/// Which scoring channel produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttainmentKind {
    /// Test-based attainment computed from marks.
    Direct,
    /// Survey-based attainment.
    Indirect,
}

impl AttainmentKind {
    /// Share of the final PO/PSO attainment contributed by this kind.
    pub fn weight(self) -> f64 {
        match self {
            Self::Direct => 0.8,
            Self::Indirect => 0.2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Indirect => "indirect",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "direct" => Some(Self::Direct),
            "indirect" => Some(Self::Indirect),
            _ => None,
        }
    }
}

impl fmt::Display for AttainmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attainment figures of one kind. Treated as an immutable snapshot once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttainmentResult {
    #[serde(rename = "type")]
    pub kind: AttainmentKind,
    /// Per-CO attainment, iterated CO1..CO6.
    pub co_values: BTreeMap<CourseOutcome, f64>,
    /// Per-PO attainment keyed as the producer named it (`PO13` or `PSO1`).
    pub po_values: BTreeMap<String, f64>,
}

impl AttainmentResult {
    pub fn new(kind: AttainmentKind) -> Self {
        Self {
            kind,
            co_values: BTreeMap::new(),
            po_values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_co(mut self, co: CourseOutcome, value: f64) -> Self {
        self.co_values.insert(co, value);
        self
    }

    #[must_use]
    pub fn with_po(mut self, key: &str, value: f64) -> Self {
        self.po_values.insert(key.trim().to_ascii_uppercase(), value);
        self
    }

    pub fn co_value(&self, co: CourseOutcome) -> Option<f64> {
        self.co_values.get(&co).copied()
    }

    /// PO/PSO value for `code`, resolving the PO13..15 / PSO1..3 aliases.
    pub fn po_value(&self, code: OutcomeCode) -> Option<f64> {
        lookup(&self.po_values, code)
    }

    /// Builds a result from a collaborator payload received on the
    /// `requested` channel.
    ///
    /// A recognized `type` must agree with the channel. Payloads that omit
    /// it or declare an unrecognized one take the channel's kind. Unknown CO
    /// keys and null or non-finite values are dropped.
    pub fn from_payload(payload: AttainmentPayload, requested: AttainmentKind) -> Result<Self> {
        let declared = payload
            .kind
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());
        if let Some(declared) = declared {
            match AttainmentKind::parse(declared) {
                Some(found) if found != requested => {
                    return Err(ModelError::KindMismatch {
                        expected: requested,
                        found,
                    });
                }
                Some(_) => {}
                None => warn!(
                    declared,
                    channel = %requested,
                    "unrecognized attainment type, using the channel kind"
                ),
            }
        }

        let mut result = Self::new(requested);
        for (key, value) in payload.co_values {
            let (Some(co), Some(value)) = (CourseOutcome::parse(&key), value) else {
                continue;
            };
            if value.is_finite() {
                result.co_values.insert(co, value);
            }
        }
        for (key, value) in payload.po_values {
            let Some(value) = value.filter(|value| value.is_finite()) else {
                continue;
            };
            result.po_values.insert(key.trim().to_ascii_uppercase(), value);
        }
        Ok(result)
    }
}

/// Wire shape of a scoring service response:
/// `{ "co_values": {...}, "po_values": {...}, "type": "direct" }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttainmentPayload {
    #[serde(default, deserialize_with = "lenient_values")]
    pub co_values: BTreeMap<String, Option<f64>>,
    #[serde(default, deserialize_with = "lenient_values")]
    pub po_values: BTreeMap<String, Option<f64>>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl From<&AttainmentResult> for AttainmentPayload {
    fn from(result: &AttainmentResult) -> Self {
        Self {
            co_values: result
                .co_values
                .iter()
                .map(|(co, value)| (co.label(), Some(*value)))
                .collect(),
            po_values: result
                .po_values
                .iter()
                .map(|(key, value)| (key.clone(), Some(*value)))
                .collect(),
            kind: Some(result.kind.as_str().to_string()),
        }
    }
}

/// Accepts a value map, `null`, or a list. Services answer `[]` when they
/// could not derive any values; that reads as an empty map.
fn lenient_values<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Values {
        Map(BTreeMap<String, Option<f64>>),
        #[allow(dead_code)]
        List(IgnoredAny),
        Missing,
    }

    Ok(match Values::deserialize(deserializer)? {
        Values::Map(values) => values,
        Values::List(_) | Values::Missing => BTreeMap::new(),
    })
}
