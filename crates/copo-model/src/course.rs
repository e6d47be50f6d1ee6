//! Course details printed in the report header.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::codes::CourseOutcome;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseInfo {
    pub teacher: Option<String>,
    /// Year of study, e.g. `SE`, `TE`, `BE`.
    pub class: Option<String>,
    pub division: Option<String>,
    pub semester: Option<String>,
    pub subject: Option<String>,
    pub academic_year: Option<String>,
    pub department: Option<String>,
    /// Plain-text course outcome statements.
    pub outcomes: BTreeMap<CourseOutcome, String>,
}

impl CourseInfo {
    pub fn outcome_statement(&self, co: CourseOutcome) -> Option<&str> {
        self.outcomes.get(&co).map(String::as_str)
    }

    /// Labelled header fields that are set, in print order.
    pub fn header_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("Department", &self.department),
            ("Teacher", &self.teacher),
            ("Class", &self.class),
            ("Division", &self.division),
            ("Semester", &self.semester),
            ("Subject", &self.subject),
            ("Academic Year", &self.academic_year),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|value| (label, value)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.header_fields().is_empty() && self.outcomes.is_empty()
    }
}
