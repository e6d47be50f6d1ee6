//! Course configuration loading.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use copo_model::{CourseInfo, CourseOutcome};

use crate::error::{IngestError, Result};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CourseFile {
    course: CourseSection,
    outcomes: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CourseSection {
    teacher: Option<String>,
    class: Option<String>,
    division: Option<String>,
    semester: Option<String>,
    subject: Option<String>,
    academic_year: Option<String>,
    department: Option<String>,
}

/// Loads a course TOML file with optional `[course]` and `[outcomes]` tables.
pub fn load_course_config(path: &Path) -> Result<CourseInfo> {
    let contents = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    parse_course_config(&contents).map_err(|source| IngestError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_course_config(contents: &str) -> std::result::Result<CourseInfo, toml::de::Error> {
    let file: CourseFile = toml::from_str(contents)?;
    let mut outcomes = BTreeMap::new();
    for (key, statement) in file.outcomes {
        match CourseOutcome::parse(&key) {
            Some(co) => {
                outcomes.insert(co, statement.trim().to_string());
            }
            None => warn!(key = %key, "ignoring unknown course outcome"),
        }
    }
    let section = file.course;
    Ok(CourseInfo {
        teacher: non_blank(section.teacher),
        class: non_blank(section.class),
        division: non_blank(section.division),
        semester: non_blank(section.semester),
        subject: non_blank(section.subject),
        academic_year: non_blank(section.academic_year),
        department: non_blank(section.department),
        outcomes,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
