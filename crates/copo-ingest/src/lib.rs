//! Reading mapping tables, score tables, course configs and scoring payloads.

pub mod course;
pub mod error;
pub mod hash;
pub mod payload;
pub mod scores;
pub mod table;

pub use course::{load_course_config, parse_course_config};
pub use error::{IngestError, Result};
pub use hash::{fingerprint, sha256_hex};
pub use payload::read_attainment_payload;
pub use scores::{CoScores, co_scores_from_table, read_co_scores};
pub use table::{RawTable, TableFormat, read_table, read_table_from_reader};
