//! Report assembly and rendering.

pub mod assemble;
pub mod csv_export;
pub mod html;
pub mod json;

pub use assemble::{ReportInputs, assemble, session_report};
pub use csv_export::{combined_csv, write_combined_csv};
pub use html::{render_html, write_html_report};
pub use json::write_json_report;
