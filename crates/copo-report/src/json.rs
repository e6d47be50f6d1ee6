use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

use copo_model::ReportView;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    #[serde(flatten)]
    report: &'a ReportView,
}

/// Writes the rounded report as pretty-printed JSON.
pub fn write_json_report(output_path: &Path, view: &ReportView) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    let rounded = view.rounded();
    let document = JsonReport {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        report: &rounded,
    };
    let file = File::create(output_path)
        .with_context(|| format!("create {}", output_path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &document)
        .with_context(|| format!("write {}", output_path.display()))?;
    info!(path = %output_path.display(), "wrote JSON report");
    Ok(())
}
