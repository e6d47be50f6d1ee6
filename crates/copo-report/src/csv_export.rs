//! Combined 80/20 table as CSV for spreadsheet use.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use copo_model::{BlendedValue, round2};

const HEADER: [&str; 4] = ["code", "direct80", "indirect20", "final"];

fn record(value: &BlendedValue) -> [String; 4] {
    [
        value.code.label(),
        format!("{:.2}", round2(value.direct80)),
        format!("{:.2}", round2(value.indirect20)),
        format!("{:.2}", round2(value.final_value)),
    ]
}

/// Renders the combined series, one row per PO/PSO code.
pub fn combined_csv(values: &[BlendedValue]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for value in values {
        writer.write_record(record(value))?;
    }
    let bytes = writer.into_inner().context("flush CSV buffer")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

pub fn write_combined_csv(output_path: &Path, values: &[BlendedValue]) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("create {}", output_path.display()))?;
    writer.write_record(HEADER)?;
    for value in values {
        writer.write_record(record(value))?;
    }
    writer
        .flush()
        .with_context(|| format!("write {}", output_path.display()))?;
    info!(path = %output_path.display(), rows = values.len(), "wrote combined CSV");
    Ok(())
}
