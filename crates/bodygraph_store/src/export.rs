//! JSON export of saved charts.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::StoreError;
use crate::store::SavedChart;

/// Pretty-printed JSON for one saved chart.
pub fn export_json(chart: &SavedChart) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(chart)?)
}

/// `hd-chart-{name}-{unix millis}.json`, with `export` standing in for a
/// missing name. Characters unsafe in file names become `-`.
pub fn export_file_name(name: Option<&str>, at: DateTime<Utc>) -> String {
    let name = name.map(str::trim).filter(|n| !n.is_empty()).unwrap_or("export");
    let safe: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    format!("hd-chart-{safe}-{}.json", at.timestamp_millis())
}

/// Write `chart` into `dir` under its export file name.
pub fn export_to_dir(dir: &Path, chart: &SavedChart) -> Result<PathBuf, StoreError> {
    let file = dir.join(export_file_name(chart.birth.name.as_deref(), Utc::now()));
    fs::create_dir_all(dir)?;
    fs::write(&file, export_json(chart)?)?;
    info!(id = %chart.id, path = %file.display(), "chart exported");
    Ok(file)
}
