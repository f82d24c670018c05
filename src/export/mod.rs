mod json_csv;
mod model;

pub use model::RecordExport;

use crate::errors::{AppError, AppResult};
use crate::models::JobCardRecord;
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for exports.
pub(crate) fn notify_export_success(label: &str, path: &Path, rows: usize) {
    success(format!("{label} export completed: {} ({rows} entries)", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Write `records` to `file`. An existing file is only replaced with `force`.
pub fn export_records(
    records: &[&JobCardRecord],
    format: ExportFormat,
    file: &str,
    force: bool,
) -> AppResult<usize> {
    let path = expand_tilde(file);
    if path.exists() && !force {
        return Err(AppError::Export(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let rows: Vec<RecordExport> = records.iter().map(|r| RecordExport::from(*r)).collect();
    match format {
        ExportFormat::Csv => json_csv::export_csv(&rows, &path)?,
        ExportFormat::Json => json_csv::export_json(&rows, &path)?,
    }
    tracing::info!(format = format.as_str(), rows = rows.len(), path = %path.display(), "export written");
    Ok(rows.len())
}
