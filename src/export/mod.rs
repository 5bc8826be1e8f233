// src/export/mod.rs

mod excel_date;
pub mod model;
mod xlsx;

pub use model::{ReportRow, TimeCell, rows_for};

use crate::errors::AppResult;
use crate::models::Intervention;
use crate::store::HistoryStore;
use crate::store::archive::write_atomic;
use crate::ui::messages::success;
use chrono::TimeZone;
use std::path::{Path, PathBuf};

/// Helper comune per messaggi di completamento export.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

/// Render `records` to the fireman's `.xlsx` report.
///
/// The workbook is built in memory first; only then is the previous report
/// archived (under `stamp`, or its own modification time) and replaced.
pub fn write_report<Tz: TimeZone>(
    store: &HistoryStore,
    records: &[Intervention],
    tz: &Tz,
    stamp: Option<&str>,
) -> AppResult<PathBuf> {
    let rows = rows_for(records, tz);
    let bytes = xlsx::render_xlsx(&rows)?;

    store.archive_report(stamp)?;

    let path = store.paths().report_xlsx();
    write_atomic(&path, &bytes)?;

    notify_export_success("XLSX", &path);
    Ok(path)
}
