// src/export/model.rs

use crate::models::Intervention;
use crate::utils::time::{format_duration, to_wall_clock};
use chrono::{NaiveDateTime, TimeZone};

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Historique";

/// Header del report, nell'ordine delle colonne.
pub fn get_headers() -> [&'static str; 7] {
    [
        "Rapport",
        "Alarme",
        "Lieu",
        "Début intervention",
        "Fin intervention",
        "Durée",
        "CI",
    ]
}

pub(crate) const COLUMN_WIDTHS: [f64; 7] = [10.0, 40.0, 55.0, 17.0, 17.0, 8.0, 20.0];

/// A start / end cell: a date when the feed text could be read, the raw text
/// otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeCell {
    At(NaiveDateTime),
    Raw(String),
}

/// One report line, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub report_id: String,
    pub kind: String,
    pub location: String,
    pub start: TimeCell,
    pub end: TimeCell,
    pub duration: String,
    pub chief: String,
}

impl ReportRow {
    pub fn from_intervention<Tz: TimeZone>(rec: &Intervention, tz: &Tz) -> Self {
        let (start_raw, end_raw) = (rec.start_time(), rec.end_time());
        let start = to_wall_clock(&start_raw, tz);
        let end = to_wall_clock(&end_raw, tz);

        let duration = match (start, end) {
            (Some(s), Some(e)) => format_duration(s, e),
            _ => String::new(),
        };

        Self {
            report_id: rec.report_id().to_string(),
            kind: rec.kind(),
            location: rec.location_label(),
            start: to_cell(start, start_raw),
            end: to_cell(end, end_raw),
            duration,
            chief: rec.chief_label(),
        }
    }
}

fn to_cell(parsed: Option<NaiveDateTime>, raw: String) -> TimeCell {
    match parsed {
        Some(dt) => TimeCell::At(dt),
        None => TimeCell::Raw(raw),
    }
}

pub fn rows_for<Tz: TimeZone>(records: &[Intervention], tz: &Tz) -> Vec<ReportRow> {
    records
        .iter()
        .map(|r| ReportRow::from_intervention(r, tz))
        .collect()
}
