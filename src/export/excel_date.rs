// src/export/excel_date.rs

use chrono::NaiveDateTime;

/// Seriale Excel di 1970-01-01 00:00 (epoch 1899-12-30).
const UNIX_EPOCH_SERIAL: f64 = 25569.0;

const SECONDS_PER_DAY: f64 = 86400.0;

/// Number format of the start / end columns.
pub(crate) const DATE_TIME_FORMAT: &str = "dd.mm.yyyy hh:mm";

/// Convert a wall-clock date-time into an Excel serial number.
///
/// The value is written as-is: Excel has no notion of time zone, what is
/// stored is what the viewer shows.
pub(crate) fn naive_datetime_to_excel_serial(dt: &NaiveDateTime) -> f64 {
    let secs = dt.and_utc().timestamp() as f64;
    UNIX_EPOCH_SERIAL + secs / SECONDS_PER_DAY
}
