//! Time utilities: timestamp parsing, wall-clock adjustment, durations and
//! archive stamps.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::time::SystemTime;

/// Formato usato nei nomi dei file d'archivio (niente `:` nei path).
pub const ARCHIVE_STAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";

const NAIVE_FORMATS: [&str; 7] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M",
];

/// Convert a feed timestamp into the wall-clock time shown in the report.
///
/// The historical report applies two adjustments: the timestamp is read as
/// an instant, then shifted by the display zone's UTC offset at that instant.
/// For a timestamp carrying an offset (`...Z`, `+01:00`) this yields the
/// local wall-clock time in `tz`. For a naive timestamp (already local) the
/// two steps cancel out and the value is returned unchanged.
///
/// Returns `None` when the text is not a recognised timestamp.
pub fn to_wall_clock<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz).naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(tz).naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// `<hours>h<minutes>` with zero-padded minutes, e.g. `1h45`, `12h05`.
///
/// Hours are not wrapped at 24; a negative span gets a leading `-`.
pub fn format_duration(start: NaiveDateTime, end: NaiveDateTime) -> String {
    let mins = (end - start).num_minutes();
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{}h{:02}", sign, m / 60, m % 60)
}

/// Stamp of a file modification time, in UTC, second precision.
pub fn archive_stamp(modified: SystemTime) -> String {
    DateTime::<Utc>::from(modified)
        .format(ARCHIVE_STAMP_FORMAT)
        .to_string()
}
