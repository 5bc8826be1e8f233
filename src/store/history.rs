// src/store/history.rs

use crate::errors::{AppError, AppResult};
use crate::models::Intervention;
use crate::store::archive::{archive_existing, write_atomic};
use crate::store::paths::HistoryPaths;
use crate::utils::time::archive_stamp;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Snapshot of the stored log, as read before a reconciliation pass.
#[derive(Debug, Clone, Default)]
pub struct LoadedHistory {
    pub records: Vec<Intervention>,
    /// `true` when no history file existed yet.
    pub created: bool,
    /// Modification time of the file we read, if any.
    pub modified: Option<SystemTime>,
}

impl LoadedHistory {
    /// Stamp used to name the archives of this run.
    pub fn stamp(&self) -> Option<String> {
        self.modified.map(archive_stamp)
    }
}

/// JSON history of one fireman.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    paths: HistoryPaths,
}

impl HistoryStore {
    pub fn new(paths: HistoryPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &HistoryPaths {
        &self.paths
    }

    /// Read the whole history.
    ///
    /// A missing file is not an error: the result is empty with
    /// `created = true`. A file that is present but not a JSON array of
    /// interventions yields `AppError::CorruptHistory`.
    pub fn load(&self) -> AppResult<LoadedHistory> {
        let path = self.paths.history_json();

        let modified = match fs::metadata(&path) {
            Ok(meta) => meta.modified()?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(LoadedHistory {
                    records: Vec::new(),
                    created: true,
                    modified: None,
                });
            }
            Err(e) => return Err(e.into()),
        };

        let content = fs::read_to_string(&path)?;
        let records = parse_history(&path, &content)?;

        Ok(LoadedHistory {
            records,
            created: false,
            modified: Some(modified),
        })
    }

    /// Archive the current file (if any), then write `records` in its place.
    ///
    /// `prior_modified` is the modification time captured by `load`; when it
    /// is missing the file's current one is used. The archive move always
    /// happens before the new content lands on the canonical path.
    ///
    /// Returns the archive path, if a prior file was moved.
    pub fn archive_then_write(
        &self,
        records: &[Intervention],
        prior_modified: Option<SystemTime>,
    ) -> AppResult<Option<PathBuf>> {
        let path = self.paths.history_json();

        // serializziamo prima di toccare il file esistente
        let bytes = serde_json::to_vec(records)
            .map_err(|e| AppError::store_write(&path, io::Error::other(e)))?;

        let archived = match stamp_for(&path, prior_modified)? {
            Some(stamp) => {
                archive_existing(&path, &stamp, |s| self.paths.archived(s, "json"))?
            }
            None => None,
        };

        write_atomic(&path, &bytes)?;
        Ok(archived)
    }

    /// Archive the current report before it is regenerated.
    ///
    /// `stamp` lets the json and xlsx archives of one run share a name; when
    /// `None` the report's own modification time is used.
    pub fn archive_report(&self, stamp: Option<&str>) -> AppResult<Option<PathBuf>> {
        let path = self.paths.report_xlsx();
        let stamp = match stamp {
            Some(s) => Some(s.to_string()),
            None => stamp_for(&path, None)?,
        };

        match stamp {
            Some(s) => archive_existing(&path, &s, |st| self.paths.archived(st, "xlsx")),
            None => Ok(None),
        }
    }
}

/// Parse the content of a history file.
pub fn parse_history(path: &Path, content: &str) -> AppResult<Vec<Intervention>> {
    serde_json::from_str(content).map_err(|source| AppError::CorruptHistory {
        path: path.to_path_buf(),
        source,
    })
}

/// Stamp for the file at `path`: the captured time if given, otherwise the
/// file's own one. `None` when there is no file to archive.
fn stamp_for(path: &Path, captured: Option<SystemTime>) -> AppResult<Option<String>> {
    match fs::metadata(path) {
        Ok(meta) => {
            let modified = match captured {
                Some(t) => t,
                None => meta.modified()?,
            };
            Ok(Some(archive_stamp(modified)))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
