#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rfirelog::errors::{AppError, AppResult};
use rfirelog::fetch::Fetcher;
use rfirelog::models::Intervention;
use serde_json::json;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::TempDir;

pub const ENV_VARS: [&str; 7] = [
    "MIR_DOMAIN",
    "AUTH_TOKEN",
    "OUTPUT_DIR",
    "FIREMEN_NIP",
    "ON_CORRUPT_HISTORY",
    "HTTP_TIMEOUT_SECS",
    "DISPLAY_TZ",
];

/// Binary under test, with the variables it reads removed.
pub fn rfl() -> Command {
    let mut cmd = cargo_bin_cmd!("rfirelog");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

pub fn temp_root() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Intervention with a crew list containing `nip`.
pub fn intervention(id: &str, kind: &str, nip: &str) -> Intervention {
    Intervention::new(id, kind)
        .with("where", "Rue du Lac 12")
        .with("npa", "1400")
        .with("localite", "Yverdon-les-Bains")
        .with("alarmTime", "2024-03-05T10:00:00")
        .with("repliTime", "2024-03-05T11:45:00")
        .with(
            "chief",
            json!({ "rank": "Cap", "firstname": "Luc", "lastname": "Favre" }),
        )
        .with(
            "firemen",
            json!([{ "nip": nip, "firstname": "Jean", "lastname": "Dupont" }]),
        )
}

pub fn batch(ids: &[&str], nip: &str) -> Vec<Intervention> {
    ids.iter()
        .map(|id| intervention(id, &format!("Alarme {id}"), nip))
        .collect()
}

pub fn ids(records: &[Intervention]) -> Vec<&str> {
    records.iter().map(|r| r.report_id()).collect()
}

/// In-memory fetcher: one canned answer per NIP, call counter included.
#[derive(Default)]
pub struct FakeFetcher {
    answers: HashMap<String, Result<Vec<Intervention>, String>>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, nip: &str, records: Vec<Intervention>) -> Self {
        self.answers.insert(nip.to_string(), Ok(records));
        self
    }

    pub fn failing(mut self, nip: &str, message: &str) -> Self {
        self.answers
            .insert(nip.to_string(), Err(message.to_string()));
        self
    }
}

impl Fetcher for FakeFetcher {
    fn fetch(&self, nip: &str) -> AppResult<Vec<Intervention>> {
        self.calls.borrow_mut().push(nip.to_string());
        match self.answers.get(nip) {
            Some(Ok(records)) => Ok(records.clone()),
            Some(Err(msg)) => Err(AppError::Fetch(msg.clone())),
            None => Err(AppError::Fetch(format!("HTTP 404 for {nip}"))),
        }
    }
}

/// Files in `<root>/.archives`, sorted.
pub fn archives(root: &Path) -> Vec<String> {
    let dir = root.join(".archives");
    let mut names: Vec<String> = match fs::read_dir(&dir) {
        Ok(entries) => entries
            .map(|e| e.expect("dir entry").file_name().to_string_lossy().to_string())
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}

pub fn set_mtime(path: &Path, when: SystemTime) {
    let file = fs::File::options()
        .write(true)
        .open(path)
        .expect("open for mtime");
    file.set_modified(when).expect("set mtime");
}

pub fn write_history(path: &PathBuf, records: &[Intervention]) {
    fs::write(path, serde_json::to_vec(records).expect("serialize")).expect("write history");
}
