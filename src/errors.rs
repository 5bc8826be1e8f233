//! Unified application error type.
//! Every module (fetch, store, core, export, cli) returns AppError so that the
//! orchestrator can catch a failure per identity and move on.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Remote service
    // ---------------------------
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Fireman {0} not found in the remote response")]
    UnknownIdentity(String),

    // ---------------------------
    // History store
    // ---------------------------
    #[error("History file {} is not valid JSON: {source}", .path.display())]
    CorruptHistory {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No stored history found for fireman {0}")]
    HistoryNotFound(String),

    // ---------------------------
    // Report
    // ---------------------------
    #[error("Report error: {0}")]
    Render(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Orchestrator
    // ---------------------------
    #[error("{0} fireman(s) could not be processed")]
    Incomplete(usize),
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        AppError::Render(e.to_string())
    }
}

impl AppError {
    /// Wrap an I/O failure on a store path.
    pub(crate) fn store_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AppError::StoreWrite {
            path: path.into(),
            source,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
