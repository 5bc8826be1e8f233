//! Local persistence: one JSON history and one report per fireman, with
//! archived copies under `.archives/`.

pub mod archive;
pub mod history;
pub mod paths;

pub use history::{HistoryStore, LoadedHistory};
pub use paths::{ARCHIVE_DIR, HistoryPaths};
