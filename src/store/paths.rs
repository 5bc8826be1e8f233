// src/store/paths.rs

use crate::errors::AppResult;
use crate::models::Identity;
use crate::utils::path::safe_segment;
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Sub-directory of the output root holding the pre-overwrite copies.
pub const ARCHIVE_DIR: &str = ".archives";

const HISTORY_SUFFIX: &str = "_history";

/// All file locations of one fireman under the output root.
///
/// Every path is derived from the stem `<lastname>_<firstname>_<nip>`;
/// callers never assemble file names themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPaths {
    root: PathBuf,
    stem: String,
}

impl HistoryPaths {
    pub fn new(root: impl Into<PathBuf>, identity: &Identity) -> Self {
        let stem = format!(
            "{}_{}_{}",
            safe_segment(&identity.lastname),
            safe_segment(&identity.firstname),
            safe_segment(&identity.nip)
        );
        Self {
            root: root.into(),
            stem,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// `<root>/<stem>_history.json`
    pub fn history_json(&self) -> PathBuf {
        self.root
            .join(format!("{}{HISTORY_SUFFIX}.json", self.stem))
    }

    /// `<root>/<stem>_history.xlsx`
    pub fn report_xlsx(&self) -> PathBuf {
        self.root
            .join(format!("{}{HISTORY_SUFFIX}.xlsx", self.stem))
    }

    pub fn archive_dir(&self) -> PathBuf {
        self.root.join(ARCHIVE_DIR)
    }

    /// `<root>/.archives/<stem>_<stamp>_history.<ext>`
    pub fn archived(&self, stamp: &str, ext: &str) -> PathBuf {
        self.archive_dir()
            .join(format!("{}_{stamp}{HISTORY_SUFFIX}.{ext}", self.stem))
    }

    /// Look for an already stored history of `nip` in `root`.
    ///
    /// Returns the paths and the identity rebuilt from the file name. When
    /// several files match (the fireman changed name), the most recently
    /// modified wins.
    pub fn discover(root: &Path, nip: &str) -> AppResult<Option<(Self, Identity)>> {
        let pattern = format!(
            r"^(?P<last>.+?)_(?P<first>.+)_{}{HISTORY_SUFFIX}\.json$",
            regex::escape(&safe_segment(nip))
        );
        let re = Regex::new(&pattern).map_err(io::Error::other)?;

        let entries = match fs::read_dir(root) {
            Ok(e) => e,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut best: Option<(std::time::SystemTime, Self, Identity)> = None;

        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            let Some(caps) = re.captures(&name) else {
                continue;
            };

            let identity = Identity::new(nip, &caps["first"], &caps["last"]);
            let stem = name
                .trim_end_matches(".json")
                .trim_end_matches(HISTORY_SUFFIX)
                .to_string();
            let modified = entry.metadata()?.modified()?;

            let candidate = Self {
                root: root.to_path_buf(),
                stem,
            };

            if best.as_ref().is_none_or(|(t, _, _)| modified > *t) {
                best = Some((modified, candidate, identity));
            }
        }

        Ok(best.map(|(_, paths, identity)| (paths, identity)))
    }
}
