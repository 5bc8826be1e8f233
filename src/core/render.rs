use crate::errors::{AppError, AppResult};
use crate::export::write_report;
use crate::store::{HistoryPaths, HistoryStore};
use crate::ui::messages::info;
use chrono::TimeZone;
use std::path::{Path, PathBuf};

pub struct RenderLogic;

impl RenderLogic {
    /// Regenerate the report of `nip` from the stored history, without
    /// contacting the remote service.
    pub fn render<Tz: TimeZone>(root: &Path, nip: &str, tz: &Tz) -> AppResult<PathBuf> {
        let (paths, identity) = HistoryPaths::discover(root, nip)?
            .ok_or_else(|| AppError::HistoryNotFound(nip.to_string()))?;

        let store = HistoryStore::new(paths);
        let loaded = store.load()?;

        info(format!(
            "{} interventions stored for {}",
            loaded.records.len(),
            identity.display_name()
        ));

        write_report(&store, &loaded.records, tz, None)
    }
}
