use crate::config::{Config, CorruptHistoryPolicy};
use crate::core::reconcile::{MergeEvent, RecordRef, reconcile};
use crate::errors::{AppError, AppResult};
use crate::export::write_report;
use crate::fetch::Fetcher;
use crate::models::Identity;
use crate::store::{HistoryPaths, HistoryStore, LoadedHistory};
use crate::ui::messages::{detail, error, header, info, separator, success, warning};
use chrono::TimeZone;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Do not print one line per added / skipped record.
    pub quiet: bool,
}

/// What a successful pass did for one fireman.
#[derive(Debug, Clone)]
pub struct IdentitySummary {
    pub identity: Identity,
    /// No history existed before this pass.
    pub created: bool,
    pub added: Vec<RecordRef>,
    pub skipped: usize,
    /// Records in the history after the pass.
    pub total: usize,
    pub history_path: PathBuf,
    pub report_path: PathBuf,
    /// Previous history moved to `.archives/`, if any.
    pub archived: Option<PathBuf>,
}

/// Outcome of a whole run, one entry per requested NIP.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub succeeded: Vec<IdentitySummary>,
    pub failed: Vec<(String, AppError)>,
}

impl SyncReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// `Ok` when every fireman went through, `Incomplete` otherwise.
    pub fn into_result(self) -> AppResult<Self> {
        if self.failed.is_empty() {
            Ok(self)
        } else {
            Err(AppError::Incomplete(self.failed.len()))
        }
    }
}

pub struct SyncLogic;

impl SyncLogic {
    /// Synchronize every NIP in `nips`, one after the other.
    ///
    /// A failing fireman is reported and skipped; the next one starts from a
    /// clean state.
    pub fn run<F, Tz>(
        cfg: &Config,
        nips: &[String],
        fetcher: &F,
        tz: &Tz,
        opts: SyncOptions,
    ) -> SyncReport
    where
        F: Fetcher + ?Sized,
        Tz: TimeZone,
    {
        let mut report = SyncReport::default();

        for nip in nips {
            header(format!("Exporting data for {nip}"));

            match Self::sync_identity(cfg, nip, fetcher, tz, opts) {
                Ok(summary) => report.succeeded.push(summary),
                Err(e) => {
                    error(format!("{nip}: {e}"));
                    report.failed.push((nip.clone(), e));
                }
            }

            separator();
        }

        report
    }

    /// Fetch → reconcile → persist → render, for one fireman.
    pub fn sync_identity<F, Tz>(
        cfg: &Config,
        nip: &str,
        fetcher: &F,
        tz: &Tz,
        opts: SyncOptions,
    ) -> AppResult<IdentitySummary>
    where
        F: Fetcher + ?Sized,
        Tz: TimeZone,
    {
        // 1️⃣ dati dal server
        let fetched = fetcher.fetch(nip)?;
        let identity = Identity::resolve(nip, &fetched)?;
        info(format!(
            "{} interventions received for {}",
            fetched.len(),
            identity.display_name()
        ));

        // 2️⃣ storico locale
        let store = HistoryStore::new(HistoryPaths::new(cfg.output_root(), &identity));
        let loaded = load_with_policy(&store, cfg.on_corrupt_history)?;

        if loaded.created {
            info("File not found, will be created");
        }

        // 3️⃣ merge
        let stamp = loaded.stamp();
        let created = loaded.created;
        let merged = reconcile(loaded.records, fetched);

        if !opts.quiet {
            for event in &merged.events {
                match event {
                    MergeEvent::Skipped(r) => detail(format!(
                        "Intervention id {} ({}) already exists. Skipping...",
                        r.report_id, r.kind
                    )),
                    MergeEvent::Added(r) => {
                        detail(format!("Adding intervention id {} ({})", r.report_id, r.kind))
                    }
                }
            }
        }

        // 4️⃣ backup + scrittura
        let archived = store.archive_then_write(&merged.log, loaded.modified)?;

        // 5️⃣ report, dal file appena scritto
        let persisted = store.load()?;
        let report_path = write_report(&store, &persisted.records, tz, stamp.as_deref())?;

        success(format!(
            "{}: {} added, {} already known, {} in history",
            identity.display_name(),
            merged.added.len(),
            merged.skipped.len(),
            persisted.records.len()
        ));

        Ok(IdentitySummary {
            identity,
            created,
            added: merged.added,
            skipped: merged.skipped.len(),
            total: persisted.records.len(),
            history_path: store.paths().history_json(),
            report_path,
            archived,
        })
    }
}

/// Load the history, applying `policy` to an unreadable file.
fn load_with_policy(
    store: &HistoryStore,
    policy: CorruptHistoryPolicy,
) -> AppResult<LoadedHistory> {
    match store.load() {
        Ok(loaded) => Ok(loaded),
        Err(e @ AppError::CorruptHistory { .. }) => match policy {
            CorruptHistoryPolicy::Abort => Err(e),
            CorruptHistoryPolicy::StartEmpty => {
                warning(format!("{e}; it will be archived and rebuilt from the feed"));
                // modified = None: the archive takes the file's own mtime
                Ok(LoadedHistory::default())
            }
        },
        Err(e) => Err(e),
    }
}
