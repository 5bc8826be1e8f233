use crate::models::Intervention;

/// Id and label of a record touched by a merge pass, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRef {
    pub report_id: String,
    pub kind: String,
}

impl From<&Intervention> for RecordRef {
    fn from(r: &Intervention) -> Self {
        Self {
            report_id: r.report_id().to_string(),
            kind: r.kind(),
        }
    }
}

/// One fetched record as met by the merge walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeEvent {
    Added(RecordRef),
    Skipped(RecordRef),
}

/// Result of one merge pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// Updated history, most recently added first.
    pub log: Vec<Intervention>,
    /// Records inserted by this pass, front to back.
    pub added: Vec<RecordRef>,
    /// Fetched records already present.
    pub skipped: Vec<RecordRef>,
    /// Added and skipped records interleaved, in walk order (feed last to first).
    pub events: Vec<MergeEvent>,
}

impl Reconciliation {
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty()
    }
}

/// Fold freshly fetched records into an existing history.
///
/// `fetched` is walked from its last element to its first. A record whose
/// `report_id` is already in the history (or was already taken from this
/// batch) is skipped; the others form a block, in walk order, placed in
/// front of the existing records. With an empty history a feed `[A, B, C]`
/// gives `[C, B, A]`: the last record of the feed ends up first.
///
/// Existing records are never dropped, modified or moved relative to each
/// other. A report id repeated inside `fetched` is inserted once, the
/// occurrence nearest the end of the feed wins.
pub fn reconcile(existing: Vec<Intervention>, fetched: Vec<Intervention>) -> Reconciliation {
    let mut block: Vec<Intervention> = Vec::new();
    let mut skipped = Vec::new();
    let mut events = Vec::new();

    for record in fetched.into_iter().rev() {
        // scansione lineare: un log personale resta piccolo
        let id = record.report_id();
        let known = existing.iter().any(|r| r.report_id() == id)
            || block.iter().any(|r| r.report_id() == id);

        let seen = RecordRef::from(&record);
        if known {
            skipped.push(seen.clone());
            events.push(MergeEvent::Skipped(seen));
            continue;
        }

        events.push(MergeEvent::Added(seen));
        block.push(record);
    }

    let added = block.iter().map(RecordRef::from).collect();

    let mut log = block;
    log.extend(existing);

    Reconciliation {
        log,
        added,
        skipped,
        events,
    }
}
