mod common;

use chrono::{DateTime, Utc};
use common::{archives, batch, ids, intervention, set_mtime, temp_root, write_history};
use rfirelog::core::reconcile::reconcile;
use rfirelog::errors::AppError;
use rfirelog::models::Identity;
use rfirelog::store::{HistoryPaths, HistoryStore};
use rfirelog::utils::time::archive_stamp;
use std::fs;
use std::time::SystemTime;

const NIP: &str = "10234";

fn jean() -> Identity {
    Identity::new(NIP, "Jean", "Dupont")
}

fn at(rfc3339: &str) -> SystemTime {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("valid timestamp")
        .with_timezone(&Utc)
        .into()
}

#[test]
fn test_paths_follow_naming_scheme() {
    let root = temp_root();
    let paths = HistoryPaths::new(root.path(), &jean());

    assert_eq!(
        paths.history_json(),
        root.path().join("Dupont_Jean_10234_history.json")
    );
    assert_eq!(
        paths.report_xlsx(),
        root.path().join("Dupont_Jean_10234_history.xlsx")
    );
    assert_eq!(
        paths.archived("2024-03-05T14-22-31", "json"),
        root.path()
            .join(".archives")
            .join("Dupont_Jean_10234_2024-03-05T14-22-31_history.json")
    );
}

#[test]
fn test_paths_neutralize_separators_in_names() {
    let root = temp_root();
    let paths = HistoryPaths::new(root.path(), &Identity::new(NIP, "../..", "Du/pont"));

    assert_eq!(paths.stem(), "Du_pont_.._.._10234");
    assert_eq!(paths.history_json().parent(), Some(root.path()));
}

#[test]
fn test_missing_file_gives_empty_created_history() {
    let root = temp_root();
    let store = HistoryStore::new(HistoryPaths::new(root.path(), &jean()));

    let loaded = store.load().expect("load");

    assert!(loaded.created);
    assert!(loaded.records.is_empty());
    assert!(loaded.modified.is_none());
    assert!(loaded.stamp().is_none());
}

#[test]
fn test_first_write_creates_file_without_archive() {
    let root = temp_root();
    let store = HistoryStore::new(HistoryPaths::new(root.path(), &jean()));

    let archived = store
        .archive_then_write(&batch(&["A"], NIP), None)
        .expect("write");

    assert!(archived.is_none());
    assert!(store.paths().history_json().exists());
    assert!(!root.path().join(".archives").exists());
}

#[test]
fn test_prior_file_is_moved_unchanged_before_write() {
    let root = temp_root();
    let store = HistoryStore::new(HistoryPaths::new(root.path(), &jean()));
    let path = store.paths().history_json();

    write_history(&path, &batch(&["A"], NIP));
    let prior_bytes = fs::read(&path).expect("read prior");
    set_mtime(&path, at("2024-03-05T14:22:31.500Z"));

    let loaded = store.load().expect("load");
    assert!(!loaded.created);

    let archived = store
        .archive_then_write(&batch(&["B", "A"], NIP), loaded.modified)
        .expect("write")
        .expect("an archive");

    assert_eq!(
        archived.file_name().and_then(|n| n.to_str()),
        Some("Dupont_Jean_10234_2024-03-05T14-22-31_history.json")
    );
    assert_eq!(fs::read(&archived).expect("read archive"), prior_bytes);

    let reloaded = store.load().expect("reload");
    assert_eq!(ids(&reloaded.records), vec!["B", "A"]);
}

#[test]
fn test_archive_stamp_drops_subseconds_and_colons() {
    let stamp = archive_stamp(at("2024-03-05T14:22:31.500Z"));
    assert_eq!(stamp, "2024-03-05T14-22-31");
}

#[test]
fn test_archive_name_collision_gets_suffix() {
    let root = temp_root();
    let store = HistoryStore::new(HistoryPaths::new(root.path(), &jean()));
    let path = store.paths().history_json();
    let when = at("2024-03-05T14:22:31Z");

    write_history(&path, &batch(&["A"], NIP));
    store
        .archive_then_write(&batch(&["A"], NIP), Some(when))
        .expect("first write");
    store
        .archive_then_write(&batch(&["B", "A"], NIP), Some(when))
        .expect("second write");

    assert_eq!(
        archives(root.path()),
        vec![
            "Dupont_Jean_10234_2024-03-05T14-22-31-1_history.json".to_string(),
            "Dupont_Jean_10234_2024-03-05T14-22-31_history.json".to_string(),
        ]
    );
}

#[test]
fn test_corrupt_file_is_reported() {
    let root = temp_root();
    let store = HistoryStore::new(HistoryPaths::new(root.path(), &jean()));
    fs::write(store.paths().history_json(), "[{\"rapport\": ").expect("write garbage");

    match store.load() {
        Err(AppError::CorruptHistory { path, .. }) => {
            assert_eq!(path, store.paths().history_json())
        }
        other => panic!("expected CorruptHistory, got {other:?}"),
    }
}

#[test]
fn test_unknown_fields_survive_a_save() {
    let root = temp_root();
    let store = HistoryStore::new(HistoryPaths::new(root.path(), &jean()));
    let path = store.paths().history_json();

    let raw = r#"[{"rapport":"2024-118","what":"Feu de broussailles","where":"Chemin des Vignes","npa":1422,"localite":"Grandson","alarmTime":"2024-06-01T14:03:00.000Z","repliTime":"2024-06-01T16:10:00.000Z","chief":{"rank":"Lt","firstname":"Anne","lastname":"Rochat","id":7},"firemen":[{"nip":"10234","firstname":"Jean","lastname":"Dupont","function":"porteur"}],"vehicles":["TP 1","ES 2"],"priority":1}]"#;
    fs::write(&path, raw).expect("write raw");

    let loaded = store.load().expect("load");
    store
        .archive_then_write(&loaded.records, loaded.modified)
        .expect("rewrite");

    let before: serde_json::Value = serde_json::from_str(raw).expect("parse raw");
    let after: serde_json::Value =
        serde_json::from_slice(&fs::read(&path).expect("read")).expect("parse rewritten");
    assert_eq!(before, after);
}

#[test]
fn test_sparse_record_is_written_back_byte_for_byte() {
    let root = temp_root();
    let store = HistoryStore::new(HistoryPaths::new(root.path(), &jean()));
    let path = store.paths().history_json();

    // nulls, missing keys and unmodelled keys in a non-alphabetical order
    let raw = r#"[{"rapport":"R1","npa":null,"firemen":null,"zone":"Nord","alarmTime":"2024-03-05T10:00:00","chief":{"lastname":"Favre","rank":null}},{"rapport":"R0","what":"Exercice"}]"#;
    fs::write(&path, raw).expect("write raw");

    let loaded = store.load().expect("load");
    let merged = reconcile(loaded.records, Vec::new());
    store
        .archive_then_write(&merged.log, loaded.modified)
        .expect("rewrite");

    assert_eq!(fs::read_to_string(&path).expect("read"), raw);

    let reloaded = store.load().expect("reload");
    assert_eq!(reloaded.records[0].kind(), "");
    assert_eq!(reloaded.records[0].chief_label(), "  Favre");
    assert!(reloaded.records[0].crew().is_empty());
}

#[test]
fn test_record_without_report_id_is_corrupt() {
    let root = temp_root();
    let store = HistoryStore::new(HistoryPaths::new(root.path(), &jean()));
    fs::write(store.paths().history_json(), r#"[{"what":"Exercice"}]"#).expect("write");

    assert!(matches!(
        store.load(),
        Err(AppError::CorruptHistory { .. })
    ));
}

#[test]
fn test_discover_finds_stored_history() {
    let root = temp_root();
    let store = HistoryStore::new(HistoryPaths::new(root.path(), &jean()));
    write_history(&store.paths().history_json(), &[intervention("A", "x", NIP)]);
    fs::write(root.path().join("Muller_Eva_99999_history.json"), "[]").expect("other file");

    let (paths, identity) = HistoryPaths::discover(root.path(), NIP)
        .expect("discover")
        .expect("a match");

    assert_eq!(paths, *store.paths());
    assert_eq!(identity, jean());
    assert!(
        HistoryPaths::discover(root.path(), "555")
            .expect("discover")
            .is_none()
    );
}
