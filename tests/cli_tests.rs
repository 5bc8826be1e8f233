mod common;

use common::{archives, batch, rfl, temp_root, write_history};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_config_print_masks_token() {
    let root = temp_root();
    let conf = root.path().join("missing.conf");

    rfl()
        .args(["--config-file", conf.to_str().unwrap(), "config", "--print"])
        .env("MIR_DOMAIN", "mir.example.ch")
        .env("AUTH_TOKEN", "very-secret-token")
        .env("FIREMEN_NIP", "10234,20451")
        .assert()
        .success()
        .stdout(predicate::str::contains("mir.example.ch"))
        .stdout(predicate::str::contains("20451"))
        .stdout(predicate::str::contains("very-secret-token").not());
}

#[test]
fn test_dotenv_in_working_directory_is_read() {
    let root = temp_root();
    let conf = root.path().join("missing.conf");
    fs::write(
        root.path().join(".env"),
        "MIR_DOMAIN=dotenv.example.ch\nDISPLAY_TZ=Europe/Paris\n",
    )
    .expect("write .env");

    rfl()
        .current_dir(root.path())
        .args(["--config-file", conf.to_str().unwrap(), "config", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dotenv.example.ch"))
        .stdout(predicate::str::contains("Europe/Paris"));
}

#[test]
fn test_init_writes_config_file() {
    let root = temp_root();
    let conf = root.path().join("conf").join("rfirelog.conf");
    let out = root.path().join("out");

    rfl()
        .args([
            "--config-file",
            conf.to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
            "init",
        ])
        .env("MIR_DOMAIN", "mir.example.ch")
        .assert()
        .success();

    let content = fs::read_to_string(&conf).expect("config written");
    assert!(content.contains("mir_domain: mir.example.ch"));
    assert!(out.is_dir());
}

#[test]
fn test_sync_without_remote_settings_fails() {
    let root = temp_root();
    let conf = root.path().join("missing.conf");

    rfl()
        .args([
            "--config-file",
            conf.to_str().unwrap(),
            "sync",
            "--nip",
            "10234",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("remote host not configured"));
}

#[test]
fn test_bare_invocation_requires_firemen() {
    let root = temp_root();
    let conf = root.path().join("missing.conf");

    rfl()
        .args(["--config-file", conf.to_str().unwrap()])
        .env("MIR_DOMAIN", "mir.example.ch")
        .env("AUTH_TOKEN", "token")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no fireman to process"));
}

#[test]
fn test_render_from_stored_history() {
    let root = temp_root();
    let conf = root.path().join("missing.conf");
    let history = root.path().join("Dupont_Jean_10234_history.json");
    write_history(&history, &batch(&["A", "B"], "10234"));

    rfl()
        .args([
            "--config-file",
            conf.to_str().unwrap(),
            "--output-dir",
            root.path().to_str().unwrap(),
            "render",
            "--nip",
            "10234",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("XLSX export completed"));

    let report = root.path().join("Dupont_Jean_10234_history.xlsx");
    assert!(fs::read(&report).expect("report").starts_with(b"PK"));

    // second render archives the first report
    rfl()
        .args([
            "--config-file",
            conf.to_str().unwrap(),
            "--output-dir",
            root.path().to_str().unwrap(),
            "render",
            "--nip",
            "10234",
        ])
        .assert()
        .success();

    let archived = archives(root.path());
    assert_eq!(archived.len(), 1);
    assert!(archived[0].starts_with("Dupont_Jean_10234_"));
    assert!(archived[0].ends_with("_history.xlsx"));
}

#[test]
fn test_render_unknown_nip_fails() {
    let root = temp_root();
    let conf = root.path().join("missing.conf");

    rfl()
        .args([
            "--config-file",
            conf.to_str().unwrap(),
            "--output-dir",
            root.path().to_str().unwrap(),
            "render",
            "--nip",
            "99999",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No stored history found for fireman 99999"));
}
