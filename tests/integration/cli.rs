//! The `vows` binary's one-shot commands

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use super::common::fake_sheet::FakeSheet;
use vows::api::GuestRecord;

fn vows(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vows").expect("binary built");
    cmd.arg("--data-dir")
        .arg(data_dir.path())
        .env_remove("VOWS_API_URL");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    vows(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rsvp"))
        .stdout(predicate::str::contains("entourage"));
}

#[test]
fn test_config_path_uses_data_dir() {
    let dir = TempDir::new().unwrap();
    vows(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_set_api_url_persists() {
    let dir = TempDir::new().unwrap();
    vows(&dir)
        .args(["config", "set-api-url", "https://rsvp.example.com"])
        .assert()
        .success();

    vows(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api.base_url = https://rsvp.example.com"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_against_server() {
    let sheet = FakeSheet::start(vec![
        GuestRecord::new("Juan Dela Cruz").with_rsvp("Yes", "2"),
        GuestRecord::new("Maria Santos"),
    ])
    .await;
    let dir = TempDir::new().unwrap();
    let url = sheet.base_url.clone();

    let output = tokio::task::spawn_blocking(move || {
        vows(&dir)
            .args(["--api-url", &url, "search", "juan"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Juan Dela Cruz"));
    assert!(!stdout.contains("Maria"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rsvp_against_server() {
    let sheet = FakeSheet::start(vec![GuestRecord::new("Maria Santos")]).await;
    let dir = TempDir::new().unwrap();
    let url = sheet.base_url.clone();

    let output = tokio::task::spawn_blocking(move || {
        vows(&dir)
            .args(["--api-url", &url, "rsvp", "maria santos", "--attending", "no"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{output:?}");
    let state = sheet.state.lock();
    assert_eq!(state.updates.len(), 1);
    assert_eq!(state.updates[0].rsvp, "No");
    assert_eq!(state.updates[0].guest, "0");
}

#[test]
fn test_unreachable_server_fails() {
    let dir = TempDir::new().unwrap();
    vows(&dir)
        .args(["--api-url", "http://127.0.0.1:1", "guests"])
        .assert()
        .failure();
}
