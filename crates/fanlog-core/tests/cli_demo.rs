//! End-to-end tests for the `fanlog-demo` binary.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn demo() -> Command {
    let mut cmd = cargo_bin_cmd!("fanlog-demo");
    for var in [
        "FANLOG_CONFIG",
        "FANLOG_LEVEL",
        "FANLOG_CONSOLE_LEVEL",
        "FANLOG_DEVELOPMENT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn help_flag_works() {
    demo()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--console-level"));
}

#[test]
fn scenario_redacts_console_output() {
    demo()
        .assert()
        .success()
        .stdout(predicate::str::contains("XXXX-XXXX-XXXX-XXXX"))
        .stdout(predicate::str::contains("[EMAIL REDACTED]"))
        .stdout(predicate::str::contains("4111-1111-1111-1111").not())
        .stdout(predicate::str::contains("user@example.com").not())
        .stdout(predicate::str::contains("won't be logged").not())
        .stdout(predicate::str::contains("But this warning will be logged"));
}

#[test]
fn scenario_writes_jsonl_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("application.log");

    demo()
        .arg("--log-file")
        .arg(&path)
        .arg("--console-level")
        .arg("fatal")
        .assert()
        .success();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = contents
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert!(lines.iter().all(|v| v["level"] != "debug"));
    assert!(lines
        .iter()
        .any(|v| v["logger"] == "app.auth" && v["fields"]["error_message"] == "error message"));
    assert!(lines
        .iter()
        .any(|v| v["fields"]["request_id"] == "req-123456" && v["fields"]["status"] == 200));
    assert_eq!(
        lines.last().unwrap()["message"],
        "But this warning will be logged"
    );
}

#[test]
fn config_file_drives_logger() {
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("out.log");
    let config_path = dir.path().join("logging.json");
    std::fs::write(
        &config_path,
        serde_json::json!({
            "name": "svc",
            "console_level": null,
            "files": [{ "path": log_path, "level": "error" }],
        })
        .to_string(),
    )
    .unwrap();

    demo()
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let contents = std::fs::read_to_string(&log_path).unwrap();
    let loggers: Vec<String> = contents
        .lines()
        .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap()["logger"]
            .as_str()
            .unwrap()
            .to_string())
        .collect();
    assert_eq!(loggers, vec!["svc", "svc.auth"]);
    // No presets configured: the email stays readable.
    assert!(contents.contains("user@example.com"));
}

#[test]
fn missing_config_file_fails() {
    let dir = tempdir().unwrap();
    demo()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("fanlog-demo:"));
}

#[test]
fn fatal_delivers_then_exits_with_status_one() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fatal.log");

    demo()
        .arg("--fatal")
        .arg("--log-file")
        .arg(&path)
        .arg("--console-level")
        .arg("fatal")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FATAL"))
        .stdout(predicate::str::contains("Unrecoverable startup failure"));

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = contents
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["level"], "fatal");
    assert_eq!(lines[0]["message"], "Unrecoverable startup failure");
    assert_eq!(lines[0]["fields"]["component"], "demo");
}

#[cfg(target_os = "linux")]
#[test]
fn fatal_exits_even_when_delivery_fails() {
    // Every write to /dev/full fails with ENOSPC.
    if !std::path::Path::new("/dev/full").exists() {
        return;
    }

    demo()
        .arg("--fatal")
        .arg("--log-file")
        .arg("/dev/full")
        .arg("--console-level")
        .arg("fatal")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Unrecoverable startup failure"))
        .stderr(predicate::str::contains("fatal record not fully delivered"));
}
