use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(deprecated)]
fn get_log_analyzer_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("log-analyzer")
}

/// Helper to lay out a config, template and log directory under `root`
fn write_config(root: &Path) -> PathBuf {
    let log_dir = root.join("log");
    fs::create_dir_all(&log_dir).unwrap();
    fs::write(root.join("report.html"), "<script>var table = $table_json;</script>").unwrap();

    let config = serde_json::json!({
        "REPORT_SIZE": 5,
        "REPORT_DIR": root.join("reports"),
        "LOG_DIR": log_dir,
        "REPORT_TEMPLATE": root.join("report.html"),
    });
    let path = root.join("config.json");
    fs::write(&path, config.to_string()).unwrap();
    path
}

#[test]
fn test_report_writes_html() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());
    fs::write(
        temp_dir.path().join("log").join("nginx-access-ui.log-20170630"),
        "\"GET /home HTTP/1.1\" 200 1 0.123\n",
    )
    .unwrap();

    let mut cmd = Command::new(get_log_analyzer_bin());
    cmd.current_dir(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .arg("report");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("report-"))
        .stdout(predicate::str::contains(".html"));

    let reports: Vec<_> = fs::read_dir(temp_dir.path().join("reports"))
        .unwrap()
        .collect();
    assert_eq!(reports.len(), 1);

    let html = fs::read_to_string(reports[0].as_ref().unwrap().path()).unwrap();
    assert!(html.contains(r#""url":"/home""#));
}

#[test]
fn test_default_command_is_report() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());

    let mut cmd = Command::new(get_log_analyzer_bin());
    cmd.current_dir(temp_dir.path()).arg("--config").arg(&config);

    cmd.assert().success().stdout(predicate::str::is_empty());
    assert!(!temp_dir.path().join("reports").exists());
}

#[test]
fn test_missing_config_fails() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::new(get_log_analyzer_bin());
    cmd.current_dir(temp_dir.path())
        .arg("--config")
        .arg("missing.json");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("ERROR"))
        .stderr(predicate::str::contains("Failed to load configuration"))
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn test_invalid_report_size_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.json");
    fs::write(&config, r#"{"REPORT_SIZE": 0}"#).unwrap();

    let mut cmd = Command::new(get_log_analyzer_bin());
    cmd.current_dir(temp_dir.path()).arg("--config").arg(&config);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("REPORT_SIZE"));
}

#[test]
fn test_stats_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());
    let log = temp_dir.path().join("access.log");
    fs::write(
        &log,
        "\"GET /a HTTP/1.1\" 200 1 1.0\n\"GET /a HTTP/1.1\" 200 1 3.0\n\"GET /b HTTP/1.1\" 200 1 2.0\n",
    )
    .unwrap();

    let mut cmd = Command::new(get_log_analyzer_bin());
    cmd.current_dir(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .arg("--format")
        .arg("json")
        .arg("stats")
        .arg(&log)
        .arg("--top")
        .arg("1");

    let output = cmd.assert().success().get_output().stdout.clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(report["summary"]["total_requests"], 3);
    assert_eq!(report["urls"].as_array().unwrap().len(), 1);
    assert_eq!(report["urls"][0]["url"], "/a");
}

#[test]
fn test_stats_table_output() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());
    let log = temp_dir.path().join("access.log");
    fs::write(&log, "\"GET /a HTTP/1.1\" 200 1 0.5\n").unwrap();

    let mut cmd = Command::new(get_log_analyzer_bin());
    cmd.current_dir(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .arg("--format")
        .arg("table")
        .arg("stats")
        .arg(&log);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "url,count,count_perc,time_sum,time_perc,time_avg,time_max,time_med",
        ))
        .stdout(predicate::str::contains("/a,1,100.000,0.500,100.000"));
}

#[test]
fn test_completion_bash_generates_script() {
    let mut cmd = Command::new(get_log_analyzer_bin());
    cmd.arg("completion").arg("--shell").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("log-analyzer"))
        .stdout(predicate::str::contains("complete -F"));
}

#[test]
fn test_completion_help() {
    let mut cmd = Command::new(get_log_analyzer_bin());
    cmd.arg("completion").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Generate shell completion scripts"))
        .stdout(predicate::str::contains("SUPPORTED SHELLS"));
}
