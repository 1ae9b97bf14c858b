//! Integration tests for the `parse` command.
//!
//! These run the whole report pipeline through the public `run` entry point against real
//! job reports and check the metric lines that would be handed to `zabbix_sender`.

use std::io::{Read, Write};
use zbmessenger_lib::Host;

/// Test host that feeds input from and captures output to in-memory buffers.
#[derive(Default)]
struct TestHost {
    input_buf: Vec<u8>,
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl TestHost {
    fn with_input(input: &str) -> Self {
        Self {
            input_buf: input.as_bytes().to_vec(),
            ..Self::default()
        }
    }

    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }
}

impl Host for TestHost {
    fn input(&mut self) -> impl Read {
        self.input_buf.as_slice()
    }

    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

async fn parse(host: &mut TestHost, extra: &[&str]) -> Vec<String> {
    let mut args = vec!["zbmessenger", "parse", "--log-level", "none"];
    args.extend_from_slice(extra);

    zbmessenger_lib::run(host, args).await.unwrap();
    host.output_str().lines().map(str::to_owned).collect()
}

#[tokio::test]
async fn test_successful_backup_report() {
    let mut host = TestHost::default();
    let lines = parse(&mut host, &["--input", "tests/fixtures/backup_ok.txt"]).await;

    let expected = [
        "- bacula.job_id 1234",
        "- bacula.job BackupClient1",
        "- bacula.backup_level Incremental",
        "- bacula.file_set \"Full Set\"",
        "- bacula.pool Incremental",
        "- bacula.catalog MyCatalog",
        "- bacula.storage File1",
        "- bacula.scheduled_time \"2024-03-05 23:05:00\"",
        "- bacula.start_time \"2024-03-05 23:05:02\"",
        "- bacula.end_time \"2024-03-05 23:17:33\"",
        "- bacula.elapsed_time 751",
        "- bacula.priority 10",
        "- bacula.fd_files_written 1523",
        "- bacula.sd_files_written 1523",
        "- bacula.fd_bytes_written 2345678901",
        "- bacula.sd_bytes_written 2345912004",
        "- bacula.rate 3123.4",
        "- bacula.sw_compression 41.3",
        "- bacula.snapshot 0",
        "- bacula.encryption 0",
        "- bacula.accurate 1",
        "- bacula.volume_name Incremental-0042",
        "- bacula.volume_session_id 17",
        "- bacula.volume_session_time 1709330400",
        "- bacula.lvbytes 3210987654",
        "- bacula.fd_errors 0",
        "- bacula.sd_errors 0",
        "- bacula.fd_term 1",
        "- bacula.sd_term 1",
        "- bacula.termination 1",
    ];

    assert_eq!(lines, expected);
    assert_eq!(host.exit_code, None);
}

#[tokio::test]
async fn test_failed_backup_report() {
    let mut host = TestHost::default();
    let lines = parse(&mut host, &["--input", "tests/fixtures/backup_error.txt"]).await;

    for expected in [
        "- bacula.job_id 1240",
        "- bacula.backup_level Full",
        "- bacula.scheduled_time \"2024-09-16 02:00:00\"",
        "- bacula.elapsed_time 638",
        "- bacula.fd_bytes_written 0",
        "- bacula.rate 0",
        "- bacula.fd_errors 1",
        "- bacula.fd_term 0",
        "- bacula.sd_term 0",
        "- bacula.termination 0",
    ] {
        assert!(lines.iter().any(|line| line == expected), "missing '{expected}' in {lines:#?}");
    }

    // no compression, an unknown encryption token and an empty volume list produce nothing
    for absent in ["sw_compression", "cl_compression", "encryption", "volume_name", "client"] {
        assert!(
            !lines.iter().any(|line| line.contains(&format!("bacula.{absent} "))),
            "unexpected '{absent}' in {lines:#?}"
        );
    }

    assert_eq!(lines.len(), 27);
}

#[tokio::test]
async fn test_report_from_standard_input() {
    let report = "JobId: 42\nClient: \"backup01\"\nTermination: Backup OK\nElapsed time: 1 hrs\n";
    let mut host = TestHost::with_input(report);
    let lines = parse(&mut host, &[]).await;

    assert_eq!(lines, ["- bacula.job_id 42", "- bacula.elapsed_time 3600", "- bacula.termination 1"]);
}

#[tokio::test]
async fn test_json_view_includes_client_and_nulls() {
    let mut host = TestHost::default();
    let _ = parse(&mut host, &["--json", "--input", "tests/fixtures/backup_error.txt"]).await;

    let value: serde_json::Value = serde_json::from_str(&host.output_str()).unwrap();
    assert_eq!(value["client"], "backup02-fd");
    assert_eq!(value["job_id"], 1240);
    assert_eq!(value["start_time"], "2024-09-16 02:00:03");
    assert!(value["encryption"].is_null());
    assert!(value["volume_name"].is_null());
}

#[tokio::test]
async fn test_empty_null_policy_from_config() {
    let tmp = tempfile::tempdir().unwrap();
    let config = tmp.path().join("zbmessenger.toml");
    std::fs::write(&config, "null_values = \"empty\"\nnamespace = \"bareos\"\n").unwrap();

    let mut host = TestHost::with_input("JobId: 5\n");
    let lines = parse(&mut host, &["--config", config.to_str().unwrap()]).await;

    assert_eq!(lines.len(), 31);
    assert_eq!(lines[0], "- bareos.job_id 5");
    assert!(lines.iter().any(|line| line == "- bareos.rate "));
}
