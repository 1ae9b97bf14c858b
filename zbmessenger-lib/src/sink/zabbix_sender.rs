use super::{LOG_TARGET, MetricSink};
use crate::Result;
use camino::Utf8PathBuf;
use core::time::Duration;
use ohno::{IntoAppError, bail};
use std::io::ErrorKind;
use std::process::{Output, Stdio};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runs `zabbix_sender`, piping the metric lines to its standard input.
#[derive(Debug, Clone)]
pub struct ZabbixSender {
    binary: Utf8PathBuf,
    server: String,
    timeout: Duration,
}

impl ZabbixSender {
    #[must_use]
    pub fn new(binary: impl Into<Utf8PathBuf>, server: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            server: server.into(),
            timeout,
        }
    }

    fn args<'a>(&'a self, host: &'a str) -> [&'a str; 6] {
        // -s names the monitored host, so metric lines can use a placeholder instead
        ["-z", &self.server, "-s", host, "-i", "-"]
    }

    async fn run(&self, host: &str, payload: &str) -> Result<Output> {
        let mut child = Command::new(&self.binary)
            .args(self.args(host))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .into_app_err_with(|| format!("could not spawn '{}'", self.binary))?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(payload.as_bytes()).await {
                // the sender may exit before reading its input; its exit status tells the story
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    log::debug!(target: LOG_TARGET, "'{}' closed its input early", self.binary);
                }
                result => result.into_app_err_with(|| format!("could not write metric lines to '{}'", self.binary))?,
            }
        }

        child
            .wait_with_output()
            .await
            .into_app_err_with(|| format!("'{}' failed to run", self.binary))
    }
}

impl MetricSink for ZabbixSender {
    async fn send(&self, host: &str, payload: &str) -> Result<bool> {
        log::debug!(target: LOG_TARGET, "Running '{} {}'", self.binary, self.args(host).join(" "));

        let Ok(output) = tokio::time::timeout(self.timeout, self.run(host, payload)).await else {
            bail!("'{}' timed out after {:?}", self.binary, self.timeout);
        };
        let output = output?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if output.status.success() {
            log::debug!(target: LOG_TARGET, "'{}' succeeded: {}", self.binary, stdout.trim());
            Ok(true)
        } else {
            log::warn!(target: LOG_TARGET, "'{}' failed with {}: {} {}", self.binary, output.status, stdout.trim(), stderr.trim());
            Ok(false)
        }
    }
}
