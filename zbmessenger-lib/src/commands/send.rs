use super::Host;
use super::common::read_report;
use super::config::Config;
use crate::Result;
use crate::diagnostics::LogSink;
use crate::pipeline::process;
use crate::sink::{ZabbixSender, deliver};
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::{IntoAppError, bail};
use std::io::Write;

const LOG_TARGET: &str = "zbmessenger::send";

#[derive(Parser, Debug)]
pub struct SendArgs {
    /// Read the job report from a file instead of standard input
    #[arg(long, short = 'i', value_name = "PATH")]
    pub input: Option<Utf8PathBuf>,

    /// Zabbix host to attach the metrics to (default is the job's client)
    #[arg(long, value_name = "NAME")]
    pub host: Option<String>,

    /// Zabbix server host name or address
    #[arg(long, short = 'z', value_name = "ADDRESS")]
    pub server: Option<String>,

    /// Location of the `zabbix_sender` executable
    #[arg(long, value_name = "PATH")]
    pub sender_path: Option<Utf8PathBuf>,

    /// Send each metric line with its own sender invocation
    #[arg(long)]
    pub debug_send: bool,
}

/// Extract the metrics of a job report and hand them to `zabbix_sender`
pub async fn send_report<H: Host>(host: &mut H, args: &SendArgs, config: &Config) -> Result<()> {
    match send_report_inner(host, args, config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Could not send metrics: {e}");
            host.exit(1);
            Err(e)
        }
    }
}

async fn send_report_inner<H: Host>(host: &mut H, args: &SendArgs, config: &Config) -> Result<()> {
    let server = args
        .server
        .as_ref()
        .or(config.server.as_ref())
        .into_app_err("no Zabbix server given, use --server or set 'server' in the configuration")?;

    let report = read_report(host, args.input.as_deref())?;
    let outcome = process(&report, &config.metric_format(), &mut LogSink);

    let target = match (&args.host, outcome.routing_identifier()) {
        (Some(name), _) => name.as_str(),
        (None, Some(client)) => client,
        (None, None) => bail!("the report does not name a client, use --host to say which Zabbix host the metrics belong to"),
    };

    if outcome.lines.is_empty() {
        log::warn!(target: LOG_TARGET, "No metrics found in the report, nothing to send for '{target}'");
        return Ok(());
    }

    let sender_path = args.sender_path.as_ref().unwrap_or(&config.sender_path);
    let sender = ZabbixSender::new(sender_path.clone(), server.clone(), config.sender_timeout);
    let per_line = args.debug_send || config.debug_send;

    log::info!(target: LOG_TARGET, "Sending {} metrics for '{target}' to '{server}'", outcome.lines.len());

    if !deliver(&sender, target, &outcome.lines, per_line).await? {
        bail!("'{sender_path}' did not accept the metrics for '{target}'");
    }

    log::info!(target: LOG_TARGET, "Metrics for '{target}' successfully sent to '{server}'");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;

    const REPORT: &str = "JobId: 42\nClient: \"backup01\" 13.0.1\nTermination: Backup OK\n";

    fn args(sender: &str) -> SendArgs {
        SendArgs {
            input: None,
            host: None,
            server: Some("localhost".into()),
            sender_path: Some(sender.into()),
            debug_send: false,
        }
    }

    #[tokio::test]
    async fn test_missing_server() {
        let mut host = TestHost::with_input(REPORT);
        let args = SendArgs { server: None, ..args("true") };

        let result = send_report(&mut host, &args, &Config::default()).await;
        assert!(result.is_err());
        assert_eq!(host.exit_code, Some(1));
        assert!(host.error_str().contains("no Zabbix server"), "{}", host.error_str());
    }

    #[tokio::test]
    async fn test_missing_client() {
        let mut host = TestHost::with_input("JobId: 42\n");

        let result = send_report(&mut host, &args("true"), &Config::default()).await;
        assert!(result.is_err());
        assert!(host.error_str().contains("--host"), "{}", host.error_str());
    }

    #[tokio::test]
    async fn test_empty_client_name_is_not_a_host() {
        let mut host = TestHost::with_input("JobId: 42\nClient: \"\" 13.0.1 (05Aug22) x86_64\nTermination: Backup OK\n");

        let result = send_report(&mut host, &args("true"), &Config::default()).await;
        assert!(result.is_err());
        assert_eq!(host.exit_code, Some(1));
        assert!(host.error_str().contains("--host"), "{}", host.error_str());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_server_from_config() {
        let mut host = TestHost::with_input(REPORT);
        let args = SendArgs { server: None, ..args("true") };
        let config = Config {
            server: Some("zabbix.example.com".into()),
            ..Config::default()
        };

        send_report(&mut host, &args, &config).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_sender_failure_sets_exit_code() {
        let mut host = TestHost::with_input(REPORT);

        let result = send_report(&mut host, &args("false"), &Config::default()).await;
        assert!(result.is_err());
        assert_eq!(host.exit_code, Some(1));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_host_override_without_client() {
        let mut host = TestHost::with_input("JobId: 42\n");
        let args = SendArgs {
            host: Some("backup-server".into()),
            ..args("true")
        };

        send_report(&mut host, &args, &Config::default()).await.unwrap();
        assert_eq!(host.exit_code, None);
    }
}
