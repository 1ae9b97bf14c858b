use super::Host;
use super::common::read_report;
use super::config::Config;
use crate::Result;
use crate::diagnostics::LogSink;
use crate::pipeline::process;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Read the job report from a file instead of standard input
    #[arg(long, short = 'i', value_name = "PATH")]
    pub input: Option<Utf8PathBuf>,

    /// Print every field's canonical value as JSON instead of metric lines
    #[arg(long)]
    pub json: bool,
}

/// Extract the metrics of a job report and print them without sending anything
pub fn parse_report<H: Host>(host: &mut H, args: &ParseArgs, config: &Config) -> Result<()> {
    let report = read_report(host, args.input.as_deref())?;
    let outcome = process(&report, &config.metric_format(), &mut LogSink);

    let mut output = host.output();
    if args.json {
        serde_json::to_writer_pretty(&mut output, &outcome.metrics).into_app_err("writing metrics as JSON")?;
        writeln!(output).into_app_err("writing metrics")?;
    } else {
        for line in &outcome.lines {
            writeln!(output, "{line}").into_app_err("writing metrics")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;

    const REPORT: &str = "\
  JobId:                  42
  Client:                 \"backup01\" 13.0.1 (05Aug22) x86_64-pc-linux-gnu,debian,11
  Elapsed time:           1 hr 5 mins
  Rate:                   1.5 MB/s
  Termination:            Backup OK
";

    #[test]
    fn test_lines() {
        let mut host = TestHost::with_input(REPORT);
        let args = ParseArgs { input: None, json: false };
        parse_report(&mut host, &args, &Config::default()).unwrap();

        assert_eq!(
            host.output_str(),
            "- bacula.job_id 42\n- bacula.elapsed_time 3900\n- bacula.rate 1500\n- bacula.termination 1\n"
        );
    }

    #[test]
    fn test_json() {
        let mut host = TestHost::with_input(REPORT);
        let args = ParseArgs { input: None, json: true };
        parse_report(&mut host, &args, &Config::default()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&host.output_str()).unwrap();
        assert_eq!(value["job_id"], 42);
        assert_eq!(value["client"], "backup01");
        assert_eq!(value["elapsed_time"], 3900);
        assert_eq!(value["termination"], 1);
        assert!(value["pool"].is_null());
        assert_eq!(value.as_object().unwrap().len(), 32);
    }

    #[test]
    fn test_configured_format() {
        let mut host = TestHost::with_input("JobId: 7\n");
        let args = ParseArgs { input: None, json: false };
        let config = Config {
            namespace: "bareos".into(),
            ..Config::default()
        };

        parse_report(&mut host, &args, &config).unwrap();
        assert_eq!(host.output_str(), "- bareos.job_id 7\n");
    }
}
