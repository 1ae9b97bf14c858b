use super::Host;
use super::config::{CONFIG_FILE_NAME, Config};
use crate::Result;
use crate::diagnostics::Diagnostic;
use crate::pipeline::process;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::bail;
use std::io::Write;

// a report line every configuration must be able to turn into a metric line
const SAMPLE_REPORT: &str = "JobId: 1\n";

fn validate_config_inner(config_path: Option<&Utf8PathBuf>) -> Result<Config> {
    let config = Config::load(Utf8Path::new("."), config_path)?;
    let outcome = process(SAMPLE_REPORT, &config.metric_format(), &mut Vec::<Diagnostic>::new());
    let Some(line) = outcome.lines.first() else {
        bail!("configuration produces no metric lines");
    };

    if line.split_whitespace().count() != 3 {
        bail!("configuration produces malformed metric lines such as '{line}'");
    }

    Ok(config)
}

/// Check that a configuration file loads and produces well-formed metric lines
pub fn validate_config<H: Host>(host: &mut H, config_path: Option<&Utf8PathBuf>) -> Result<()> {
    match validate_config_inner(config_path) {
        Ok(config) => {
            let mut output = host.output();
            let _ = writeln!(output, "Configuration file is valid");
            if let Some(path) = config_path {
                let _ = writeln!(output, "Config file: {path}");
            } else {
                let _ = writeln!(output, "Using '{CONFIG_FILE_NAME}' if present, otherwise the default configuration");
            }

            if config.server.is_none() {
                let _ = writeln!(output, "No Zabbix server configured, `send` will need --server");
            }

            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
