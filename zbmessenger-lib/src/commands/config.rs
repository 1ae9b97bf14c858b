use crate::Result;
use crate::metrics::{MetricFormat, NullPolicy};
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "zbmessenger.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Executable that delivers metric lines to the Zabbix server
    #[serde(default = "default_sender_path")]
    pub sender_path: Utf8PathBuf,

    /// Zabbix server host name or address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    /// Prefix of every metric key
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// First column of every metric line
    #[serde(default = "default_host_placeholder")]
    pub host_placeholder: String,

    /// What to emit for fields without a value
    #[serde(default)]
    pub null_values: NullPolicy,

    /// Upper bound on a single sender invocation
    #[serde(default = "default_sender_timeout", with = "humantime_serde")]
    pub sender_timeout: Duration,

    /// Send each metric line with its own sender invocation
    #[serde(default)]
    pub debug_send: bool,
}

fn default_sender_path() -> Utf8PathBuf {
    Utf8PathBuf::from("zabbix_sender")
}

fn default_namespace() -> String {
    "bacula".to_owned()
}

fn default_host_placeholder() -> String {
    "-".to_owned()
}

const fn default_sender_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `zbmessenger.toml` in `base_dir` is used if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading zbmessenger configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("No configuration file at '{path}', using defaults");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading zbmessenger configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        log::debug!("Loaded configuration from '{final_path}'");
        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a value would produce malformed metric lines or an unusable sender
    pub fn validate(&self) -> Result<()> {
        check_word("namespace", &self.namespace)?;
        check_word("host_placeholder", &self.host_placeholder)?;

        if self.sender_path.as_str().is_empty() {
            return Err(app_err!("sender_path must not be empty"));
        }

        if let Some(server) = &self.server {
            check_word("server", server)?;
        }

        if self.sender_timeout.is_zero() {
            return Err(app_err!("sender_timeout must be greater than zero"));
        }

        Ok(())
    }

    /// How metric lines are rendered under this configuration
    #[must_use]
    pub fn metric_format(&self) -> MetricFormat {
        MetricFormat {
            namespace: self.namespace.clone(),
            host_placeholder: self.host_placeholder.clone(),
            null_policy: self.null_values,
        }
    }
}

// metric lines are split on whitespace, so these values must be single words
fn check_word(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(app_err!("{name} must not be empty"));
    }

    if value.contains(char::is_whitespace) {
        return Err(app_err!("{name} must not contain whitespace, got '{value}'"));
    }

    Ok(())
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
