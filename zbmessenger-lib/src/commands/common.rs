//! Arguments and setup shared between commands.

use super::Host;
use super::config::Config;
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use ohno::IntoAppError;
use std::fs::{self, OpenOptions};
use std::io::{self, Read};

/// Size at which the log file is rotated
pub const DEFAULT_LOG_MAX_BYTES: u64 = 2 * 1024 * 1024;

/// Number of rotated log files kept next to the current one
pub const DEFAULT_LOG_BACKUPS: u32 = 5;

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments accepted by every command
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Path to configuration file (default is `zbmessenger.toml`)
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Append log output to a file instead of writing it to stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<Utf8PathBuf>,

    /// Rotate the log file once it reaches this many bytes (0 disables rotation)
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_LOG_MAX_BYTES, global = true)]
    pub log_max_bytes: u64,

    /// Number of rotated log files to keep
    #[arg(long, value_name = "COUNT", default_value_t = DEFAULT_LOG_BACKUPS, global = true)]
    pub log_backups: u32,
}

impl GlobalArgs {
    /// Set up logging and load the configuration
    pub fn init(&self) -> Result<Config> {
        self.init_logging()?;
        Config::load(Utf8Path::new("."), self.config.as_ref())
    }

    /// Set up logging as requested on the command line
    pub fn init_logging(&self) -> Result<()> {
        let rotation = LogRotation {
            max_bytes: self.log_max_bytes,
            backups: self.log_backups,
        };

        init_logging(self.log_level, self.log_file.as_deref(), rotation)
    }
}

/// Size-based rotation of the log file, applied each time the file is opened.
///
/// Once `zbmessenger.log` has reached `max_bytes`, it becomes `zbmessenger.log.1`, the previous
/// `.1` becomes `.2` and so on. Files beyond `backups` are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRotation {
    pub max_bytes: u64,
    pub backups: u32,
}

impl Default for LogRotation {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_LOG_MAX_BYTES,
            backups: DEFAULT_LOG_BACKUPS,
        }
    }
}

impl LogRotation {
    /// Rotate `path` if it has grown past the size limit.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file or one of its backups cannot be renamed or removed
    pub fn rotate(&self, path: &Utf8Path) -> Result<()> {
        let size = match fs::metadata(path) {
            Ok(metadata) => metadata.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e).into_app_err_with(|| format!("inspecting log file '{path}'")),
        };

        if self.max_bytes == 0 || size < self.max_bytes {
            return Ok(());
        }

        if self.backups == 0 {
            return fs::remove_file(path).into_app_err_with(|| format!("removing full log file '{path}'"));
        }

        for index in (1..self.backups).rev() {
            let from = backup_path(path, index);
            if from.exists() {
                let to = backup_path(path, index + 1);
                fs::rename(&from, &to).into_app_err_with(|| format!("renaming '{from}' to '{to}'"))?;
            }
        }

        let to = backup_path(path, 1);
        fs::rename(path, &to).into_app_err_with(|| format!("renaming '{path}' to '{to}'"))
    }
}

fn backup_path(path: &Utf8Path, index: u32) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{path}.{index}"))
}

pub fn init_logging(log_level: LogLevel, log_file: Option<&Utf8Path>, rotation: LogRotation) -> Result<()> {
    let level = match log_level {
        LogLevel::None => return Ok(()),
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);
    let mut builder = env_logger::Builder::from_env(env);

    if let Some(path) = log_file {
        rotation.rotate(path)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .into_app_err_with(|| format!("opening log file '{path}'"))?;

        let _ = builder.target(env_logger::Target::Pipe(Box::new(file))).format_timestamp_secs();
    } else {
        let _ = builder
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace));
    }

    // a logger may already be installed when commands run more than once in a process
    let _ = builder.try_init();
    Ok(())
}

/// Read a whole report from a file, or from the host's input when no file is given
pub fn read_report<H: Host>(host: &mut H, input: Option<&Utf8Path>) -> Result<String> {
    if let Some(path) = input {
        return fs::read_to_string(path).into_app_err_with(|| format!("reading report '{path}'"));
    }

    let mut report = String::new();
    let _ = host.input().read_to_string(&mut report).into_app_err("reading report from standard input")?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;

    #[test]
    fn test_read_report_from_host() {
        let mut host = TestHost::with_input("JobId: 1\n");
        assert_eq!(read_report(&mut host, None).unwrap(), "JobId: 1\n");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_read_report_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("report.txt")).unwrap();
        fs::write(&path, "JobId: 2\n").unwrap();

        let mut host = TestHost::with_input("JobId: 1\n");
        assert_eq!(read_report(&mut host, Some(&path)).unwrap(), "JobId: 2\n");
    }

    #[test]
    fn test_read_report_missing_file() {
        let mut host = TestHost::default();
        let err = read_report(&mut host, Some(Utf8Path::new("/nonexistent/report.txt"))).unwrap_err();
        assert!(err.to_string().contains("reading report"), "{err}");
    }

    #[test]
    fn test_logging_disabled() {
        init_logging(LogLevel::None, Some(Utf8Path::new("/nonexistent/dir/zbmessenger.log")), LogRotation::default()).unwrap();
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_log_file_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("zbmessenger.log")).unwrap();

        init_logging(LogLevel::Info, Some(&path), LogRotation::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unopenable_log_file_fails() {
        assert!(init_logging(LogLevel::Info, Some(Utf8Path::new("/nonexistent/dir/zbmessenger.log")), LogRotation::default()).is_err());
    }

    fn log_path() -> (tempfile::TempDir, Utf8PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("zbmessenger.log")).unwrap();
        (tmp, path)
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_full_log_file_is_rotated_on_open() {
        let (_tmp, path) = log_path();
        fs::write(&path, "x".repeat(64)).unwrap();

        init_logging(LogLevel::Info, Some(&path), LogRotation { max_bytes: 32, backups: 5 }).unwrap();

        assert_eq!(fs::read_to_string(backup_path(&path, 1)).unwrap().len(), 64);
        assert!(fs::metadata(&path).unwrap().len() < 64);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_small_log_file_is_kept() {
        let (_tmp, path) = log_path();
        fs::write(&path, "short").unwrap();

        LogRotation::default().rotate(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "short");
        assert!(!backup_path(&path, 1).exists());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_rotation_shifts_backups_and_drops_the_oldest() {
        let (_tmp, path) = log_path();
        fs::write(&path, "current").unwrap();
        fs::write(backup_path(&path, 1), "first").unwrap();
        fs::write(backup_path(&path, 2), "second").unwrap();

        LogRotation { max_bytes: 1, backups: 2 }.rotate(&path).unwrap();

        assert!(!path.exists());
        assert_eq!(fs::read_to_string(backup_path(&path, 1)).unwrap(), "current");
        assert_eq!(fs::read_to_string(backup_path(&path, 2)).unwrap(), "first");
        assert!(!backup_path(&path, 3).exists());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_rotation_disabled() {
        let (_tmp, path) = log_path();
        fs::write(&path, "x".repeat(64)).unwrap();

        LogRotation { max_bytes: 0, backups: 5 }.rotate(&path).unwrap();
        assert!(!backup_path(&path, 1).exists());

        LogRotation { max_bytes: 32, backups: 0 }.rotate(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_log_file_needs_no_rotation() {
        LogRotation::default().rotate(Utf8Path::new("/nonexistent/dir/zbmessenger.log")).unwrap();
    }
}
