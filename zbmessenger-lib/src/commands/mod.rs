//! Command-line interface and orchestration for zbmessenger
//!
//! This module implements the CLI commands and wires the report pipeline to its inputs and
//! to the metric sink. It handles argument parsing, configuration management, logging setup,
//! and the high-level workflows.
//!
//! # Commands
//!
//! - **send**: Read a job report, extract and normalize its fields, and hand the metric
//!   lines to `zabbix_sender` for the job's client
//! - **parse**: Same extraction, but print the metric lines (or the canonical values as JSON)
//!   instead of sending them
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file
//!
//! The `run` function parses command-line arguments using clap and routes to the appropriate
//! command handler. Options given on the command line take precedence over the configuration
//! file, which in turn overrides the embedded defaults.

mod common;
mod config;
mod host;
mod init;
mod parse;
mod run;
mod send;
mod validate;

pub use common::LogLevel;
pub use config::Config;
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use parse::{ParseArgs, parse_report};
pub use run::run;
pub use send::{SendArgs, send_report};
pub use validate::validate_config;
