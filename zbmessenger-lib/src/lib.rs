#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for zbmessenger
//!
//! This library consolidates all functionality for the zbmessenger tool, which turns the
//! plain-text report Bacula produces at the end of a backup job into metrics and hands them
//! to `zabbix_sender`.
//!
//! # Module Organization
//!
//! - [`report`]: Field table, field extraction and the raw capture set
//! - [`metrics`]: Canonical values, per-field conversion and metric line formatting
//! - [`diagnostics`]: Records describing what happened to each field
//! - [`pipeline`]: Extraction, normalization and formatting of a single report
//! - [`sink`]: Delivery of metric lines to an external sender process
//! - [`commands`]: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod diagnostics;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod sink;

pub use crate::commands::{Host, run};
