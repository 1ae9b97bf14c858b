//! Canonical values, per-field conversion and metric line formatting
//!
//! The [`normalize`] function takes the raw sub-captures of a report and converts each known
//! field to a [`CanonicalValue`] using the rule for its value class: identifiers are kept
//! verbatim, counts lose their thousands separators, durations become seconds, rates become
//! KB/s, and yes/no or termination statuses become flags.
//!
//! Conversion is total. A field whose sub-captures cannot be converted becomes null in the
//! resulting [`CanonicalMetrics`] and the reason is reported as a [`ConversionError`] through
//! the diagnostic sink; other fields are unaffected.
//!
//! [`MetricFormat`] then renders the canonical map as `zabbix_sender` input lines of the form
//! `<host> <namespace>.<key> <value>`.

mod canonical_metrics;
mod convert;
mod formatter;
mod metric_value;
mod normalizer;
mod units;

pub use canonical_metrics::CanonicalMetrics;
pub use convert::{Conversion, ConversionError};
pub use formatter::{MetricFormat, NullPolicy};
pub use metric_value::{CanonicalValue, TIMESTAMP_FORMAT};
pub use normalizer::{convert_field, normalize};
pub use units::{RateUnit, TimeUnit};
