//! Per-field diagnostics
//!
//! Every stage of the pipeline reports what it did with each field as a [`Diagnostic`]. The
//! records are handed to a [`DiagnosticSink`] supplied by the caller: the command-line tool
//! forwards them to the log through [`LogSink`], while tests collect them in a `Vec`.
//! Diagnostics are a side channel only and never change the data the pipeline produces.

use crate::metrics::{CanonicalValue, ConversionError};
use crate::report::Field;
use core::fmt;

pub const LOG_TARGET: &str = "zbmessenger::pipeline";

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The field's label does not appear in the report.
    Missing { field: Field },

    /// The field was found and produced these sub-captures.
    Captured { field: Field, values: Vec<String> },

    /// The field was found but all of its sub-captures were blank.
    Blank { field: Field },

    /// A line carrying the field's label has a value of the wrong shape.
    Unmatched { field: Field, text: String },

    /// A field that should appear once was found several times.
    Repeated { field: Field, occurrences: usize },

    /// The field's sub-captures were converted, possibly to an explicit "no value".
    Converted { field: Field, value: Option<CanonicalValue> },

    /// The field's sub-captures could not be converted.
    Rejected {
        field: Field,
        values: Vec<String>,
        error: ConversionError,
    },

    /// A field name that is not part of the field table.
    UnknownField { name: String },
}

impl Diagnostic {
    /// Whether the record points at something unexpected in the report.
    #[must_use]
    pub const fn is_anomaly(&self) -> bool {
        matches!(
            self,
            Self::Unmatched { .. } | Self::Repeated { .. } | Self::Rejected { .. } | Self::UnknownField { .. }
        )
    }

    #[must_use]
    pub const fn field(&self) -> Option<Field> {
        match self {
            Self::Missing { field }
            | Self::Captured { field, .. }
            | Self::Blank { field }
            | Self::Unmatched { field, .. }
            | Self::Repeated { field, .. }
            | Self::Converted { field, .. }
            | Self::Rejected { field, .. } => Some(*field),
            Self::UnknownField { .. } => None,
        }
    }

    #[must_use]
    pub const fn level(&self) -> log::Level {
        if self.is_anomaly() { log::Level::Warn } else { log::Level::Debug }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{field}: not present in report"),
            Self::Captured { field, values } => write!(f, "{field}: captured {values:?}"),
            Self::Blank { field } => write!(f, "{field}: present but empty"),
            Self::Unmatched { field, text } => write!(f, "{field}: value '{text}' is not in the expected format"),
            Self::Repeated { field, occurrences } => write!(f, "{field}: found {occurrences} times, expected once"),
            Self::Converted { field, value: Some(value) } => write!(f, "{field}: converted to {value}"),
            Self::Converted { field, value: None } => write!(f, "{field}: explicitly has no value"),
            Self::Rejected { field, values, error } => write!(f, "{field} is not specified correctly {values:?}: {error}"),
            Self::UnknownField { name } => write!(f, "unable to find a converter for field '{name}'"),
        }
    }
}

/// Receives the diagnostics produced while processing a report.
pub trait DiagnosticSink {
    fn record(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn record(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to the `log` facade, warning about anomalies.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&mut self, diagnostic: Diagnostic) {
        log::log!(target: LOG_TARGET, diagnostic.level(), "{diagnostic}");
    }
}
