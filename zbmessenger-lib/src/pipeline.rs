//! Extraction, normalization and formatting of a single report
//!
//! Each stage fully consumes the output of the previous one and no state survives between
//! calls to [`process`].

use crate::diagnostics::DiagnosticSink;
use crate::metrics::{CanonicalMetrics, MetricFormat, normalize};
use crate::report::extract;

/// The result of processing one report.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub metrics: CanonicalMetrics,
    pub lines: Vec<String>,
}

impl Outcome {
    /// The client the metrics belong to, if the report named one.
    #[must_use]
    pub fn routing_identifier(&self) -> Option<&str> {
        self.metrics.routing_identifier()
    }

    /// The metric lines as one newline-separated blob.
    #[must_use]
    pub fn payload(&self) -> String {
        self.lines.join("\n")
    }
}

/// Run a report through the whole pipeline.
pub fn process(report: &str, format: &MetricFormat, diagnostics: &mut dyn DiagnosticSink) -> Outcome {
    let captures = extract(report, diagnostics);
    let metrics = normalize(&captures, diagnostics);
    let lines = format.format_lines(&metrics);

    Outcome { metrics, lines }
}
