//! Delivery of metric lines to an external sender process
//!
//! A [`MetricSink`] accepts the routing identifier of a report (the monitored host the metrics
//! belong to) and a newline-separated payload of metric lines. Its only feedback is whether
//! the delivery succeeded.

mod zabbix_sender;

pub use zabbix_sender::ZabbixSender;

use crate::Result;

pub(crate) const LOG_TARGET: &str = "zbmessenger::sink";

/// Something that can deliver metric lines for a host.
pub trait MetricSink {
    /// Deliver a payload of metric lines for `host`.
    ///
    /// Returns `Ok(false)` when the sink ran but reported failure, and an error when it could
    /// not be run at all.
    fn send(&self, host: &str, payload: &str) -> impl Future<Output = Result<bool>> + Send;
}

/// Deliver metric lines, either all at once or one line per delivery.
///
/// Per-line delivery makes it easy to spot which value the receiving side refused. Every line
/// is attempted even after a failure, and the result is only successful if every delivery was.
pub async fn deliver<S: MetricSink>(sink: &S, host: &str, lines: &[String], per_line: bool) -> Result<bool> {
    if !per_line {
        return sink.send(host, &lines.join("\n")).await;
    }

    let mut success = true;
    for line in lines {
        log::debug!(target: LOG_TARGET, "Sending '{line}' for host '{host}'");
        success &= sink.send(host, line).await?;
    }

    Ok(success)
}
