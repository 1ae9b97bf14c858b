use super::CanonicalMetrics;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use strum::{Display, EnumString};

/// What to emit for a field whose canonical value is null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NullPolicy {
    /// No line at all.
    #[default]
    Omit,

    /// A line with an empty value.
    Empty,
}

/// How canonical metrics are rendered as sender input lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricFormat {
    pub namespace: String,
    pub host_placeholder: String,
    pub null_policy: NullPolicy,
}

impl Default for MetricFormat {
    fn default() -> Self {
        Self {
            namespace: "bacula".to_owned(),
            host_placeholder: "-".to_owned(),
            null_policy: NullPolicy::Omit,
        }
    }
}

impl MetricFormat {
    /// Render one `<host> <namespace>.<key> <value>` line per emitted field, in field order.
    ///
    /// The routing field is never emitted; the sender receives it as the target host instead.
    #[must_use]
    pub fn format_lines(&self, metrics: &CanonicalMetrics) -> Vec<String> {
        metrics
            .iter()
            .filter(|(field, _)| !field.is_routing())
            .filter_map(|(field, value)| {
                let value = match (value, self.null_policy) {
                    (Some(value), _) => value.to_string(),
                    (None, NullPolicy::Empty) => String::new(),
                    (None, NullPolicy::Omit) => return None,
                };

                Some(format!("{} {}.{} {}", self.host_placeholder, self.namespace, field.key(), quote(&value)))
            })
            .collect()
    }

    /// The lines of [`Self::format_lines`] joined by newlines, without a trailing newline.
    #[must_use]
    pub fn format(&self, metrics: &CanonicalMetrics) -> String {
        self.format_lines(metrics).join("\n")
    }
}

// zabbix_sender splits input lines on whitespace; values containing spaces or quotes must be quoted
fn quote(value: &str) -> Cow<'_, str> {
    if value.contains(|c: char| c.is_whitespace() || c == '"') {
        Cow::Owned(format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\"")))
    } else {
        Cow::Borrowed(value)
    }
}
