use super::CanonicalValue;
use crate::report::Field;
use serde::Serialize;
use std::collections::BTreeMap;

/// The canonical value of every known field for one report.
///
/// Every field has an entry; `None` means the field was absent or could not be converted,
/// which is distinct from a legitimate zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CanonicalMetrics {
    values: BTreeMap<Field, Option<CanonicalValue>>,
}

impl CanonicalMetrics {
    /// The value of a field, or `None` if it is null.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&CanonicalValue> {
        self.values.get(&field).and_then(Option::as_ref)
    }

    /// The client name the metrics should be attributed to.
    #[must_use]
    pub fn routing_identifier(&self) -> Option<&str> {
        self.get(Field::Client).and_then(CanonicalValue::as_text)
    }

    /// All entries, null ones included, in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, Option<&CanonicalValue>)> {
        self.values.iter().map(|(field, value)| (*field, value.as_ref()))
    }

    /// Number of fields with a value.
    #[must_use]
    pub fn present(&self) -> usize {
        self.values.values().filter(|value| value.is_some()).count()
    }
}

impl FromIterator<(Field, Option<CanonicalValue>)> for CanonicalMetrics {
    fn from_iter<I: IntoIterator<Item = (Field, Option<CanonicalValue>)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
