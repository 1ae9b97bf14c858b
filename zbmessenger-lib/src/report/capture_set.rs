use super::Field;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use core::str::FromStr;
use std::collections::BTreeMap;

/// Raw sub-captures for each field found in a report.
///
/// A field is either absent or maps to a non-empty sequence of non-blank strings; absence and
/// "nothing but blanks" are the same thing here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCaptureSet {
    captures: BTreeMap<Field, Vec<String>>,
}

impl RawCaptureSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a capture set from entries keyed by metric key, such as `job_id` or `fd_bytes_written`.
    ///
    /// This is the way in for captures that were not produced by [`extract`](super::extract),
    /// for example values collected by another tool. Names that do not correspond to a known
    /// field are reported as [`Diagnostic::UnknownField`] and skipped.
    pub fn from_named<I, K, V>(entries: I, diagnostics: &mut dyn DiagnosticSink) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        let mut set = Self::new();
        for (name, values) in entries {
            match Field::from_str(name.as_ref()) {
                Ok(field) => set.extend(field, values),
                Err(_) => diagnostics.record(Diagnostic::UnknownField {
                    name: name.as_ref().to_owned(),
                }),
            }
        }

        set
    }

    /// Append sub-captures to a field, dropping blank ones.
    pub fn extend<V>(&mut self, field: Field, values: V)
    where
        V: IntoIterator,
        V::Item: Into<String>,
    {
        let mut kept = values.into_iter().map(Into::into).filter(|v: &String| !v.trim().is_empty()).peekable();
        if kept.peek().is_some() {
            self.captures.entry(field).or_default().extend(kept);
        }
    }

    /// The sub-captures of a field, or `None` if the field was not found.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&[String]> {
        self.captures.get(&field).map(Vec::as_slice)
    }

    #[cfg(test)]
    pub fn contains(&self, field: Field) -> bool {
        self.captures.contains_key(&field)
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (Field, &[String])> {
        self.captures.iter().map(|(field, values)| (*field, values.as_slice()))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.captures.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }
}
