use super::RawCaptureSet;
use super::field_def::{FieldRule, field_rules};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use regex::Captures;

/// Extract the raw sub-captures of every known field from a job report.
///
/// The report is scanned once per field. Every line carrying the field's label contributes
/// its sub-captures, in order. Fields whose label never appears, or whose values are all blank
/// or malformed, are left out of the returned set.
pub fn extract(report: &str, diagnostics: &mut dyn DiagnosticSink) -> RawCaptureSet {
    let mut captures = RawCaptureSet::new();

    for rule in field_rules() {
        let field = rule.def.field;
        let mut occurrences = 0;
        let mut values = Vec::new();

        for line in rule.line.captures_iter(report) {
            occurrences += 1;
            let text = line.get(1).map_or("", |m| m.as_str());

            if !scan_value(rule, text, &mut values) {
                diagnostics.record(Diagnostic::Unmatched {
                    field,
                    text: text.to_owned(),
                });
            }
        }

        if occurrences > 1 && !rule.def.repeatable {
            diagnostics.record(Diagnostic::Repeated { field, occurrences });
        }

        captures.extend(field, values);

        match captures.get(field) {
            Some(kept) => diagnostics.record(Diagnostic::Captured {
                field,
                values: kept.to_vec(),
            }),
            None if occurrences == 0 => diagnostics.record(Diagnostic::Missing { field }),
            None => diagnostics.record(Diagnostic::Blank { field }),
        }
    }

    captures
}

/// Match one value against the rule's shape, appending its sub-captures.
///
/// Returns `false` if the value does not have the expected shape.
fn scan_value(rule: &FieldRule, text: &str, values: &mut Vec<String>) -> bool {
    match &rule.item {
        None => match rule.value.captures(text) {
            Some(caps) => {
                push_groups(&caps, values);
                true
            }
            None => false,
        },
        Some(item) => {
            if !rule.value.is_match(text) {
                return false;
            }

            for caps in item.captures_iter(text) {
                push_groups(&caps, values);
            }

            true
        }
    }
}

fn push_groups(caps: &Captures<'_>, values: &mut Vec<String>) {
    values.extend(caps.iter().skip(1).flatten().map(|m| m.as_str().to_owned()));
}
