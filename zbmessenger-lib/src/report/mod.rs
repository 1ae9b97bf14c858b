//! Locating fields inside a Bacula job report
//!
//! A job report is free-form text where each interesting value sits on its own line behind a
//! fixed label, e.g. `  Elapsed time:           1 hour 2 mins 3 secs`. The set of fields is
//! closed and described once by [`FIELD_DEFINITIONS`]: each [`FieldDef`] names the label, the
//! [`ValueShape`] of the text that follows it, and whether the label may legally occur more
//! than once.
//!
//! # Implementation Model
//!
//! [`extract`] walks the field table and, for every field, finds all lines carrying its label
//! (case-insensitive, tolerant of runs of blanks inside the label and around the colon). The
//! rest of each such line is matched against the field's shape and every sub-capture is
//! appended, in order, to the field's entry in the [`RawCaptureSet`]. Blank sub-captures are
//! dropped, and a field with nothing left is absent from the set.
//!
//! Extraction never fails: a missing label or a value of the wrong shape simply leaves the
//! field absent and is reported through the [`DiagnosticSink`](crate::diagnostics::DiagnosticSink).
//! Captures gathered some other way enter through [`RawCaptureSet::from_named`], keyed by
//! metric key.

mod capture_set;
mod extractor;
mod field;
mod field_def;

pub use capture_set::RawCaptureSet;
pub use extractor::extract;
pub use field::Field;
pub use field_def::{FIELD_DEFINITIONS, FieldDef, ValueShape};
