use super::convert::{self, Conversion};
use super::CanonicalMetrics;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::report::{Field, RawCaptureSet};
use strum::IntoEnumIterator;

/// Convert the raw sub-captures of one field to its canonical value.
pub fn convert_field(field: Field, values: &[String]) -> Conversion {
    match field {
        Field::Job
        | Field::BackupLevel
        | Field::Client
        | Field::FileSet
        | Field::Pool
        | Field::Catalog
        | Field::Storage
        | Field::VolumeName => convert::text(values),

        Field::Priority
        | Field::FdFilesWritten
        | Field::SdFilesWritten
        | Field::VolumeSessionId
        | Field::VolumeSessionTime => convert::integer(values),

        Field::JobId | Field::FdBytesWritten | Field::SdBytesWritten | Field::LvBytes | Field::FdErrors | Field::SdErrors => {
            convert::count(values)
        }

        Field::ScheduledTime | Field::StartTime | Field::EndTime => convert::timestamp(values),
        Field::ElapsedTime => convert::elapsed(values),
        Field::Rate => convert::rate(values),
        Field::SwCompression | Field::ClCompression => convert::compression(values),
        Field::Snapshot | Field::Encryption | Field::Accurate => convert::yes_no(values),
        Field::FdTerm | Field::SdTerm => convert::status(values),
        Field::Termination => convert::termination(values),
    }
}

/// Convert a raw capture set to canonical values.
///
/// Every known field gets an entry. Absent fields are null; fields whose sub-captures cannot
/// be converted are null and reported as rejected. Normalization never fails as a whole.
pub fn normalize(captures: &RawCaptureSet, diagnostics: &mut dyn DiagnosticSink) -> CanonicalMetrics {
    Field::iter()
        .map(|field| {
            let value = captures.get(field).and_then(|values| match convert_field(field, values) {
                Ok(value) => {
                    diagnostics.record(Diagnostic::Converted {
                        field,
                        value: value.clone(),
                    });
                    value
                }
                Err(error) => {
                    diagnostics.record(Diagnostic::Rejected {
                        field,
                        values: values.to_vec(),
                        error,
                    });
                    None
                }
            });

            (field, value)
        })
        .collect()
}
