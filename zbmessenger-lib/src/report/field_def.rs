use super::Field;
use regex::Regex;
use std::sync::LazyLock;

/// How the text following a label breaks down into sub-captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// The whole value must match the pattern once; each capture group is a sub-capture.
    Fixed(&'static str),

    /// The value is a run of items separated by blanks; the capture groups of every item are
    /// appended in order.
    Repeated(&'static str),
}

#[derive(Debug)]
pub struct FieldDef {
    pub field: Field,
    pub label: &'static str,
    pub shape: ValueShape,
    pub repeatable: bool,
}

macro_rules! field_def {
    ($field:ident, $label:expr, $shape:ident($pattern:expr)) => {
        field_def!($field, $label, $shape($pattern), false)
    };
    ($field:ident, $label:expr, $shape:ident($pattern:expr), $repeatable:expr) => {
        FieldDef {
            field: Field::$field,
            label: $label,
            shape: ValueShape::$shape($pattern),
            repeatable: $repeatable,
        }
    };
}

const ANY: &str = r"(.*)";
const TOKEN: &str = r"(\S+)";
const QUOTED_NAME: &str = r#""([^"]+)"(?:\s+(.*))?|([^"\s]\S*)"#;
const TIMESTAMP: &str = r"(\d{2}-[A-Za-z]{3,4}-\d{4} \d{2}:\d{2}:\d{2})";
const BYTE_COUNT: &str = r"(\S+)(?:\s+\(([^)]*)\))?";
const COMPRESSION: &str = r"([^\s%]+)\s*%?(?:\s+(\S+?):(\S+))?";

pub const FIELD_DEFINITIONS: &[FieldDef] = &[
    field_def!(JobId, "JobId", Fixed(ANY)),
    field_def!(Job, "Job", Fixed(r"(.+?)(?:\.(\d{4}-\d{2}-\d{2})_(\d{2}\.\d{2}\.\d{2})_(\d+))?")),
    field_def!(BackupLevel, "Backup Level", Fixed(r"([^,]+?)(?:,\s*since=(\d{4}-\d{2}-\d{2})\s+(\d{2}:\d{2}:\d{2}))?")),
    field_def!(Client, "Client", Fixed(QUOTED_NAME)),
    field_def!(FileSet, "FileSet", Fixed(r#""([^"]+)"(?:\s+(\d{4}-\d{2}-\d{2}))?(?:\s+(\d{2}:\d{2}:\d{2}))?"#)),
    field_def!(Pool, "Pool", Fixed(QUOTED_NAME)),
    field_def!(Catalog, "Catalog", Fixed(QUOTED_NAME)),
    field_def!(Storage, "Storage", Fixed(QUOTED_NAME)),
    field_def!(ScheduledTime, "Scheduled time", Fixed(TIMESTAMP)),
    field_def!(StartTime, "Start time", Fixed(TIMESTAMP)),
    field_def!(EndTime, "End time", Fixed(TIMESTAMP)),
    field_def!(ElapsedTime, "Elapsed time", Repeated(r"(\d+)\s*([A-Za-z]+)")),
    field_def!(Priority, "Priority", Fixed(TOKEN)),
    field_def!(FdFilesWritten, "FD Files Written", Fixed(TOKEN)),
    field_def!(SdFilesWritten, "SD Files Written", Fixed(TOKEN)),
    field_def!(FdBytesWritten, "FD Bytes Written", Fixed(BYTE_COUNT)),
    field_def!(SdBytesWritten, "SD Bytes Written", Fixed(BYTE_COUNT)),
    field_def!(Rate, "Rate", Fixed(r"(\S+)(?:\s+(\S+))?")),
    field_def!(SwCompression, "Software Compression", Fixed(COMPRESSION)),
    field_def!(ClCompression, "Comm Line Compression", Fixed(COMPRESSION)),
    field_def!(Snapshot, "Snapshot/VSS", Fixed(TOKEN)),
    field_def!(Encryption, "Encryption", Fixed(TOKEN)),
    field_def!(Accurate, "Accurate", Fixed(TOKEN)),
    field_def!(VolumeName, "Volume name(s)", Fixed(ANY), true),
    field_def!(VolumeSessionId, "Volume Session Id", Fixed(TOKEN)),
    field_def!(VolumeSessionTime, "Volume Session Time", Fixed(TOKEN)),
    field_def!(LvBytes, "Last Volume Bytes", Fixed(BYTE_COUNT)),
    field_def!(FdErrors, "Non-fatal FD errors", Fixed(TOKEN)),
    field_def!(SdErrors, "SD Errors", Fixed(TOKEN)),
    field_def!(FdTerm, "FD termination status", Fixed(ANY)),
    field_def!(SdTerm, "SD termination status", Fixed(ANY)),
    field_def!(Termination, "Termination", Fixed(ANY)),
];

/// A field definition with its patterns compiled.
#[derive(Debug)]
pub(super) struct FieldRule {
    pub def: &'static FieldDef,

    /// Finds every line carrying the label; group 1 is the trimmed rest of the line.
    pub line: Regex,

    /// Matches a complete value. For repeated shapes this only validates the value.
    pub value: Regex,

    /// Extracts the sub-captures of each item of a repeated shape.
    pub item: Option<Regex>,
}

static FIELD_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| FIELD_DEFINITIONS.iter().map(FieldRule::compile).collect());

/// The compiled field table, in declaration order.
pub(super) fn field_rules() -> &'static [FieldRule] {
    &FIELD_RULES
}

impl FieldRule {
    #[expect(clippy::panic, reason = "a malformed field table is a programming error")]
    fn compile(def: &'static FieldDef) -> Self {
        let build = |pattern: &str| Regex::new(pattern).unwrap_or_else(|e| panic!("invalid pattern for field '{}': {e}", def.field));

        let line = build(&format!(r"(?mi)^[^\S\n]*{}[^\S\n]*:[^\S\n]*(.*?)[^\S\n]*$", label_pattern(def.label)));

        match def.shape {
            ValueShape::Fixed(pattern) => Self {
                def,
                line,
                value: build(&format!("^(?:{pattern})$")),
                item: None,
            },
            ValueShape::Repeated(pattern) => Self {
                def,
                line,
                value: build(&format!(r"^(?:\s*(?:{pattern}))+\s*$")),
                item: Some(build(pattern)),
            },
        }
    }
}

/// Escape a label, letting each blank inside it match any run of blanks.
fn label_pattern(label: &str) -> String {
    label.split_whitespace().map(regex::escape).collect::<Vec<_>>().join(r"[^\S\n]+")
}
