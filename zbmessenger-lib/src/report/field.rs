use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A field of a Bacula job report that is turned into a metric.
///
/// The declaration order is the order in which metrics are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString, IntoStaticStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Field {
    JobId,
    Job,
    BackupLevel,
    Client,
    FileSet,
    Pool,
    Catalog,
    Storage,
    ScheduledTime,
    StartTime,
    EndTime,
    ElapsedTime,
    Priority,
    FdFilesWritten,
    SdFilesWritten,
    FdBytesWritten,
    SdBytesWritten,
    Rate,
    SwCompression,
    ClCompression,
    Snapshot,
    Encryption,
    Accurate,
    VolumeName,
    VolumeSessionId,
    VolumeSessionTime,
    #[strum(serialize = "lvbytes")]
    #[serde(rename = "lvbytes")]
    LvBytes,
    FdErrors,
    SdErrors,
    FdTerm,
    SdTerm,
    Termination,
}

impl Field {
    /// The metric key for this field, without any namespace.
    #[must_use]
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Whether this field addresses the metrics rather than being one of them.
    ///
    /// The client name selects the monitored host on the Zabbix side and is passed to the
    /// sender separately instead of being emitted as a metric line.
    #[must_use]
    pub const fn is_routing(self) -> bool {
        matches!(self, Self::Client)
    }
}
