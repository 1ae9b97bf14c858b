use strum::EnumString;

/// Unit tokens accepted in the elapsed time of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum TimeUnit {
    #[strum(serialize = "sec", serialize = "secs", serialize = "second", serialize = "seconds")]
    Second,
    #[strum(serialize = "min", serialize = "mins", serialize = "minute", serialize = "minutes")]
    Minute,
    #[strum(serialize = "hr", serialize = "hrs", serialize = "hour", serialize = "hours")]
    Hour,
    #[strum(serialize = "day", serialize = "days")]
    Day,
}

impl TimeUnit {
    #[must_use]
    pub const fn seconds(self) -> u64 {
        match self {
            Self::Second => 1,
            Self::Minute => 60,
            Self::Hour => 3600,
            Self::Day => 86_400,
        }
    }
}

/// Unit tokens accepted in the transfer rate of a job. Rates are normalized to KB/s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum RateUnit {
    #[strum(serialize = "KB/s")]
    Kilobytes,
    #[strum(serialize = "MB/s")]
    Megabytes,
    #[strum(serialize = "GB/s")]
    Gigabytes,
    #[strum(serialize = "TB/s")]
    Terabytes,
}

impl RateUnit {
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Kilobytes => 1.0,
            Self::Megabytes => 1_000.0,
            Self::Gigabytes => 1_000_000.0,
            Self::Terabytes => 1_000_000_000.0,
        }
    }
}
