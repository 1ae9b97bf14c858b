use chrono::NaiveDateTime;
use core::fmt;
use serde::{Serialize, Serializer};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A typed, unit-normalized field value.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalValue {
    Integer(i64),

    /// A floating-point quantity in its base unit (rates are in KB/s).
    Float(f64),

    /// A duration in whole seconds.
    Seconds(u64),

    Timestamp(NaiveDateTime),

    /// A yes/no or success/failure outcome, emitted as `1` or `0`.
    Flag(bool),

    Text(String),
}

impl CanonicalValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for CanonicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Seconds(value) => write!(f, "{value}"),
            Self::Timestamp(value) => write!(f, "{}", value.format(TIMESTAMP_FORMAT)),
            Self::Flag(value) => write!(f, "{}", u8::from(*value)),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for CanonicalValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Integer(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Seconds(value) => serializer.serialize_u64(*value),
            Self::Timestamp(value) => serializer.collect_str(&value.format(TIMESTAMP_FORMAT)),
            Self::Flag(value) => serializer.serialize_u8(u8::from(*value)),
            Self::Text(value) => serializer.serialize_str(value),
        }
    }
}
