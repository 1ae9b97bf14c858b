//! Conversion rules shared by groups of fields
//!
//! Each rule takes the raw sub-captures of one field and yields either a canonical value,
//! an explicit "no value" (`Ok(None)`), or the reason the sub-captures could not be used.

use super::CanonicalValue;
use super::units::{RateUnit, TimeUnit};
use chrono::NaiveDateTime;
use core::str::FromStr;
use std::borrow::Cow;

const REPORT_TIMESTAMP_FORMAT: &str = "%d-%b-%Y %H:%M:%S";
const COMPRESSION_ABSENT: &str = "None";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("no value captured")]
    Missing,

    #[error("expected {expected} values, found {found}")]
    Arity { expected: &'static str, found: usize },

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{0} is negative")]
    Negative(i64),

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("unexpected value '{0}', expected 'yes' or 'no'")]
    UnknownToken(String),

    #[error("value is blank")]
    Blank,

    #[error("'{0}' is not a timestamp of the form DD-Mon-YYYY HH:MM:SS")]
    BadTimestamp(String),

    #[error("value out of range")]
    Overflow,
}

pub type Conversion = Result<Option<CanonicalValue>, ConversionError>;

fn first(values: &[String]) -> Result<&str, ConversionError> {
    values.first().map(String::as_str).ok_or(ConversionError::Missing)
}

fn strip_separators(text: &str) -> Cow<'_, str> {
    if text.contains(',') {
        Cow::Owned(text.replace(',', ""))
    } else {
        Cow::Borrowed(text)
    }
}

fn parse_integer(text: &str) -> Result<i64, ConversionError> {
    strip_separators(text.trim())
        .parse()
        .ok()
        .ok_or_else(|| ConversionError::NotANumber(text.to_owned()))
}

fn parse_float(text: &str) -> Result<f64, ConversionError> {
    strip_separators(text.trim())
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ConversionError::NotANumber(text.to_owned()))
}

/// The first sub-capture, verbatim.
pub fn text(values: &[String]) -> Conversion {
    Ok(Some(CanonicalValue::Text(first(values)?.to_owned())))
}

/// An integer, possibly written with thousands separators.
pub fn integer(values: &[String]) -> Conversion {
    Ok(Some(CanonicalValue::Integer(parse_integer(first(values)?)?)))
}

/// A count that cannot meaningfully be negative.
pub fn count(values: &[String]) -> Conversion {
    let value = parse_integer(first(values)?)?;
    if value < 0 {
        return Err(ConversionError::Negative(value));
    }

    Ok(Some(CanonicalValue::Integer(value)))
}

/// A report timestamp such as `05-Mar-2024 23:05:00`.
pub fn timestamp(values: &[String]) -> Conversion {
    let raw = first(values)?.trim();
    let normalized = raw.replacen("-Sept-", "-Sep-", 1);

    NaiveDateTime::parse_from_str(&normalized, REPORT_TIMESTAMP_FORMAT)
        .ok()
        .map(|ts| Some(CanonicalValue::Timestamp(ts)))
        .ok_or_else(|| ConversionError::BadTimestamp(raw.to_owned()))
}

/// A duration given as (magnitude, unit) pairs, summed into seconds.
///
/// A single unknown unit rejects the whole duration rather than yielding a partial sum.
pub fn elapsed(values: &[String]) -> Conversion {
    if values.is_empty() {
        return Err(ConversionError::Missing);
    }

    if values.len() % 2 != 0 {
        return Err(ConversionError::Arity {
            expected: "an even number of",
            found: values.len(),
        });
    }

    let mut total: u64 = 0;
    let (pairs, _) = values.as_chunks::<2>();
    for [magnitude, unit] in pairs {
        let magnitude: u64 = magnitude.trim().parse().ok().ok_or_else(|| ConversionError::NotANumber(magnitude.clone()))?;
        let unit = TimeUnit::from_str(unit.trim()).ok().ok_or_else(|| ConversionError::UnknownUnit(unit.clone()))?;

        total = magnitude
            .checked_mul(unit.seconds())
            .and_then(|seconds| total.checked_add(seconds))
            .ok_or(ConversionError::Overflow)?;
    }

    Ok(Some(CanonicalValue::Seconds(total)))
}

/// A transfer rate as (magnitude, unit), normalized to KB/s.
pub fn rate(values: &[String]) -> Conversion {
    let [magnitude, unit, ..] = values else {
        return Err(if values.is_empty() {
            ConversionError::Missing
        } else {
            ConversionError::Arity {
                expected: "2",
                found: values.len(),
            }
        });
    };

    let magnitude = parse_float(magnitude)?;
    let unit = RateUnit::from_str(unit.trim()).ok().ok_or_else(|| ConversionError::UnknownUnit(unit.clone()))?;

    Ok(Some(CanonicalValue::Float(magnitude * unit.multiplier())))
}

/// A compression percentage, where `None` means compression was not used.
pub fn compression(values: &[String]) -> Conversion {
    let value = first(values)?.trim();
    if value == COMPRESSION_ABSENT {
        return Ok(None);
    }

    Ok(Some(CanonicalValue::Float(parse_float(value)?)))
}

/// Exactly `yes` or `no`.
pub fn yes_no(values: &[String]) -> Conversion {
    match first(values)?.trim() {
        "yes" => Ok(Some(CanonicalValue::Flag(true))),
        "no" => Ok(Some(CanonicalValue::Flag(false))),
        other => Err(ConversionError::UnknownToken(other.to_owned())),
    }
}

/// A daemon termination status; anything starting with `OK` is a success.
pub fn status(values: &[String]) -> Conversion {
    let value = non_blank(values)?;
    Ok(Some(CanonicalValue::Flag(value.starts_with("OK"))))
}

/// The overall job termination; any mention of `Error` is a failure.
pub fn termination(values: &[String]) -> Conversion {
    let value = non_blank(values)?;
    Ok(Some(CanonicalValue::Flag(!value.contains("Error"))))
}

fn non_blank(values: &[String]) -> Result<&str, ConversionError> {
    let value = first(values)?.trim();
    if value.is_empty() {
        return Err(ConversionError::Blank);
    }

    Ok(value)
}
