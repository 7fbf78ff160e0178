//! The timestamp representations flowing through a conversion.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

/// A parsed timestamp: either anchored to a concrete UTC offset or zoneless.
///
/// Once an `Instant` carries an offset parsed from the original text (e.g. an
/// ISO string ending in `-05:00`), that offset is authoritative — conversion
/// never re-anchors it to a caller-supplied source zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Instant {
    /// An instant with the UTC offset it was parsed or converted with.
    Zoned(DateTime<FixedOffset>),
    /// Wall-clock fields only, not yet anchored to any zone.
    Naive(NaiveDateTime),
}

impl Instant {
    /// The wall-clock fields, dropping any offset annotation.
    pub fn naive(self) -> NaiveDateTime {
        match self {
            Instant::Zoned(dt) => dt.naive_local(),
            Instant::Naive(dt) => dt,
        }
    }

    /// The UTC offset, if this instant carries one.
    pub fn offset(self) -> Option<FixedOffset> {
        match self {
            Instant::Zoned(dt) => Some(*dt.offset()),
            Instant::Naive(_) => None,
        }
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instant::Zoned(dt) => write!(f, "{}", dt.to_rfc3339()),
            Instant::Naive(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

impl From<DateTime<FixedOffset>> for Instant {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Instant::Zoned(dt)
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(dt: DateTime<Utc>) -> Self {
        Instant::Zoned(dt.fixed_offset())
    }
}

impl From<DateTime<Tz>> for Instant {
    fn from(dt: DateTime<Tz>) -> Self {
        Instant::Zoned(dt.fixed_offset())
    }
}

impl From<NaiveDateTime> for Instant {
    fn from(dt: NaiveDateTime) -> Self {
        Instant::Naive(dt)
    }
}

/// Timestamp input accepted by the conversion engine: raw text, or an
/// already-structured instant that passes through normalization untouched.
#[derive(Debug, Clone, Copy)]
pub enum Timestamp<'a> {
    Text(&'a str),
    Parsed(Instant),
}

impl<'a> From<&'a str> for Timestamp<'a> {
    fn from(raw: &'a str) -> Self {
        Timestamp::Text(raw)
    }
}

impl<'a> From<&'a String> for Timestamp<'a> {
    fn from(raw: &'a String) -> Self {
        Timestamp::Text(raw)
    }
}

impl From<Instant> for Timestamp<'static> {
    fn from(instant: Instant) -> Self {
        Timestamp::Parsed(instant)
    }
}

impl From<NaiveDateTime> for Timestamp<'static> {
    fn from(dt: NaiveDateTime) -> Self {
        Timestamp::Parsed(dt.into())
    }
}

impl From<DateTime<Utc>> for Timestamp<'static> {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp::Parsed(dt.into())
    }
}

impl From<DateTime<FixedOffset>> for Timestamp<'static> {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Timestamp::Parsed(dt.into())
    }
}

impl From<DateTime<Tz>> for Timestamp<'static> {
    fn from(dt: DateTime<Tz>) -> Self {
        Timestamp::Parsed(dt.into())
    }
}
