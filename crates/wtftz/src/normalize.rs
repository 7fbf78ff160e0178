//! Timestamp normalization.
//!
//! Turns a raw timestamp token into an [`Instant`] by trying an explicit
//! ordered list of fallible strategies, first success wins:
//!
//! 1. epoch seconds (optionally fractional) → naive local instant
//! 2. a date string with an embedded zone abbreviation
//!    (`"Mon Dec 10 23:31:50 EST 2012"`) → instant localized into that zone
//! 3. freeform parse: RFC 3339/2822, common zoneless formats, bare times,
//!    then natural-language via `chrono-english`

use std::sync::OnceLock;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_english::{parse_date_string, Dialect};
use regex::Regex;

use crate::error::{Result, WtftzError};
use crate::instant::Instant;
use crate::parser::strip_trailing_zone_token;
use crate::timezones::{localize, ZoneTable};

/// Offset-carrying formats beyond RFC 3339/2822. An explicit offset makes the
/// result [`Instant::Zoned`] and authoritative over any source zone.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// Zoneless formats tried in order. `%.f` tolerates a missing fraction, so one
/// entry covers both `14:23:03` and `14:23:03.826437` tails.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    // asctime, e.g. "Mon Dec 10 23:31:50 2012"
    "%a %b %d %H:%M:%S %Y",
];

struct TimePatterns {
    // 22:15, 22:15:30
    time_24h: Regex,
    // 10pm, 10 PM, 10:30pm
    time_12h: Regex,
}

fn patterns() -> &'static TimePatterns {
    static PATTERNS: OnceLock<TimePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| TimePatterns {
        time_24h: Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?$").expect("valid regex"),
        time_12h: Regex::new(r"^(\d{1,2})(?::(\d{2}))?\s*(am|pm|AM|PM)$").expect("valid regex"),
    })
}

/// Normalize a raw timestamp token, anchoring date-less input (bare times,
/// relative expressions) at the current instant.
pub fn parse(raw: &str, zones: &ZoneTable) -> Result<Instant> {
    parse_at(raw, Utc::now(), zones)
}

/// Normalize a raw timestamp token against an explicit anchor.
///
/// The anchor supplies the date for date-less input only; fully specified
/// timestamps ignore it. Fails with
/// [`WtftzError::UnparseableTimestamp`] carrying the input verbatim when no
/// strategy matches.
pub fn parse_at(raw: &str, base: DateTime<Utc>, zones: &ZoneTable) -> Result<Instant> {
    let raw = raw.trim();
    try_epoch(raw)
        .or_else(|| try_embedded_zone(raw, base, zones))
        .or_else(|| try_freeform(raw, base))
        .ok_or_else(|| WtftzError::UnparseableTimestamp(raw.to_string()))
}

/// Strategy 1: seconds since the epoch, fractional part preserved to the
/// microsecond. Follows the system epoch rule: the result is the naive local
/// wall-clock time of that instant.
fn try_epoch(raw: &str) -> Option<Instant> {
    let seconds: f64 = raw.parse().ok()?;
    if !seconds.is_finite() {
        return None;
    }
    let micros = (seconds * 1_000_000.0).round() as i64;
    let utc = DateTime::from_timestamp_micros(micros)?;
    Some(Instant::Naive(utc.with_timezone(&Local).naive_local()))
}

/// Strategy 2: a trailing zone abbreviation embedded in the timestamp text.
///
/// Reuses the splitter's token recovery; the token must resolve through the
/// zone table or the whole strategy falls through. When the remainder parses
/// with an explicit offset, that offset wins and the embedded token is
/// ignored.
fn try_embedded_zone(raw: &str, base: DateTime<Utc>, zones: &ZoneTable) -> Option<Instant> {
    let (token, remainder) = strip_trailing_zone_token(raw)?;
    let tz = zones.resolve(&token)?;
    match try_freeform(&remainder, base)? {
        zoned @ Instant::Zoned(_) => Some(zoned),
        Instant::Naive(naive) => Some(Instant::Zoned(localize(naive, tz)?.fixed_offset())),
    }
}

/// Strategy 3: best-effort freeform parse.
fn try_freeform(raw: &str, base: DateTime<Utc>) -> Option<Instant> {
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(Instant::Zoned(dt));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(Instant::Zoned(dt));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(Instant::Zoned(dt));
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Instant::Naive(dt));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(Instant::Naive(date.and_hms_opt(0, 0, 0)?));
    }

    if let Some(time) = try_bare_time(raw) {
        return Some(Instant::Naive(base.date_naive().and_time(time)));
    }

    parse_date_string(raw, base, Dialect::Us)
        .ok()
        .map(|dt| Instant::Naive(dt.naive_utc()))
}

/// Parse a bare time of day: `10pm`, `10:30 PM`, `22:15`, `22:15:30`.
fn try_bare_time(raw: &str) -> Option<NaiveTime> {
    if let Some(caps) = patterns().time_24h.captures(raw) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        let second: u32 = caps.get(3).map_or(Some(0), |m| m.as_str().parse().ok())?;
        return NaiveTime::from_hms_opt(hour, minute, second);
    }
    if let Some(caps) = patterns().time_12h.captures(raw) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
        let is_pm = caps[3].eq_ignore_ascii_case("pm");
        let hour24 = match (hour, is_pm) {
            (12, true) => 12,
            (12, false) => 0,
            (h, true) => h + 12,
            (h, false) => h,
        };
        return NaiveTime::from_hms_opt(hour24, minute, 0);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone, Timelike};

    fn table() -> ZoneTable {
        ZoneTable::with_common_zones()
    }

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2012, 12, 10, 12, 0, 0).unwrap()
    }

    fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_epoch_seconds_is_naive_local() {
        let expected = DateTime::from_timestamp(1355182310, 0)
            .unwrap()
            .with_timezone(&Local)
            .naive_local();
        let parsed = parse_at("1355182310", base(), &table()).unwrap();
        assert_eq!(parsed, Instant::Naive(expected));
    }

    #[test]
    fn test_epoch_fractional_microseconds_preserved() {
        let expected = DateTime::from_timestamp_micros(1_355_182_310_826_437)
            .unwrap()
            .with_timezone(&Local)
            .naive_local();
        let parsed = parse_at("1355182310.826437", base(), &table()).unwrap();
        assert_eq!(parsed, Instant::Naive(expected));
        assert_eq!(parsed.naive().and_utc().timestamp_subsec_micros(), 826_437);
    }

    #[test]
    fn test_epoch_rejects_non_finite() {
        assert!(try_epoch("inf").is_none());
        assert!(try_epoch("NaN").is_none());
    }

    #[test]
    fn test_iso_without_offset_is_naive() {
        let parsed = parse_at("2012-12-23T14:23:03.826437", base(), &table()).unwrap();
        assert_eq!(
            parsed.naive(),
            naive(2012, 12, 23, 14, 23, 3).with_nanosecond(826_437_000).unwrap()
        );
        assert_eq!(parsed.offset(), None);
    }

    #[test]
    fn test_iso_with_offset_is_zoned() {
        let parsed = parse_at("2012-12-23T14:23:03-05:00", base(), &table()).unwrap();
        assert_eq!(parsed.offset(), FixedOffset::west_opt(5 * 3600));
        assert_eq!(parsed.naive(), naive(2012, 12, 23, 14, 23, 3));
    }

    #[test]
    fn test_date_only() {
        let parsed = parse_at("2012-12-23", base(), &table()).unwrap();
        assert_eq!(parsed, Instant::Naive(naive(2012, 12, 23, 0, 0, 0)));
    }

    #[test]
    fn test_embedded_zone_localizes_remainder() {
        let parsed = parse_at("Mon Dec 10 23:31:50 EST 2012", base(), &table()).unwrap();
        // Wall clock preserved, anchored at the December US/Eastern offset.
        assert_eq!(parsed.naive(), naive(2012, 12, 10, 23, 31, 50));
        assert_eq!(parsed.offset(), FixedOffset::west_opt(5 * 3600));
    }

    #[test]
    fn test_embedded_token_that_is_no_zone_falls_through() {
        // "Dec" is recovered as a candidate but resolves to nothing, so the
        // full string parses via the asctime format instead.
        let parsed = parse_at("Mon Dec 10 23:31:50 2012", base(), &table()).unwrap();
        assert_eq!(parsed, Instant::Naive(naive(2012, 12, 10, 23, 31, 50)));
    }

    #[test]
    fn test_explicit_offset_beats_embedded_token() {
        let parsed = parse_at("2012-12-23T14:23:03-05:00 pst", base(), &table()).unwrap();
        assert_eq!(parsed.offset(), FixedOffset::west_opt(5 * 3600));
    }

    #[test]
    fn test_bare_time_anchors_on_base_date() {
        let parsed = parse_at("10pm", base(), &table()).unwrap();
        assert_eq!(parsed, Instant::Naive(naive(2012, 12, 10, 22, 0, 0)));

        let parsed = parse_at("10:30 PM", base(), &table()).unwrap();
        assert_eq!(parsed, Instant::Naive(naive(2012, 12, 10, 22, 30, 0)));

        let parsed = parse_at("22:15:30", base(), &table()).unwrap();
        assert_eq!(parsed, Instant::Naive(naive(2012, 12, 10, 22, 15, 30)));
    }

    #[test]
    fn test_twelve_am_is_midnight() {
        let parsed = parse_at("12am", base(), &table()).unwrap();
        assert_eq!(parsed.naive().hour(), 0);
    }

    #[test]
    fn test_rfc2822() {
        let parsed = parse_at("Mon, 10 Dec 2012 23:31:50 -0500", base(), &table()).unwrap();
        assert_eq!(parsed.offset(), FixedOffset::west_opt(5 * 3600));
        assert_eq!(parsed.naive(), naive(2012, 12, 10, 23, 31, 50));
    }

    #[test]
    fn test_unparseable_keeps_input_verbatim() {
        let err = parse_at("certainly not a timestamp!!", base(), &table()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot parse timestamp \"certainly not a timestamp!!\""
        );
    }

    #[test]
    fn test_offset_of_zoned_result_reflects_dst() {
        // July is EDT, not EST, even though the string says "est" — the
        // nickname names the zone, the instant decides the offset.
        let parsed = parse_at("Mon Jul 09 23:31:50 EST 2012", base(), &table()).unwrap();
        assert_eq!(parsed.offset(), FixedOffset::west_opt(4 * 3600));
    }
}
