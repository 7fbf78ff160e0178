//! The conversion engine: zone resolution, localization, offset conversion.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::error::{Result, WtftzError};
use crate::instant::{Instant, Timestamp};
use crate::normalize;
use crate::parser;
use crate::timezones::{localize, UnknownZonePolicy, ZoneTable};

/// Converts timestamps between zones against an immutable nickname table.
///
/// Construction is cheap and every method is a pure function of its inputs
/// plus the table, so a single `Converter` can be shared freely across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    zones: ZoneTable,
    unknown_zone: UnknownZonePolicy,
}

impl Converter {
    pub fn new(zones: ZoneTable, unknown_zone: UnknownZonePolicy) -> Self {
        Converter {
            zones,
            unknown_zone,
        }
    }

    /// The nickname table conversions resolve against.
    pub fn zones(&self) -> &ZoneTable {
        &self.zones
    }

    /// Convert `timestamp` from `from_tz` to `to_tz`.
    ///
    /// Empty zone tokens default to `"utc"`. A timestamp that parses with an
    /// explicit offset keeps it — `from_tz` only anchors zoneless input. With
    /// `naive` the result is stripped to wall-clock fields in the destination
    /// zone; otherwise it keeps the destination offset.
    ///
    /// Unresolvable zone tokens follow the configured
    /// [`UnknownZonePolicy`]: the default falls back to UTC with a logged
    /// warning, strict mode returns [`WtftzError::UnknownZone`].
    pub fn convert<'a>(
        &self,
        timestamp: impl Into<Timestamp<'a>>,
        to_tz: &str,
        from_tz: &str,
        naive: bool,
    ) -> Result<Instant> {
        self.convert_at(timestamp, to_tz, from_tz, naive, Utc::now())
    }

    /// [`convert`](Self::convert) with an explicit anchor for date-less input
    /// such as bare times.
    pub fn convert_at<'a>(
        &self,
        timestamp: impl Into<Timestamp<'a>>,
        to_tz: &str,
        from_tz: &str,
        naive: bool,
        base: DateTime<Utc>,
    ) -> Result<Instant> {
        let from = self.resolve_or_fallback(from_tz)?;
        let to = self.resolve_or_fallback(to_tz)?;

        let instant = match timestamp.into() {
            Timestamp::Text(raw) => normalize::parse_at(raw, base, &self.zones)?,
            Timestamp::Parsed(instant) => instant,
        };

        let anchored: DateTime<FixedOffset> = match instant {
            // An embedded offset is authoritative over `from_tz`.
            Instant::Zoned(dt) => dt,
            Instant::Naive(wall) => localize(wall, from)
                .ok_or_else(|| WtftzError::NonexistentLocalTime {
                    time: wall,
                    zone: from.name().to_string(),
                })?
                .fixed_offset(),
        };

        let converted = anchored.with_timezone(&to);
        Ok(if naive {
            Instant::Naive(converted.naive_local())
        } else {
            Instant::Zoned(converted.fixed_offset())
        })
    }

    /// Split a free-text query and convert it, absent zone tokens defaulting
    /// to UTC.
    pub fn convert_free(&self, query: &str, naive: bool) -> Result<Instant> {
        let parts = parser::free_text(query);
        self.convert(
            parts.timestamp.as_str(),
            parts.to_zone.as_deref().unwrap_or("utc"),
            parts.from_zone.as_deref().unwrap_or("utc"),
            naive,
        )
    }

    fn resolve_or_fallback(&self, token: &str) -> Result<Tz> {
        let token = if token.trim().is_empty() { "utc" } else { token };
        match self.zones.resolve(token) {
            Some(tz) => Ok(tz),
            None => match self.unknown_zone {
                UnknownZonePolicy::Utc => {
                    warn!(zone = token, "unknown timezone, falling back to UTC");
                    Ok(Tz::UTC)
                }
                UnknownZonePolicy::Strict => Err(WtftzError::UnknownZone(token.to_string())),
            },
        }
    }
}

/// Convert a timestamp with the stock nickname table, returning wall-clock
/// fields in the destination zone.
///
/// ```
/// use wtftz::convert;
///
/// let converted = convert("2012-12-23T14:23:03", "est", "utc").unwrap();
/// assert_eq!(converted.format("%H:%M:%S").to_string(), "09:23:03");
/// ```
pub fn convert<'a>(
    timestamp: impl Into<Timestamp<'a>>,
    to_tz: &str,
    from_tz: &str,
) -> Result<NaiveDateTime> {
    Ok(Converter::default()
        .convert(timestamp, to_tz, from_tz, true)?
        .naive())
}

/// Convert a free-text query like `"1355182310 from utc to pst"` with the
/// stock nickname table, returning wall-clock fields in the destination zone.
pub fn convert_free(query: &str) -> Result<NaiveDateTime> {
    Ok(Converter::default().convert_free(query, true)?.naive())
}
