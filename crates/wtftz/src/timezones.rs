//! Timezone nickname resolution and localization.

use std::collections::HashMap;

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// Nickname → IANA pairs seeded into [`ZoneTable::with_common_zones`].
/// Sorry, Australia: EST means US/Eastern here.
const COMMON_ZONES: &[(&str, &str)] = &[
    ("est", "US/Eastern"),
    ("edt", "US/Eastern"),
    ("eastern", "US/Eastern"),
    ("cst", "US/Central"),
    ("cdt", "US/Central"),
    ("central", "US/Central"),
    ("mst", "US/Mountain"),
    ("mdt", "US/Mountain"),
    ("mountain", "US/Mountain"),
    ("pst", "US/Pacific"),
    ("pdt", "US/Pacific"),
    ("pacific", "US/Pacific"),
    ("utc", "UTC"),
    ("gmt", "UTC"),
    ("universal", "UTC"),
    ("one timezone to rule them all", "UTC"),
];

/// What the conversion engine does when a zone token resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownZonePolicy {
    /// Fall back to UTC. The fallback is logged, never silent.
    #[default]
    Utc,
    /// Return [`WtftzError::UnknownZone`].
    ///
    /// [`WtftzError::UnknownZone`]: crate::error::WtftzError::UnknownZone
    Strict,
}

/// Immutable nickname → zone table, built once and passed by reference.
#[derive(Debug, Clone)]
pub struct ZoneTable {
    nicknames: HashMap<String, Tz>,
}

impl Default for ZoneTable {
    fn default() -> Self {
        Self::with_common_zones()
    }
}

impl ZoneTable {
    /// An empty table: only canonical IANA identifiers resolve.
    pub fn empty() -> Self {
        ZoneTable {
            nicknames: HashMap::new(),
        }
    }

    /// The stock table of common US zone nicknames plus UTC aliases.
    pub fn with_common_zones() -> Self {
        let nicknames = COMMON_ZONES
            .iter()
            .filter_map(|(name, zone)| Some((name.to_string(), zone.parse::<Tz>().ok()?)))
            .collect();
        ZoneTable { nicknames }
    }

    /// Add a nickname, lowercased for case-insensitive lookup.
    pub fn with_nickname(mut self, name: &str, zone: Tz) -> Self {
        self.nicknames.insert(name.to_lowercase(), zone);
        self
    }

    /// Resolve a free-text zone token to a concrete zone.
    ///
    /// Tries the nickname table first (case-insensitive), then a direct IANA
    /// parse. Returns `None` for unrecognized tokens — callers decide whether
    /// that falls back or fails.
    pub fn resolve(&self, token: &str) -> Option<Tz> {
        let token = token.trim();
        if let Some(tz) = self.nicknames.get(&token.to_lowercase()) {
            return Some(*tz);
        }
        token.parse::<Tz>().ok()
    }
}

/// Anchor a naive wall-clock time in a zone.
///
/// An ambiguous time (the repeated fall-back hour) resolves to the earlier
/// offset; a nonexistent time (the spring-forward gap) yields `None`.
pub(crate) fn localize(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earlier, _) => Some(earlier),
        LocalResult::None => None,
    }
}
