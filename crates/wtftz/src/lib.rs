//! # wtftz
//!
//! Convert a timestamp from one timezone to another.
//!
//! Accepts loosely-formatted input — epoch seconds, ISO-8601, natural-language
//! date strings, bare times — and free-text queries like
//! `"1355182310 from utc to pst"` or `"Mon Dec 10 23:31:50 EST 2012 to UTC"`.
//! The heavy lifting of calendar arithmetic and DST rules is delegated to
//! `chrono` and `chrono-tz`; this crate decides which string fragments are
//! timestamp vs. timezone and how a parsed instant combines with a resolved
//! zone.
//!
//! ```
//! use wtftz::convert_free;
//!
//! let converted = convert_free("2012-12-23T14:23:03 from utc to est").unwrap();
//! assert_eq!(converted.to_string(), "2012-12-23 09:23:03");
//! ```
//!
//! ## Modules
//!
//! - [`parser`] — free-text query → (timestamp text, from zone, to zone)
//! - [`normalize`] — raw timestamp token → [`Instant`], via an ordered
//!   strategy chain (epoch, embedded zone abbreviation, freeform parse)
//! - [`timezones`] — nickname table, zone resolution, localization policy
//! - [`converter`] — orchestration: resolve zones, normalize, re-anchor,
//!   convert offsets
//! - [`instant`] — the zoned/naive timestamp representations
//! - [`error`] — error types

pub mod converter;
pub mod error;
pub mod instant;
pub mod normalize;
pub mod parser;
pub mod timezones;

pub use converter::{convert, convert_free, Converter};
pub use error::{Result, WtftzError};
pub use instant::{Instant, Timestamp};
pub use normalize::{parse, parse_at};
pub use parser::{free_text, QueryParts};
pub use timezones::{UnknownZonePolicy, ZoneTable};
