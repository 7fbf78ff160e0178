//! Free-text query decomposition.
//!
//! Splits a query like `"1355182310 from utc to pst"` into its timestamp text
//! and optional source/destination zone tokens. This is a best-effort
//! extractor, never a hard parser: a query with no recognizable shape comes
//! back as "the whole string is the timestamp, no zones".

use std::sync::OnceLock;

use regex::Regex;

/// The pieces extracted from a free-text conversion query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParts {
    /// The timestamp text left after zone tokens were removed.
    pub timestamp: String,
    /// The source zone token, if one was found.
    pub from_zone: Option<String>,
    /// The destination zone token, if one was found.
    pub to_zone: Option<String>,
}

struct QueryPatterns {
    /// The standalone word "to" (case-sensitive).
    to_word: Regex,
    /// The "from" keyword followed by a zone-like run of letters/slashes/spaces.
    from_zone: Regex,
}

fn patterns() -> &'static QueryPatterns {
    static PATTERNS: OnceLock<QueryPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| QueryPatterns {
        to_word: Regex::new(r"\bto\b").expect("valid regex"),
        from_zone: Regex::new(r"\bfrom\s+([A-Za-z/ ]+)").expect("valid regex"),
    })
}

/// Split a free-text query into `(timestamp, from_zone, to_zone)`.
///
/// The **last** standalone `to` delimits the destination zone; an explicit
/// `from <zone>` fragment names the source zone, and failing that the
/// rightmost trailing zone-shaped token (letters and `/` only, length > 1) is
/// recovered as an implicit source zone. Without a `to` delimiter the whole
/// query is returned as timestamp text.
///
/// ```
/// use wtftz::free_text;
///
/// let parts = free_text("Mon Dec 10 23:31:50 EST 2012 to UTC");
/// assert_eq!(parts.timestamp, "Mon Dec 10 23:31:50 2012");
/// assert_eq!(parts.from_zone.as_deref(), Some("EST"));
/// assert_eq!(parts.to_zone.as_deref(), Some("UTC"));
/// ```
pub fn free_text(query: &str) -> QueryParts {
    let Some(to_match) = patterns().to_word.find_iter(query).last() else {
        return QueryParts {
            timestamp: query.trim().to_string(),
            from_zone: None,
            to_zone: None,
        };
    };

    let to_zone = query[to_match.end()..].trim();
    let to_zone = (!to_zone.is_empty()).then(|| to_zone.to_string());
    let mut rest = query[..to_match.start()].to_string();

    let from_zone = if let Some(caps) = patterns().from_zone.captures(&rest) {
        let token = caps[1].trim().to_string();
        let matched = caps.get(0).expect("whole match").range();
        rest.replace_range(matched, "");
        Some(token)
    } else if let Some((token, remainder)) = strip_trailing_zone_token(&rest) {
        rest = remainder;
        Some(token)
    } else {
        None
    };

    QueryParts {
        timestamp: rest.trim().to_string(),
        from_zone,
        to_zone,
    }
}

/// Recover a zone-abbreviation-like token from the end of `text`.
///
/// Scans whitespace-delimited tokens from the end; the first one made solely
/// of letters and `/` with length > 1 is returned together with the text
/// without it. Single-letter candidates are rejected to avoid false positives
/// on stray letters.
pub(crate) fn strip_trailing_zone_token(text: &str) -> Option<(String, String)> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let idx = tokens.iter().rposition(|token| {
        token.len() > 1 && token.chars().all(|c| c.is_ascii_alphabetic() || c == '/')
    })?;
    let token = tokens[idx].to_string();
    let mut remainder = tokens;
    remainder.remove(idx);
    Some((token, remainder.join(" ")))
}
