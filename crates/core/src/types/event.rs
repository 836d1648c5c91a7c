//! Events and the events-list search/sort rules.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use feruca::Collator;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::EventKey;

/// A bookable event as shown in the events list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    pub key: EventKey,
    /// Numeric id from the API, informational only.
    pub id: Option<i64>,
    /// Display title; empty when the API provided none.
    pub title: String,
    /// Raw ISO-8601 start as delivered by the API.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub short_description: Option<String>,
    /// Image GUID for the cover picture (see `CatalogClient::image_url`).
    pub cover_image: Option<String>,
}

impl Event {
    /// Parsed start date, or `None` when missing or unparseable.
    #[must_use]
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.start_date.as_deref().and_then(parse_date)
    }

    /// Case-insensitive substring match on title or location.
    ///
    /// `needle` must already be lowercased.
    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .location
                .as_deref()
                .is_some_and(|location| location.to_lowercase().contains(needle))
    }
}

/// Parse the date formats the API is known to emit.
///
/// Offsets are honoured; naive timestamps are taken as UTC.
#[must_use]
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Short human date, e.g. "Jan 15, 2025".
///
/// Missing dates render empty; unparseable ones are shown verbatim.
#[must_use]
pub fn format_event_date(raw: Option<&str>) -> String {
    match raw {
        None => String::new(),
        Some(raw) => parse_date(raw).map_or_else(
            || raw.to_string(),
            |date| date.format("%b %-d, %Y").to_string(),
        ),
    }
}

// =============================================================================
// Sorting
// =============================================================================

/// Sort order for the events list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Newest start date first; undated events last.
    #[default]
    Date,
    /// Alphabetical by title.
    Title,
}

/// Error returned when parsing an unknown [`SortBy`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid sort key: {0} (expected `date` or `title`)")]
pub struct SortByError(String);

impl FromStr for SortBy {
    type Err = SortByError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "title" => Ok(Self::Title),
            other => Err(SortByError(other.to_string())),
        }
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
            Self::Title => write!(f, "title"),
        }
    }
}

/// Locale-aware string comparison using the Unicode Collation Algorithm
/// with the CLDR root collation.
///
/// Accented letters sort with their base letter ("Été" before "Zomer"),
/// and lowercase comes before uppercase on otherwise equal strings.
#[must_use]
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    collate(&mut Collator::default(), a, b)
}

fn collate(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b).then_with(|| b.cmp(a))
}

// =============================================================================
// Filtering
// =============================================================================

/// Events whose title or location contains `query`, ignoring case and
/// surrounding whitespace. A blank query keeps everything.
#[must_use]
pub fn filter_events<'a>(events: &'a [Event], query: &str) -> Vec<&'a Event> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return events.iter().collect();
    }
    events.iter().filter(|event| event.matches(&needle)).collect()
}

/// Stable in-place sort of an event selection.
pub fn sort_events(events: &mut [&Event], sort_by: SortBy) {
    match sort_by {
        // Option orders None below Some, so reversing puts undated events last.
        SortBy::Date => events.sort_by_key(|event| std::cmp::Reverse(event.starts_at())),
        SortBy::Title => {
            let mut collator = Collator::default();
            events.sort_by(|a, b| collate(&mut collator, &a.title, &b.title));
        }
    }
}

/// Filter, then sort.
#[must_use]
pub fn filter_and_sort<'a>(events: &'a [Event], query: &str, sort_by: SortBy) -> Vec<&'a Event> {
    let mut selected = filter_events(events, query);
    sort_events(&mut selected, sort_by);
    selected
}
