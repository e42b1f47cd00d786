//! Public feed filters.
//!
//! Categories combine with AND; values inside one category combine with OR.
//! An empty category places no constraint. [`PublicTripFilters::matches`] is
//! the reference predicate; storage adapters translate the same rules into
//! their own query language.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::trips::Trip;

/// Inclusive day-count range with optional open ends.
///
/// # Examples
/// ```
/// use tripboard::domain::public_trips::DurationRange;
///
/// let range: DurationRange = "10-14".parse().expect("valid range");
/// assert!(range.contains(12));
/// let open: DurationRange = "15-".parse().expect("valid range");
/// assert!(open.contains(30));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DurationRange {
    pub min_days: Option<i32>,
    pub max_days: Option<i32>,
}

impl DurationRange {
    /// Whether `days` falls inside the range.
    pub fn contains(&self, days: i32) -> bool {
        self.min_days.is_none_or(|min| days >= min) && self.max_days.is_none_or(|max| days <= max)
    }

    /// A range with neither bound constrains nothing.
    pub fn is_unbounded(&self) -> bool {
        self.min_days.is_none() && self.max_days.is_none()
    }
}

/// Error raised when a duration token cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid duration range `{input}`; expected forms like 1-3, 15- or 7")]
pub struct ParseDurationRangeError {
    /// Rejected token.
    pub input: String,
}

impl FromStr for DurationRange {
    type Err = ParseDurationRangeError;

    /// Parse `min-max`, `min-`, `-max` or a single exact day count.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseDurationRangeError {
            input: value.to_owned(),
        };
        let bound = |raw: &str| -> Result<Option<i32>, ParseDurationRangeError> {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            raw.parse::<i32>()
                .ok()
                .filter(|days| *days >= 0)
                .map(Some)
                .ok_or_else(invalid)
        };

        let range = match value.split_once('-') {
            Some((min, max)) => Self {
                min_days: bound(min)?,
                max_days: bound(max)?,
            },
            None => {
                let exact = bound(value)?;
                Self {
                    min_days: exact,
                    max_days: exact,
                }
            }
        };
        if range.is_unbounded() {
            return Err(invalid());
        }
        if let (Some(min), Some(max)) = (range.min_days, range.max_days) {
            if min > max {
                return Err(invalid());
            }
        }
        Ok(range)
    }
}

/// Filters applied to the public feed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PublicTripFilters {
    /// Case-insensitive substring over name, summary and description.
    pub query: Option<String>,
    /// Destination cities, compared case-insensitively.
    pub cities: Vec<String>,
    pub durations: Vec<DurationRange>,
    /// Calendar months 1 to 12.
    pub months: Vec<u32>,
    pub traveler_types: Vec<String>,
    pub tags: Vec<String>,
    pub seasons: Vec<String>,
    pub budget_levels: Vec<String>,
    pub paces: Vec<String>,
}

impl PublicTripFilters {
    /// Trimmed, non-empty search text.
    pub fn search_text(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// Duration ranges that actually bound something.
    pub fn effective_durations(&self) -> impl Iterator<Item = &DurationRange> {
        self.durations.iter().filter(|range| !range.is_unbounded())
    }

    /// Whether `trip` satisfies every populated category.
    ///
    /// Visibility is not checked here; callers restrict to public trips first.
    pub fn matches(&self, trip: &Trip) -> bool {
        self.matches_query(trip)
            && self.matches_cities(trip)
            && self.matches_durations(trip)
            && self.matches_months(trip)
            && any_equal(&self.traveler_types, trip.details.traveler_type.as_deref())
            && any_overlap(&self.tags, &trip.details.tags)
            && any_overlap(&self.seasons, &trip.details.seasons)
            && any_equal(&self.budget_levels, trip.details.budget_level.as_deref())
            && any_equal(&self.paces, trip.details.pace.as_deref())
    }

    fn matches_query(&self, trip: &Trip) -> bool {
        let Some(text) = self.search_text() else {
            return true;
        };
        let needle = text.to_lowercase();
        let details = &trip.details;
        std::iter::once(Some(details.name.as_str()))
            .chain([details.summary.as_deref(), details.description.as_deref()])
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_cities(&self, trip: &Trip) -> bool {
        if self.cities.is_empty() {
            return true;
        }
        trip.destinations.iter().any(|destination| {
            self.cities
                .iter()
                .any(|city| city.trim().to_lowercase() == destination.city.to_lowercase())
        })
    }

    fn matches_durations(&self, trip: &Trip) -> bool {
        let mut ranges = self.effective_durations().peekable();
        if ranges.peek().is_none() {
            return true;
        }
        let days = trip.duration_days();
        ranges.any(|range| range.contains(days))
    }

    fn matches_months(&self, trip: &Trip) -> bool {
        if self.months.is_empty() {
            return true;
        }
        trip.months().any(|month| self.months.contains(&month))
    }
}

fn any_equal(wanted: &[String], value: Option<&str>) -> bool {
    if wanted.is_empty() {
        return true;
    }
    value.is_some_and(|value| wanted.iter().any(|candidate| candidate == value))
}

fn any_overlap(wanted: &[String], values: &[String]) -> bool {
    wanted.is_empty() || values.iter().any(|value| wanted.contains(value))
}
