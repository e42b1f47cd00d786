//! Public feed ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::trips::Trip;

/// Sort key for the public feed.
///
/// Every order ends with a descending `updated_at` tie-break followed by the
/// trip id so pages never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum PublicTripSort {
    /// Most liked first.
    #[default]
    Featured,
    /// Most recently updated first.
    MostRecent,
    /// Fewest days first.
    Shortest,
    /// Most days first.
    Longest,
}

impl PublicTripSort {
    /// Parse a client-supplied key, falling back to [`Self::Featured`].
    ///
    /// # Examples
    /// ```
    /// use tripboard::domain::public_trips::PublicTripSort;
    ///
    /// assert_eq!(PublicTripSort::parse_or_default(Some("longest")), PublicTripSort::Longest);
    /// assert_eq!(PublicTripSort::parse_or_default(Some("spicy")), PublicTripSort::Featured);
    /// assert_eq!(PublicTripSort::parse_or_default(None), PublicTripSort::Featured);
    /// ```
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("mostRecent") => Self::MostRecent,
            Some("shortest") => Self::Shortest,
            Some("longest") => Self::Longest,
            _ => Self::Featured,
        }
    }

    /// Wire name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::MostRecent => "mostRecent",
            Self::Shortest => "shortest",
            Self::Longest => "longest",
        }
    }

    /// Total order between two trips under this key.
    pub fn compare(&self, left: &Trip, right: &Trip) -> Ordering {
        let primary = match self {
            Self::Featured => right.likes.cmp(&left.likes),
            Self::MostRecent => Ordering::Equal,
            Self::Shortest => left.duration_days().cmp(&right.duration_days()),
            Self::Longest => right.duration_days().cmp(&left.duration_days()),
        };
        primary
            .then_with(|| right.updated_at.cmp(&left.updated_at))
            .then_with(|| left.id.cmp(&right.id))
    }
}
