//! Read projections of public trips.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::User;
use crate::domain::trips::{DayPlan, Destination, Trip, TripId, Visibility};

/// Feed card for one public trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicTripSummary {
    pub id: TripId,
    pub title: String,
    pub slug: Option<String>,
    /// Cover image, else hero image.
    pub cover_image_url: Option<String>,
    pub summary: Option<String>,
    /// Distinct destination cities in route order.
    pub origin_cities: Vec<String>,
    pub duration_days: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_month: u32,
    pub end_month: u32,
    pub traveler_type: Option<String>,
    pub tags: Vec<String>,
    pub seasons: Vec<String>,
    pub budget_level: Option<String>,
    pub pace: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub likes: i32,
    /// Present only for authenticated callers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_liked: Option<bool>,
}

impl PublicTripSummary {
    /// Project `trip` into a feed card.
    pub fn from_trip(trip: &Trip, has_liked: Option<bool>) -> Self {
        let details = &trip.details;
        Self {
            id: trip.id,
            title: details.name.clone(),
            slug: details.slug.clone(),
            cover_image_url: details
                .cover_image
                .clone()
                .or_else(|| details.hero_image.clone()),
            summary: details.summary.clone(),
            origin_cities: trip.origin_cities(),
            duration_days: trip.duration_days(),
            start_date: details.start_date,
            end_date: details.end_date,
            start_month: details.start_date.month(),
            end_month: details.end_date.month(),
            traveler_type: details.traveler_type.clone(),
            tags: details.tags.clone(),
            seasons: details.seasons.clone(),
            budget_level: details.budget_level.clone(),
            pace: details.pace.clone(),
            updated_at: trip.updated_at,
            likes: trip.likes,
            has_liked,
        }
    }
}

/// Public attribution for a trip author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripAuthor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl From<&User> for TripAuthor {
    fn from(user: &User) -> Self {
        Self {
            name: user.author_name().to_owned(),
            avatar_url: user.avatar_url.clone(),
            city: user.home_city.clone(),
        }
    }
}

/// Bookkeeping shown alongside a trip detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripMetadata {
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub likes: i32,
    pub clone_count: i32,
    pub visibility: Visibility,
}

/// Full public view of one trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicTripDetail {
    #[serde(flatten)]
    pub summary: PublicTripSummary,
    pub description: Option<String>,
    pub highlights: Vec<String>,
    pub destinations: Vec<Destination>,
    pub itinerary: Vec<DayPlan>,
    /// Absent when the owner is anonymous or no longer exists.
    pub author: Option<TripAuthor>,
    pub metadata: TripMetadata,
}

impl PublicTripDetail {
    /// Project `trip` with its author and the caller's like state.
    pub fn from_trip(trip: &Trip, author: Option<TripAuthor>, has_liked: Option<bool>) -> Self {
        Self {
            summary: PublicTripSummary::from_trip(trip, has_liked),
            description: trip.details.description.clone(),
            highlights: trip.details.highlights.clone(),
            destinations: trip.destinations.clone(),
            itinerary: trip.day_plans.clone(),
            author,
            metadata: TripMetadata {
                created_at: trip.created_at,
                published_at: trip.published_at,
                likes: trip.likes,
                clone_count: trip.clone_count,
                visibility: trip.visibility,
            },
        }
    }
}
