//! Owner-facing projection of a trip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::itinerary::{DayPlan, Destination};
use super::{Trip, TripDetails, TripId, TripStatus, Visibility};

/// Trip as returned to its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripView {
    pub id: TripId,
    #[serde(flatten)]
    pub details: TripDetails,
    pub duration_days: i32,
    pub visibility: Visibility,
    pub status: TripStatus,
    pub likes: i32,
    pub clone_count: i32,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub destinations: Vec<Destination>,
    pub day_plans: Vec<DayPlan>,
}

impl From<Trip> for TripView {
    fn from(trip: Trip) -> Self {
        let duration_days = trip.duration_days();
        Self {
            id: trip.id,
            details: trip.details,
            duration_days,
            visibility: trip.visibility,
            status: trip.status,
            likes: trip.likes,
            clone_count: trip.clone_count,
            published_at: trip.published_at,
            created_at: trip.created_at,
            updated_at: trip.updated_at,
            destinations: trip.destinations,
            day_plans: trip.day_plans,
        }
    }
}
