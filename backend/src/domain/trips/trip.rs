//! Trip aggregate root.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::itinerary::{
    DayPlan, DayPlanActivity, DayPlanDestination, DayPlanDraft, Destination, DestinationDraft,
};
use super::validation::validate_draft;
use super::{TripStatus, TripValidationError, Visibility};
use crate::domain::Owner;
use crate::domain::ports::IdGenerator;

/// Stable trip identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct TripId(Uuid);

impl TripId {
    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for TripId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Descriptive trip fields supplied by the owner.
///
/// These are the fields a clone copies verbatim, minus `name` and `slug`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripDetails {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default = "default_traveler_count")]
    pub traveler_count: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub traveler_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub seasons: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub budget_level: Option<String>,
    #[serde(default)]
    pub pace: Option<String>,
}

fn default_traveler_count() -> i32 {
    1
}

impl TripDetails {
    /// Inclusive number of days between the start and end dates.
    pub fn duration_days(&self) -> i32 {
        duration_days(self.start_date, self.end_date)
    }
}

/// Inclusive day count from `start` to `end`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use tripboard::domain::trips::duration_days;
///
/// let start = NaiveDate::from_ymd_opt(2025, 4, 1).expect("date");
/// let end = NaiveDate::from_ymd_opt(2025, 4, 7).expect("date");
/// assert_eq!(duration_days(start, end), 7);
/// ```
pub fn duration_days(start: NaiveDate, end: NaiveDate) -> i32 {
    let days = (end - start).num_days() + 1;
    i32::try_from(days).unwrap_or(i32::MAX)
}

/// Caller-supplied trip, before identities and timestamps are assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripDraft {
    #[serde(flatten)]
    pub details: TripDetails,
    #[serde(default)]
    pub status: Option<TripStatus>,
    #[serde(default)]
    pub destinations: Vec<DestinationDraft>,
    #[serde(default)]
    pub day_plans: Vec<DayPlanDraft>,
}

/// Fully hydrated trip graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub id: TripId,
    pub owner: Owner,
    pub details: TripDetails,
    pub visibility: Visibility,
    pub status: TripStatus,
    /// Never negative; only toggle-like changes it.
    pub likes: i32,
    pub clone_count: i32,
    /// First time the trip became public. Never cleared.
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Ordered by `order_index`.
    pub destinations: Vec<Destination>,
    /// Ordered by `day_number`.
    pub day_plans: Vec<DayPlan>,
}

impl Trip {
    /// Validate `draft` and assign identities to every entity lacking one.
    ///
    /// The trip starts private with zeroed counters. Children keep the order
    /// supplied by the caller; day plans are sorted by day number and
    /// activities by time of day.
    pub fn from_draft(
        id: TripId,
        owner: Owner,
        draft: TripDraft,
        ids: &dyn IdGenerator,
        now: DateTime<Utc>,
    ) -> Result<Self, TripValidationError> {
        let TripDraft {
            details,
            status,
            destinations,
            day_plans,
        } = draft;
        let details = normalise_details(details);

        let destinations: Vec<Destination> = destinations
            .into_iter()
            .zip(0_i32..)
            .map(|(draft, order_index)| Destination {
                id: draft.id.unwrap_or_else(|| ids.next_id()),
                order_index,
                city: draft.city.trim().to_owned(),
                region: draft.region,
                country: draft.country,
                coordinates: draft.coordinates,
                start_date: draft.start_date,
                end_date: draft.end_date,
                notes: draft.notes,
            })
            .collect();

        let mut day_plans: Vec<DayPlan> = day_plans
            .into_iter()
            .map(|plan| materialise_day_plan(plan, ids))
            .collect();
        day_plans.sort_by_key(|plan| plan.day_number);

        let trip = Self {
            id,
            owner,
            details,
            visibility: Visibility::Private,
            status: status.unwrap_or_default(),
            likes: 0,
            clone_count: 0,
            published_at: None,
            created_at: now,
            updated_at: now,
            destinations,
            day_plans,
        };
        validate_draft(&trip)?;
        Ok(trip)
    }

    /// Inclusive trip length in days.
    pub fn duration_days(&self) -> i32 {
        self.details.duration_days()
    }

    /// Whether the trip is visible on public surfaces.
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Apply a visibility change, stamping `published_at` on first publish.
    pub fn set_visibility(&mut self, visibility: Visibility, now: DateTime<Utc>) {
        self.visibility = visibility;
        if visibility == Visibility::Public && self.published_at.is_none() {
            self.published_at = Some(now);
        }
        self.updated_at = now;
    }

    /// Copy the trip for a new owner with fresh identities throughout.
    ///
    /// The copy is private, in planning, unpublished, without a slug and with
    /// zeroed counters. Day plan links are re-pointed at the copied
    /// destinations.
    pub fn clone_for(
        &self,
        id: TripId,
        owner: Owner,
        name: String,
        ids: &dyn IdGenerator,
        now: DateTime<Utc>,
    ) -> Self {
        let mut remapped = HashMap::with_capacity(self.destinations.len());
        let destinations = self
            .destinations
            .iter()
            .map(|destination| {
                let new_id = ids.next_id();
                remapped.insert(destination.id, new_id);
                Destination {
                    id: new_id,
                    ..destination.clone()
                }
            })
            .collect();

        let day_plans = self
            .day_plans
            .iter()
            .map(|plan| DayPlan {
                id: ids.next_id(),
                day_number: plan.day_number,
                date: plan.date,
                notes: plan.notes.clone(),
                destinations: plan
                    .destinations
                    .iter()
                    .map(|link| DayPlanDestination {
                        id: ids.next_id(),
                        destination_id: remapped
                            .get(&link.destination_id)
                            .copied()
                            .unwrap_or(link.destination_id),
                        order_index: link.order_index,
                        part_of_day: link.part_of_day,
                    })
                    .collect(),
                activities: plan
                    .activities
                    .iter()
                    .map(|activity| DayPlanActivity {
                        id: ids.next_id(),
                        ..activity.clone()
                    })
                    .collect(),
            })
            .collect();

        Self {
            id,
            owner,
            details: TripDetails {
                name: name.trim().to_owned(),
                slug: None,
                ..self.details.clone()
            },
            visibility: Visibility::Private,
            status: TripStatus::Planning,
            likes: 0,
            clone_count: 0,
            published_at: None,
            created_at: now,
            updated_at: now,
            destinations,
            day_plans,
        }
    }

    /// Rebuild a draft carrying every identity, useful for round trips.
    pub fn to_draft(&self) -> TripDraft {
        TripDraft {
            details: self.details.clone(),
            status: Some(self.status),
            destinations: self.destinations.iter().map(DestinationDraft::from).collect(),
            day_plans: self.day_plans.iter().map(DayPlanDraft::from).collect(),
        }
    }

    /// Distinct destination cities in route order.
    pub fn origin_cities(&self) -> Vec<String> {
        let mut seen = Vec::<String>::new();
        for destination in &self.destinations {
            if !seen
                .iter()
                .any(|city| city.eq_ignore_ascii_case(&destination.city))
            {
                seen.push(destination.city.clone());
            }
        }
        seen
    }

    /// Months (1 to 12) touched by the start date or any day plan date.
    pub fn months(&self) -> impl Iterator<Item = u32> + '_ {
        std::iter::once(self.details.start_date.month())
            .chain(self.day_plans.iter().map(|plan| plan.date.month()))
    }
}

fn normalise_details(mut details: TripDetails) -> TripDetails {
    details.name = details.name.trim().to_owned();
    details.slug = details
        .slug
        .map(|slug| slug.trim().to_owned())
        .filter(|slug| !slug.is_empty());
    details
}

fn materialise_day_plan(draft: DayPlanDraft, ids: &dyn IdGenerator) -> DayPlan {
    let destinations = draft
        .destinations
        .into_iter()
        .zip(0_i32..)
        .map(|(link, order_index)| DayPlanDestination {
            id: link.id.unwrap_or_else(|| ids.next_id()),
            destination_id: link.destination_id,
            order_index,
            part_of_day: link.part_of_day,
        })
        .collect();

    let mut activities: Vec<DayPlanActivity> = draft
        .activities
        .into_iter()
        .map(|activity| DayPlanActivity {
            id: activity.id.unwrap_or_else(|| ids.next_id()),
            time_of_day: activity.time_of_day,
            order_within_time: activity.order_within_time,
            title: activity.title.trim().to_owned(),
            location: activity.location,
            address: activity.address,
            activity_type: activity.activity_type,
            cost: activity.cost,
            notes: activity.notes,
            coordinates: activity.coordinates,
            completed: activity.completed,
        })
        .collect();
    activities.sort_by_key(DayPlanActivity::sort_key);

    DayPlan {
        id: draft.id.unwrap_or_else(|| ids.next_id()),
        day_number: draft.day_number,
        date: draft.date,
        notes: draft.notes,
        destinations,
        activities,
    }
}
