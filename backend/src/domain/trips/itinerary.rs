//! Nested itinerary entities owned by a trip.
//!
//! Every entity comes in two shapes: the draft accepted from callers, where
//! identifiers are optional, and the stored entity, where they are assigned.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::TimeOfDay;

/// WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// A stop on the trip route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: Uuid,
    /// Position in the route, starting at zero.
    pub order_index: i32,
    pub city: String,
    pub region: Option<String>,
    pub country: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// One calendar day of the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub id: Uuid,
    /// 1-based and dense across the trip.
    pub day_number: i32,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub destinations: Vec<DayPlanDestination>,
    /// Ordered by time of day, then `order_within_time`.
    pub activities: Vec<DayPlanActivity>,
}

/// Link between a day plan and one of the trip's destinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayPlanDestination {
    pub id: Uuid,
    pub destination_id: Uuid,
    pub order_index: i32,
    pub part_of_day: Option<TimeOfDay>,
}

/// Activity scheduled on a day plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayPlanActivity {
    pub id: Uuid,
    pub time_of_day: TimeOfDay,
    pub order_within_time: i32,
    pub title: String,
    pub location: Option<String>,
    pub address: Option<String>,
    pub activity_type: Option<String>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub completed: bool,
}

impl DayPlanActivity {
    /// Ordering key within a day plan.
    pub fn sort_key(&self) -> (TimeOfDay, i32) {
        (self.time_of_day, self.order_within_time)
    }
}

/// Caller-supplied destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DestinationDraft {
    /// Keep an existing id so day plan links can reference it.
    #[serde(default)]
    pub id: Option<Uuid>,
    pub city: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Caller-supplied day plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayPlanDraft {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub day_number: i32,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub destinations: Vec<DayPlanDestinationDraft>,
    #[serde(default)]
    pub activities: Vec<DayPlanActivityDraft>,
}

/// Caller-supplied day plan destination link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayPlanDestinationDraft {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub destination_id: Uuid,
    #[serde(default)]
    pub part_of_day: Option<TimeOfDay>,
}

/// Caller-supplied activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayPlanActivityDraft {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub time_of_day: TimeOfDay,
    #[serde(default)]
    pub order_within_time: i32,
    pub title: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub completed: bool,
}

impl From<&Destination> for DestinationDraft {
    fn from(value: &Destination) -> Self {
        Self {
            id: Some(value.id),
            city: value.city.clone(),
            region: value.region.clone(),
            country: value.country.clone(),
            coordinates: value.coordinates,
            start_date: value.start_date,
            end_date: value.end_date,
            notes: value.notes.clone(),
        }
    }
}

impl From<&DayPlan> for DayPlanDraft {
    fn from(value: &DayPlan) -> Self {
        Self {
            id: Some(value.id),
            day_number: value.day_number,
            date: value.date,
            notes: value.notes.clone(),
            destinations: value
                .destinations
                .iter()
                .map(|link| DayPlanDestinationDraft {
                    id: Some(link.id),
                    destination_id: link.destination_id,
                    part_of_day: link.part_of_day,
                })
                .collect(),
            activities: value.activities.iter().map(DayPlanActivityDraft::from).collect(),
        }
    }
}

impl From<&DayPlanActivity> for DayPlanActivityDraft {
    fn from(value: &DayPlanActivity) -> Self {
        Self {
            id: Some(value.id),
            time_of_day: value.time_of_day,
            order_within_time: value.order_within_time,
            title: value.title.clone(),
            location: value.location.clone(),
            address: value.address.clone(),
            activity_type: value.activity_type.clone(),
            cost: value.cost,
            notes: value.notes.clone(),
            coordinates: value.coordinates,
            completed: value.completed,
        }
    }
}
