//! Trip aggregate: the trip root plus its destinations, day plans and
//! activities.
//!
//! Graphs are created and replaced wholesale. [`Trip::from_draft`] is the
//! single entry point that assigns identities and enforces structure, so
//! every stored trip has passed the same checks.

mod enums;
mod itinerary;
mod trip;
mod validation;
mod view;

use uuid::Uuid;

pub use enums::{ParseTripEnumError, TimeOfDay, TripStatus, Visibility};
pub use itinerary::{
    Coordinates, DayPlan, DayPlanActivity, DayPlanActivityDraft, DayPlanDestination,
    DayPlanDestinationDraft, DayPlanDraft, Destination, DestinationDraft,
};
pub use trip::{Trip, TripDetails, TripDraft, TripId, duration_days};
pub use validation::NAME_MAX;
pub use view::TripView;

/// Validation errors raised while building a trip graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TripValidationError {
    #[error("trip name must not be empty")]
    EmptyName,
    #[error("trip name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("trip slug must be at most {max} characters")]
    SlugTooLong { max: usize },
    #[error("traveler count must be at least 1, got {count}")]
    InvalidTravelerCount { count: i32 },
    #[error("start date must not be after end date")]
    DatesOutOfOrder,
    #[error("destination {order_index} must name a city")]
    EmptyCity { order_index: i32 },
    #[error("day numbers must be sequential from 1: expected {expected}, found {found}")]
    DayNumbersNotDense { expected: i32, found: i32 },
    #[error("day plan references unknown destination {destination_id}")]
    UnknownDestination { destination_id: Uuid },
    #[error("activity on day {day_number} must have a title")]
    EmptyActivityTitle { day_number: i32 },
    #[error("coordinates out of range: lat {lat}, lng {lng}")]
    InvalidCoordinates { lat: f64, lng: f64 },
    #[error("identifier {id} is used more than once in the trip")]
    DuplicateId { id: Uuid },
}

impl TripValidationError {
    /// Request field the error relates to, for client-facing details.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::SlugTooLong { .. } => "slug",
            Self::InvalidTravelerCount { .. } => "travelerCount",
            Self::DatesOutOfOrder => "endDate",
            Self::EmptyCity { .. } | Self::InvalidCoordinates { .. } => "destinations",
            Self::DayNumbersNotDense { .. }
            | Self::UnknownDestination { .. }
            | Self::EmptyActivityTitle { .. }
            | Self::DuplicateId { .. } => "dayPlans",
        }
    }
}

impl From<TripValidationError> for crate::domain::Error {
    fn from(err: TripValidationError) -> Self {
        Self::invalid_request(err.to_string()).with_details(serde_json::json!({
            "field": err.field(),
            "code": "invalid_trip",
        }))
    }
}
