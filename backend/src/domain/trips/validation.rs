//! Structural checks applied to every trip graph before it is stored.

use std::collections::HashSet;

use uuid::Uuid;

use super::itinerary::Coordinates;
use super::{Trip, TripValidationError};

/// Longest accepted trip name and slug, in characters.
pub const NAME_MAX: usize = 255;

pub(super) fn validate_draft(trip: &Trip) -> Result<(), TripValidationError> {
    validate_scalars(trip)?;
    validate_destinations(trip)?;
    validate_day_plans(trip)?;
    validate_unique_ids(trip)
}

fn validate_scalars(trip: &Trip) -> Result<(), TripValidationError> {
    let details = &trip.details;
    if details.name.is_empty() {
        return Err(TripValidationError::EmptyName);
    }
    if details.name.chars().count() > NAME_MAX {
        return Err(TripValidationError::NameTooLong { max: NAME_MAX });
    }
    if details
        .slug
        .as_ref()
        .is_some_and(|slug| slug.chars().count() > NAME_MAX)
    {
        return Err(TripValidationError::SlugTooLong { max: NAME_MAX });
    }
    if details.traveler_count < 1 {
        return Err(TripValidationError::InvalidTravelerCount {
            count: details.traveler_count,
        });
    }
    if details.start_date > details.end_date {
        return Err(TripValidationError::DatesOutOfOrder);
    }
    Ok(())
}

fn validate_destinations(trip: &Trip) -> Result<(), TripValidationError> {
    for destination in &trip.destinations {
        if destination.city.is_empty() {
            return Err(TripValidationError::EmptyCity {
                order_index: destination.order_index,
            });
        }
        validate_coordinates(destination.coordinates)?;
        if matches!(
            (destination.start_date, destination.end_date),
            (Some(start), Some(end)) if start > end
        ) {
            return Err(TripValidationError::DatesOutOfOrder);
        }
    }
    Ok(())
}

/// Day numbers must run 1..=n with no gaps once sorted.
fn validate_day_plans(trip: &Trip) -> Result<(), TripValidationError> {
    let known: HashSet<Uuid> = trip.destinations.iter().map(|d| d.id).collect();
    for (expected, plan) in (1_i32..).zip(&trip.day_plans) {
        if plan.day_number != expected {
            return Err(TripValidationError::DayNumbersNotDense {
                expected,
                found: plan.day_number,
            });
        }
        if let Some(link) = plan
            .destinations
            .iter()
            .find(|link| !known.contains(&link.destination_id))
        {
            return Err(TripValidationError::UnknownDestination {
                destination_id: link.destination_id,
            });
        }
        for activity in &plan.activities {
            if activity.title.is_empty() {
                return Err(TripValidationError::EmptyActivityTitle {
                    day_number: plan.day_number,
                });
            }
            validate_coordinates(activity.coordinates)?;
        }
    }
    Ok(())
}

fn validate_coordinates(coordinates: Option<Coordinates>) -> Result<(), TripValidationError> {
    let Some(Coordinates { lat, lng }) = coordinates else {
        return Ok(());
    };
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(TripValidationError::InvalidCoordinates { lat, lng });
    }
    Ok(())
}

fn validate_unique_ids(trip: &Trip) -> Result<(), TripValidationError> {
    let mut seen = HashSet::new();
    let ids = trip
        .destinations
        .iter()
        .map(|d| d.id)
        .chain(trip.day_plans.iter().flat_map(|plan| {
            std::iter::once(plan.id)
                .chain(plan.destinations.iter().map(|link| link.id))
                .chain(plan.activities.iter().map(|activity| activity.id))
        }));
    for id in ids {
        if !seen.insert(id) {
            return Err(TripValidationError::DuplicateId { id });
        }
    }
    Ok(())
}
