//! Trip draft builders shared by unit and integration tests.

use chrono::{NaiveDate, TimeDelta, Utc};
use uuid::Uuid;

use crate::domain::Owner;
use crate::domain::ports::RandomIdGenerator;
use crate::domain::trips::{
    DayPlanActivityDraft, DayPlanDestinationDraft, DayPlanDraft, DestinationDraft, TimeOfDay,
    Trip, TripDetails, TripDraft, TripId,
};

/// Build a calendar date, panicking on impossible input.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid fixture date {year}-{month}-{day}"),
    }
}

/// Destination draft with only a city set.
pub fn destination(city: &str) -> DestinationDraft {
    DestinationDraft {
        id: None,
        city: city.to_owned(),
        region: None,
        country: None,
        coordinates: None,
        start_date: None,
        end_date: None,
        notes: None,
    }
}

/// Activity draft with only a title and slot set.
pub fn activity(title: &str, time_of_day: TimeOfDay, order_within_time: i32) -> DayPlanActivityDraft {
    DayPlanActivityDraft {
        id: None,
        time_of_day,
        order_within_time,
        title: title.to_owned(),
        location: None,
        address: None,
        activity_type: None,
        cost: None,
        notes: None,
        coordinates: None,
        completed: false,
    }
}

/// Day plan draft dated `date` with no links or activities.
pub fn day_plan(day_number: i32, date: NaiveDate) -> DayPlanDraft {
    DayPlanDraft {
        id: None,
        day_number,
        date,
        notes: None,
        destinations: Vec::new(),
        activities: Vec::new(),
    }
}

/// Link from a day plan to a destination id.
pub fn link(destination_id: Uuid) -> DayPlanDestinationDraft {
    DayPlanDestinationDraft {
        id: None,
        destination_id,
        part_of_day: None,
    }
}

/// Minimal draft spanning `days` days from `start`, with no children.
pub fn draft(name: &str, start: NaiveDate, days: i64) -> TripDraft {
    TripDraft {
        details: TripDetails {
            name: name.to_owned(),
            description: None,
            summary: None,
            slug: None,
            traveler_count: 1,
            start_date: start,
            end_date: start + TimeDelta::days(days - 1),
            timezone: None,
            cover_image: None,
            hero_image: None,
            traveler_type: None,
            tags: Vec::new(),
            seasons: Vec::new(),
            highlights: Vec::new(),
            budget_level: None,
            pace: None,
        },
        status: None,
        destinations: Vec::new(),
        day_plans: Vec::new(),
    }
}

/// Seven-day Tokyo and Kyoto draft with linked day plans and activities.
///
/// Destination ids are supplied up front so day plans can reference them.
/// They are random, so several copies can share one store.
pub fn tokyo_week() -> TripDraft {
    let tokyo_id = Uuid::new_v4();
    let kyoto_id = Uuid::new_v4();
    let start = date(2025, 4, 1);

    let mut base = draft("Tokyo Week", start, 7);
    base.details.summary = Some("Cherry blossoms and temples".to_owned());
    base.details.traveler_type = Some("couple".to_owned());
    base.details.tags = vec!["food".to_owned(), "culture".to_owned()];
    base.details.seasons = vec!["spring".to_owned()];
    base.details.budget_level = Some("moderate".to_owned());
    base.details.pace = Some("balanced".to_owned());
    base.destinations = vec![
        DestinationDraft {
            id: Some(tokyo_id),
            ..destination("Tokyo")
        },
        DestinationDraft {
            id: Some(kyoto_id),
            ..destination("Kyoto")
        },
    ];
    base.day_plans = (1..=7)
        .map(|day_number| {
            let mut plan = day_plan(day_number, start + TimeDelta::days(i64::from(day_number - 1)));
            let city = if day_number <= 4 { tokyo_id } else { kyoto_id };
            plan.destinations.push(link(city));
            plan.activities.push(activity(
                &format!("Day {day_number} walk"),
                TimeOfDay::Mid,
                0,
            ));
            plan
        })
        .collect();
    base
}

/// Materialise `draft` as a private trip owned by `owner` with random ids.
///
/// # Panics
///
/// Panics when the draft fails validation.
pub fn hydrate(owner: Owner, draft: TripDraft) -> Trip {
    let id = TripId::from_uuid(Uuid::new_v4());
    match Trip::from_draft(id, owner, draft, &RandomIdGenerator, Utc::now()) {
        Ok(trip) => trip,
        Err(err) => panic!("fixture draft must be valid: {err}"),
    }
}
