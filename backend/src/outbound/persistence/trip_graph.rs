//! Translation between trip graphs and their relational rows.
//!
//! A trip is spread over five tables. Writers flatten it with [`TripRows`];
//! readers fetch every child table for a batch of trips in one query each and
//! reassemble the graphs with [`load_graphs`].

use std::collections::HashMap;

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::trips::{
    Coordinates, DayPlan, DayPlanActivity, DayPlanDestination, Destination, Trip, TripDetails,
    TripId,
};
use crate::domain::{Owner, ShadowId, UserId};

use super::models::{
    DayPlanActivityRow, DayPlanDestinationRow, DayPlanRow, DestinationRow, NewTripRow, TripRow,
    TripScalars,
};
use super::schema::{day_plan_activities, day_plan_destinations, day_plans, trip_destinations};

/// Failures while reading or writing a trip graph inside a transaction.
#[derive(Debug, thiserror::Error)]
pub(crate) enum GraphError {
    #[error(transparent)]
    Diesel(#[from] diesel::result::Error),
    #[error("stored trip is invalid: {0}")]
    Corrupt(String),
    #[error("trip {0} belongs to another owner")]
    OwnershipMismatch(Uuid),
}

fn split_coordinates(coordinates: Option<Coordinates>) -> (Option<f64>, Option<f64>) {
    coordinates.map_or((None, None), |c| (Some(c.lat), Some(c.lng)))
}

fn join_coordinates(lat: Option<f64>, lng: Option<f64>) -> Option<Coordinates> {
    Some(Coordinates { lat: lat?, lng: lng? })
}

/// Owner columns for `owner`: exactly one is populated.
pub(crate) fn owner_columns(owner: &Owner) -> (Option<Uuid>, Option<&str>) {
    match owner {
        Owner::Authenticated(user_id) => (Some(*user_id.as_uuid()), None),
        Owner::Shadow(shadow_id) => (None, Some(shadow_id.as_ref())),
    }
}

fn row_owner(row: &TripRow) -> Result<Owner, GraphError> {
    match (row.owner_user_id, row.owner_shadow_id.as_deref()) {
        (Some(user_id), None) => Ok(Owner::Authenticated(UserId::from_uuid(user_id))),
        (None, Some(shadow_id)) => ShadowId::new(shadow_id)
            .map(Owner::Shadow)
            .map_err(|err| GraphError::Corrupt(err.to_string())),
        _ => Err(GraphError::Corrupt(format!(
            "trip {} must have exactly one owner",
            row.id
        ))),
    }
}

fn parse_column<T>(value: &str) -> Result<T, GraphError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|err: T::Err| GraphError::Corrupt(err.to_string()))
}

/// Borrowed row set for one trip graph, ready to insert.
pub(crate) struct TripRows<'a> {
    trip: &'a Trip,
    destinations: Vec<DestinationRow>,
    day_plans: Vec<DayPlanRow>,
    links: Vec<DayPlanDestinationRow>,
    activities: Vec<DayPlanActivityRow>,
}

impl<'a> TripRows<'a> {
    pub(crate) fn from_trip(trip: &'a Trip) -> Self {
        let trip_id = *trip.id.as_uuid();
        let destinations = trip
            .destinations
            .iter()
            .map(|destination| {
                let (lat, lng) = split_coordinates(destination.coordinates);
                DestinationRow {
                    id: destination.id,
                    trip_id,
                    order_index: destination.order_index,
                    city: destination.city.clone(),
                    region: destination.region.clone(),
                    country: destination.country.clone(),
                    lat,
                    lng,
                    start_date: destination.start_date,
                    end_date: destination.end_date,
                    notes: destination.notes.clone(),
                }
            })
            .collect();

        let mut day_plans = Vec::with_capacity(trip.day_plans.len());
        let mut links = Vec::new();
        let mut activities = Vec::new();
        for plan in &trip.day_plans {
            day_plans.push(DayPlanRow {
                id: plan.id,
                trip_id,
                day_number: plan.day_number,
                date: plan.date,
                notes: plan.notes.clone(),
            });
            links.extend(plan.destinations.iter().map(|link| DayPlanDestinationRow {
                id: link.id,
                day_plan_id: plan.id,
                destination_id: link.destination_id,
                order_index: link.order_index,
                part_of_day: link.part_of_day.map(|part| part.as_str().to_owned()),
            }));
            activities.extend(plan.activities.iter().map(|activity| {
                let (lat, lng) = split_coordinates(activity.coordinates);
                DayPlanActivityRow {
                    id: activity.id,
                    day_plan_id: plan.id,
                    time_of_day: activity.time_of_day.as_str().to_owned(),
                    order_within_time: activity.order_within_time,
                    title: activity.title.clone(),
                    location: activity.location.clone(),
                    address: activity.address.clone(),
                    activity_type: activity.activity_type.clone(),
                    cost: activity.cost,
                    notes: activity.notes.clone(),
                    lat,
                    lng,
                    completed: activity.completed,
                }
            }));
        }

        Self {
            trip,
            destinations,
            day_plans,
            links,
            activities,
        }
    }

    /// Owner-editable columns of the root row.
    pub(crate) fn scalars(&self) -> TripScalars<'a> {
        let trip = self.trip;
        let details = &trip.details;
        let mut travel_months: Vec<i32> = trip
            .months()
            .filter_map(|month| i32::try_from(month).ok())
            .collect();
        travel_months.sort_unstable();
        travel_months.dedup();
        TripScalars {
            name: &details.name,
            description: details.description.as_deref(),
            summary: details.summary.as_deref(),
            slug: details.slug.as_deref(),
            traveler_count: details.traveler_count,
            start_date: details.start_date,
            end_date: details.end_date,
            duration_days: trip.duration_days(),
            travel_months,
            timezone: details.timezone.as_deref(),
            cover_image: details.cover_image.as_deref(),
            hero_image: details.hero_image.as_deref(),
            traveler_type: details.traveler_type.as_deref(),
            tags: &details.tags,
            seasons: &details.seasons,
            highlights: &details.highlights,
            budget_level: details.budget_level.as_deref(),
            pace: details.pace.as_deref(),
            status: trip.status.as_str(),
            updated_at: trip.updated_at,
        }
    }

    /// Full root row for a first insert.
    pub(crate) fn root(&self) -> NewTripRow<'a> {
        let trip = self.trip;
        let (owner_user_id, owner_shadow_id) = owner_columns(&trip.owner);
        NewTripRow {
            id: *trip.id.as_uuid(),
            owner_user_id,
            owner_shadow_id,
            scalars: self.scalars(),
            visibility: trip.visibility.as_str(),
            likes: trip.likes,
            clone_count: trip.clone_count,
            published_at: trip.published_at,
            created_at: trip.created_at,
        }
    }

    /// Insert every child row. The root must already exist.
    pub(crate) async fn insert_children(
        &self,
        conn: &mut AsyncPgConnection,
    ) -> Result<(), diesel::result::Error> {
        if !self.destinations.is_empty() {
            diesel::insert_into(trip_destinations::table)
                .values(&self.destinations)
                .execute(conn)
                .await?;
        }
        if !self.day_plans.is_empty() {
            diesel::insert_into(day_plans::table)
                .values(&self.day_plans)
                .execute(conn)
                .await?;
        }
        if !self.links.is_empty() {
            diesel::insert_into(day_plan_destinations::table)
                .values(&self.links)
                .execute(conn)
                .await?;
        }
        if !self.activities.is_empty() {
            diesel::insert_into(day_plan_activities::table)
                .values(&self.activities)
                .execute(conn)
                .await?;
        }
        Ok(())
    }
}

/// Delete every child row of `trip_id`; links and activities cascade.
pub(crate) async fn delete_children(
    conn: &mut AsyncPgConnection,
    trip_id: Uuid,
) -> Result<(), diesel::result::Error> {
    diesel::delete(day_plans::table.filter(day_plans::trip_id.eq(trip_id)))
        .execute(conn)
        .await?;
    diesel::delete(trip_destinations::table.filter(trip_destinations::trip_id.eq(trip_id)))
        .execute(conn)
        .await?;
    Ok(())
}

fn group_by<K, V>(rows: Vec<V>, key: impl Fn(&V) -> K) -> HashMap<K, Vec<V>>
where
    K: std::hash::Hash + Eq,
{
    let mut grouped: HashMap<K, Vec<V>> = HashMap::new();
    for row in rows {
        grouped.entry(key(&row)).or_default().push(row);
    }
    grouped
}

/// Hydrate trip roots with their children, preserving the order of `roots`.
///
/// Issues one query per child table regardless of how many roots are given.
pub(crate) async fn load_graphs(
    conn: &mut AsyncPgConnection,
    roots: Vec<TripRow>,
) -> Result<Vec<Trip>, GraphError> {
    if roots.is_empty() {
        return Ok(Vec::new());
    }
    let trip_ids: Vec<Uuid> = roots.iter().map(|row| row.id).collect();

    let destination_rows = trip_destinations::table
        .filter(trip_destinations::trip_id.eq_any(&trip_ids))
        .order((trip_destinations::trip_id, trip_destinations::order_index))
        .select(DestinationRow::as_select())
        .load(conn)
        .await?;
    let plan_rows = day_plans::table
        .filter(day_plans::trip_id.eq_any(&trip_ids))
        .order((day_plans::trip_id, day_plans::day_number))
        .select(DayPlanRow::as_select())
        .load(conn)
        .await?;
    let plan_ids: Vec<Uuid> = plan_rows.iter().map(|row| row.id).collect();
    let link_rows = day_plan_destinations::table
        .filter(day_plan_destinations::day_plan_id.eq_any(&plan_ids))
        .order((
            day_plan_destinations::day_plan_id,
            day_plan_destinations::order_index,
        ))
        .select(DayPlanDestinationRow::as_select())
        .load(conn)
        .await?;
    let activity_rows = day_plan_activities::table
        .filter(day_plan_activities::day_plan_id.eq_any(&plan_ids))
        .select(DayPlanActivityRow::as_select())
        .load(conn)
        .await?;

    let mut destinations = group_by(destination_rows, |row| row.trip_id);
    let mut plans = group_by(plan_rows, |row| row.trip_id);
    let mut links = group_by(link_rows, |row| row.day_plan_id);
    let mut activities = group_by(activity_rows, |row| row.day_plan_id);

    roots
        .into_iter()
        .map(|root| {
            let destinations = destinations.remove(&root.id).unwrap_or_default();
            let plans = plans
                .remove(&root.id)
                .unwrap_or_default()
                .into_iter()
                .map(|plan| {
                    let plan_links = links.remove(&plan.id).unwrap_or_default();
                    let plan_activities = activities.remove(&plan.id).unwrap_or_default();
                    day_plan_from_rows(plan, plan_links, plan_activities)
                })
                .collect::<Result<Vec<_>, _>>()?;
            trip_from_rows(root, destinations, plans)
        })
        .collect()
}

fn day_plan_from_rows(
    plan: DayPlanRow,
    links: Vec<DayPlanDestinationRow>,
    activities: Vec<DayPlanActivityRow>,
) -> Result<DayPlan, GraphError> {
    let destinations = links
        .into_iter()
        .map(|link| {
            Ok(DayPlanDestination {
                id: link.id,
                destination_id: link.destination_id,
                order_index: link.order_index,
                part_of_day: link.part_of_day.as_deref().map(parse_column).transpose()?,
            })
        })
        .collect::<Result<Vec<_>, GraphError>>()?;
    let mut activities = activities
        .into_iter()
        .map(|row| {
            Ok(DayPlanActivity {
                id: row.id,
                time_of_day: parse_column(&row.time_of_day)?,
                order_within_time: row.order_within_time,
                title: row.title,
                location: row.location,
                address: row.address,
                activity_type: row.activity_type,
                cost: row.cost,
                notes: row.notes,
                coordinates: join_coordinates(row.lat, row.lng),
                completed: row.completed,
            })
        })
        .collect::<Result<Vec<_>, GraphError>>()?;
    activities.sort_by_key(DayPlanActivity::sort_key);

    Ok(DayPlan {
        id: plan.id,
        day_number: plan.day_number,
        date: plan.date,
        notes: plan.notes,
        destinations,
        activities,
    })
}

fn trip_from_rows(
    root: TripRow,
    destinations: Vec<DestinationRow>,
    day_plans: Vec<DayPlan>,
) -> Result<Trip, GraphError> {
    let owner = row_owner(&root)?;
    let TripRow {
        id,
        name,
        description,
        summary,
        slug,
        traveler_count,
        start_date,
        end_date,
        timezone,
        cover_image,
        hero_image,
        traveler_type,
        tags,
        seasons,
        highlights,
        budget_level,
        pace,
        visibility,
        status,
        likes,
        clone_count,
        published_at,
        created_at,
        updated_at,
        ..
    } = root;

    Ok(Trip {
        id: TripId::from_uuid(id),
        owner,
        details: TripDetails {
            name,
            description,
            summary,
            slug,
            traveler_count,
            start_date,
            end_date,
            timezone,
            cover_image,
            hero_image,
            traveler_type,
            tags,
            seasons,
            highlights,
            budget_level,
            pace,
        },
        visibility: parse_column(&visibility)?,
        status: parse_column(&status)?,
        likes,
        clone_count,
        published_at,
        created_at,
        updated_at,
        destinations: destinations
            .into_iter()
            .map(|row| Destination {
                id: row.id,
                order_index: row.order_index,
                city: row.city,
                region: row.region,
                country: row.country,
                coordinates: join_coordinates(row.lat, row.lng),
                start_date: row.start_date,
                end_date: row.end_date,
                notes: row.notes,
            })
            .collect(),
        day_plans,
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row translation.

    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::SequentialIdGenerator;
    use crate::test_support::trips::{date, day_plan, draft, tokyo_week};

    fn sample(owner: Owner) -> Trip {
        let now = Utc
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        Trip::from_draft(
            TripId::from_uuid(Uuid::from_u128(42)),
            owner,
            tokyo_week(),
            &SequentialIdGenerator::starting_at(1),
            now,
        )
        .expect("valid draft")
    }

    #[rstest]
    fn shadow_owner_fills_only_shadow_column() {
        let owner = Owner::Shadow(ShadowId::new("guest-1").expect("valid shadow id"));
        assert_eq!(owner_columns(&owner), (None, Some("guest-1")));
    }

    #[rstest]
    fn rows_cover_every_child() {
        let trip = sample(Owner::Authenticated(UserId::random()));
        let rows = TripRows::from_trip(&trip);

        assert_eq!(rows.destinations.len(), 2);
        assert_eq!(rows.day_plans.len(), 7);
        assert_eq!(rows.links.len(), 7);
        assert_eq!(rows.activities.len(), 7);
        assert!(rows.links.iter().all(|link| rows
            .destinations
            .iter()
            .any(|destination| destination.id == link.destination_id)));
    }

    #[rstest]
    fn scalars_record_duration_and_distinct_months() {
        let start = date(2025, 1, 30);
        let mut input = draft("Month end", start, 3);
        input.day_plans = vec![
            day_plan(1, start),
            day_plan(2, date(2025, 1, 31)),
            day_plan(3, date(2025, 2, 1)),
        ];
        let trip = Trip::from_draft(
            TripId::from_uuid(Uuid::nil()),
            Owner::Authenticated(UserId::random()),
            input,
            &SequentialIdGenerator::starting_at(1),
            Utc::now(),
        )
        .expect("valid draft");

        let rows = TripRows::from_trip(&trip);
        let scalars = rows.scalars();

        assert_eq!(scalars.duration_days, 3);
        assert_eq!(scalars.travel_months, vec![1, 2]);
    }

    #[rstest]
    fn root_row_with_two_owners_is_corrupt() {
        let trip = sample(Owner::Authenticated(UserId::random()));
        let rows = TripRows::from_trip(&trip);
        let root = rows.root();
        let row = TripRow {
            id: root.id,
            owner_user_id: Some(Uuid::from_u128(1)),
            owner_shadow_id: Some("guest".into()),
            name: trip.details.name.clone(),
            description: None,
            summary: None,
            slug: None,
            traveler_count: 1,
            start_date: trip.details.start_date,
            end_date: trip.details.end_date,
            timezone: None,
            cover_image: None,
            hero_image: None,
            traveler_type: None,
            tags: Vec::new(),
            seasons: Vec::new(),
            highlights: Vec::new(),
            budget_level: None,
            pace: None,
            visibility: "public".into(),
            status: "planning".into(),
            likes: 0,
            clone_count: 0,
            published_at: None,
            created_at: trip.created_at,
            updated_at: trip.updated_at,
        };

        assert!(matches!(row_owner(&row), Err(GraphError::Corrupt(_))));
    }

    #[rstest]
    fn unknown_visibility_is_corrupt() {
        let parsed: Result<crate::domain::trips::Visibility, _> = parse_column("friends");
        assert!(matches!(parsed, Err(GraphError::Corrupt(_))));
    }
}
