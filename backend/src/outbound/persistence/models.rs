//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    day_plan_activities, day_plan_destinations, day_plans, trip_destinations, trip_likes, trips,
    users,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub oauth_subject: Option<String>,
    pub name: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub home_city: Option<String>,
}

/// Insertable struct for creating or refreshing user records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub oauth_subject: Option<&'a str>,
    pub name: &'a str,
    pub display_name: Option<&'a str>,
    pub avatar_url: Option<&'a str>,
    pub home_city: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Trip models
// ---------------------------------------------------------------------------

/// Row struct for reading from the trips table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = trips)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TripRow {
    pub id: Uuid,
    pub owner_user_id: Option<Uuid>,
    pub owner_shadow_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub slug: Option<String>,
    pub traveler_count: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub timezone: Option<String>,
    pub cover_image: Option<String>,
    pub hero_image: Option<String>,
    pub traveler_type: Option<String>,
    pub tags: Vec<String>,
    pub seasons: Vec<String>,
    pub highlights: Vec<String>,
    pub budget_level: Option<String>,
    pub pace: Option<String>,
    pub visibility: String,
    pub status: String,
    pub likes: i32,
    pub clone_count: i32,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for new trip roots.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = trips)]
pub(crate) struct NewTripRow<'a> {
    pub id: Uuid,
    pub owner_user_id: Option<Uuid>,
    pub owner_shadow_id: Option<&'a str>,
    #[diesel(embed)]
    pub scalars: TripScalars<'a>,
    pub visibility: &'a str,
    pub likes: i32,
    pub clone_count: i32,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Owner-editable trip columns, shared by inserts and wholesale replaces.
///
/// `None` writes `NULL` so a replace can clear optional fields.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = trips)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct TripScalars<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub summary: Option<&'a str>,
    pub slug: Option<&'a str>,
    pub traveler_count: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i32,
    pub travel_months: Vec<i32>,
    pub timezone: Option<&'a str>,
    pub cover_image: Option<&'a str>,
    pub hero_image: Option<&'a str>,
    pub traveler_type: Option<&'a str>,
    pub tags: &'a [String],
    pub seasons: &'a [String],
    pub highlights: &'a [String],
    pub budget_level: Option<&'a str>,
    pub pace: Option<&'a str>,
    pub status: &'a str,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for trip destinations, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = trip_destinations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DestinationRow {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub order_index: i32,
    pub city: String,
    pub region: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Row struct for day plans, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = day_plans)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DayPlanRow {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub day_number: i32,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

/// Row struct for day plan to destination links.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = day_plan_destinations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DayPlanDestinationRow {
    pub id: Uuid,
    pub day_plan_id: Uuid,
    pub destination_id: Uuid,
    pub order_index: i32,
    pub part_of_day: Option<String>,
}

/// Row struct for day plan activities.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = day_plan_activities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DayPlanActivityRow {
    pub id: Uuid,
    pub day_plan_id: Uuid,
    pub time_of_day: String,
    pub order_within_time: i32,
    pub title: String,
    pub location: Option<String>,
    pub address: Option<String>,
    pub activity_type: Option<String>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub completed: bool,
}

/// Insertable struct for trip likes.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = trip_likes)]
pub(crate) struct NewTripLikeRow {
    pub user_id: Uuid,
    pub trip_id: Uuid,
}
