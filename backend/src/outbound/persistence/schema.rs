//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, update this file to match. The
//! `diesel print-schema` command can generate these definitions from a live
//! database.

diesel::table! {
    /// Registered accounts, used for trip attribution.
    users (id) {
        id -> Uuid,
        /// Identity-provider subject, unique when present.
        oauth_subject -> Nullable<Varchar>,
        name -> Varchar,
        display_name -> Nullable<Varchar>,
        avatar_url -> Nullable<Text>,
        home_city -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Trip roots.
    ///
    /// Exactly one of `owner_user_id` and `owner_shadow_id` is set, enforced
    /// by the `trips_single_owner` check constraint.
    trips (id) {
        id -> Uuid,
        owner_user_id -> Nullable<Uuid>,
        owner_shadow_id -> Nullable<Varchar>,
        name -> Varchar,
        description -> Nullable<Text>,
        summary -> Nullable<Text>,
        /// Unique across all trips when present (`trips_slug_key`).
        slug -> Nullable<Varchar>,
        traveler_count -> Int4,
        start_date -> Date,
        end_date -> Date,
        /// Inclusive day count, written alongside the dates.
        duration_days -> Int4,
        /// Months touched by the start date or any day plan.
        travel_months -> Array<Int4>,
        timezone -> Nullable<Varchar>,
        cover_image -> Nullable<Text>,
        hero_image -> Nullable<Text>,
        traveler_type -> Nullable<Varchar>,
        tags -> Array<Text>,
        seasons -> Array<Text>,
        highlights -> Array<Text>,
        budget_level -> Nullable<Varchar>,
        pace -> Nullable<Varchar>,
        visibility -> Varchar,
        status -> Varchar,
        likes -> Int4,
        clone_count -> Int4,
        published_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    trip_destinations (id) {
        id -> Uuid,
        trip_id -> Uuid,
        order_index -> Int4,
        city -> Varchar,
        region -> Nullable<Varchar>,
        country -> Nullable<Varchar>,
        lat -> Nullable<Float8>,
        lng -> Nullable<Float8>,
        start_date -> Nullable<Date>,
        end_date -> Nullable<Date>,
        notes -> Nullable<Text>,
    }
}

diesel::table! {
    day_plans (id) {
        id -> Uuid,
        trip_id -> Uuid,
        day_number -> Int4,
        date -> Date,
        notes -> Nullable<Text>,
    }
}

diesel::table! {
    day_plan_destinations (id) {
        id -> Uuid,
        day_plan_id -> Uuid,
        destination_id -> Uuid,
        order_index -> Int4,
        part_of_day -> Nullable<Varchar>,
    }
}

diesel::table! {
    day_plan_activities (id) {
        id -> Uuid,
        day_plan_id -> Uuid,
        time_of_day -> Varchar,
        order_within_time -> Int4,
        title -> Varchar,
        location -> Nullable<Varchar>,
        address -> Nullable<Text>,
        activity_type -> Nullable<Varchar>,
        cost -> Nullable<Float8>,
        notes -> Nullable<Text>,
        lat -> Nullable<Float8>,
        lng -> Nullable<Float8>,
        completed -> Bool,
    }
}

diesel::table! {
    /// One row per user and liked trip.
    trip_likes (user_id, trip_id) {
        user_id -> Uuid,
        trip_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(trip_destinations -> trips (trip_id));
diesel::joinable!(day_plans -> trips (trip_id));
diesel::joinable!(day_plan_destinations -> day_plans (day_plan_id));
diesel::joinable!(day_plan_destinations -> trip_destinations (destination_id));
diesel::joinable!(day_plan_activities -> day_plans (day_plan_id));
diesel::joinable!(trip_likes -> trips (trip_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    trips,
    trip_destinations,
    day_plans,
    day_plan_destinations,
    day_plan_activities,
    trip_likes,
);
