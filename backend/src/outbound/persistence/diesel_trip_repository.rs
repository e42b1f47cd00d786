//! PostgreSQL-backed `TripRepository` implementation using Diesel ORM.
//!
//! Every graph write runs in a single transaction so a failed replace leaves
//! the previously stored graph untouched.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Nullable};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{TripRepository, TripRepositoryError};
use crate::domain::trips::{Trip, TripId, Visibility};
use crate::domain::{Owner, ShadowId, UserId};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::TripRow;
use super::pool::{DbPool, PoolError};
use super::schema::trips;
use super::trip_graph::{GraphError, TripRows, delete_children, load_graphs, owner_columns};

const SLUG_CONSTRAINT: &str = "trips_slug_key";
const CHILD_KEY_CONSTRAINTS: [&str; 4] = [
    "trip_destinations_pkey",
    "day_plans_pkey",
    "day_plan_destinations_pkey",
    "day_plan_activities_pkey",
];

type TripPredicate = Box<dyn BoxableExpression<trips::table, Pg, SqlType = Nullable<Bool>>>;

/// Diesel-backed implementation of the trip repository port.
#[derive(Clone)]
pub struct DieselTripRepository {
    pool: DbPool,
}

impl DieselTripRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TripRepositoryError {
    map_basic_pool_error(error, |message| TripRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> TripRepositoryError {
    map_basic_diesel_error(
        error,
        TripRepositoryError::query,
        TripRepositoryError::connection,
    )
}

fn map_graph_error(error: GraphError) -> TripRepositoryError {
    match error {
        GraphError::Diesel(error) => map_diesel_error(error),
        GraphError::Corrupt(message) => TripRepositoryError::query(message),
        GraphError::OwnershipMismatch(trip_id) => {
            TripRepositoryError::ownership_mismatch(trip_id.to_string())
        }
    }
}

/// Value of the `Key (id)=(...)` part of a unique-violation detail.
fn clashing_key(error: &diesel::result::Error) -> Option<String> {
    let diesel::result::Error::DatabaseError(_, info) = error else {
        return None;
    };
    let details = info.details()?;
    let (_, rest) = details.split_once(")=(")?;
    let (key, _) = rest.split_once(')')?;
    Some(key.to_owned())
}

/// Like [`map_graph_error`], reporting slug and child-id collisions for `trip`.
fn map_write_error(error: GraphError, trip: &Trip) -> TripRepositoryError {
    if let GraphError::Diesel(diesel_error) = &error {
        match unique_violation(diesel_error) {
            Some(SLUG_CONSTRAINT) => {
                let slug = trip.details.slug.clone().unwrap_or_default();
                debug!(trip_id = %trip.id, %slug, "slug already taken");
                return TripRepositoryError::duplicate_slug(slug);
            }
            Some(constraint) if CHILD_KEY_CONSTRAINTS.contains(&constraint) => {
                let id = clashing_key(diesel_error).unwrap_or_else(|| constraint.to_owned());
                debug!(trip_id = %trip.id, %id, "itinerary id already taken");
                return TripRepositoryError::duplicate_child_id(id);
            }
            _ => {}
        }
    }
    map_graph_error(error)
}

fn owned_by(owner: &Owner) -> TripPredicate {
    match owner {
        Owner::Authenticated(user_id) => Box::new(trips::owner_user_id.eq(*user_id.as_uuid())),
        Owner::Shadow(shadow_id) => {
            Box::new(trips::owner_shadow_id.eq(shadow_id.as_ref().to_owned()))
        }
    }
}

async fn fetch_root(
    conn: &mut diesel_async::AsyncPgConnection,
    trip_id: &TripId,
) -> Result<Option<Trip>, GraphError> {
    let root = trips::table
        .filter(trips::id.eq(trip_id.as_uuid()))
        .select(TripRow::as_select())
        .first(conn)
        .await
        .optional()?;
    let Some(root) = root else {
        return Ok(None);
    };
    Ok(load_graphs(conn, vec![root]).await?.pop())
}

#[async_trait]
impl TripRepository for DieselTripRepository {
    async fn list_owned(&self, owner: &Owner) -> Result<Vec<Trip>, TripRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let roots: Vec<TripRow> = trips::table
            .filter(owned_by(owner))
            .order((trips::updated_at.desc(), trips::id.asc()))
            .select(TripRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        load_graphs(&mut conn, roots).await.map_err(map_graph_error)
    }

    async fn find_owned(
        &self,
        trip_id: &TripId,
        owner: &Owner,
    ) -> Result<Option<Trip>, TripRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let root = trips::table
            .filter(trips::id.eq(trip_id.as_uuid()))
            .filter(owned_by(owner))
            .select(TripRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(root) = root else {
            return Ok(None);
        };

        let mut graphs = load_graphs(&mut conn, vec![root])
            .await
            .map_err(map_graph_error)?;
        Ok(graphs.pop())
    }

    async fn insert(&self, trip: &Trip) -> Result<(), TripRepositoryError> {
        let rows = TripRows::from_trip(trip);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, GraphError, _>(|conn| {
            let rows = &rows;
            async move {
                let root = rows.root();
                diesel::insert_into(trips::table)
                    .values(&root)
                    .execute(conn)
                    .await?;
                rows.insert_children(conn).await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|error| map_write_error(error, trip))
    }

    async fn upsert(&self, trip: &Trip) -> Result<Trip, TripRepositoryError> {
        let rows = TripRows::from_trip(trip);
        let trip_id = *trip.id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, GraphError, _>(|conn| {
            let rows = &rows;
            async move {
                let existing: Option<(Option<uuid::Uuid>, Option<String>)> = trips::table
                    .filter(trips::id.eq(trip_id))
                    .select((trips::owner_user_id, trips::owner_shadow_id))
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;

                match existing {
                    None => {
                        let root = rows.root();
                        diesel::insert_into(trips::table)
                            .values(&root)
                            .execute(conn)
                            .await?;
                    }
                    Some((user_id, shadow_id))
                        if (user_id, shadow_id.as_deref()) != owner_columns(&trip.owner) =>
                    {
                        return Err(GraphError::OwnershipMismatch(trip_id));
                    }
                    Some(_) => {
                        let scalars = rows.scalars();
                        diesel::update(trips::table.filter(trips::id.eq(trip_id)))
                            .set(&scalars)
                            .execute(conn)
                            .await?;
                        delete_children(conn, trip_id).await?;
                    }
                }
                rows.insert_children(conn).await?;

                fetch_root(conn, &trip.id)
                    .await?
                    .ok_or(GraphError::Diesel(diesel::result::Error::NotFound))
            }
            .scope_boxed()
        })
        .await
        .map_err(|error| map_write_error(error, trip))
    }

    async fn delete(&self, trip_id: &TripId, owner: &Owner) -> Result<bool, TripRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            trips::table
                .filter(trips::id.eq(trip_id.as_uuid()))
                .filter(owned_by(owner)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn set_visibility(
        &self,
        trip_id: &TripId,
        owner: &Owner,
        visibility: Visibility,
        now: DateTime<Utc>,
    ) -> Result<Option<Trip>, TripRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, GraphError, _>(|conn| {
            async move {
                let root = trips::table
                    .filter(trips::id.eq(trip_id.as_uuid()))
                    .filter(owned_by(owner))
                    .select(TripRow::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                let Some(root) = root else {
                    return Ok(None);
                };
                let Some(mut trip) = load_graphs(conn, vec![root]).await?.pop() else {
                    return Ok(None);
                };

                trip.set_visibility(visibility, now);
                diesel::update(trips::table.filter(trips::id.eq(trip_id.as_uuid())))
                    .set((
                        trips::visibility.eq(trip.visibility.as_str()),
                        trips::published_at.eq(trip.published_at),
                        trips::updated_at.eq(trip.updated_at),
                    ))
                    .execute(conn)
                    .await?;
                Ok(Some(trip))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_graph_error)
    }

    async fn migrate_ownership(
        &self,
        from: &ShadowId,
        to: &UserId,
    ) -> Result<u64, TripRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let migrated = diesel::update(trips::table.filter(trips::owner_shadow_id.eq(from.as_ref())))
            .set((
                trips::owner_user_id.eq(Some(*to.as_uuid())),
                trips::owner_shadow_id.eq(None::<&str>),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(u64::try_from(migrated).unwrap_or(u64::MAX))
    }
}
