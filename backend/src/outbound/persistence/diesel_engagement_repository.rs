//! PostgreSQL-backed likes and clone counters.
//!
//! A like toggle locks the trip row before touching `trip_likes`, so
//! concurrent toggles on the same trip serialise and the counter always
//! matches the like rows.

use std::collections::HashSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::Int4;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::UserId;
use crate::domain::ports::{EngagementRepository, EngagementRepositoryError, LikeToggle};
use crate::domain::trips::{TripId, Visibility};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::NewTripLikeRow;
use super::pool::{DbPool, PoolError};
use super::schema::{trip_likes, trips};

diesel::define_sql_function!(fn greatest(left: Int4, right: Int4) -> Int4);

/// Diesel-backed implementation of the engagement repository port.
#[derive(Clone)]
pub struct DieselEngagementRepository {
    pool: DbPool,
}

impl DieselEngagementRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EngagementRepositoryError {
    map_basic_pool_error(error, |message| EngagementRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> EngagementRepositoryError {
    map_basic_diesel_error(
        error,
        EngagementRepositoryError::query,
        EngagementRepositoryError::connection,
    )
}

#[async_trait]
impl EngagementRepository for DieselEngagementRepository {
    async fn toggle_like(
        &self,
        user_id: &UserId,
        trip_id: &TripId,
    ) -> Result<Option<LikeToggle>, EngagementRepositoryError> {
        let user_uuid = *user_id.as_uuid();
        let trip_uuid = *trip_id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let locked: Option<String> = trips::table
                    .filter(trips::id.eq(trip_uuid))
                    .select(trips::visibility)
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                let Some(visibility) = locked else {
                    return Ok(None);
                };

                let removed = diesel::delete(
                    trip_likes::table
                        .filter(trip_likes::user_id.eq(user_uuid))
                        .filter(trip_likes::trip_id.eq(trip_uuid)),
                )
                .execute(conn)
                .await?;

                let (liked, total_likes) = if removed > 0 {
                    let total = diesel::update(trips::table.filter(trips::id.eq(trip_uuid)))
                        .set(trips::likes.eq(greatest(trips::likes - 1, 0)))
                        .returning(trips::likes)
                        .get_result::<i32>(conn)
                        .await?;
                    (false, total)
                } else if visibility != Visibility::Public.as_str() {
                    // Unliking stays possible after unpublishing; new likes do not.
                    return Ok(None);
                } else {
                    diesel::insert_into(trip_likes::table)
                        .values(&NewTripLikeRow {
                            user_id: user_uuid,
                            trip_id: trip_uuid,
                        })
                        .on_conflict_do_nothing()
                        .execute(conn)
                        .await?;
                    let total = diesel::update(trips::table.filter(trips::id.eq(trip_uuid)))
                        .set(trips::likes.eq(trips::likes + 1))
                        .returning(trips::likes)
                        .get_result::<i32>(conn)
                        .await?;
                    (true, total)
                };

                Ok(Some(LikeToggle {
                    liked,
                    total_likes,
                }))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn liked_trip_ids(
        &self,
        user_id: &UserId,
        trip_ids: &[TripId],
    ) -> Result<HashSet<TripId>, EngagementRepositoryError> {
        if trip_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let candidates: Vec<Uuid> = trip_ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let liked: Vec<Uuid> = trip_likes::table
            .filter(trip_likes::user_id.eq(user_id.as_uuid()))
            .filter(trip_likes::trip_id.eq_any(&candidates))
            .select(trip_likes::trip_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(liked.into_iter().map(TripId::from_uuid).collect())
    }

    async fn increment_clone_count(
        &self,
        trip_id: &TripId,
    ) -> Result<(), EngagementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(trips::table.filter(trips::id.eq(trip_id.as_uuid())))
            .set(trips::clone_count.eq(trips::clone_count + 1))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
