//! Port for likes and clone bookkeeping on public trips.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::UserId;
use crate::domain::trips::TripId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by engagement repository adapters.
    pub enum EngagementRepositoryError ("engagement repository") {}
}

/// State after a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggle {
    /// Whether the caller now likes the trip.
    pub liked: bool,
    /// Like counter after the toggle.
    pub total_likes: i32,
}

/// Likes and clone counters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EngagementRepository: Send + Sync {
    /// Flip the like of `user_id` on a trip in one transaction.
    ///
    /// An existing like is removed whatever the trip's visibility; a new one
    /// needs a public trip. Returns `None` when the trip is missing or the
    /// like would be new on a non-public trip. The counter never drops below
    /// zero.
    async fn toggle_like(
        &self,
        user_id: &UserId,
        trip_id: &TripId,
    ) -> Result<Option<LikeToggle>, EngagementRepositoryError>;

    /// Subset of `trip_ids` liked by `user_id`, resolved in one lookup.
    async fn liked_trip_ids(
        &self,
        user_id: &UserId,
        trip_ids: &[TripId],
    ) -> Result<HashSet<TripId>, EngagementRepositoryError>;

    /// Add one to the clone counter of `trip_id`.
    async fn increment_clone_count(
        &self,
        trip_id: &TripId,
    ) -> Result<(), EngagementRepositoryError>;
}

/// Fixture implementation where nothing is likeable.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEngagementRepository;

#[async_trait]
impl EngagementRepository for FixtureEngagementRepository {
    async fn toggle_like(
        &self,
        _user_id: &UserId,
        _trip_id: &TripId,
    ) -> Result<Option<LikeToggle>, EngagementRepositoryError> {
        Ok(None)
    }

    async fn liked_trip_ids(
        &self,
        _user_id: &UserId,
        _trip_ids: &[TripId],
    ) -> Result<HashSet<TripId>, EngagementRepositoryError> {
        Ok(HashSet::new())
    }

    async fn increment_clone_count(
        &self,
        _trip_id: &TripId,
    ) -> Result<(), EngagementRepositoryError> {
        Ok(())
    }
}
