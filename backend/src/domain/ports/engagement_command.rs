//! Driving port for likes and clones.

use async_trait::async_trait;

use crate::domain::trips::{TripId, TripView};
use crate::domain::{Error, UserId};

use super::LikeToggle;

/// Request to copy a public trip into the caller's account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClonePublicTripRequest {
    pub source: TripId,
    pub user_id: UserId,
    pub name: String,
}

/// Driving port for engagement with public trips.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EngagementCommand: Send + Sync {
    /// Like the trip if the caller has not, otherwise remove the like.
    async fn toggle_like(&self, user_id: UserId, trip_id: TripId) -> Result<LikeToggle, Error>;

    /// Deep-copy a public trip into a new private trip owned by the caller.
    async fn clone_public_trip(&self, request: ClonePublicTripRequest)
    -> Result<TripView, Error>;
}

/// Fixture command where no trip is public.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEngagementCommand;

#[async_trait]
impl EngagementCommand for FixtureEngagementCommand {
    async fn toggle_like(&self, _user_id: UserId, trip_id: TripId) -> Result<LikeToggle, Error> {
        Err(Error::not_found(format!("public trip {trip_id} not found")))
    }

    async fn clone_public_trip(
        &self,
        request: ClonePublicTripRequest,
    ) -> Result<TripView, Error> {
        Err(Error::not_found(format!(
            "public trip {} not found",
            request.source
        )))
    }
}
