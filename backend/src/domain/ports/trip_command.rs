//! Driving port for owned-trip mutations.
//!
//! Inbound adapters resolve the caller's [`Owner`] and hand it to this port;
//! a trip owned by anybody else is reported as not found.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::public_trips::PublicTripDetail;
use crate::domain::trips::{TripDraft, TripId, TripView, Visibility};
use crate::domain::{Error, Owner, ShadowId, UserId};

/// Request to create a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTripRequest {
    pub owner: Owner,
    pub draft: TripDraft,
}

/// Request to replace (or create) a trip under a caller-chosen id.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceTripRequest {
    pub owner: Owner,
    pub trip_id: TripId,
    pub draft: TripDraft,
}

/// Request to change who can see a trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetVisibilityRequest {
    pub owner: Owner,
    pub trip_id: TripId,
    pub visibility: Visibility,
}

/// Request to hand a shadow user's trips to an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateOwnershipRequest {
    pub from: ShadowId,
    pub to: UserId,
}

/// Outcome of an ownership migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MigrateOwnershipResponse {
    /// Trips moved by this call. Zero on repeat runs.
    pub migrated: u64,
}

/// Driving port for trip write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripCommand: Send + Sync {
    /// Validate and store a new trip graph.
    async fn create(&self, request: CreateTripRequest) -> Result<TripView, Error>;

    /// Replace the stored graph wholesale, creating it when absent.
    async fn replace(&self, request: ReplaceTripRequest) -> Result<TripView, Error>;

    /// Delete an owned trip.
    async fn delete(&self, owner: Owner, trip_id: TripId) -> Result<(), Error>;

    /// Change visibility and return the resulting detail view.
    async fn set_visibility(&self, request: SetVisibilityRequest)
    -> Result<PublicTripDetail, Error>;

    /// Re-point every trip of a shadow identity to an account.
    async fn migrate_ownership(
        &self,
        request: MigrateOwnershipRequest,
    ) -> Result<MigrateOwnershipResponse, Error>;
}

/// Fixture command that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTripCommand;

#[async_trait]
impl TripCommand for FixtureTripCommand {
    async fn create(&self, _request: CreateTripRequest) -> Result<TripView, Error> {
        Err(Error::service_unavailable("trip storage is not configured"))
    }

    async fn replace(&self, _request: ReplaceTripRequest) -> Result<TripView, Error> {
        Err(Error::service_unavailable("trip storage is not configured"))
    }

    async fn delete(&self, _owner: Owner, trip_id: TripId) -> Result<(), Error> {
        Err(Error::not_found(format!("trip {trip_id} not found")))
    }

    async fn set_visibility(
        &self,
        request: SetVisibilityRequest,
    ) -> Result<PublicTripDetail, Error> {
        Err(Error::not_found(format!("trip {} not found", request.trip_id)))
    }

    async fn migrate_ownership(
        &self,
        _request: MigrateOwnershipRequest,
    ) -> Result<MigrateOwnershipResponse, Error> {
        Ok(MigrateOwnershipResponse { migrated: 0 })
    }
}
