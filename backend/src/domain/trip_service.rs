//! Owned-trip domain service.
//!
//! Implements [`TripCommand`] and [`TripQuery`] on top of the trip and user
//! repositories. Ownership is enforced by the repository queries themselves,
//! so a foreign trip is indistinguishable from a missing one.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    CreateTripRequest, IdGenerator, MigrateOwnershipRequest, MigrateOwnershipResponse,
    ReplaceTripRequest, SetVisibilityRequest, TripCommand, TripQuery, TripRepository,
    TripRepositoryError, UserRepository,
};
use crate::domain::public_trips::PublicTripDetail;
use crate::domain::public_trips::TripAuthor;
use crate::domain::trips::{Trip, TripId, TripView, Visibility};
use crate::domain::{Error, Owner};

use super::public_trip_service::{load_author, map_user_error};

fn map_repository_error(error: TripRepositoryError) -> Error {
    match error {
        TripRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("trip repository unavailable: {message}"))
        }
        TripRepositoryError::Query { message } => {
            Error::internal(format!("trip repository error: {message}"))
        }
        TripRepositoryError::DuplicateSlug { slug } => {
            Error::conflict(format!("slug `{slug}` is already taken"))
                .with_details(serde_json::json!({ "field": "slug", "value": slug }))
        }
        TripRepositoryError::DuplicateChildId { id } => {
            Error::conflict(format!("itinerary id `{id}` is already in use"))
                .with_details(serde_json::json!({ "field": "id", "value": id }))
        }
        TripRepositoryError::OwnershipMismatch { trip_id } => trip_not_found(&trip_id),
    }
}

fn trip_not_found(trip_id: &dyn std::fmt::Display) -> Error {
    Error::not_found(format!("trip {trip_id} not found"))
}

/// Trip service implementing the owned-trip driving ports.
#[derive(Clone)]
pub struct TripService<R, U> {
    trips: Arc<R>,
    users: Arc<U>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl<R, U> TripService<R, U> {
    /// Create a service over the given repositories and collaborators.
    pub fn new(
        trips: Arc<R>,
        users: Arc<U>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            trips,
            users,
            ids,
            clock,
        }
    }
}

impl<R, U> TripService<R, U>
where
    R: TripRepository,
    U: UserRepository,
{
    async fn author_of(&self, trip: &Trip) -> Result<Option<TripAuthor>, Error> {
        load_author(self.users.as_ref(), &trip.owner)
            .await
            .map_err(map_user_error)
    }
}

#[async_trait]
impl<R, U> TripCommand for TripService<R, U>
where
    R: TripRepository,
    U: UserRepository,
{
    async fn create(&self, request: CreateTripRequest) -> Result<TripView, Error> {
        let trip_id = TripId::from_uuid(self.ids.next_id());
        let trip = Trip::from_draft(
            trip_id,
            request.owner,
            request.draft,
            self.ids.as_ref(),
            self.clock.utc(),
        )?;

        self.trips
            .insert(&trip)
            .await
            .map_err(map_repository_error)?;
        Ok(TripView::from(trip))
    }

    async fn replace(&self, request: ReplaceTripRequest) -> Result<TripView, Error> {
        let trip = Trip::from_draft(
            request.trip_id,
            request.owner,
            request.draft,
            self.ids.as_ref(),
            self.clock.utc(),
        )?;

        let stored = self
            .trips
            .upsert(&trip)
            .await
            .map_err(map_repository_error)?;
        Ok(TripView::from(stored))
    }

    async fn delete(&self, owner: Owner, trip_id: TripId) -> Result<(), Error> {
        let deleted = self
            .trips
            .delete(&trip_id, &owner)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(trip_not_found(&trip_id));
        }
        Ok(())
    }

    async fn set_visibility(
        &self,
        request: SetVisibilityRequest,
    ) -> Result<PublicTripDetail, Error> {
        let SetVisibilityRequest {
            owner,
            trip_id,
            visibility,
        } = request;
        let trip = self
            .trips
            .set_visibility(&trip_id, &owner, visibility, self.clock.utc())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| trip_not_found(&trip_id))?;

        if visibility == Visibility::Public {
            info!(%trip_id, published_at = ?trip.published_at, "trip published");
        }
        let author = self.author_of(&trip).await?;
        Ok(PublicTripDetail::from_trip(&trip, author, None))
    }

    async fn migrate_ownership(
        &self,
        request: MigrateOwnershipRequest,
    ) -> Result<MigrateOwnershipResponse, Error> {
        let migrated = self
            .trips
            .migrate_ownership(&request.from, &request.to)
            .await
            .map_err(map_repository_error)?;
        if migrated > 0 {
            info!(migrated, user_id = %request.to, "migrated shadow trips");
        }
        Ok(MigrateOwnershipResponse { migrated })
    }
}

#[async_trait]
impl<R, U> TripQuery for TripService<R, U>
where
    R: TripRepository,
    U: UserRepository,
{
    async fn list_owned(&self, owner: Owner) -> Result<Vec<TripView>, Error> {
        let trips = self
            .trips
            .list_owned(&owner)
            .await
            .map_err(map_repository_error)?;
        Ok(trips.into_iter().map(TripView::from).collect())
    }

    async fn get_owned(&self, owner: Owner, trip_id: TripId) -> Result<TripView, Error> {
        self.trips
            .find_owned(&trip_id, &owner)
            .await
            .map_err(map_repository_error)?
            .map(TripView::from)
            .ok_or_else(|| trip_not_found(&trip_id))
    }
}

#[cfg(test)]
#[path = "trip_service_tests.rs"]
mod tests;
