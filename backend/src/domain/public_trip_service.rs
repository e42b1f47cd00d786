//! Public trip feed service.
//!
//! Reads public trips through [`PublicTripRepository`] and annotates them for
//! authenticated viewers. Like state for a whole page is resolved with one
//! batched lookup rather than one query per row.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;

use crate::domain::ports::{
    EngagementRepository, EngagementRepositoryError, ListPublicTripsRequest,
    PublicTripQuery, PublicTripRepository, PublicTripRepositoryError, UserRepositoryError,
    UserRepository,
};
use crate::domain::public_trips::{PublicTripDetail, PublicTripSummary, TripAuthor};
use crate::domain::trips::{Trip, TripId};
use crate::domain::{Error, Owner, UserId};

fn map_repository_error(error: PublicTripRepositoryError) -> Error {
    match error {
        PublicTripRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("public trip repository unavailable: {message}"))
        }
        PublicTripRepositoryError::Query { message } => {
            Error::internal(format!("public trip repository error: {message}"))
        }
    }
}

pub(crate) fn map_engagement_error(error: EngagementRepositoryError) -> Error {
    match error {
        EngagementRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("engagement repository unavailable: {message}"))
        }
        EngagementRepositoryError::Query { message } => {
            Error::internal(format!("engagement repository error: {message}"))
        }
    }
}

pub(crate) fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Author attribution for a trip owner. Shadow owners have none.
pub(crate) async fn load_author<U>(
    users: &U,
    owner: &Owner,
) -> Result<Option<TripAuthor>, UserRepositoryError>
where
    U: UserRepository + ?Sized,
{
    let Some(user_id) = owner.user_id() else {
        return Ok(None);
    };
    let user = users.find_author(&user_id).await?;
    Ok(user.as_ref().map(TripAuthor::from))
}

/// Service implementing [`PublicTripQuery`].
#[derive(Clone)]
pub struct PublicTripService<P, E, U> {
    public_trips: Arc<P>,
    engagement: Arc<E>,
    users: Arc<U>,
}

impl<P, E, U> PublicTripService<P, E, U> {
    /// Create a service over the feed, engagement and user repositories.
    pub fn new(public_trips: Arc<P>, engagement: Arc<E>, users: Arc<U>) -> Self {
        Self {
            public_trips,
            engagement,
            users,
        }
    }
}

impl<P, E, U> PublicTripService<P, E, U>
where
    P: PublicTripRepository,
    E: EngagementRepository,
    U: UserRepository,
{
    async fn has_liked(&self, viewer: Option<UserId>, trip_id: TripId) -> Result<Option<bool>, Error> {
        let Some(user_id) = viewer else {
            return Ok(None);
        };
        let liked = self
            .engagement
            .liked_trip_ids(&user_id, &[trip_id])
            .await
            .map_err(map_engagement_error)?;
        Ok(Some(liked.contains(&trip_id)))
    }

    async fn detail(&self, trip: Trip, viewer: Option<UserId>) -> Result<PublicTripDetail, Error> {
        let author = load_author(self.users.as_ref(), &trip.owner)
            .await
            .map_err(map_user_error)?;
        let has_liked = self.has_liked(viewer, trip.id).await?;
        Ok(PublicTripDetail::from_trip(&trip, author, has_liked))
    }
}

#[async_trait]
impl<P, E, U> PublicTripQuery for PublicTripService<P, E, U>
where
    P: PublicTripRepository,
    E: EngagementRepository,
    U: UserRepository,
{
    async fn list_public(
        &self,
        request: ListPublicTripsRequest,
    ) -> Result<Page<PublicTripSummary>, Error> {
        let page = self
            .public_trips
            .find_public(&request.filters, request.sort, request.page)
            .await
            .map_err(map_repository_error)?;

        let liked = match request.viewer {
            Some(user_id) if !page.items().is_empty() => {
                let ids: Vec<TripId> = page.items().iter().map(|trip| trip.id).collect();
                let liked = self
                    .engagement
                    .liked_trip_ids(&user_id, &ids)
                    .await
                    .map_err(map_engagement_error)?;
                Some(liked)
            }
            Some(_) => Some(Default::default()),
            None => None,
        };

        Ok(page.map(|trip| {
            let has_liked = liked.as_ref().map(|set| set.contains(&trip.id));
            PublicTripSummary::from_trip(&trip, has_liked)
        }))
    }

    async fn get_public(
        &self,
        trip_id: TripId,
        viewer: Option<UserId>,
    ) -> Result<PublicTripDetail, Error> {
        let trip = self
            .public_trips
            .find_public_by_id(&trip_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("public trip {trip_id} not found")))?;
        self.detail(trip, viewer).await
    }

    async fn get_public_by_slug(
        &self,
        slug: String,
        viewer: Option<UserId>,
    ) -> Result<PublicTripDetail, Error> {
        let trip = self
            .public_trips
            .find_public_by_slug(slug.trim())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("public trip `{slug}` not found")))?;
        self.detail(trip, viewer).await
    }
}

#[cfg(test)]
#[path = "public_trip_service_tests.rs"]
mod tests;
