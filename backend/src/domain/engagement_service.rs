//! Likes and clones of public trips.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, warn};

use crate::domain::ports::{
    ClonePublicTripRequest, EngagementCommand, EngagementRepository, IdGenerator, LikeToggle,
    PublicTripRepository, PublicTripRepositoryError, TripRepository, TripRepositoryError,
};
use crate::domain::trips::{NAME_MAX, TripId, TripView};
use crate::domain::{Error, Owner, TraceId, UserId};

use super::public_trip_service::map_engagement_error;

fn map_public_error(error: PublicTripRepositoryError) -> Error {
    match error {
        PublicTripRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("public trip repository unavailable: {message}"))
        }
        PublicTripRepositoryError::Query { message } => {
            Error::internal(format!("public trip repository error: {message}"))
        }
    }
}

fn map_trip_error(error: TripRepositoryError) -> Error {
    match error {
        TripRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("trip repository unavailable: {message}"))
        }
        other => Error::internal(format!("trip repository error: {other}")),
    }
}

fn validate_clone_name(name: &str) -> Result<String, Error> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::invalid_request("name must not be empty")
            .with_details(serde_json::json!({ "field": "name", "code": "empty_name" })));
    }
    if name.chars().count() > NAME_MAX {
        return Err(Error::invalid_request(format!(
            "name must be at most {NAME_MAX} characters"
        ))
        .with_details(serde_json::json!({ "field": "name", "code": "name_too_long" })));
    }
    Ok(name.to_owned())
}

/// Service implementing [`EngagementCommand`].
#[derive(Clone)]
pub struct EngagementService<E, P, T> {
    engagement: Arc<E>,
    public_trips: Arc<P>,
    trips: Arc<T>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl<E, P, T> EngagementService<E, P, T> {
    /// Create a service over the engagement, feed and trip repositories.
    pub fn new(
        engagement: Arc<E>,
        public_trips: Arc<P>,
        trips: Arc<T>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            engagement,
            public_trips,
            trips,
            ids,
            clock,
        }
    }
}

impl<E, P, T> EngagementService<E, P, T>
where
    E: EngagementRepository + 'static,
{
    /// Bump the source's clone counter off the request path.
    ///
    /// Failures are logged and dropped; the clone itself already succeeded.
    fn spawn_clone_count_increment(&self, source: TripId) {
        let engagement = Arc::clone(&self.engagement);
        tokio::spawn(TraceId::propagate(async move {
            match engagement.increment_clone_count(&source).await {
                Ok(()) => debug!(%source, "clone count incremented"),
                Err(error) => warn!(%source, %error, "failed to increment clone count"),
            }
        }));
    }
}

#[async_trait]
impl<E, P, T> EngagementCommand for EngagementService<E, P, T>
where
    E: EngagementRepository + 'static,
    P: PublicTripRepository,
    T: TripRepository,
{
    async fn toggle_like(&self, user_id: UserId, trip_id: TripId) -> Result<LikeToggle, Error> {
        self.engagement
            .toggle_like(&user_id, &trip_id)
            .await
            .map_err(map_engagement_error)?
            .ok_or_else(|| Error::not_found(format!("public trip {trip_id} not found")))
    }

    async fn clone_public_trip(
        &self,
        request: ClonePublicTripRequest,
    ) -> Result<TripView, Error> {
        let ClonePublicTripRequest {
            source,
            user_id,
            name,
        } = request;
        let name = validate_clone_name(&name)?;

        let original = self
            .public_trips
            .find_public_by_id(&source)
            .await
            .map_err(map_public_error)?
            .ok_or_else(|| Error::not_found(format!("public trip {source} not found")))?;

        let copy = original.clone_for(
            TripId::from_uuid(self.ids.next_id()),
            Owner::Authenticated(user_id),
            name,
            self.ids.as_ref(),
            self.clock.utc(),
        );
        self.trips.insert(&copy).await.map_err(map_trip_error)?;

        self.spawn_clone_count_increment(source);
        Ok(TripView::from(copy))
    }
}

#[cfg(test)]
#[path = "engagement_service_tests.rs"]
mod tests;
