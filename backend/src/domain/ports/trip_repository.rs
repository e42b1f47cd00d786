//! Port for owned-trip persistence.
//!
//! Adapters store whole trip graphs. Every mutation that touches more than
//! one row must be atomic: a failure leaves the previously stored graph in
//! place.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::trips::{Trip, TripId, Visibility};
use crate::domain::{Owner, ShadowId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by trip repository adapters.
    pub enum TripRepositoryError ("trip repository") {
        /// Another trip already uses the slug.
        DuplicateSlug { slug: String } => "trip slug already in use: {slug}",
        /// A destination, day plan, link or activity id is used by another trip.
        DuplicateChildId { id: String } => "itinerary id already in use: {id}",
        /// The trip id exists under a different owner.
        OwnershipMismatch { trip_id: String } => "trip {trip_id} belongs to another owner",
    }
}

/// Port for reading and writing trips on behalf of their owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// Every trip owned by `owner`, most recently updated first.
    async fn list_owned(&self, owner: &Owner) -> Result<Vec<Trip>, TripRepositoryError>;

    /// A trip when it exists and belongs to `owner`.
    async fn find_owned(
        &self,
        trip_id: &TripId,
        owner: &Owner,
    ) -> Result<Option<Trip>, TripRepositoryError>;

    /// Persist a new trip graph.
    async fn insert(&self, trip: &Trip) -> Result<(), TripRepositoryError>;

    /// Insert the graph, or replace the stored one wholesale.
    ///
    /// When a trip with the same id and owner exists, its scalar fields are
    /// overwritten and its children deleted and recreated from `trip`.
    /// Likes, clone count, visibility, publish time and creation time are
    /// kept from the stored row. Returns the graph as stored.
    async fn upsert(&self, trip: &Trip) -> Result<Trip, TripRepositoryError>;

    /// Delete a trip and its children. Returns whether a row was removed.
    async fn delete(&self, trip_id: &TripId, owner: &Owner) -> Result<bool, TripRepositoryError>;

    /// Change visibility, stamping the first publish time when going public.
    async fn set_visibility(
        &self,
        trip_id: &TripId,
        owner: &Owner,
        visibility: Visibility,
        now: DateTime<Utc>,
    ) -> Result<Option<Trip>, TripRepositoryError>;

    /// Re-point every trip owned by `from` to `to`, returning the row count.
    async fn migrate_ownership(
        &self,
        from: &ShadowId,
        to: &UserId,
    ) -> Result<u64, TripRepositoryError>;
}

/// Fixture implementation for tests that do not exercise trip storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTripRepository;

#[async_trait]
impl TripRepository for FixtureTripRepository {
    async fn list_owned(&self, _owner: &Owner) -> Result<Vec<Trip>, TripRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_owned(
        &self,
        _trip_id: &TripId,
        _owner: &Owner,
    ) -> Result<Option<Trip>, TripRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _trip: &Trip) -> Result<(), TripRepositoryError> {
        Ok(())
    }

    async fn upsert(&self, trip: &Trip) -> Result<Trip, TripRepositoryError> {
        Ok(trip.clone())
    }

    async fn delete(
        &self,
        _trip_id: &TripId,
        _owner: &Owner,
    ) -> Result<bool, TripRepositoryError> {
        Ok(false)
    }

    async fn set_visibility(
        &self,
        _trip_id: &TripId,
        _owner: &Owner,
        _visibility: Visibility,
        _now: DateTime<Utc>,
    ) -> Result<Option<Trip>, TripRepositoryError> {
        Ok(None)
    }

    async fn migrate_ownership(
        &self,
        _from: &ShadowId,
        _to: &UserId,
    ) -> Result<u64, TripRepositoryError> {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_lists_nothing() {
        let owner = Owner::from(UserId::random());
        let trips = FixtureTripRepository
            .list_owned(&owner)
            .await
            .expect("fixture list succeeds");
        assert!(trips.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_migrates_no_rows() {
        let shadow = ShadowId::new("shadow-1").expect("valid shadow id");
        let migrated = FixtureTripRepository
            .migrate_ownership(&shadow, &UserId::random())
            .await
            .expect("fixture migrate succeeds");
        assert_eq!(migrated, 0);
    }

    #[rstest]
    fn duplicate_slug_formats_message() {
        let err = TripRepositoryError::duplicate_slug("tokyo-week");
        assert!(err.to_string().contains("tokyo-week"));
    }
}
