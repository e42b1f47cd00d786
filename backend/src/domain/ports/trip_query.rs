//! Driving port for owned-trip reads.

use async_trait::async_trait;

use crate::domain::trips::{TripId, TripView};
use crate::domain::{Error, Owner};

/// Driving port for reading the caller's own trips.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripQuery: Send + Sync {
    /// Every trip owned by `owner`, most recently updated first.
    async fn list_owned(&self, owner: Owner) -> Result<Vec<TripView>, Error>;

    /// One owned trip; foreign and missing trips are both not found.
    async fn get_owned(&self, owner: Owner, trip_id: TripId) -> Result<TripView, Error>;
}

/// Fixture query with no trips.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTripQuery;

#[async_trait]
impl TripQuery for FixtureTripQuery {
    async fn list_owned(&self, _owner: Owner) -> Result<Vec<TripView>, Error> {
        Ok(Vec::new())
    }

    async fn get_owned(&self, _owner: Owner, trip_id: TripId) -> Result<TripView, Error> {
        Err(Error::not_found(format!("trip {trip_id} not found")))
    }
}
