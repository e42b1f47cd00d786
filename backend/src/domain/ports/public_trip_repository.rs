//! Port for reading the public trip feed.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::public_trips::{PublicTripFilters, PublicTripSort};
use crate::domain::trips::{Trip, TripId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by public trip repository adapters.
    pub enum PublicTripRepositoryError ("public trip repository") {}
}

/// Read-only access to trips whose visibility is public.
///
/// Implementations never return private or unlisted trips.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublicTripRepository: Send + Sync {
    /// One page of matching public trips plus the unpaginated total.
    async fn find_public(
        &self,
        filters: &PublicTripFilters,
        sort: PublicTripSort,
        page: PageRequest,
    ) -> Result<Page<Trip>, PublicTripRepositoryError>;

    /// A public trip by id.
    async fn find_public_by_id(
        &self,
        trip_id: &TripId,
    ) -> Result<Option<Trip>, PublicTripRepositoryError>;

    /// A public trip by slug.
    async fn find_public_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Trip>, PublicTripRepositoryError>;
}

/// Fixture implementation with an empty feed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePublicTripRepository;

#[async_trait]
impl PublicTripRepository for FixturePublicTripRepository {
    async fn find_public(
        &self,
        _filters: &PublicTripFilters,
        _sort: PublicTripSort,
        page: PageRequest,
    ) -> Result<Page<Trip>, PublicTripRepositoryError> {
        Ok(Page::new(Vec::new(), 0, page))
    }

    async fn find_public_by_id(
        &self,
        _trip_id: &TripId,
    ) -> Result<Option<Trip>, PublicTripRepositoryError> {
        Ok(None)
    }

    async fn find_public_by_slug(
        &self,
        _slug: &str,
    ) -> Result<Option<Trip>, PublicTripRepositoryError> {
        Ok(None)
    }
}
