//! Driving port for the public trip feed.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::public_trips::{
    PublicTripDetail, PublicTripFilters, PublicTripSort, PublicTripSummary,
};
use crate::domain::trips::TripId;
use crate::domain::{Error, UserId};

/// Request for one page of the public feed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListPublicTripsRequest {
    pub filters: PublicTripFilters,
    pub sort: PublicTripSort,
    pub page: PageRequest,
    /// Authenticated caller, used to annotate `has_liked`.
    pub viewer: Option<UserId>,
}

/// Driving port for public trip reads.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), tripboard::domain::Error> {
/// use tripboard::domain::ports::{
///     FixturePublicTripQuery, ListPublicTripsRequest, PublicTripQuery,
/// };
///
/// let page = FixturePublicTripQuery
///     .list_public(ListPublicTripsRequest::default())
///     .await?;
/// assert_eq!(page.total(), 0);
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublicTripQuery: Send + Sync {
    /// Filtered, sorted, paginated public trips.
    async fn list_public(
        &self,
        request: ListPublicTripsRequest,
    ) -> Result<Page<PublicTripSummary>, Error>;

    /// A public trip with author attribution.
    async fn get_public(
        &self,
        trip_id: TripId,
        viewer: Option<UserId>,
    ) -> Result<PublicTripDetail, Error>;

    /// A public trip looked up by slug.
    async fn get_public_by_slug(
        &self,
        slug: String,
        viewer: Option<UserId>,
    ) -> Result<PublicTripDetail, Error>;
}

/// Fixture query with an empty feed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePublicTripQuery;

#[async_trait]
impl PublicTripQuery for FixturePublicTripQuery {
    async fn list_public(
        &self,
        request: ListPublicTripsRequest,
    ) -> Result<Page<PublicTripSummary>, Error> {
        Ok(Page::new(Vec::new(), 0, request.page))
    }

    async fn get_public(
        &self,
        trip_id: TripId,
        _viewer: Option<UserId>,
    ) -> Result<PublicTripDetail, Error> {
        Err(Error::not_found(format!("public trip {trip_id} not found")))
    }

    async fn get_public_by_slug(
        &self,
        slug: String,
        _viewer: Option<UserId>,
    ) -> Result<PublicTripDetail, Error> {
        Err(Error::not_found(format!("public trip `{slug}` not found")))
    }
}
