//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever talk to driving
//! ports, so they stay testable without I/O.

use std::sync::Arc;

use pagination::PageLimits;

use crate::domain::ports::{
    EngagementCommand, FixtureEngagementCommand, FixturePublicTripQuery, FixtureTripCommand,
    FixtureTripQuery, PublicTripQuery, TripCommand, TripQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub trips: Arc<dyn TripCommand>,
    pub trips_query: Arc<dyn TripQuery>,
    pub public_trips: Arc<dyn PublicTripQuery>,
    pub engagement: Arc<dyn EngagementCommand>,
    /// Default and maximum page size for feed queries.
    pub page_limits: PageLimits,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use tripboard::domain::ports::{
    ///     FixtureEngagementCommand, FixturePublicTripQuery, FixtureTripCommand, FixtureTripQuery,
    /// };
    /// use tripboard::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureTripCommand),
    ///     Arc::new(FixtureTripQuery),
    ///     Arc::new(FixturePublicTripQuery),
    ///     Arc::new(FixtureEngagementCommand),
    /// );
    /// let _trips = state.trips.clone();
    /// ```
    pub fn new(
        trips: Arc<dyn TripCommand>,
        trips_query: Arc<dyn TripQuery>,
        public_trips: Arc<dyn PublicTripQuery>,
        engagement: Arc<dyn EngagementCommand>,
    ) -> Self {
        Self {
            trips,
            trips_query,
            public_trips,
            engagement,
            page_limits: PageLimits::default(),
        }
    }

    /// Replace the feed page limits.
    pub fn with_page_limits(mut self, page_limits: PageLimits) -> Self {
        self.page_limits = page_limits;
        self
    }
}

impl Default for HttpState {
    /// Fixture ports that answer without any storage.
    fn default() -> Self {
        Self::new(
            Arc::new(FixtureTripCommand),
            Arc::new(FixtureTripQuery),
            Arc::new(FixturePublicTripQuery),
            Arc::new(FixtureEngagementCommand),
        )
    }
}
