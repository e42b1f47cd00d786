//! Builders wiring repositories into the driving-port services.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::warn;

use tripboard::domain::ports::{
    EngagementRepository, IdGenerator, PublicTripRepository, RandomIdGenerator, TripRepository,
    UserRepository,
};
use tripboard::domain::{EngagementService, PublicTripService, TripService};
use tripboard::inbound::http::state::HttpState;
use tripboard::outbound::memory::MemoryStore;
use tripboard::outbound::persistence::{
    DieselEngagementRepository, DieselPublicTripRepository, DieselTripRepository,
    DieselUserRepository,
};

use super::ServerConfig;

/// Repositories backing one server instance.
struct Repositories<T, P, E, U> {
    trips: Arc<T>,
    public_trips: Arc<P>,
    engagement: Arc<E>,
    users: Arc<U>,
}

fn build_ports<T, P, E, U>(repos: Repositories<T, P, E, U>) -> HttpState
where
    T: TripRepository + 'static,
    P: PublicTripRepository + 'static,
    E: EngagementRepository + 'static,
    U: UserRepository + 'static,
{
    let Repositories {
        trips,
        public_trips,
        engagement,
        users,
    } = repos;
    let ids: Arc<dyn IdGenerator> = Arc::new(RandomIdGenerator);
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let trip_service = Arc::new(TripService::new(
        trips.clone(),
        users.clone(),
        ids.clone(),
        clock.clone(),
    ));
    let public_service = Arc::new(PublicTripService::new(
        public_trips.clone(),
        engagement.clone(),
        users,
    ));
    let engagement_service = Arc::new(EngagementService::new(
        engagement,
        public_trips,
        trips,
        ids,
        clock,
    ));

    HttpState::new(
        trip_service.clone(),
        trip_service,
        public_service,
        engagement_service,
    )
}

/// Build handler state from the configured storage.
///
/// A database pool selects the Diesel repositories; without one every port
/// shares a single [`MemoryStore`].
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => build_ports(Repositories {
            trips: Arc::new(DieselTripRepository::new(pool.clone())),
            public_trips: Arc::new(DieselPublicTripRepository::new(pool.clone())),
            engagement: Arc::new(DieselEngagementRepository::new(pool.clone())),
            users: Arc::new(DieselUserRepository::new(pool.clone())),
        }),
        None => {
            warn!("no database configured; trips are kept in memory and lost on restart");
            let store = Arc::new(MemoryStore::new());
            build_ports(Repositories {
                trips: store.clone(),
                public_trips: store.clone(),
                engagement: store.clone(),
                users: store,
            })
        }
    };
    web::Data::new(state.with_page_limits(config.page_limits))
}
