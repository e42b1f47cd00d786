//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`IdGenerator`]) are implemented by outbound
//! adapters. Driving ports (`*Command`, `*Query`) are implemented by the
//! domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod engagement_command;
mod engagement_repository;
mod id_generator;
mod public_trip_query;
mod public_trip_repository;
mod trip_command;
mod trip_query;
mod trip_repository;
mod user_repository;

#[cfg(test)]
pub use engagement_command::MockEngagementCommand;
pub use engagement_command::{
    ClonePublicTripRequest, EngagementCommand, FixtureEngagementCommand,
};
#[cfg(test)]
pub use engagement_repository::MockEngagementRepository;
pub use engagement_repository::{
    EngagementRepository, EngagementRepositoryError, FixtureEngagementRepository, LikeToggle,
};
#[cfg(test)]
pub use id_generator::MockIdGenerator;
pub use id_generator::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
#[cfg(test)]
pub use public_trip_query::MockPublicTripQuery;
pub use public_trip_query::{FixturePublicTripQuery, ListPublicTripsRequest, PublicTripQuery};
#[cfg(test)]
pub use public_trip_repository::MockPublicTripRepository;
pub use public_trip_repository::{
    FixturePublicTripRepository, PublicTripRepository, PublicTripRepositoryError,
};
#[cfg(test)]
pub use trip_command::MockTripCommand;
pub use trip_command::{
    CreateTripRequest, FixtureTripCommand, MigrateOwnershipRequest, MigrateOwnershipResponse,
    ReplaceTripRequest, SetVisibilityRequest, TripCommand,
};
#[cfg(test)]
pub use trip_query::MockTripQuery;
pub use trip_query::{FixtureTripQuery, TripQuery};
#[cfg(test)]
pub use trip_repository::MockTripRepository;
pub use trip_repository::{FixtureTripRepository, TripRepository, TripRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};
