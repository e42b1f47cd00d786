//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the trip, public feed, engagement and user
//! ports, backed by PostgreSQL through `diesel-async` and `bb8` pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories translate between Diesel rows and domain
//!   types. Validation and visibility rules stay in the domain.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Whole-graph writes**: trip graphs are written inside one transaction
//!   per call, see `trip_graph.rs`.
//!
//! # Example
//!
//! ```ignore
//! use tripboard::outbound::persistence::{DbPool, DieselTripRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tripboard")).await?;
//! let trips = DieselTripRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_engagement_repository;
mod diesel_public_trip_repository;
mod diesel_trip_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;
mod trip_graph;

pub use diesel_engagement_repository::DieselEngagementRepository;
pub use diesel_public_trip_repository::DieselPublicTripRepository;
pub use diesel_trip_repository::DieselTripRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
