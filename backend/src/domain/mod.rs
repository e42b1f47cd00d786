//! Domain primitives, aggregates and services.
//!
//! Purpose: define the trip aggregate, its ownership and visibility rules,
//! and the services that implement the driving ports. Nothing here knows
//! about HTTP or SQL; adapters reach the domain through [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Owner (alias to `owner::Owner`): authenticated user xor shadow user.
//! - User (alias to `user::User`): author record used for attribution.

pub mod error;
pub mod owner;
pub mod ports;
pub mod public_trips;
pub mod trace_id;
pub mod trips;
pub mod user;

mod engagement_service;
mod public_trip_service;
mod trip_service;

pub use self::engagement_service::EngagementService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::owner::{Owner, SHADOW_ID_MAX, ShadowId, ShadowIdError};
pub use self::public_trip_service::PublicTripService;
pub use self::trace_id::TraceId;
pub use self::trip_service::TripService;
pub use self::user::{User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use tripboard::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
