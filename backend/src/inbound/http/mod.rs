//! HTTP inbound adapter exposing the REST endpoints.
//!
//! Handlers translate requests into driving-port calls on [`state::HttpState`]
//! and never touch storage directly.

use actix_web::web;

pub mod auth;
pub mod cache_control;
pub mod caller;
pub mod error;
pub mod health;
pub mod public_trips;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod trips;
pub mod validation;

pub use error::ApiResult;

/// Register every `/api/v1` endpoint on `cfg`.
///
/// The slug lookup is registered ahead of `/public-trips/{id}` so the literal
/// `slug` segment is never parsed as a trip id.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use tripboard::inbound::http::{configure, state::HttpState};
///
/// let _app = App::new()
///     .app_data(web::Data::new(HttpState::default()))
///     .service(web::scope("/api/v1").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(trips::list_trips)
        .service(trips::create_trip)
        .service(trips::get_trip)
        .service(trips::replace_trip)
        .service(trips::delete_trip)
        .service(trips::set_trip_visibility)
        .service(public_trips::list_public_trips)
        .service(public_trips::get_public_trip_by_slug)
        .service(public_trips::get_public_trip)
        .service(public_trips::toggle_like)
        .service(public_trips::clone_trip)
        .service(auth::migrate_shadow);
}
