//! Owned-trip API handlers.
//!
//! ```text
//! GET    /api/v1/trips
//! POST   /api/v1/trips
//! GET    /api/v1/trips/{id}
//! PUT    /api/v1/trips/{id}
//! DELETE /api/v1/trips/{id}
//! PATCH  /api/v1/trips/{id}/visibility {"visibility":"public"}
//! ```
//!
//! Every route acts on behalf of the resolved [`Caller`]. Trips owned by
//! anybody else answer `404`.

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateTripRequest, ReplaceTripRequest, SetVisibilityRequest};
use crate::domain::public_trips::PublicTripDetail;
use crate::domain::trips::{TripDraft, TripView, Visibility};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::caller::Caller;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{invalid_value_error, missing_field_error, parse_trip_id};

/// Body of `PATCH /api/v1/trips/{id}/visibility`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityRequest {
    /// One of `private`, `unlisted` or `public`.
    #[schema(example = "public")]
    pub visibility: Option<String>,
}

fn parse_visibility(request: VisibilityRequest) -> Result<Visibility, crate::domain::Error> {
    let raw = request
        .visibility
        .ok_or_else(|| missing_field_error("visibility"))?;
    raw.parse()
        .map_err(|err| invalid_value_error("visibility", &raw, err))
}

/// List the caller's trips, most recently updated first.
#[utoipa::path(
    get,
    path = "/api/v1/trips",
    responses(
        (status = 200, description = "Owned trips", body = [TripView]),
        (status = 401, description = "No identity", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "listTrips"
)]
#[get("/trips")]
pub async fn list_trips(state: web::Data<HttpState>, caller: Caller) -> ApiResult<HttpResponse> {
    let owner = caller.owner()?;
    let trips = state.trips_query.list_owned(owner).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(trips))
}

/// Fetch one owned trip with its itinerary.
#[utoipa::path(
    get,
    path = "/api/v1/trips/{id}",
    params(("id" = String, Path, description = "Trip identifier")),
    responses(
        (status = 200, description = "Trip", body = TripView),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "No identity", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "getTrip"
)]
#[get("/trips/{id}")]
pub async fn get_trip(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = caller.owner()?;
    let trip_id = parse_trip_id(&path)?;
    let trip = state.trips_query.get_owned(owner, trip_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(trip))
}

/// Create a trip with its full itinerary.
#[utoipa::path(
    post,
    path = "/api/v1/trips",
    request_body = TripDraft,
    responses(
        (status = 201, description = "Created trip", body = TripView),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "No identity", body = ErrorSchema),
        (status = 409, description = "Slug already taken", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "createTrip"
)]
#[post("/trips")]
pub async fn create_trip(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<TripDraft>,
) -> ApiResult<HttpResponse> {
    let request = CreateTripRequest {
        owner: caller.owner()?,
        draft: payload.into_inner(),
    };
    let trip = state.trips.create(request).await?;
    Ok(HttpResponse::Created().json(trip))
}

/// Replace a trip and its whole itinerary, creating it if absent.
#[utoipa::path(
    put,
    path = "/api/v1/trips/{id}",
    request_body = TripDraft,
    params(("id" = String, Path, description = "Trip identifier")),
    responses(
        (status = 200, description = "Stored trip", body = TripView),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "No identity", body = ErrorSchema),
        (status = 404, description = "Owned by someone else", body = ErrorSchema),
        (status = 409, description = "Slug already taken", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "replaceTrip"
)]
#[put("/trips/{id}")]
pub async fn replace_trip(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
    payload: web::Json<TripDraft>,
) -> ApiResult<web::Json<TripView>> {
    let request = ReplaceTripRequest {
        owner: caller.owner()?,
        trip_id: parse_trip_id(&path)?,
        draft: payload.into_inner(),
    };
    let trip = state.trips.replace(request).await?;
    Ok(web::Json(trip))
}

/// Delete an owned trip and everything beneath it.
#[utoipa::path(
    delete,
    path = "/api/v1/trips/{id}",
    params(("id" = String, Path, description = "Trip identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "No identity", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "deleteTrip"
)]
#[delete("/trips/{id}")]
pub async fn delete_trip(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = caller.owner()?;
    let trip_id = parse_trip_id(&path)?;
    state.trips.delete(owner, trip_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Change who can see a trip.
///
/// The first switch to `public` stamps `publishedAt`; later changes keep it.
#[utoipa::path(
    patch,
    path = "/api/v1/trips/{id}/visibility",
    request_body = VisibilityRequest,
    params(("id" = String, Path, description = "Trip identifier")),
    responses(
        (status = 200, description = "Trip after the change", body = PublicTripDetail),
        (status = 400, description = "Unknown visibility", body = ErrorSchema),
        (status = 401, description = "No identity", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "setTripVisibility"
)]
#[patch("/trips/{id}/visibility")]
pub async fn set_trip_visibility(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
    payload: web::Json<VisibilityRequest>,
) -> ApiResult<web::Json<PublicTripDetail>> {
    let request = SetVisibilityRequest {
        owner: caller.owner()?,
        trip_id: parse_trip_id(&path)?,
        visibility: parse_visibility(payload.into_inner())?,
    };
    let detail = state.trips.set_visibility(request).await?;
    Ok(web::Json(detail))
}

#[cfg(test)]
#[path = "trips_tests.rs"]
mod tests;
