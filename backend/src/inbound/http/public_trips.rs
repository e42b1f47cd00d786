//! Public trip feed, likes and clones.
//!
//! ```text
//! GET  /api/v1/public-trips?q=kyoto&durations=1-3,15-&months=4&sort=longest&page=2
//! GET  /api/v1/public-trips/{id}
//! GET  /api/v1/public-trips/slug/{slug}
//! POST /api/v1/public-trips/{id}/like
//! POST /api/v1/public-trips/{id}/clone {"tripName":"My Kyoto"}
//! ```
//!
//! Multi-valued filters accept repeated keys, comma-separated values or both.

use actix_web::{HttpResponse, get, post, web};
use pagination::{Page, PageLimits, PageRequest, PageRequestError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{ClonePublicTripRequest, LikeToggle, ListPublicTripsRequest};
use crate::domain::public_trips::{
    DurationRange, PublicTripDetail, PublicTripFilters, PublicTripSort, PublicTripSummary,
};
use crate::domain::trips::TripView;
use crate::inbound::http::ApiResult;
use crate::inbound::http::caller::Caller;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{invalid_value_error, missing_field_error, parse_trip_id};

/// One page of the public feed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicTripPage {
    pub items: Vec<PublicTripSummary>,
    /// Matches across all pages.
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub has_more_pages: bool,
}

impl From<Page<PublicTripSummary>> for PublicTripPage {
    fn from(page: Page<PublicTripSummary>) -> Self {
        let request = page.request();
        let total = page.total();
        let has_more_pages = page.has_more_pages();
        Self {
            items: page.into_items(),
            total,
            page: request.page(),
            page_size: request.page_size(),
            has_more_pages,
        }
    }
}

/// Body of `POST /api/v1/public-trips/{id}/clone`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloneTripRequest {
    /// Name of the new private copy.
    #[schema(example = "Our Kyoto spring")]
    pub trip_name: Option<String>,
}

/// Feed parameters decoded from the raw query string.
#[derive(Debug, Default, PartialEq)]
struct FeedQuery {
    filters: PublicTripFilters,
    sort: Option<String>,
    page: Option<u32>,
    page_size: Option<u32>,
}

fn split_values(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|value| !value.is_empty())
}

fn parse_number(key: &str, raw: &str) -> Result<u32, Error> {
    raw.trim()
        .parse()
        .map_err(|err| invalid_value_error(key, raw, err))
}

fn parse_month(raw: &str) -> Result<u32, Error> {
    let month = parse_number("months", raw)?;
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(invalid_value_error("months", raw, "months run from 1 to 12"))
    }
}

impl FeedQuery {
    fn parse(pairs: Vec<(String, String)>) -> Result<Self, Error> {
        let mut query = Self::default();
        for (key, raw) in pairs {
            let filters = &mut query.filters;
            match key.as_str() {
                "q" => filters.query = Some(raw),
                "cities" => filters.cities.extend(split_values(&raw).map(str::to_owned)),
                "durations" => {
                    for token in split_values(&raw) {
                        let range: DurationRange = token
                            .parse()
                            .map_err(|err| invalid_value_error("durations", token, err))?;
                        filters.durations.push(range);
                    }
                }
                "months" => {
                    for token in split_values(&raw) {
                        filters.months.push(parse_month(token)?);
                    }
                }
                "travelerTypes" => filters
                    .traveler_types
                    .extend(split_values(&raw).map(str::to_owned)),
                "tags" => filters.tags.extend(split_values(&raw).map(str::to_owned)),
                "seasons" => filters.seasons.extend(split_values(&raw).map(str::to_owned)),
                "budgetLevels" => filters
                    .budget_levels
                    .extend(split_values(&raw).map(str::to_owned)),
                "paces" => filters.paces.extend(split_values(&raw).map(str::to_owned)),
                "sort" => query.sort = Some(raw),
                "page" => query.page = Some(parse_number("page", &raw)?),
                "pageSize" => query.page_size = Some(parse_number("pageSize", &raw)?),
                _ => {}
            }
        }
        Ok(query)
    }

    fn page_request(&self, limits: PageLimits) -> Result<PageRequest, Error> {
        PageRequest::from_optional(self.page, self.page_size, limits).map_err(|err| match err {
            PageRequestError::PageOutOfRange { page } => {
                invalid_value_error("page", &page.to_string(), err)
            }
            other => invalid_value_error(
                "pageSize",
                &self.page_size.unwrap_or_default().to_string(),
                other,
            ),
        })
    }
}

/// Browse public trips.
#[utoipa::path(
    get,
    path = "/api/v1/public-trips",
    params(
        ("q" = Option<String>, Query, description = "Substring of name, summary or description"),
        ("cities" = Option<String>, Query, description = "Comma-separated destination cities"),
        ("durations" = Option<String>, Query, description = "Day ranges such as 1-3,10-14,15-"),
        ("months" = Option<String>, Query, description = "Travel months 1 to 12"),
        ("travelerTypes" = Option<String>, Query, description = "Traveler types"),
        ("tags" = Option<String>, Query, description = "Tags"),
        ("seasons" = Option<String>, Query, description = "Seasons"),
        ("budgetLevels" = Option<String>, Query, description = "Budget levels"),
        ("paces" = Option<String>, Query, description = "Paces"),
        ("sort" = Option<String>, Query, description = "featured, mostRecent, shortest or longest"),
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("pageSize" = Option<u32>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Feed page", body = PublicTripPage),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["public-trips"],
    operation_id = "listPublicTrips",
    security([])
)]
#[get("/public-trips")]
pub async fn list_public_trips(
    state: web::Data<HttpState>,
    caller: Caller,
    query: web::Query<Vec<(String, String)>>,
) -> ApiResult<web::Json<PublicTripPage>> {
    let query = FeedQuery::parse(query.into_inner())?;
    let page = query.page_request(state.page_limits)?;
    let request = ListPublicTripsRequest {
        sort: PublicTripSort::parse_or_default(query.sort.as_deref()),
        filters: query.filters,
        page,
        viewer: caller.user_id(),
    };
    let page = state.public_trips.list_public(request).await?;
    Ok(web::Json(PublicTripPage::from(page)))
}

/// Full detail of a public trip.
#[utoipa::path(
    get,
    path = "/api/v1/public-trips/{id}",
    params(("id" = String, Path, description = "Trip identifier")),
    responses(
        (status = 200, description = "Trip detail", body = PublicTripDetail),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Not public or missing", body = ErrorSchema)
    ),
    tags = ["public-trips"],
    operation_id = "getPublicTrip",
    security([])
)]
#[get("/public-trips/{id}")]
pub async fn get_public_trip(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<web::Json<PublicTripDetail>> {
    let trip_id = parse_trip_id(&path)?;
    let detail = state
        .public_trips
        .get_public(trip_id, caller.user_id())
        .await?;
    Ok(web::Json(detail))
}

/// Full detail of a public trip addressed by slug.
#[utoipa::path(
    get,
    path = "/api/v1/public-trips/slug/{slug}",
    params(("slug" = String, Path, description = "Trip slug")),
    responses(
        (status = 200, description = "Trip detail", body = PublicTripDetail),
        (status = 404, description = "Not public or missing", body = ErrorSchema)
    ),
    tags = ["public-trips"],
    operation_id = "getPublicTripBySlug",
    security([])
)]
#[get("/public-trips/slug/{slug}")]
pub async fn get_public_trip_by_slug(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<web::Json<PublicTripDetail>> {
    let detail = state
        .public_trips
        .get_public_by_slug(path.into_inner(), caller.user_id())
        .await?;
    Ok(web::Json(detail))
}

/// Like a public trip, or take the like back.
#[utoipa::path(
    post,
    path = "/api/v1/public-trips/{id}/like",
    params(("id" = String, Path, description = "Trip identifier")),
    responses(
        (status = 200, description = "Like state after the toggle", body = LikeToggle),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Not public or missing", body = ErrorSchema)
    ),
    tags = ["public-trips"],
    operation_id = "toggleTripLike"
)]
#[post("/public-trips/{id}/like")]
pub async fn toggle_like(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<web::Json<LikeToggle>> {
    let user_id = caller.require_user_id()?;
    let trip_id = parse_trip_id(&path)?;
    let toggle = state.engagement.toggle_like(user_id, trip_id).await?;
    Ok(web::Json(toggle))
}

/// Copy a public trip into the caller's private trips.
#[utoipa::path(
    post,
    path = "/api/v1/public-trips/{id}/clone",
    request_body = CloneTripRequest,
    params(("id" = String, Path, description = "Source trip identifier")),
    responses(
        (status = 201, description = "The new private copy", body = TripView),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Not public or missing", body = ErrorSchema)
    ),
    tags = ["public-trips"],
    operation_id = "clonePublicTrip"
)]
#[post("/public-trips/{id}/clone")]
pub async fn clone_trip(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
    payload: web::Json<CloneTripRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = caller.require_user_id()?;
    let source = parse_trip_id(&path)?;
    let name = payload
        .into_inner()
        .trip_name
        .ok_or_else(|| missing_field_error("tripName"))?;
    let copy = state
        .engagement
        .clone_public_trip(ClonePublicTripRequest {
            source,
            user_id,
            name,
        })
        .await?;
    Ok(HttpResponse::Created().json(copy))
}

#[cfg(test)]
#[path = "public_trips_tests.rs"]
mod tests;
