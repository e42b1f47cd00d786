//! Cache-control policies for owner-scoped responses.

use actix_web::http::header::{CACHE_CONTROL, HeaderName};

/// Owner-scoped trip data must never be served from a shared cache.
pub const PRIVATE_NO_CACHE_MUST_REVALIDATE: &str = "private, no-cache, must-revalidate";

/// Header pair for `insert_header` on owner-scoped responses.
pub const fn private_no_cache_header() -> (HeaderName, &'static str) {
    (CACHE_CONTROL, PRIVATE_NO_CACHE_MUST_REVALIDATE)
}
