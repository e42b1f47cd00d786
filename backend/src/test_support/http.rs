//! HTTP fixtures shared by handler unit tests and the end-to-end suite.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{HttpResponse, web};

use crate::domain::{ApiResult, Error, UserId};
use crate::inbound::http::session::SessionContext;

/// Route of the sign-in stub; mount with `web::post().to(sign_in)`.
pub const SIGN_IN_PATH: &str = "/test/sign-in/{user_id}";

/// Session middleware with a throwaway key and a non-secure `session` cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Stand-in for the external sign-in flow: stores `user_id` in the session.
pub async fn sign_in(session: SessionContext, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let user_id = UserId::new(path.into_inner())
        .map_err(|err| Error::invalid_request(format!("invalid user id: {err}")))?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::NoContent().finish())
}
