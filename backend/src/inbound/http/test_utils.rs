//! Test helpers for inbound HTTP components.

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;

use crate::domain::UserId;

pub use crate::test_support::http::{SIGN_IN_PATH, sign_in, test_session_middleware};

/// Extract the session cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Sign `user_id` in through the stub at [`SIGN_IN_PATH`] and return the
/// session cookie.
pub async fn signed_in_cookie<S, B>(app: &S, user_id: &UserId) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri(&format!("/test/sign-in/{user_id}"))
        .to_request();
    let response = test::call_service(app, request).await;
    assert!(response.status().is_success(), "sign-in stub failed");
    session_cookie(&response)
}
