//! HTTP round trips through the full handler stack over the in-memory store.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};

use tripboard::Trace;
use tripboard::domain::ports::{IdGenerator, RandomIdGenerator};
use tripboard::domain::trips::TripDraft;
use tripboard::domain::{EngagementService, PublicTripService, TRACE_ID_HEADER, TripService};
use tripboard::inbound::http::caller::SHADOW_HEADER;
use tripboard::inbound::http::configure;
use tripboard::inbound::http::state::HttpState;
use tripboard::outbound::memory::MemoryStore;
use tripboard::test_support::http::{SIGN_IN_PATH, sign_in, test_session_middleware};
use tripboard::test_support::trips::tokyo_week;

fn http_state() -> HttpState {
    let store = Arc::new(MemoryStore::new());
    let ids: Arc<dyn IdGenerator> = Arc::new(RandomIdGenerator);
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let trips = Arc::new(TripService::new(
        store.clone(),
        store.clone(),
        ids.clone(),
        clock.clone(),
    ));
    HttpState::new(
        trips.clone(),
        trips,
        Arc::new(PublicTripService::new(
            store.clone(),
            store.clone(),
            store.clone(),
        )),
        Arc::new(EngagementService::new(
            store.clone(),
            store.clone(),
            store,
            ids,
            clock,
        )),
    )
}

fn draft_json(draft: &TripDraft) -> Value {
    serde_json::to_value(draft).expect("draft serialises")
}

async fn sign_in_cookie<S, B>(app: &S, user_id: &str) -> actix_web::cookie::Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri(&format!("/test/sign-in/{user_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie")
}

#[actix_web::test]
async fn shadow_trip_is_published_liked_and_cloned() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(http_state()))
            .wrap(Trace)
            .wrap(test_session_middleware())
            .route(SIGN_IN_PATH, web::post().to(sign_in))
            .service(web::scope("/api/v1").configure(configure)),
    )
    .await;

    // An anonymous browser plans a trip.
    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/trips")
            .insert_header((SHADOW_HEADER, "browser-42"))
            .set_json(draft_json(&tokyo_week()))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    assert!(created.headers().contains_key(TRACE_ID_HEADER));
    let trip: Value = test::read_body_json(created).await;
    let trip_id = trip["id"].as_str().expect("trip id").to_owned();

    // The same browser signs in and claims the trip.
    let author = "11111111-1111-1111-1111-111111111111";
    let author_cookie = sign_in_cookie(&app, author).await;
    let migrated: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/migrate-shadow")
            .cookie(author_cookie.clone())
            .set_json(json!({"shadowUserId": "browser-42"}))
            .to_request(),
    )
    .await;
    assert_eq!(migrated, json!({"migrated": 1}));

    let shadow_list: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/trips")
            .insert_header((SHADOW_HEADER, "browser-42"))
            .to_request(),
    )
    .await;
    assert_eq!(shadow_list, json!([]));

    // Publishing exposes it to anonymous readers.
    let published = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/v1/trips/{trip_id}/visibility"))
            .cookie(author_cookie.clone())
            .set_json(json!({"visibility": "public"}))
            .to_request(),
    )
    .await;
    assert_eq!(published.status(), StatusCode::OK);

    let feed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/public-trips?cities=Tokyo&durations=4-7&months=4")
            .to_request(),
    )
    .await;
    assert_eq!(feed["total"], 1);
    assert_eq!(feed["pageSize"], 12);
    assert_eq!(feed["items"][0]["id"], trip_id.as_str());

    // A second traveller likes and clones it.
    let traveller_cookie = sign_in_cookie(&app, "22222222-2222-2222-2222-222222222222").await;
    let like: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/public-trips/{trip_id}/like"))
            .cookie(traveller_cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(like, json!({"liked": true, "totalLikes": 1}));

    let detail: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/public-trips/{trip_id}"))
            .cookie(traveller_cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(detail["hasLiked"], true);
    assert_eq!(detail["metadata"]["likes"], 1);

    let cloned = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/public-trips/{trip_id}/clone"))
            .cookie(traveller_cookie.clone())
            .set_json(json!({"tripName": "Our Tokyo"}))
            .to_request(),
    )
    .await;
    assert_eq!(cloned.status(), StatusCode::CREATED);
    let copy: Value = test::read_body_json(cloned).await;
    assert_ne!(copy["id"], trip_id.as_str());
    assert_eq!(copy["visibility"], "private");

    let own: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/trips")
            .cookie(traveller_cookie)
            .to_request(),
    )
    .await;
    assert_eq!(own.as_array().map(Vec::len), Some(1));
    assert_eq!(own[0]["name"], "Our Tokyo");
}

#[actix_web::test]
async fn foreign_trips_look_missing() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(http_state()))
            .wrap(test_session_middleware())
            .service(web::scope("/api/v1").configure(configure)),
    )
    .await;

    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/trips")
            .insert_header((SHADOW_HEADER, "owner-browser"))
            .set_json(draft_json(&tokyo_week()))
            .to_request(),
    )
    .await;
    let trip: Value = test::read_body_json(created).await;
    let trip_id = trip["id"].as_str().expect("trip id");

    for request in [
        test::TestRequest::get().uri(&format!("/api/v1/trips/{trip_id}")),
        test::TestRequest::delete().uri(&format!("/api/v1/trips/{trip_id}")),
        test::TestRequest::get().uri(&format!("/api/v1/public-trips/{trip_id}")),
    ] {
        let response = test::call_service(
            &app,
            request
                .insert_header((SHADOW_HEADER, "someone-else"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
