//! Tests for the public trip feed service.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockall::predicate::eq;
use pagination::PageRequest;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{
    MockEngagementRepository, MockPublicTripRepository, MockUserRepository,
    SequentialIdGenerator,
};
use crate::domain::trips::Visibility;
use crate::domain::{ErrorCode, ShadowId, User};
use crate::test_support::trips::{date, draft};

type Service = PublicTripService<MockPublicTripRepository, MockEngagementRepository, MockUserRepository>;

fn public_trip(seed: u128, owner: Owner) -> Trip {
    let now = Utc
        .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp");
    let ids = SequentialIdGenerator::starting_at(u64::try_from(seed * 100).expect("seed fits"));
    let mut trip = Trip::from_draft(
        TripId::from_uuid(Uuid::from_u128(seed)),
        owner,
        draft(&format!("Trip {seed}"), date(2025, 9, 1), 3),
        &ids,
        now,
    )
    .expect("valid draft");
    trip.set_visibility(Visibility::Public, now);
    trip
}

fn shadow_owner() -> Owner {
    Owner::Shadow(ShadowId::new("guest").expect("valid shadow id"))
}

fn service(
    public_trips: MockPublicTripRepository,
    engagement: MockEngagementRepository,
    users: MockUserRepository,
) -> Service {
    PublicTripService::new(Arc::new(public_trips), Arc::new(engagement), Arc::new(users))
}

fn page_of(trips: Vec<Trip>) -> Page<Trip> {
    let total = trips.len() as u64;
    Page::new(trips, total, PageRequest::default())
}

#[tokio::test]
async fn anonymous_listing_skips_like_lookup() {
    let mut public_trips = MockPublicTripRepository::new();
    public_trips
        .expect_find_public()
        .times(1)
        .return_once(|_, _, _| Ok(page_of(vec![public_trip(1, shadow_owner())])));
    let mut engagement = MockEngagementRepository::new();
    engagement.expect_liked_trip_ids().never();

    let page = service(public_trips, engagement, MockUserRepository::new())
        .list_public(ListPublicTripsRequest::default())
        .await
        .expect("listing succeeds");

    assert_eq!(page.items().len(), 1);
    assert_eq!(page.items()[0].has_liked, None);
}

#[tokio::test]
async fn viewer_listing_resolves_likes_in_one_batch() {
    let viewer = UserId::random();
    let trips: Vec<Trip> = (1..=3).map(|seed| public_trip(seed, shadow_owner())).collect();
    let ids: Vec<TripId> = trips.iter().map(|trip| trip.id).collect();
    let liked_id = ids[1];

    let mut public_trips = MockPublicTripRepository::new();
    public_trips
        .expect_find_public()
        .times(1)
        .return_once(move |_, _, _| Ok(page_of(trips)));
    let mut engagement = MockEngagementRepository::new();
    engagement
        .expect_liked_trip_ids()
        .withf(move |user_id, trip_ids| *user_id == viewer && trip_ids == ids.as_slice())
        .times(1)
        .return_once(move |_, _| Ok(HashSet::from([liked_id])));

    let page = service(public_trips, engagement, MockUserRepository::new())
        .list_public(ListPublicTripsRequest {
            viewer: Some(viewer),
            ..ListPublicTripsRequest::default()
        })
        .await
        .expect("listing succeeds");

    let flags: Vec<Option<bool>> = page.items().iter().map(|s| s.has_liked).collect();
    assert_eq!(flags, vec![Some(false), Some(true), Some(false)]);
}

#[tokio::test]
async fn empty_page_needs_no_like_lookup() {
    let mut public_trips = MockPublicTripRepository::new();
    public_trips
        .expect_find_public()
        .times(1)
        .return_once(|_, _, _| Ok(page_of(Vec::new())));
    let mut engagement = MockEngagementRepository::new();
    engagement.expect_liked_trip_ids().never();

    let page = service(public_trips, engagement, MockUserRepository::new())
        .list_public(ListPublicTripsRequest {
            viewer: Some(UserId::random()),
            ..ListPublicTripsRequest::default()
        })
        .await
        .expect("listing succeeds");

    assert!(page.items().is_empty());
    assert_eq!(page.total(), 0);
}

#[tokio::test]
async fn detail_includes_author_for_registered_owner() {
    let author = User {
        id: UserId::random(),
        oauth_subject: None,
        name: "Lin".into(),
        display_name: Some("  ".into()),
        avatar_url: None,
        home_city: Some("Taipei".into()),
    };
    let trip = public_trip(7, Owner::Authenticated(author.id));
    let trip_id = trip.id;

    let mut public_trips = MockPublicTripRepository::new();
    public_trips
        .expect_find_public_by_id()
        .with(eq(trip_id))
        .times(1)
        .return_once(move |_| Ok(Some(trip)));
    let mut users = MockUserRepository::new();
    let stored = author.clone();
    users
        .expect_find_author()
        .with(eq(author.id))
        .times(1)
        .return_once(move |_| Ok(Some(stored)));

    let detail = service(public_trips, MockEngagementRepository::new(), users)
        .get_public(trip_id, None)
        .await
        .expect("detail");

    let shown = detail.author.expect("author present");
    assert_eq!(shown.name, "Lin");
    assert_eq!(shown.city.as_deref(), Some("Taipei"));
    assert_eq!(detail.summary.has_liked, None);
}

#[tokio::test]
async fn detail_reports_viewer_like_state() {
    let viewer = UserId::random();
    let trip = public_trip(3, shadow_owner());
    let trip_id = trip.id;

    let mut public_trips = MockPublicTripRepository::new();
    public_trips
        .expect_find_public_by_id()
        .return_once(move |_| Ok(Some(trip)));
    let mut engagement = MockEngagementRepository::new();
    engagement
        .expect_liked_trip_ids()
        .times(1)
        .return_once(move |_, _| Ok(HashSet::from([trip_id])));

    let detail = service(public_trips, engagement, MockUserRepository::new())
        .get_public(trip_id, Some(viewer))
        .await
        .expect("detail");

    assert_eq!(detail.summary.has_liked, Some(true));
    assert_eq!(detail.author, None);
}

#[tokio::test]
async fn missing_public_trip_is_not_found() {
    let mut public_trips = MockPublicTripRepository::new();
    public_trips
        .expect_find_public_by_slug()
        .withf(|slug| slug == "nowhere")
        .times(1)
        .return_once(|_| Ok(None));

    let err = service(
        public_trips,
        MockEngagementRepository::new(),
        MockUserRepository::new(),
    )
    .get_public_by_slug(" nowhere ".into(), None)
    .await
    .expect_err("missing slug");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn feed_outage_maps_to_service_unavailable() {
    let mut public_trips = MockPublicTripRepository::new();
    public_trips
        .expect_find_public()
        .return_once(|_, _, _| Err(PublicTripRepositoryError::connection("refused")));

    let err = service(
        public_trips,
        MockEngagementRepository::new(),
        MockUserRepository::new(),
    )
    .list_public(ListPublicTripsRequest::default())
    .await
    .expect_err("outage");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
