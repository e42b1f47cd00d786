//! Regression coverage for this module.

use chrono::{TimeDelta, TimeZone};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::SequentialIdGenerator;
use crate::domain::trips::TripDraft;
use crate::test_support::trips::{date, draft, tokyo_week};

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn shadow(raw: &str) -> Owner {
    Owner::Shadow(ShadowId::new(raw).expect("valid shadow id"))
}

fn trip(seed: u128, owner: Owner, draft: TripDraft, now: DateTime<Utc>) -> Trip {
    let ids = SequentialIdGenerator::starting_at(u64::try_from(seed * 1_000).expect("seed fits"));
    Trip::from_draft(TripId::from_uuid(Uuid::from_u128(seed)), owner, draft, &ids, now)
        .expect("valid draft")
}

fn public(seed: u128, days: i64, now: DateTime<Utc>) -> Trip {
    let mut trip = trip(seed, shadow("author"), draft(&format!("T{seed}"), date(2025, 1, 1), days), now);
    trip.set_visibility(Visibility::Public, now);
    trip
}

#[rstest]
#[tokio::test]
async fn insert_rejects_duplicate_slug(now: DateTime<Utc>) {
    let store = MemoryStore::new();
    let mut first = tokyo_week();
    first.details.slug = Some("tokyo".into());
    let mut second = draft("Other", date(2025, 1, 1), 2);
    second.details.slug = Some("tokyo".into());
    store
        .insert(&trip(1, shadow("a"), first, now))
        .await
        .expect("first insert");

    let err = store
        .insert(&trip(2, shadow("b"), second, now))
        .await
        .expect_err("slug clash");

    assert!(matches!(err, TripRepositoryError::DuplicateSlug { ref slug } if slug == "tokyo"));
}

#[rstest]
#[tokio::test]
async fn insert_rejects_reused_trip_id(now: DateTime<Utc>) {
    let store = MemoryStore::new();
    let original = trip(1, shadow("a"), tokyo_week(), now);
    store.insert(&original).await.expect("insert");

    let err = store.insert(&original).await.expect_err("duplicate id");

    assert!(matches!(err, TripRepositoryError::Query { .. }));
}

#[rstest]
#[tokio::test]
async fn insert_rejects_child_ids_of_another_trip(now: DateTime<Utc>) {
    let store = MemoryStore::new();
    let original = trip(1, shadow("a"), tokyo_week(), now);
    store.insert(&original).await.expect("insert");

    let mut borrowed = trip(2, shadow("b"), draft("Borrowed", date(2025, 5, 1), 1), now);
    borrowed.destinations = original.destinations.clone();
    let err = store.insert(&borrowed).await.expect_err("child id clash");

    assert_eq!(
        err,
        TripRepositoryError::duplicate_child_id(original.destinations[0].id.to_string())
    );
}

#[rstest]
#[tokio::test]
async fn failed_upsert_leaves_stored_graph_unchanged(now: DateTime<Utc>) {
    let store = MemoryStore::new();
    let owner = shadow("a");
    let mut taken = draft("Taken", date(2025, 1, 1), 1);
    taken.details.slug = Some("taken".into());
    store
        .insert(&trip(1, owner.clone(), taken, now))
        .await
        .expect("insert");
    let original = trip(2, owner.clone(), tokyo_week(), now);
    store.insert(&original).await.expect("insert");

    let mut clash = draft("Renamed", date(2025, 1, 1), 1);
    clash.details.slug = Some("taken".into());
    TripRepository::upsert(&store, &trip(2, owner.clone(), clash, now))
        .await
        .expect_err("slug clash");

    let stored = store
        .find_owned(&original.id, &owner)
        .await
        .expect("lookup")
        .expect("still present");
    assert_eq!(stored, original);
}

#[rstest]
#[tokio::test]
async fn upsert_keeps_engagement_fields(now: DateTime<Utc>) {
    let store = MemoryStore::new();
    let source = public(1, 3, now);
    store.insert(&source).await.expect("insert");
    store
        .toggle_like(&UserId::random(), &source.id)
        .await
        .expect("like");

    let later = now + TimeDelta::hours(3);
    let replacement = trip(1, shadow("author"), draft("Renamed", date(2025, 1, 1), 5), later);
    let stored = TripRepository::upsert(&store, &replacement)
        .await
        .expect("upsert");

    assert_eq!(stored.details.name, "Renamed");
    assert_eq!(stored.likes, 1);
    assert_eq!(stored.visibility, Visibility::Public);
    assert_eq!(stored.published_at, Some(now));
    assert_eq!(stored.created_at, now);
    assert_eq!(stored.updated_at, later);
}

#[rstest]
#[tokio::test]
async fn upsert_refuses_foreign_owner(now: DateTime<Utc>) {
    let store = MemoryStore::new();
    store
        .insert(&trip(1, shadow("a"), tokyo_week(), now))
        .await
        .expect("insert");

    let err = TripRepository::upsert(&store, &trip(1, shadow("b"), draft("Mine", date(2025, 1, 1), 1), now))
        .await
        .expect_err("foreign owner");

    assert!(matches!(err, TripRepositoryError::OwnershipMismatch { .. }));
}

#[rstest]
#[tokio::test]
async fn delete_removes_likes_too(now: DateTime<Utc>) {
    let store = MemoryStore::new();
    let liked = public(1, 3, now);
    store.insert(&liked).await.expect("insert");
    let user_id = UserId::random();
    store.toggle_like(&user_id, &liked.id).await.expect("like");

    assert!(store.delete(&liked.id, &shadow("author")).await.expect("delete"));

    let remaining = store
        .liked_trip_ids(&user_id, &[liked.id])
        .await
        .expect("lookup");
    assert!(remaining.is_empty());
}

#[rstest]
#[tokio::test]
async fn like_count_never_goes_negative(now: DateTime<Utc>) {
    let store = MemoryStore::new();
    let mut drifted = public(1, 3, now);
    drifted.likes = 0;
    store.insert(&drifted).await.expect("insert");
    let user_id = UserId::random();

    store.toggle_like(&user_id, &drifted.id).await.expect("like");
    {
        let mut state = store.state.lock().await;
        if let Some(stored) = state.trips.get_mut(&drifted.id) {
            stored.likes = 0;
        }
    }
    let toggled = store
        .toggle_like(&user_id, &drifted.id)
        .await
        .expect("unlike")
        .expect("public trip");

    assert_eq!(toggled, LikeToggle { liked: false, total_likes: 0 });
}

#[rstest]
#[tokio::test]
async fn feed_pages_without_overlap(now: DateTime<Utc>) {
    let store = MemoryStore::new();
    for seed in 1..=5 {
        store.insert(&public(seed, 3, now)).await.expect("insert");
    }
    store
        .insert(&trip(9, shadow("x"), draft("Hidden", date(2025, 1, 1), 3), now))
        .await
        .expect("insert private");

    let first = store
        .find_public(
            &PublicTripFilters::default(),
            PublicTripSort::Featured,
            PageRequest::new(1, 2).expect("valid page"),
        )
        .await
        .expect("page 1");
    let third = store
        .find_public(
            &PublicTripFilters::default(),
            PublicTripSort::Featured,
            PageRequest::new(3, 2).expect("valid page"),
        )
        .await
        .expect("page 3");

    assert_eq!(first.total(), 5);
    let ids: Vec<TripId> = first.items().iter().map(|trip| trip.id).collect();
    assert_eq!(
        ids,
        vec![TripId::from_uuid(Uuid::from_u128(1)), TripId::from_uuid(Uuid::from_u128(2))]
    );
    assert_eq!(third.items().len(), 1);
    assert!(!third.has_more_pages());
}

#[rstest]
#[tokio::test]
async fn slug_lookup_ignores_private_trips(now: DateTime<Utc>) {
    let store = MemoryStore::new();
    let mut input = draft("Secret", date(2025, 1, 1), 2);
    input.details.slug = Some("secret".into());
    store
        .insert(&trip(1, shadow("a"), input, now))
        .await
        .expect("insert");

    let found = store.find_public_by_slug("secret").await.expect("lookup");

    assert!(found.is_none());
}

#[tokio::test]
async fn increment_clone_count_ignores_missing_trip() {
    let store = MemoryStore::new();

    store
        .increment_clone_count(&TripId::from_uuid(Uuid::nil()))
        .await
        .expect("no-op");
}
