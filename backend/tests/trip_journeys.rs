//! End-to-end trip journeys through the domain services over the in-memory
//! store: an anonymous planner signs up, publishes, and other travellers
//! browse, like and clone the result.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use pagination::PageRequest;
use rstest::{fixture, rstest};

use tripboard::domain::ports::{
    ClonePublicTripRequest, CreateTripRequest, EngagementCommand, IdGenerator,
    ListPublicTripsRequest, MigrateOwnershipRequest, PublicTripQuery, PublicTripRepository,
    RandomIdGenerator, SetVisibilityRequest, TripCommand, TripQuery,
};
use tripboard::domain::public_trips::{DurationRange, PublicTripFilters, PublicTripSort};
use tripboard::domain::trips::{TripId, Visibility};
use tripboard::domain::{
    EngagementService, ErrorCode, Owner, PublicTripService, ShadowId, TripService, UserId,
};
use tripboard::outbound::memory::MemoryStore;
use tripboard::test_support::MutableClock;
use tripboard::test_support::trips::{date, draft, tokyo_week};

type Trips = TripService<MemoryStore, MemoryStore>;
type Feed = PublicTripService<MemoryStore, MemoryStore, MemoryStore>;
type Engagement = EngagementService<MemoryStore, MemoryStore, MemoryStore>;

struct World {
    store: Arc<MemoryStore>,
    clock: Arc<MutableClock>,
    trips: Trips,
    feed: Feed,
    engagement: Engagement,
}

#[fixture]
fn world() -> World {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(MutableClock::fixed());
    let ids: Arc<dyn IdGenerator> = Arc::new(RandomIdGenerator);
    let dyn_clock: Arc<dyn Clock> = clock.clone();
    World {
        trips: TripService::new(store.clone(), store.clone(), ids.clone(), dyn_clock.clone()),
        feed: PublicTripService::new(store.clone(), store.clone(), store.clone()),
        engagement: EngagementService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            ids,
            dyn_clock,
        ),
        store,
        clock,
    }
}

fn shadow(raw: &str) -> Owner {
    Owner::Shadow(ShadowId::new(raw).expect("valid shadow id"))
}

fn feed_request(filters: PublicTripFilters, viewer: Option<UserId>) -> ListPublicTripsRequest {
    ListPublicTripsRequest {
        filters,
        sort: PublicTripSort::Featured,
        page: PageRequest::new(1, 12).expect("page"),
        viewer,
    }
}

async fn publish(world: &World, owner: Owner, trip_id: TripId) {
    world
        .trips
        .set_visibility(SetVisibilityRequest {
            owner,
            trip_id,
            visibility: Visibility::Public,
        })
        .await
        .expect("publish");
}

async fn clone_count_of(store: &MemoryStore, trip_id: &TripId) -> i32 {
    store
        .find_public_by_id(trip_id)
        .await
        .expect("lookup")
        .map(|trip| trip.clone_count)
        .unwrap_or_default()
}

#[rstest]
#[tokio::test]
async fn anonymous_planner_keeps_trips_after_signing_in(world: World) {
    let anonymous = shadow("browser-7f3a");
    let created = world
        .trips
        .create(CreateTripRequest {
            owner: anonymous.clone(),
            draft: tokyo_week(),
        })
        .await
        .expect("create");

    let account = UserId::random();
    let moved = world
        .trips
        .migrate_ownership(MigrateOwnershipRequest {
            from: ShadowId::new("browser-7f3a").expect("shadow"),
            to: account,
        })
        .await
        .expect("migrate");
    let again = world
        .trips
        .migrate_ownership(MigrateOwnershipRequest {
            from: ShadowId::new("browser-7f3a").expect("shadow"),
            to: account,
        })
        .await
        .expect("repeat migrate");

    assert_eq!((moved.migrated, again.migrated), (1, 0));
    assert!(world.trips.list_owned(anonymous).await.expect("list").is_empty());
    let owned = world
        .trips
        .get_owned(Owner::Authenticated(account), created.id)
        .await
        .expect("owned after migration");
    assert_eq!(owned.day_plans.len(), 7);
}

#[rstest]
#[tokio::test]
async fn first_publication_time_survives_unpublishing(world: World) {
    let owner = Owner::Authenticated(UserId::random());
    let trip = world
        .trips
        .create(CreateTripRequest {
            owner: owner.clone(),
            draft: tokyo_week(),
        })
        .await
        .expect("create");

    publish(&world, owner.clone(), trip.id).await;
    let first = world
        .feed
        .get_public(trip.id, None)
        .await
        .expect("public")
        .metadata
        .published_at;

    world.clock.advance_seconds(3_600);
    world
        .trips
        .set_visibility(SetVisibilityRequest {
            owner: owner.clone(),
            trip_id: trip.id,
            visibility: Visibility::Private,
        })
        .await
        .expect("unpublish");
    let hidden = world.feed.get_public(trip.id, None).await.expect_err("hidden");
    assert_eq!(hidden.code(), ErrorCode::NotFound);

    world.clock.advance_seconds(3_600);
    publish(&world, owner, trip.id).await;
    let second = world
        .feed
        .get_public(trip.id, None)
        .await
        .expect("public again")
        .metadata
        .published_at;

    assert!(first.is_some());
    assert_eq!(first, second);
}

#[rstest]
#[tokio::test]
async fn feed_filters_combine_across_categories(world: World) {
    let owner = Owner::Authenticated(UserId::random());
    let week = world
        .trips
        .create(CreateTripRequest {
            owner: owner.clone(),
            draft: tokyo_week(),
        })
        .await
        .expect("week");
    let mut weekend_draft = draft("Lisbon Weekend", date(2025, 9, 5), 3);
    weekend_draft.details.tags = vec!["food".to_owned()];
    let weekend = world
        .trips
        .create(CreateTripRequest {
            owner: owner.clone(),
            draft: weekend_draft,
        })
        .await
        .expect("weekend");
    publish(&world, owner.clone(), week.id).await;
    publish(&world, owner, weekend.id).await;

    let food_short_or_long = PublicTripFilters {
        tags: vec!["food".to_owned()],
        durations: vec![
            DurationRange {
                min_days: Some(1),
                max_days: Some(3),
            },
            DurationRange {
                min_days: Some(15),
                max_days: None,
            },
        ],
        ..PublicTripFilters::default()
    };
    let page = world
        .feed
        .list_public(feed_request(food_short_or_long, None))
        .await
        .expect("feed");
    let titles: Vec<_> = page.into_items().into_iter().map(|item| item.title).collect();
    assert_eq!(titles, vec!["Lisbon Weekend"]);

    let kyoto_in_april = PublicTripFilters {
        cities: vec!["Kyoto".to_owned()],
        months: vec![4],
        ..PublicTripFilters::default()
    };
    let page = world
        .feed
        .list_public(feed_request(kyoto_in_april, None))
        .await
        .expect("feed");
    assert_eq!(page.total(), 1);
    assert_eq!(page.into_items()[0].id, week.id);
}

#[rstest]
#[tokio::test]
async fn travellers_like_and_clone_a_published_trip(world: World) {
    let author = Owner::Authenticated(UserId::random());
    let source = world
        .trips
        .create(CreateTripRequest {
            owner: author.clone(),
            draft: tokyo_week(),
        })
        .await
        .expect("create");
    publish(&world, author, source.id).await;

    let traveller = UserId::random();
    let liked = world
        .engagement
        .toggle_like(traveller, source.id)
        .await
        .expect("like");
    assert!(liked.liked);
    assert_eq!(liked.total_likes, 1);

    let page = world
        .feed
        .list_public(feed_request(PublicTripFilters::default(), Some(traveller)))
        .await
        .expect("feed");
    assert_eq!(page.items()[0].has_liked, Some(true));

    let copy = world
        .engagement
        .clone_public_trip(ClonePublicTripRequest {
            source: source.id,
            user_id: traveller,
            name: "Our Tokyo".to_owned(),
        })
        .await
        .expect("clone");
    assert_ne!(copy.id, source.id);
    assert_eq!(copy.visibility, Visibility::Private);
    assert_eq!(copy.details.name, "Our Tokyo");
    assert_eq!(copy.day_plans.len(), source.day_plans.len());
    assert_eq!((copy.likes, copy.clone_count), (0, 0));

    let mut clone_count = 0;
    for _ in 0..50 {
        clone_count = clone_count_of(&world.store, &source.id).await;
        if clone_count == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(clone_count, 1);

    let unliked = world
        .engagement
        .toggle_like(traveller, source.id)
        .await
        .expect("unlike");
    assert_eq!((unliked.liked, unliked.total_likes), (false, 0));
}

#[rstest]
#[tokio::test]
async fn private_trips_cannot_be_cloned(world: World) {
    let author = Owner::Authenticated(UserId::random());
    let source = world
        .trips
        .create(CreateTripRequest {
            owner: author,
            draft: tokyo_week(),
        })
        .await
        .expect("create");

    let error = world
        .engagement
        .clone_public_trip(ClonePublicTripRequest {
            source: source.id,
            user_id: UserId::random(),
            name: "Sneaky copy".to_owned(),
        })
        .await
        .expect_err("private source");

    assert_eq!(error.code(), ErrorCode::NotFound);
}
