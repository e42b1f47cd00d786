//! In-process store implementing every repository port.
//!
//! Used when no database is configured and by behaviour tests. All state sits
//! behind one async mutex, so each port call is a single critical section and
//! multi-row mutations are atomic: new state is computed in full before any of
//! it is written back.
//!
//! The store mirrors the relational adapter's constraints: unique trip ids,
//! unique slugs, unique child ids across trips, and one like per user and
//! trip.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::ports::{
    EngagementRepository, EngagementRepositoryError, LikeToggle, PublicTripRepository,
    PublicTripRepositoryError, TripRepository, TripRepositoryError, UserRepository,
    UserRepositoryError,
};
use crate::domain::public_trips::{PublicTripFilters, PublicTripSort};
use crate::domain::trips::{Trip, TripId, Visibility};
use crate::domain::{Owner, ShadowId, User, UserId};

#[derive(Debug, Default)]
struct State {
    trips: HashMap<TripId, Trip>,
    likes: HashSet<(UserId, TripId)>,
    users: HashMap<UserId, User>,
}

impl State {
    fn check_constraints(&self, trip: &Trip) -> Result<(), TripRepositoryError> {
        let others = self.trips.values().filter(|other| other.id != trip.id);
        let ours: HashSet<Uuid> = child_ids(trip).collect();
        for other in others {
            if let (Some(slug), Some(taken)) = (&trip.details.slug, &other.details.slug) {
                if slug == taken {
                    return Err(TripRepositoryError::duplicate_slug(slug.as_str()));
                }
            }
            if let Some(clash) = child_ids(other).find(|id| ours.contains(id)) {
                return Err(TripRepositoryError::duplicate_child_id(clash.to_string()));
            }
        }
        Ok(())
    }
}

fn child_ids(trip: &Trip) -> impl Iterator<Item = Uuid> + '_ {
    trip.destinations
        .iter()
        .map(|destination| destination.id)
        .chain(trip.day_plans.iter().flat_map(|plan| {
            std::iter::once(plan.id)
                .chain(plan.destinations.iter().map(|link| link.id))
                .chain(plan.activities.iter().map(|activity| activity.id))
        }))
}

fn page_of(mut matches: Vec<Trip>, sort: PublicTripSort, page: PageRequest) -> Page<Trip> {
    matches.sort_by(|left, right| sort.compare(left, right));
    let total = matches.len() as u64;
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    let items = matches.into_iter().skip(offset).take(limit).collect();
    Page::new(items, total, page)
}

/// Shared in-memory implementation of the repository ports.
///
/// # Examples
/// ```
/// use tripboard::outbound::memory::MemoryStore;
///
/// let store = MemoryStore::new();
/// # let _ = store;
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TripRepository for MemoryStore {
    async fn list_owned(&self, owner: &Owner) -> Result<Vec<Trip>, TripRepositoryError> {
        let state = self.state.lock().await;
        let mut trips: Vec<Trip> = state
            .trips
            .values()
            .filter(|trip| &trip.owner == owner)
            .cloned()
            .collect();
        trips.sort_by(|left, right| {
            right
                .updated_at
                .cmp(&left.updated_at)
                .then_with(|| left.id.cmp(&right.id))
        });
        Ok(trips)
    }

    async fn find_owned(
        &self,
        trip_id: &TripId,
        owner: &Owner,
    ) -> Result<Option<Trip>, TripRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .trips
            .get(trip_id)
            .filter(|trip| &trip.owner == owner)
            .cloned())
    }

    async fn insert(&self, trip: &Trip) -> Result<(), TripRepositoryError> {
        let mut state = self.state.lock().await;
        if state.trips.contains_key(&trip.id) {
            return Err(TripRepositoryError::query(format!(
                "duplicate key value violates unique constraint: {}",
                trip.id
            )));
        }
        state.check_constraints(trip)?;
        state.trips.insert(trip.id, trip.clone());
        Ok(())
    }

    async fn upsert(&self, trip: &Trip) -> Result<Trip, TripRepositoryError> {
        let mut state = self.state.lock().await;
        let stored = match state.trips.get(&trip.id) {
            None => trip.clone(),
            Some(existing) if existing.owner != trip.owner => {
                return Err(TripRepositoryError::ownership_mismatch(trip.id.to_string()));
            }
            Some(existing) => Trip {
                likes: existing.likes,
                clone_count: existing.clone_count,
                visibility: existing.visibility,
                published_at: existing.published_at,
                created_at: existing.created_at,
                ..trip.clone()
            },
        };
        state.check_constraints(&stored)?;
        state.trips.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, trip_id: &TripId, owner: &Owner) -> Result<bool, TripRepositoryError> {
        let mut state = self.state.lock().await;
        let owned = state
            .trips
            .get(trip_id)
            .is_some_and(|trip| &trip.owner == owner);
        if !owned {
            return Ok(false);
        }
        state.trips.remove(trip_id);
        state.likes.retain(|(_, liked)| liked != trip_id);
        Ok(true)
    }

    async fn set_visibility(
        &self,
        trip_id: &TripId,
        owner: &Owner,
        visibility: Visibility,
        now: DateTime<Utc>,
    ) -> Result<Option<Trip>, TripRepositoryError> {
        let mut state = self.state.lock().await;
        let Some(trip) = state
            .trips
            .get_mut(trip_id)
            .filter(|trip| &trip.owner == owner)
        else {
            return Ok(None);
        };
        trip.set_visibility(visibility, now);
        Ok(Some(trip.clone()))
    }

    async fn migrate_ownership(
        &self,
        from: &ShadowId,
        to: &UserId,
    ) -> Result<u64, TripRepositoryError> {
        let mut state = self.state.lock().await;
        let mut migrated = 0;
        for trip in state.trips.values_mut() {
            if trip.owner.shadow_id() == Some(from) {
                trip.owner = Owner::Authenticated(*to);
                migrated += 1;
            }
        }
        Ok(migrated)
    }
}

#[async_trait]
impl PublicTripRepository for MemoryStore {
    async fn find_public(
        &self,
        filters: &PublicTripFilters,
        sort: PublicTripSort,
        page: PageRequest,
    ) -> Result<Page<Trip>, PublicTripRepositoryError> {
        let state = self.state.lock().await;
        let matches = state
            .trips
            .values()
            .filter(|trip| trip.is_public() && filters.matches(trip))
            .cloned()
            .collect();
        Ok(page_of(matches, sort, page))
    }

    async fn find_public_by_id(
        &self,
        trip_id: &TripId,
    ) -> Result<Option<Trip>, PublicTripRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .trips
            .get(trip_id)
            .filter(|trip| trip.is_public())
            .cloned())
    }

    async fn find_public_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Trip>, PublicTripRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .trips
            .values()
            .find(|trip| trip.is_public() && trip.details.slug.as_deref() == Some(slug))
            .cloned())
    }
}

#[async_trait]
impl EngagementRepository for MemoryStore {
    async fn toggle_like(
        &self,
        user_id: &UserId,
        trip_id: &TripId,
    ) -> Result<Option<LikeToggle>, EngagementRepositoryError> {
        let mut state = self.state.lock().await;
        let State { trips, likes, .. } = &mut *state;
        let Some(trip) = trips.get_mut(trip_id) else {
            return Ok(None);
        };
        let key = (*user_id, *trip_id);
        let liked = if likes.remove(&key) {
            trip.likes = (trip.likes - 1).max(0);
            false
        } else if !trip.is_public() {
            return Ok(None);
        } else {
            likes.insert(key);
            trip.likes += 1;
            true
        };
        Ok(Some(LikeToggle {
            liked,
            total_likes: trip.likes,
        }))
    }

    async fn liked_trip_ids(
        &self,
        user_id: &UserId,
        trip_ids: &[TripId],
    ) -> Result<HashSet<TripId>, EngagementRepositoryError> {
        let state = self.state.lock().await;
        Ok(trip_ids
            .iter()
            .filter(|trip_id| state.likes.contains(&(*user_id, **trip_id)))
            .copied()
            .collect())
    }

    async fn increment_clone_count(
        &self,
        trip_id: &TripId,
    ) -> Result<(), EngagementRepositoryError> {
        let mut state = self.state.lock().await;
        if let Some(trip) = state.trips.get_mut(trip_id) {
            trip.clone_count += 1;
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn save_author(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut state = self.state.lock().await;
        state.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_author(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let state = self.state.lock().await;
        Ok(state.users.get(id).cloned())
    }
}

#[cfg(test)]
mod tests;
