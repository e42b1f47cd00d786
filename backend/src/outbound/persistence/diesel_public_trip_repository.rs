//! PostgreSQL-backed public trip feed.
//!
//! Filters are compiled into one boxed query that is run twice: once for the
//! unpaginated total and once for the requested page.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Text};
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};

use crate::domain::ports::{PublicTripRepository, PublicTripRepositoryError};
use crate::domain::public_trips::{DurationRange, PublicTripFilters, PublicTripSort};
use crate::domain::trips::{Trip, TripId, Visibility};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::TripRow;
use super::pool::{DbPool, PoolError};
use super::schema::{trip_destinations, trips};
use super::trip_graph::{GraphError, load_graphs};

diesel::define_sql_function!(fn lower(value: Text) -> Text);

type DurationClause = Box<dyn BoxableExpression<trips::table, Pg, SqlType = Bool>>;

/// Diesel-backed implementation of the public trip repository port.
#[derive(Clone)]
pub struct DieselPublicTripRepository {
    pool: DbPool,
}

impl DieselPublicTripRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PublicTripRepositoryError {
    map_basic_pool_error(error, |message| PublicTripRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> PublicTripRepositoryError {
    map_basic_diesel_error(
        error,
        PublicTripRepositoryError::query,
        PublicTripRepositoryError::connection,
    )
}

fn map_graph_error(error: GraphError) -> PublicTripRepositoryError {
    match error {
        GraphError::Diesel(error) => map_diesel_error(error),
        other => PublicTripRepositoryError::query(other.to_string()),
    }
}

/// Escape `LIKE` wildcards so user text matches literally.
fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn duration_clause(range: &DurationRange) -> Option<DurationClause> {
    match (range.min_days, range.max_days) {
        (Some(min), Some(max)) => Some(Box::new(trips::duration_days.between(min, max))),
        (Some(min), None) => Some(Box::new(trips::duration_days.ge(min))),
        (None, Some(max)) => Some(Box::new(trips::duration_days.le(max))),
        (None, None) => None,
    }
}

fn any_duration(filters: &PublicTripFilters) -> Option<DurationClause> {
    filters
        .effective_durations()
        .filter_map(duration_clause)
        .reduce(|acc, clause| -> DurationClause { Box::new(acc.or(clause)) })
}

/// Public trips matching `filters`, without ordering or paging.
fn filtered(filters: &PublicTripFilters) -> trips::BoxedQuery<'static, Pg> {
    let mut query = trips::table
        .filter(trips::visibility.eq(Visibility::Public.as_str()))
        .into_boxed();

    if let Some(text) = filters.search_text() {
        let pattern = like_pattern(text);
        query = query.filter(
            trips::name
                .ilike(pattern.clone())
                .or(trips::summary.ilike(pattern.clone()))
                .or(trips::description.ilike(pattern)),
        );
    }
    if !filters.cities.is_empty() {
        let cities: Vec<String> = filters
            .cities
            .iter()
            .map(|city| city.trim().to_lowercase())
            .collect();
        query = query.filter(
            trips::id.eq_any(
                trip_destinations::table
                    .filter(lower(trip_destinations::city).eq_any(cities))
                    .select(trip_destinations::trip_id),
            ),
        );
    }
    if let Some(durations) = any_duration(filters) {
        query = query.filter(durations);
    }
    if !filters.months.is_empty() {
        let months: Vec<i32> = filters
            .months
            .iter()
            .filter_map(|month| i32::try_from(*month).ok())
            .collect();
        query = query.filter(trips::travel_months.overlaps_with(months));
    }
    if !filters.traveler_types.is_empty() {
        query = query.filter(trips::traveler_type.eq_any(filters.traveler_types.clone()));
    }
    if !filters.tags.is_empty() {
        query = query.filter(trips::tags.overlaps_with(filters.tags.clone()));
    }
    if !filters.seasons.is_empty() {
        query = query.filter(trips::seasons.overlaps_with(filters.seasons.clone()));
    }
    if !filters.budget_levels.is_empty() {
        query = query.filter(trips::budget_level.eq_any(filters.budget_levels.clone()));
    }
    if !filters.paces.is_empty() {
        query = query.filter(trips::pace.eq_any(filters.paces.clone()));
    }
    query
}

fn ordered(
    query: trips::BoxedQuery<'static, Pg>,
    sort: PublicTripSort,
) -> trips::BoxedQuery<'static, Pg> {
    let query = match sort {
        PublicTripSort::Featured => query.order_by(trips::likes.desc()),
        PublicTripSort::MostRecent => query,
        PublicTripSort::Shortest => query.order_by(trips::duration_days.asc()),
        PublicTripSort::Longest => query.order_by(trips::duration_days.desc()),
    };
    query
        .then_order_by(trips::updated_at.desc())
        .then_order_by(trips::id.asc())
}

#[async_trait]
impl PublicTripRepository for DieselPublicTripRepository {
    async fn find_public(
        &self,
        filters: &PublicTripFilters,
        sort: PublicTripSort,
        page: PageRequest,
    ) -> Result<Page<Trip>, PublicTripRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = filtered(filters)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
        let limit = i64::try_from(page.limit()).unwrap_or(i64::MAX);
        let roots: Vec<TripRow> = ordered(filtered(filters), sort)
            .offset(offset)
            .limit(limit)
            .select(TripRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let trips = load_graphs(&mut conn, roots)
            .await
            .map_err(map_graph_error)?;
        Ok(Page::new(
            trips,
            u64::try_from(total).unwrap_or_default(),
            page,
        ))
    }

    async fn find_public_by_id(
        &self,
        trip_id: &TripId,
    ) -> Result<Option<Trip>, PublicTripRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let root = trips::table
            .filter(trips::id.eq(trip_id.as_uuid()))
            .filter(trips::visibility.eq(Visibility::Public.as_str()))
            .select(TripRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match root {
            Some(root) => Ok(load_graphs(&mut conn, vec![root])
                .await
                .map_err(map_graph_error)?
                .pop()),
            None => Ok(None),
        }
    }

    async fn find_public_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Trip>, PublicTripRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let root = trips::table
            .filter(trips::slug.eq(slug))
            .filter(trips::visibility.eq(Visibility::Public.as_str()))
            .select(TripRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match root {
            Some(root) => Ok(load_graphs(&mut conn, vec![root])
                .await
                .map_err(map_graph_error)?
                .pop()),
            None => Ok(None),
        }
    }
}
