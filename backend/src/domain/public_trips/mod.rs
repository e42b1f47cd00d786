//! Public trip feed: filters, ordering and read projections.

mod filters;
mod sort;
mod views;

pub use filters::{DurationRange, ParseDurationRangeError, PublicTripFilters};
pub use sort::PublicTripSort;
pub use views::{PublicTripDetail, PublicTripSummary, TripAuthor, TripMetadata};
