//! Test utilities for the tripboard crate.
//!
//! Shared by unit tests in `src/` and integration tests in `tests/`. Only
//! compiled for tests or with the `test-support` feature.

pub mod clock;
pub mod http;
pub mod trips;

pub use clock::MutableClock;
