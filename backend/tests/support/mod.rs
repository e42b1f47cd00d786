//! Shared helpers for the embedded PostgreSQL integration suites.
//!
//! Suites run only when `RUN_PG_EMBEDDED=1`. A cluster that fails to start is
//! a test failure unless `SKIP_TEST_CLUSTER` is truthy, in which case the
//! suite prints a skip marker and returns.

pub mod pg_embed;

fn truthy(name: &str) -> bool {
    std::env::var(name)
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Whether embedded PostgreSQL suites were requested.
pub fn embedded_postgres_enabled() -> bool {
    if truthy("RUN_PG_EMBEDDED") {
        return true;
    }
    eprintln!("SKIP-TEST-CLUSTER: set RUN_PG_EMBEDDED=1 to run");
    false
}

/// Report a cluster setup failure, or skip when `SKIP_TEST_CLUSTER` is set.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if truthy("SKIP_TEST_CLUSTER") {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
