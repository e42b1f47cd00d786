//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories built on Diesel.
//! - **memory**: an in-process store used when no database is configured
//!   and by behaviour tests.
//!
//! Adapters translate between domain types and storage representations.
//! They contain no business rules.

pub mod memory;
pub mod persistence;
