//! Port for minting entity identifiers.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of fresh identifiers for trips and their children.
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    /// Return an identifier never handed out before.
    fn next_id(&self) -> Uuid;
}

/// Random UUIDv4 generator used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic generator counting up from a seed.
///
/// # Examples
/// ```
/// use tripboard::domain::ports::{IdGenerator, SequentialIdGenerator};
///
/// let ids = SequentialIdGenerator::starting_at(1);
/// assert_eq!(ids.next_id().as_u128(), 1);
/// assert_eq!(ids.next_id().as_u128(), 2);
/// ```
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Start counting at `seed`.
    pub fn starting_at(seed: u64) -> Self {
        Self {
            next: AtomicU64::new(seed),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> Uuid {
        Uuid::from_u128(u128::from(self.next.fetch_add(1, Ordering::Relaxed)))
    }
}
