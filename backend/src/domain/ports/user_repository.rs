//! Author profiles used to attribute public trips.
//!
//! Accounts are created by the external sign-in flow; this port only stores
//! and reads the profile fields shown next to a published trip.
use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by author profile adapters.
    pub enum UserRepositoryError ("user repository") {}
}

/// Author profile storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store or refresh the profile of `user`.
    async fn save_author(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Profile for `id`, or `None` when the owner never synced one.
    async fn find_author(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;
}

/// Fixture that attributes every trip to one optional author.
#[derive(Debug, Default, Clone)]
pub struct FixtureUserRepository {
    author: Option<User>,
}

impl FixtureUserRepository {
    /// Answer every lookup with `author`.
    pub fn with_author(author: User) -> Self {
        Self {
            author: Some(author),
        }
    }
}

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn save_author(&self, _user: &User) -> Result<(), UserRepositoryError> {
        Ok(())
    }

    async fn find_author(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.author.clone().filter(|author| author.id == *id))
    }
}
