//! Trip ownership.
//!
//! A trip belongs either to an authenticated account or to an anonymous
//! shadow identity minted by the client before sign-in. Never both.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::UserId;

/// Longest shadow identifier accepted from clients.
pub const SHADOW_ID_MAX: usize = 128;

/// Validation errors for [`ShadowId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShadowIdError {
    /// Identifier was empty or whitespace.
    #[error("shadow user id must not be empty")]
    Empty,
    /// Identifier exceeded [`SHADOW_ID_MAX`] characters.
    #[error("shadow user id must be at most {max} characters")]
    TooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Identifier contained whitespace or control characters.
    #[error("shadow user id must not contain whitespace or control characters")]
    InvalidCharacters,
}

/// Opaque client-generated identifier for an anonymous user.
///
/// # Examples
/// ```
/// use tripboard::domain::ShadowId;
///
/// let id = ShadowId::new("shadow-lx8k2p").expect("valid shadow id");
/// assert_eq!(id.as_ref(), "shadow-lx8k2p");
/// assert!(ShadowId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShadowId(String);

impl ShadowId {
    /// Validate and construct a [`ShadowId`].
    pub fn new(raw: impl Into<String>) -> Result<Self, ShadowIdError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ShadowIdError::Empty);
        }
        if raw.chars().count() > SHADOW_ID_MAX {
            return Err(ShadowIdError::TooLong { max: SHADOW_ID_MAX });
        }
        if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ShadowIdError::InvalidCharacters);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for ShadowId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ShadowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ShadowId> for String {
    fn from(value: ShadowId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ShadowId {
    type Error = ShadowIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Owner of a trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Owner {
    /// Signed-in account.
    Authenticated(UserId),
    /// Anonymous pre-authentication identity.
    Shadow(ShadowId),
}

impl Owner {
    /// Account id when the owner is authenticated.
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Authenticated(id) => Some(*id),
            Self::Shadow(_) => None,
        }
    }

    /// Shadow id when the owner is anonymous.
    pub fn shadow_id(&self) -> Option<&ShadowId> {
        match self {
            Self::Authenticated(_) => None,
            Self::Shadow(id) => Some(id),
        }
    }
}

impl From<UserId> for Owner {
    fn from(value: UserId) -> Self {
        Self::Authenticated(value)
    }
}

impl From<ShadowId> for Owner {
    fn from(value: ShadowId) -> Self {
        Self::Shadow(value)
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authenticated(id) => write!(f, "user:{id}"),
            Self::Shadow(id) => write!(f, "shadow:{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", ShadowIdError::Empty)]
    #[case("has space", ShadowIdError::InvalidCharacters)]
    #[case("tab\tinside", ShadowIdError::InvalidCharacters)]
    fn rejects_malformed_shadow_ids(#[case] raw: &str, #[case] expected: ShadowIdError) {
        assert_eq!(ShadowId::new(raw).expect_err("invalid"), expected);
    }

    #[rstest]
    fn rejects_overlong_shadow_ids() {
        let raw = "x".repeat(SHADOW_ID_MAX + 1);
        assert_eq!(
            ShadowId::new(raw).expect_err("too long"),
            ShadowIdError::TooLong { max: SHADOW_ID_MAX }
        );
    }

    #[rstest]
    fn owner_accessors_are_exclusive() {
        let user = UserId::random();
        let owner = Owner::from(user);
        assert_eq!(owner.user_id(), Some(user));
        assert!(owner.shadow_id().is_none());

        let shadow = ShadowId::new("shadow-1").expect("valid");
        let owner = Owner::from(shadow.clone());
        assert!(owner.user_id().is_none());
        assert_eq!(owner.shadow_id(), Some(&shadow));
    }
}
