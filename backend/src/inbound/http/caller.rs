//! Caller identity resolution.
//!
//! A request may carry an authenticated user in the session cookie, an
//! anonymous shadow id in the `triply_shadow_user_id` cookie or the
//! `X-Shadow-User-ID` header, or nothing. The session user always wins.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Owner, ShadowId, UserId};
use crate::inbound::http::session::SessionContext;

/// Cookie carrying the shadow identity.
pub const SHADOW_COOKIE: &str = "triply_shadow_user_id";

/// Header carrying the shadow identity when no cookie is present.
pub const SHADOW_HEADER: &str = "X-Shadow-User-ID";

/// Identity resolved for one request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Caller {
    user_id: Option<UserId>,
    shadow_id: Option<ShadowId>,
}

impl Caller {
    /// Build a caller from already resolved parts.
    pub fn new(user_id: Option<UserId>, shadow_id: Option<ShadowId>) -> Self {
        Self { user_id, shadow_id }
    }

    /// Authenticated user, if any.
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// Shadow id sent with the request, if any.
    pub fn shadow_id(&self) -> Option<&ShadowId> {
        self.shadow_id.as_ref()
    }

    /// Owner to act as for owned-trip operations.
    ///
    /// # Errors
    ///
    /// `unauthorized` when the request carries no identity at all.
    pub fn owner(&self) -> Result<Owner, Error> {
        if let Some(user_id) = self.user_id {
            return Ok(Owner::Authenticated(user_id));
        }
        self.shadow_id
            .clone()
            .map(Owner::Shadow)
            .ok_or_else(|| Error::unauthorized("sign in or send a shadow user id"))
    }

    /// Authenticated user, or `unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

fn shadow_from_request(req: &HttpRequest) -> Option<ShadowId> {
    let raw = req
        .cookie(SHADOW_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.trim().is_empty())
        .or_else(|| {
            req.headers()
                .get(SHADOW_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        })?;
    match ShadowId::new(raw) {
        Ok(shadow_id) => Some(shadow_id),
        Err(error) => {
            warn!(%error, "ignoring malformed shadow user id");
            None
        }
    }
}

impl FromRequest for Caller {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let shadow_id = shadow_from_request(req);
        Box::pin(async move {
            let session = session.await?;
            let user_id = session.user_id()?;
            Ok(Caller::new(user_id, shadow_id))
        })
    }
}
