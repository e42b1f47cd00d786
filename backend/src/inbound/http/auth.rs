//! Hand-over of anonymous trips after sign-in.
//!
//! ```text
//! POST /api/v1/auth/migrate-shadow {"shadowUserId":"c2a1..."}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ShadowId;
use crate::domain::ports::{MigrateOwnershipRequest, MigrateOwnershipResponse};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{invalid_value_error, missing_field_error};

/// Body of `POST /api/v1/auth/migrate-shadow`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MigrateShadowRequest {
    /// Shadow id the browser used before signing in.
    pub shadow_user_id: Option<String>,
}

/// Move every trip owned by a shadow id to the signed-in user.
///
/// Running it again, or for a shadow id with no trips, migrates nothing.
#[utoipa::path(
    post,
    path = "/api/v1/auth/migrate-shadow",
    request_body = MigrateShadowRequest,
    responses(
        (status = 200, description = "Number of trips moved", body = MigrateOwnershipResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "migrateShadowTrips"
)]
#[post("/auth/migrate-shadow")]
pub async fn migrate_shadow(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<MigrateShadowRequest>,
) -> ApiResult<web::Json<MigrateOwnershipResponse>> {
    let to = session.require_user_id()?;
    let raw = payload
        .into_inner()
        .shadow_user_id
        .ok_or_else(|| missing_field_error("shadowUserId"))?;
    let from =
        ShadowId::new(raw.clone()).map_err(|err| invalid_value_error("shadowUserId", &raw, err))?;
    let response = state
        .trips
        .migrate_ownership(MigrateOwnershipRequest { from, to })
        .await?;
    Ok(web::Json(response))
}
