//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every inbound endpoint plus the error schemas that
//! the domain does not derive itself. Types referenced by request and
//! response bodies are collected from the paths automatically.
//!
//! The document backs Swagger UI in debug builds and is exported via
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Session cookie and shadow-identity schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie of a signed-in user.",
            ))),
        );
        components.add_security_scheme(
            "ShadowHeader",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-Shadow-User-ID",
                "Anonymous browser identity; the triply_shadow_user_id cookie is also accepted.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Tripboard API",
        description = "Owned trip management, the public trip feed, likes and clones."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = []), ("ShadowHeader" = [])),
    paths(
        crate::inbound::http::trips::list_trips,
        crate::inbound::http::trips::get_trip,
        crate::inbound::http::trips::create_trip,
        crate::inbound::http::trips::replace_trip,
        crate::inbound::http::trips::delete_trip,
        crate::inbound::http::trips::set_trip_visibility,
        crate::inbound::http::public_trips::list_public_trips,
        crate::inbound::http::public_trips::get_public_trip,
        crate::inbound::http::public_trips::get_public_trip_by_slug,
        crate::inbound::http::public_trips::toggle_like,
        crate::inbound::http::public_trips::clone_trip,
        crate::inbound::http::auth::migrate_shadow,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "trips", description = "Trips owned by the caller"),
        (name = "public-trips", description = "Published trips, likes and clones"),
        (name = "auth", description = "Identity hand-over after sign-in"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Regression coverage for the generated document.

    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    #[rstest]
    #[case("/api/v1/trips")]
    #[case("/api/v1/trips/{id}")]
    #[case("/api/v1/trips/{id}/visibility")]
    #[case("/api/v1/public-trips")]
    #[case("/api/v1/public-trips/{id}")]
    #[case("/api/v1/public-trips/slug/{slug}")]
    #[case("/api/v1/public-trips/{id}/like")]
    #[case("/api/v1/public-trips/{id}/clone")]
    #[case("/api/v1/auth/migrate-shadow")]
    #[case("/health/ready")]
    fn every_endpoint_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn error_schema_has_code_and_message() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;

        match schemas.get(ERROR_SCHEMA_NAME).expect("Error schema") {
            RefOr::T(Schema::Object(obj)) => {
                assert!(obj.properties.contains_key("code"));
                assert!(obj.properties.contains_key("message"));
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn shadow_identity_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components");

        assert!(components.security_schemes.contains_key("ShadowHeader"));
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
