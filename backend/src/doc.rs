//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the contact API. It registers:
//!
//! - **Paths**: the contact form endpoints and the health checks
//! - **Schemas**: the response envelope and blank form description, kept in
//!   the inbound layer so domain types stay free of utoipa
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::contact::{ContactForm, ContactResponse, FormChoice, FormField};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contact form backend API",
        description = "Accepts contact form submissions and emails them to the business."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::contact::submit_contact,
        crate::inbound::http::contact::contact_form,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ContactResponse, ContactForm, FormField, FormChoice)),
    tags(
        (name = "contact", description = "Contact form submission"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn response_envelope_schema_has_contract_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let envelope = schemas.get("ContactResponse").expect("ContactResponse schema");

        for field in ["success", "message", "errors"] {
            assert_object_schema_has_field(envelope, field);
        }
    }

    #[test]
    fn contact_paths_are_registered() {
        let doc = ApiDoc::openapi();
        for path in ["/api/contact/", "/contact/", "/health/ready", "/health/live"] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    }
}
