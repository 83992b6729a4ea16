//! Contact form backend.
//!
//! Validates contact form submissions, emails them to the business inbox and
//! sends the submitter a courtesy confirmation.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
