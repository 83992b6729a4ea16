//! Contact form HTTP handlers.
//!
//! ```text
//! GET  /contact/
//! POST /api/contact/ {"name":"A","email":"a@b.com","phone":"123","service":"fabrication","message":"hi"}
//! ```
//!
//! The POST handler forwards the raw body to the [`ContactSubmissionService`]
//! port so malformed JSON is reported with the same envelope as every other
//! failure instead of Actix's default extractor error. It is mounted through
//! [`submit_contact_resource`], which caps the body at [`MAX_BODY_BYTES`] and
//! answers other methods with 405.
//!
//! [`ContactSubmissionService`]: crate::domain::ports::ContactSubmissionService

use std::collections::BTreeMap;

use actix_web::{HttpResponse, Resource, get, http::StatusCode, web};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::{ContactError, ContactField, FieldErrors, ServiceCategory};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// JSON envelope returned by `POST /api/contact/`.
///
/// Example JSON:
/// `{"success":false,"message":"Please fill in all required fields correctly.","errors":{"email":["Enter a valid email address."]}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    /// Whether the business was notified.
    pub success: bool,
    /// Message suitable for showing to the submitter.
    pub message: String,
    /// Field-level validation messages, present only on validation failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ContactResponse {
    /// Successful submission.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors: None,
        }
    }

    /// Failed submission, optionally carrying field errors.
    pub fn failure(message: impl Into<String>, errors: Option<&FieldErrors>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: errors.map(field_error_map),
        }
    }
}

fn field_error_map(errors: &FieldErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .iter()
        .map(|(field, violations)| {
            (
                field.as_str().to_owned(),
                violations.iter().map(ToString::to_string).collect(),
            )
        })
        .collect()
}

/// Accept a contact form submission and notify the business.
#[utoipa::path(
    post,
    path = "/api/contact/",
    request_body(content = String, content_type = "application/json", description = "Contact form fields as a JSON object"),
    responses(
        (status = 200, description = "Submission accepted", body = ContactResponse),
        (status = 400, description = "Malformed body or invalid fields", body = ContactResponse),
        (status = 405, description = "Method not allowed; only POST is supported"),
        (status = 413, description = "Body larger than 2.5 MiB", body = ContactResponse),
        (status = 500, description = "Business notification could not be sent", body = ContactResponse)
    ),
    tags = ["contact"],
    operation_id = "submitContact"
)]
pub async fn submit_contact(
    state: web::Data<HttpState>,
    body: Result<web::Bytes, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let body = body.map_err(body_error)?;
    let receipt = state.contact.submit(&body).await?;
    Ok(HttpResponse::Ok().json(ContactResponse::success(receipt.message())))
}

/// Largest request body accepted by `POST /api/contact/` (2.5 MiB).
pub const MAX_BODY_BYTES: usize = 2_621_440;

/// Mount [`submit_contact`] at `/api/contact/` with its body limit.
pub fn submit_contact_resource() -> Resource {
    web::resource("/api/contact/")
        .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        .route(web::post().to(submit_contact))
}

fn body_error(err: actix_web::Error) -> ContactError {
    if err.as_response_error().status_code() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!(limit = MAX_BODY_BYTES, "contact payload rejected: too large");
        ContactError::PayloadTooLarge {
            limit: MAX_BODY_BYTES,
        }
    } else {
        warn!(error = %err, "contact payload could not be read");
        ContactError::malformed_input(err.to_string())
    }
}

/// One selectable service option.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FormChoice {
    /// Submitted value.
    pub value: String,
    /// Display label.
    pub label: String,
}

/// Description of one input on the contact form.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FormField {
    /// Payload key.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Input widget: `text`, `email`, `select` or `textarea`.
    pub widget: String,
    /// Whether the field must be filled in.
    pub required: bool,
    /// Character cap enforced on submission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Placeholder hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Visible rows for multi-line inputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u8>,
    /// Options for select inputs, including the empty prompt.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<FormChoice>,
}

/// Blank contact form returned by `GET /contact/`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContactForm {
    /// Endpoint the form posts to.
    pub action: String,
    /// Inputs in display order.
    pub fields: Vec<FormField>,
}

impl ContactForm {
    /// Build the blank form from the domain field list.
    pub fn blank() -> Self {
        Self {
            action: "/api/contact/".to_owned(),
            fields: ContactField::ALL.into_iter().map(form_field).collect(),
        }
    }
}

fn form_field(field: ContactField) -> FormField {
    let (label, widget, placeholder, rows) = match field {
        ContactField::Name => ("Name", "text", Some("alfred john"), None),
        ContactField::Email => ("Email", "email", Some("alfred@example.com"), None),
        ContactField::Phone => ("Phone", "text", Some("+971 XX XXX XXXX"), None),
        ContactField::Service => ("Service", "select", None, None),
        ContactField::Message => (
            "Message",
            "textarea",
            Some("Tell us about your project requirements..."),
            Some(6),
        ),
    };

    let choices = if field == ContactField::Service {
        std::iter::once(FormChoice {
            value: String::new(),
            label: "Select a service".to_owned(),
        })
        .chain(ServiceCategory::ALL.into_iter().map(|category| FormChoice {
            value: category.key().to_owned(),
            label: category.label().to_owned(),
        }))
        .collect()
    } else {
        Vec::new()
    };

    FormField {
        name: field.as_str().to_owned(),
        label: label.to_owned(),
        widget: widget.to_owned(),
        required: field.is_required(),
        max_length: match field {
            ContactField::Name | ContactField::Phone => field.max_chars(),
            _ => None,
        },
        placeholder: placeholder.map(str::to_owned),
        rows,
        choices,
    }
}

/// Describe the blank contact form.
#[utoipa::path(
    get,
    path = "/contact/",
    responses(
        (status = 200, description = "Blank contact form", body = ContactForm)
    ),
    tags = ["contact"],
    operation_id = "contactForm"
)]
#[get("/contact/")]
pub async fn contact_form() -> web::Json<ContactForm> {
    web::Json(ContactForm::blank())
}
