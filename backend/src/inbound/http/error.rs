//! HTTP adapter mapping for contact errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn every failure into the `{success, message, errors?}`
//! envelope with a matching status code.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::domain::{ContactError, ErrorCode};
use crate::inbound::http::contact::ContactResponse;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ContactError>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::MalformedInput | ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorCode::DeliveryFailed => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ContactResponse::failure(
            self.public_message(),
            self.field_errors(),
        ))
    }
}
