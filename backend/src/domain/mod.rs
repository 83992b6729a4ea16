//! Domain primitives and use-cases for the contact form.
//!
//! Purpose: define the submission model, its validator, the notifications
//! derived from it and the orchestration that sends them. Nothing here
//! depends on Actix or a concrete mail transport.
//!
//! Public surface:
//! - Submission (alias to `contact::Submission`): validated form payload.
//! - Notification (alias to `notification::Notification`): outbound email.
//! - ContactSubmissionHandler: the submit use-case over a `MailTransport`.
//! - ContactError / ErrorCode / FieldErrors: failure taxonomy.

pub mod contact;
pub mod contact_service;
pub mod error;
pub mod notification;
pub mod ports;

pub use self::contact::{
    ContactField, EMAIL_MAX_CHARS, NAME_MAX_CHARS, PHONE_MAX_CHARS, ServiceCategory, Submission,
    UnknownServiceCategory, is_valid_email,
};
pub use self::contact_service::ContactSubmissionHandler;
pub use self::error::{
    ContactError, DELIVERY_FAILED_MESSAGE, ErrorCode, FieldErrors, FieldViolation,
    MALFORMED_INPUT_MESSAGE, PAYLOAD_TOO_LARGE_MESSAGE, VALIDATION_FAILED_MESSAGE,
};
pub use self::notification::{
    DEFAULT_COMPANY_NAME, DEFAULT_SIGNATURE, MailSettings, MailSettingsError, Notification,
};
