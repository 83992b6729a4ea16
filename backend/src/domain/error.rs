//! Domain-level error types for contact submissions.
//!
//! These errors are transport agnostic. The HTTP adapter maps them onto the
//! `{success, message, errors}` envelope and a status code; nothing here
//! knows about Actix.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

use super::contact::ContactField;
use super::ports::MailTransportError;

/// Message returned when the request body cannot be decoded.
pub const MALFORMED_INPUT_MESSAGE: &str = "Invalid data format";
/// Message returned when the request body exceeds the accepted size.
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str =
    "Your message is too large to send. Please shorten it and try again.";
/// Message returned when one or more fields fail validation.
pub const VALIDATION_FAILED_MESSAGE: &str = "Please fill in all required fields correctly.";
/// Message returned when the business notification could not be delivered.
pub const DELIVERY_FAILED_MESSAGE: &str =
    "There was an error sending your message. Please try again or contact us directly.";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The payload could not be parsed into a field mapping.
    MalformedInput,
    /// The payload was larger than the accepted body size.
    PayloadTooLarge,
    /// The payload parsed but one or more fields are invalid.
    ValidationFailed,
    /// The primary notification could not be handed to the mail transport.
    DeliveryFailed,
}

/// A single reason a field was rejected.
///
/// The `Display` output is the user-facing message; serialisation uses the
/// same text so clients see readable errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldViolation {
    /// Field was absent, `null`, or blank after trimming.
    Required,
    /// Field contained a NUL character.
    NullCharacters,
    /// Field held a JSON array or object instead of a scalar.
    InvalidValue,
    /// Field is not a syntactically valid email address.
    InvalidEmail,
    /// Field exceeded its character cap.
    TooLong {
        /// Maximum permitted characters.
        max: usize,
        /// Characters supplied.
        actual: usize,
    },
    /// Field is not one of the known choices.
    InvalidChoice {
        /// Value supplied by the client.
        value: String,
    },
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("This field is required."),
            Self::NullCharacters => f.write_str("Null characters are not allowed."),
            Self::InvalidValue => f.write_str("Enter a valid value."),
            Self::InvalidEmail => f.write_str("Enter a valid email address."),
            Self::TooLong { max, actual } => write!(
                f,
                "Ensure this value has at most {max} characters (it has {actual})."
            ),
            Self::InvalidChoice { value } => write!(
                f,
                "Select a valid choice. {value} is not one of the available choices."
            ),
        }
    }
}

impl Serialize for FieldViolation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Field-level validation failures keyed by field, in form order.
///
/// # Examples
/// ```
/// use contact_backend::domain::{ContactField, FieldErrors, FieldViolation};
///
/// let mut errors = FieldErrors::default();
/// errors.push(ContactField::Email, FieldViolation::InvalidEmail);
/// assert!(errors.contains(ContactField::Email));
/// assert_eq!(errors.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<ContactField, Vec<FieldViolation>>);

impl FieldErrors {
    /// Record a violation against `field`.
    pub fn push(&mut self, field: ContactField, violation: FieldViolation) {
        self.0.entry(field).or_default().push(violation);
    }

    /// Whether no field has been rejected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of rejected fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether `field` has at least one violation.
    pub fn contains(&self, field: ContactField) -> bool {
        self.0.contains_key(&field)
    }

    /// Violations recorded against `field`.
    pub fn get(&self, field: ContactField) -> &[FieldViolation] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Rejected fields in form order.
    pub fn fields(&self) -> impl Iterator<Item = ContactField> + '_ {
        self.0.keys().copied()
    }

    /// Iterate over `(field, violations)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &[FieldViolation])> {
        self.0.iter().map(|(field, v)| (*field, v.as_slice()))
    }
}

/// Failures surfaced to the caller of the contact submission use-case.
///
/// A failed confirmation email is deliberately absent: it is logged and
/// swallowed by the handler.
#[derive(Debug, Error)]
pub enum ContactError {
    /// Body was not a JSON object.
    #[error("contact payload is malformed: {reason}")]
    MalformedInput {
        /// Decoder diagnostic, kept for logs only.
        reason: String,
    },
    /// Body was larger than the accepted size.
    #[error("contact payload exceeds {limit} bytes")]
    PayloadTooLarge {
        /// Byte limit that was exceeded.
        limit: usize,
    },
    /// Body decoded but failed validation.
    #[error("contact submission failed validation on {} field(s)", .0.len())]
    Validation(FieldErrors),
    /// Business notification could not be delivered.
    #[error("primary notification delivery failed: {0}")]
    Delivery(#[source] MailTransportError),
}

impl ContactError {
    /// Construct a [`ContactError::MalformedInput`].
    pub fn malformed_input(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedInput { .. } => ErrorCode::MalformedInput,
            Self::PayloadTooLarge { .. } => ErrorCode::PayloadTooLarge,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Delivery(_) => ErrorCode::DeliveryFailed,
        }
    }

    /// Generic message safe to show to the submitter.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::MalformedInput { .. } => MALFORMED_INPUT_MESSAGE,
            Self::PayloadTooLarge { .. } => PAYLOAD_TOO_LARGE_MESSAGE,
            Self::Validation(_) => VALIDATION_FAILED_MESSAGE,
            Self::Delivery(_) => DELIVERY_FAILED_MESSAGE,
        }
    }

    /// Field errors when the failure is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(FieldViolation::Required, "This field is required.")]
    #[case(FieldViolation::InvalidEmail, "Enter a valid email address.")]
    #[case(
        FieldViolation::TooLong { max: 20, actual: 21 },
        "Ensure this value has at most 20 characters (it has 21)."
    )]
    #[case(
        FieldViolation::InvalidChoice { value: "welding".to_owned() },
        "Select a valid choice. welding is not one of the available choices."
    )]
    fn violations_render_user_messages(#[case] violation: FieldViolation, #[case] expected: &str) {
        assert_eq!(violation.to_string(), expected);
    }

    #[test]
    fn field_errors_serialise_in_form_order() {
        let mut errors = FieldErrors::default();
        errors.push(ContactField::Message, FieldViolation::Required);
        errors.push(ContactField::Name, FieldViolation::Required);
        errors.push(ContactField::Name, FieldViolation::NullCharacters);

        let value = serde_json::to_value(&errors).expect("serialise field errors");
        assert_eq!(
            value,
            json!({
                "name": ["This field is required.", "Null characters are not allowed."],
                "message": ["This field is required."],
            })
        );
        let order: Vec<_> = errors.fields().collect();
        assert_eq!(order, vec![ContactField::Name, ContactField::Message]);
    }

    #[test]
    fn error_codes_follow_variants() {
        let malformed = ContactError::malformed_input("eof");
        assert_eq!(malformed.code(), ErrorCode::MalformedInput);
        assert_eq!(malformed.public_message(), MALFORMED_INPUT_MESSAGE);
        assert!(malformed.field_errors().is_none());

        let oversized = ContactError::PayloadTooLarge { limit: 16 };
        assert_eq!(oversized.code(), ErrorCode::PayloadTooLarge);
        assert_eq!(oversized.public_message(), PAYLOAD_TOO_LARGE_MESSAGE);
        assert!(oversized.field_errors().is_none());

        let mut errors = FieldErrors::default();
        errors.push(ContactField::Phone, FieldViolation::Required);
        let invalid = ContactError::Validation(errors);
        assert_eq!(invalid.code(), ErrorCode::ValidationFailed);
        assert!(invalid.field_errors().is_some_and(|e| e.contains(ContactField::Phone)));

        let delivery = ContactError::Delivery(MailTransportError::transport("refused"));
        assert_eq!(delivery.code(), ErrorCode::DeliveryFailed);
        assert_eq!(delivery.public_message(), DELIVERY_FAILED_MESSAGE);
    }
}
