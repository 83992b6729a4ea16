//! Contact submission orchestration.
//!
//! This module provides the concrete implementation of
//! [`ContactSubmissionService`]. Each call walks one request through
//! `Received → Parsed → Validated → PrimarySent → ConfirmationAttempted`:
//!
//! 1. Decode the body into a JSON object.
//! 2. Validate it into a [`Submission`].
//! 3. Send the business notification; a failure aborts the request.
//! 4. Send the confirmation; a failure is logged and swallowed.
//!
//! Parsing and validation failures return before any email is composed.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{error, info, warn};

use super::ports::{
    ContactReceipt, ContactSubmissionService, DeliveryMode, DeliveryOutcome, MailTransport,
    deliver,
};
use super::{ContactError, MailSettings, Notification, Submission};

/// Concrete implementation of [`ContactSubmissionService`].
///
/// Holds only immutable configuration and a shared transport, so a single
/// instance serves concurrent requests.
pub struct ContactSubmissionHandler {
    transport: Arc<dyn MailTransport>,
    settings: MailSettings,
}

impl ContactSubmissionHandler {
    /// Create a handler delivering through `transport`.
    pub fn new(transport: Arc<dyn MailTransport>, settings: MailSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// Mail settings used to address notifications.
    pub fn settings(&self) -> &MailSettings {
        &self.settings
    }

    async fn dispatch(&self, submission: &Submission) -> Result<ContactReceipt, ContactError> {
        let primary = Notification::for_business(submission, &self.settings);
        if let Err(err) = deliver(self.transport.as_ref(), &primary, DeliveryMode::Strict).await {
            error!(
                error = %err,
                recipient = %self.settings.contact_email(),
                "failed to send contact notification"
            );
            return Err(ContactError::Delivery(err));
        }

        let confirmation = Notification::confirmation(submission, &self.settings);
        let outcome = deliver(
            self.transport.as_ref(),
            &confirmation,
            DeliveryMode::FailSilently,
        )
        .await
        .unwrap_or_else(DeliveryOutcome::Suppressed);
        if let DeliveryOutcome::Suppressed(err) = &outcome {
            warn!(
                error = %err,
                recipient = %submission.email(),
                "confirmation email not delivered"
            );
        }

        info!(
            name = %submission.name(),
            email = %submission.email(),
            "contact form submitted"
        );
        Ok(ContactReceipt {
            confirmation: outcome,
        })
    }
}

/// Decode a request body into the raw field mapping.
pub(crate) fn parse_body(body: &[u8]) -> Result<Map<String, Value>, ContactError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ContactError::malformed_input(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
        Err(err) => Err(ContactError::malformed_input(err.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl ContactSubmissionService for ContactSubmissionHandler {
    async fn submit(&self, body: &[u8]) -> Result<ContactReceipt, ContactError> {
        let raw = parse_body(body).inspect_err(|err| {
            error!(error = %err, "invalid JSON data received in contact form");
        })?;

        let submission = Submission::validate(&raw).map_err(|errors| {
            let fields: Vec<_> = errors.fields().map(|field| field.as_str()).collect();
            warn!(fields = ?fields, "contact form failed validation");
            ContactError::Validation(errors)
        })?;

        self.dispatch(&submission).await
    }
}
