//! Driving port for the contact form use-case.
//!
//! Inbound adapters pass the raw request body and receive either a receipt
//! or a [`ContactError`]. Handler tests substitute a double for this trait
//! instead of wiring a mail transport.

use async_trait::async_trait;

use super::DeliveryOutcome;
use crate::domain::ContactError;

/// Message shown to the submitter once the business has been notified.
pub const SUBMISSION_ACCEPTED_MESSAGE: &str =
    "Thank you for contacting us! We will get back to you within 24 hours.";

/// Proof that the primary notification reached the mail transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactReceipt {
    /// What happened to the courtesy confirmation.
    pub confirmation: DeliveryOutcome,
}

impl ContactReceipt {
    /// User-facing acknowledgment.
    pub fn message(&self) -> &'static str {
        SUBMISSION_ACCEPTED_MESSAGE
    }
}

/// Domain use-case port for contact form submissions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactSubmissionService: Send + Sync {
    /// Parse, validate and dispatch a raw submission body.
    async fn submit(&self, body: &[u8]) -> Result<ContactReceipt, ContactError>;
}

/// Service that accepts every submission without sending email.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContactSubmissionService;

#[async_trait]
impl ContactSubmissionService for FixtureContactSubmissionService {
    async fn submit(&self, _body: &[u8]) -> Result<ContactReceipt, ContactError> {
        Ok(ContactReceipt {
            confirmation: DeliveryOutcome::Sent,
        })
    }
}
