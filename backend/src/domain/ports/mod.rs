//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod contact_submission;
mod mail_transport;

#[cfg(test)]
pub use contact_submission::MockContactSubmissionService;
pub use contact_submission::{
    ContactReceipt, ContactSubmissionService, FixtureContactSubmissionService,
    SUBMISSION_ACCEPTED_MESSAGE,
};
#[cfg(test)]
pub use mail_transport::MockMailTransport;
pub use mail_transport::{
    DeliveryMode, DeliveryOutcome, FixtureMailTransport, MailTransport, MailTransportError,
    deliver,
};
