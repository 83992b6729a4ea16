//! Shared fixtures for contact endpoint integration tests.

use std::sync::{Arc, Mutex};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use async_trait::async_trait;
use contact_backend::Trace;
use contact_backend::domain::ports::{MailTransport, MailTransportError};
use contact_backend::domain::{ContactSubmissionHandler, MailSettings, Notification};
use contact_backend::inbound::http::contact::{contact_form, submit_contact_resource};
use contact_backend::inbound::http::state::HttpState;

pub const FROM_EMAIL: &str = "noreply@alshamil.test";
pub const INBOX_EMAIL: &str = "sales@alshamil.test";

/// Transport double that records every attempted send.
///
/// Sends whose zero-based position appears in `failing_attempts` return a
/// transport error after being recorded.
#[derive(Default)]
pub struct RecordingTransport {
    attempts: Mutex<Vec<Notification>>,
    failing_attempts: Vec<usize>,
}

impl RecordingTransport {
    pub fn failing_on(failing_attempts: impl IntoIterator<Item = usize>) -> Self {
        Self {
            attempts: Mutex::default(),
            failing_attempts: failing_attempts.into_iter().collect(),
        }
    }

    pub fn attempts(&self) -> Vec<Notification> {
        self.attempts.lock().expect("attempts lock").clone()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, notification: &Notification) -> Result<(), MailTransportError> {
        let mut attempts = self.attempts.lock().expect("attempts lock");
        let position = attempts.len();
        attempts.push(notification.clone());
        if self.failing_attempts.contains(&position) {
            return Err(MailTransportError::transport("421 service not available"));
        }
        Ok(())
    }
}

pub fn mail_settings() -> MailSettings {
    MailSettings::new(FROM_EMAIL, INBOX_EMAIL).expect("valid mail settings")
}

/// Build the contact app around `transport`, wired like production.
pub fn contact_app(
    transport: Arc<RecordingTransport>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let handler = ContactSubmissionHandler::new(transport, mail_settings());
    App::new()
        .app_data(web::Data::new(HttpState::new(Arc::new(handler))))
        .wrap(Trace)
        .service(submit_contact_resource())
        .service(contact_form)
}
