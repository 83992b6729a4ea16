//! Transport that records notifications in the log instead of sending them.

use async_trait::async_trait;
use tracing::info;

use super::message::to_message;
use crate::domain::Notification;
use crate::domain::ports::{MailTransport, MailTransportError};

/// Development transport selected with `mail_backend = "log"`.
///
/// Messages are still assembled with `lettre` so address errors surface the
/// same way they would over SMTP.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailTransport;

#[async_trait]
impl MailTransport for LogMailTransport {
    async fn send(&self, notification: &Notification) -> Result<(), MailTransportError> {
        to_message(notification)?;
        info!(
            from = %notification.from(),
            to = ?notification.to(),
            reply_to = ?notification.reply_to(),
            subject = %notification.subject(),
            body = %notification.body(),
            "email logged instead of sent"
        );
        Ok(())
    }
}
