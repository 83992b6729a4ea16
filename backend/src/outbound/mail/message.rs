//! Conversion from domain notifications to `lettre` messages.

use lettre::message::Mailbox;
use lettre::{Address, Message};
use lettre::message::header::ContentType;

use crate::domain::Notification;
use crate::domain::ports::MailTransportError;

/// Parse a bare addr-spec; `Mailbox` parsing rejects domain literals.
fn mailbox(address: &str) -> Result<Mailbox, MailTransportError> {
    address
        .parse::<Address>()
        .map(Mailbox::from)
        .map_err(|_| MailTransportError::invalid_address(address))
}

/// Build a plain-text message carrying every header of `notification`.
pub(crate) fn to_message(notification: &Notification) -> Result<Message, MailTransportError> {
    let mut builder = Message::builder()
        .from(mailbox(notification.from())?)
        .subject(notification.subject())
        .header(ContentType::TEXT_PLAIN);
    for to in notification.to() {
        builder = builder.to(mailbox(to)?);
    }
    for reply_to in notification.reply_to() {
        builder = builder.reply_to(mailbox(reply_to)?);
    }
    builder
        .body(notification.body().to_owned())
        .map_err(|err| MailTransportError::build(err.to_string()))
}
