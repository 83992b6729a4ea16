//! Driven port for handing notifications to a mail transport.
//!
//! Adapters (SMTP, log-only) implement [`MailTransport`]; the domain decides
//! per call whether a failure matters through [`DeliveryMode`].

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::Notification;

define_port_error! {
    /// Errors raised while delivering a notification.
    pub enum MailTransportError {
        /// An address could not be parsed by the transport.
        InvalidAddress { address: String } =>
            "invalid email address: {address}",
        /// The message could not be assembled.
        Build { message: String } =>
            "failed to build email: {message}",
        /// The relay refused or the connection failed.
        Transport { message: String } =>
            "mail transport failed: {message}",
    }
}

/// Port for sending a single notification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver `notification` to every recipient in its `to` list.
    async fn send(&self, notification: &Notification) -> Result<(), MailTransportError>;
}

/// How a caller treats transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Surface the failure to the caller.
    Strict,
    /// Report the failure as a suppressed outcome instead of an error.
    FailSilently,
}

/// Result of a delivery attempt that did not raise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The transport accepted the message.
    Sent,
    /// The transport failed and the caller asked for silence.
    Suppressed(MailTransportError),
}

/// Send `notification`, honouring `mode` for failures.
///
/// # Examples
/// ```
/// use async_trait::async_trait;
/// use contact_backend::domain::Notification;
/// use contact_backend::domain::ports::{
///     DeliveryMode, DeliveryOutcome, MailTransport, MailTransportError, deliver,
/// };
///
/// struct Offline;
///
/// #[async_trait]
/// impl MailTransport for Offline {
///     async fn send(&self, _: &Notification) -> Result<(), MailTransportError> {
///         Err(MailTransportError::transport("offline"))
///     }
/// }
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let email = Notification::new("s", "b", "a@b.com", vec!["c@d.com".into()], vec![]);
/// let outcome = deliver(&Offline, &email, DeliveryMode::FailSilently).await;
/// assert!(matches!(outcome, Ok(DeliveryOutcome::Suppressed(_))));
/// assert!(deliver(&Offline, &email, DeliveryMode::Strict).await.is_err());
/// # });
/// ```
pub async fn deliver<T>(
    transport: &T,
    notification: &Notification,
    mode: DeliveryMode,
) -> Result<DeliveryOutcome, MailTransportError>
where
    T: MailTransport + ?Sized,
{
    match (transport.send(notification).await, mode) {
        (Ok(()), _) => Ok(DeliveryOutcome::Sent),
        (Err(err), DeliveryMode::FailSilently) => Ok(DeliveryOutcome::Suppressed(err)),
        (Err(err), DeliveryMode::Strict) => Err(err),
    }
}

/// Transport that accepts every message without sending anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMailTransport;

#[async_trait]
impl MailTransport for FixtureMailTransport {
    async fn send(&self, _notification: &Notification) -> Result<(), MailTransportError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn notification() -> Notification {
        Notification::new(
            "subject",
            "body",
            "info@example.com",
            vec!["a@b.com".to_owned()],
            vec![],
        )
    }

    #[rstest]
    #[case(DeliveryMode::Strict)]
    #[case(DeliveryMode::FailSilently)]
    #[tokio::test]
    async fn successful_sends_report_sent(#[case] mode: DeliveryMode) {
        let mut transport = MockMailTransport::new();
        transport.expect_send().times(1).returning(|_| Ok(()));

        let outcome = deliver(&transport, &notification(), mode).await;
        assert_eq!(outcome, Ok(DeliveryOutcome::Sent));
    }

    #[tokio::test]
    async fn strict_mode_surfaces_failures() {
        let mut transport = MockMailTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Err(MailTransportError::transport("connection refused")));

        let outcome = deliver(&transport, &notification(), DeliveryMode::Strict).await;
        assert_eq!(
            outcome,
            Err(MailTransportError::transport("connection refused"))
        );
    }

    #[tokio::test]
    async fn silent_mode_suppresses_failures() {
        let mut transport = MockMailTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Err(MailTransportError::invalid_address("nobody")));

        let outcome = deliver(&transport, &notification(), DeliveryMode::FailSilently).await;
        assert_eq!(
            outcome,
            Ok(DeliveryOutcome::Suppressed(
                MailTransportError::invalid_address("nobody")
            ))
        );
    }

    #[tokio::test]
    async fn fixture_transport_accepts_everything() {
        let outcome = deliver(
            &FixtureMailTransport,
            &notification(),
            DeliveryMode::Strict,
        )
        .await;
        assert_eq!(outcome, Ok(DeliveryOutcome::Sent));
    }
}
