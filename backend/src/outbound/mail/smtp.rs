//! SMTP transport backed by `lettre`'s pooled async client.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::debug;

use super::message::to_message;
use crate::domain::Notification;
use crate::domain::ports::{MailTransport, MailTransportError};

/// Connection security for the SMTP relay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SmtpTls {
    /// Plain connection upgraded with `STARTTLS`.
    #[default]
    StartTls,
    /// Implicit TLS from the first byte.
    Tls,
    /// Unencrypted. Only suitable for local relays.
    None,
}

/// Raised when the TLS mode is not one of `starttls`, `tls` or `none`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown SMTP TLS mode `{0}`; expected starttls, tls or none")]
pub struct UnknownSmtpTls(pub String);

impl FromStr for SmtpTls {
    type Err = UnknownSmtpTls;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "starttls" => Ok(Self::StartTls),
            "tls" => Ok(Self::Tls),
            "none" => Ok(Self::None),
            _ => Err(UnknownSmtpTls(s.to_owned())),
        }
    }
}

/// Relay connection parameters.
#[derive(Clone)]
pub struct SmtpConfig {
    /// Relay hostname.
    pub host: String,
    /// Relay port.
    pub port: u16,
    /// Connection security mode.
    pub tls: SmtpTls,
    /// Username and password; `None` disables authentication.
    pub credentials: Option<(String, String)>,
    /// Per-command timeout.
    pub timeout: Duration,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("tls", &self.tls)
            .field(
                "username",
                &self.credentials.as_ref().map(|(user, _)| user.as_str()),
            )
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Production [`MailTransport`] relaying through an SMTP server.
#[derive(Clone)]
pub struct SmtpMailTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    /// Build a pooled transport for `config`.
    ///
    /// No connection is opened until the first send.
    pub fn new(config: &SmtpConfig) -> Result<Self, MailTransportError> {
        let builder = match config.tls {
            SmtpTls::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|err| MailTransportError::build(err.to_string()))?,
            SmtpTls::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|err| MailTransportError::build(err.to_string()))?,
            SmtpTls::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host),
        };
        let mut builder = builder
            .port(config.port)
            .timeout(Some(config.timeout));
        if let Some((username, password)) = &config.credentials {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }
        Ok(Self {
            mailer: builder.build(),
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, notification: &Notification) -> Result<(), MailTransportError> {
        let message = to_message(notification)?;
        let response = self
            .mailer
            .send(message)
            .await
            .map_err(|err| MailTransportError::transport(err.to_string()))?;
        debug!(code = %response.code(), to = ?notification.to(), "smtp relay accepted message");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn config(tls: SmtpTls) -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_owned(),
            port: 2525,
            tls,
            credentials: Some(("mailer".to_owned(), "hunter2".to_owned())),
            timeout: Duration::from_secs(5),
        }
    }

    #[rstest]
    #[case("starttls", SmtpTls::StartTls)]
    #[case("TLS", SmtpTls::Tls)]
    #[case(" none ", SmtpTls::None)]
    fn tls_modes_parse(#[case] raw: &str, #[case] expected: SmtpTls) {
        assert_eq!(raw.parse::<SmtpTls>(), Ok(expected));
    }

    #[rstest]
    fn unknown_tls_mode_is_rejected() {
        assert_eq!(
            "ssl".parse::<SmtpTls>(),
            Err(UnknownSmtpTls("ssl".to_owned()))
        );
    }

    #[rstest]
    fn debug_output_hides_password() {
        let rendered = format!("{:?}", config(SmtpTls::StartTls));
        assert!(rendered.contains("mailer"));
        assert!(!rendered.contains("hunter2"));
    }

    #[rstest]
    #[case(SmtpTls::StartTls)]
    #[case(SmtpTls::Tls)]
    #[case(SmtpTls::None)]
    #[tokio::test]
    async fn transport_builds_without_connecting(#[case] tls: SmtpTls) {
        assert!(SmtpMailTransport::new(&config(tls)).is_ok());
    }

    #[tokio::test]
    async fn unreachable_relay_reports_transport_error() {
        let transport = SmtpMailTransport::new(&SmtpConfig {
            host: "127.0.0.1".to_owned(),
            port: 1,
            tls: SmtpTls::None,
            credentials: None,
            timeout: Duration::from_secs(1),
        })
        .expect("transport");
        let notification = Notification::new(
            "subject",
            "body",
            "noreply@example.com",
            vec!["inbox@example.com".to_owned()],
            Vec::new(),
        );
        let err = transport
            .send(&notification)
            .await
            .expect_err("nothing listens on port 1");
        assert!(matches!(err, MailTransportError::Transport { .. }));
    }
}
