//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `CONTACT_*` environment variables and
//! configuration files, in that order of precedence. Only the SMTP port and
//! timeout carry serde-level defaults; the accessors below apply the rest and
//! turn missing or malformed values into a [`SettingsError`] before the
//! server starts.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{MailSettings, MailSettingsError};
use crate::outbound::mail::{SmtpConfig, SmtpTls, UnknownSmtpTls};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Startup configuration errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A required key was absent or blank.
    #[error("missing required setting `{0}`")]
    Missing(&'static str),
    /// `bind_addr` did not parse as `host:port`.
    #[error("invalid bind address `{value}`: {source}")]
    InvalidBindAddr {
        /// Raw value that failed to parse.
        value: String,
        /// Parser diagnostic.
        #[source]
        source: std::net::AddrParseError,
    },
    /// `mail_backend` was neither `smtp` nor `log`.
    #[error("unknown mail backend `{0}`; expected smtp or log")]
    UnknownMailBackend(String),
    /// `smtp_tls` was not a recognised mode.
    #[error(transparent)]
    SmtpTls(#[from] UnknownSmtpTls),
    /// Sender, inbox or branding values were rejected.
    #[error(transparent)]
    Mail(#[from] MailSettingsError),
}

/// Which mail transport the server wires in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MailBackend {
    /// Relay through SMTP.
    #[default]
    Smtp,
    /// Write emails to the log only.
    Log,
}

impl FromStr for MailBackend {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smtp" => Ok(Self::Smtp),
            "log" | "console" => Ok(Self::Log),
            _ => Err(SettingsError::UnknownMailBackend(s.to_owned())),
        }
    }
}

/// Configuration values for the contact backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONTACT")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Sender address on outgoing emails.
    pub default_from_email: Option<String>,
    /// Business inbox receiving submissions.
    pub contact_email: Option<String>,
    /// Company name used in subjects and sign-offs.
    pub company_name: Option<String>,
    /// Contact block appended to confirmation emails.
    pub signature: Option<String>,
    /// `smtp` or `log`.
    pub mail_backend: Option<String>,
    /// SMTP relay host.
    pub smtp_host: Option<String>,
    /// SMTP relay port.
    #[ortho_config(default = 587)]
    pub smtp_port: u16,
    /// SMTP username; enables authentication when set.
    pub smtp_username: Option<String>,
    /// SMTP password.
    pub smtp_password: Option<String>,
    /// `starttls`, `tls` or `none`.
    pub smtp_tls: Option<String>,
    /// Per-command SMTP timeout in seconds.
    #[ortho_config(default = 10)]
    pub smtp_timeout_secs: u64,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl AppSettings {
    /// Return the bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = non_blank(self.bind_addr.as_ref()).unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                source,
            })
    }

    /// Build the addressing and branding used for notifications.
    pub fn mail_settings(&self) -> Result<MailSettings, SettingsError> {
        let from = non_blank(self.default_from_email.as_ref())
            .ok_or(SettingsError::Missing("default_from_email"))?;
        let contact = non_blank(self.contact_email.as_ref())
            .ok_or(SettingsError::Missing("contact_email"))?;

        let mut settings = MailSettings::new(from, contact)?;
        if let Some(company) = self.company_name.as_deref() {
            settings = settings.with_company_name(company)?;
        }
        if let Some(signature) = self.signature.as_deref() {
            settings = settings.with_signature(signature);
        }
        Ok(settings)
    }

    /// Return the selected mail backend, defaulting to SMTP.
    pub fn mail_backend(&self) -> Result<MailBackend, SettingsError> {
        non_blank(self.mail_backend.as_ref()).map_or(Ok(MailBackend::default()), str::parse)
    }

    /// Build the SMTP relay parameters.
    pub fn smtp_config(&self) -> Result<SmtpConfig, SettingsError> {
        let host =
            non_blank(self.smtp_host.as_ref()).ok_or(SettingsError::Missing("smtp_host"))?;
        let tls = match non_blank(self.smtp_tls.as_ref()) {
            Some(raw) => raw.parse::<SmtpTls>()?,
            None => SmtpTls::default(),
        };
        let credentials = non_blank(self.smtp_username.as_ref()).map(|username| {
            (
                username.to_owned(),
                self.smtp_password.clone().unwrap_or_default(),
            )
        });

        Ok(SmtpConfig {
            host: host.to_owned(),
            port: self.smtp_port,
            tls,
            credentials,
            timeout: Duration::from_secs(self.smtp_timeout_secs),
        })
    }
}
