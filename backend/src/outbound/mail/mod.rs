//! Mail transport adapters.
//!
//! [`SmtpMailTransport`] relays notifications through an SMTP server and is
//! the production choice. [`LogMailTransport`] writes them to the tracing
//! output instead, which keeps local development free of credentials.

mod log;
mod message;
mod smtp;

pub use log::LogMailTransport;
pub use smtp::{SmtpConfig, SmtpMailTransport, SmtpTls, UnknownSmtpTls};
