//! Backend entry-point: loads settings, selects the mail transport and serves
//! the contact endpoints.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use contact_backend::domain::ContactSubmissionHandler;
use contact_backend::domain::ports::MailTransport;
use contact_backend::inbound::http::health::HealthState;
use contact_backend::outbound::mail::{LogMailTransport, SmtpMailTransport};
use contact_backend::settings::{AppSettings, MailBackend};
use server::{ServerConfig, create_server, drain_on_shutdown};

/// Resolve on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
                return;
            }
            Err(e) => warn!(error = %e, "SIGTERM handler unavailable; listening for Ctrl-C only"),
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Ctrl-C handler unavailable; shutdown must be forced");
        std::future::pending::<()>().await;
    }
}

fn build_transport(settings: &AppSettings) -> std::io::Result<Arc<dyn MailTransport>> {
    match settings.mail_backend().map_err(std::io::Error::other)? {
        MailBackend::Smtp => {
            let smtp = settings.smtp_config().map_err(std::io::Error::other)?;
            info!(host = %smtp.host, port = smtp.port, tls = ?smtp.tls, "using SMTP mail transport");
            Ok(Arc::new(
                SmtpMailTransport::new(&smtp).map_err(std::io::Error::other)?,
            ))
        }
        MailBackend::Log => {
            warn!("using log mail transport; emails will not be delivered");
            Ok(Arc::new(LogMailTransport))
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let mail_settings = settings.mail_settings().map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let transport = build_transport(&settings)?;
    info!(
        contact_email = %mail_settings.contact_email(),
        company = %mail_settings.company_name(),
        "contact notifications configured"
    );

    let contact = Arc::new(ContactSubmissionHandler::new(transport, mail_settings));
    let config = ServerConfig::new(bind_addr, contact);
    info!(bind_addr = %config.bind_addr(), "starting contact backend");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on_shutdown(
        shutdown_signal(),
        health_state,
        server.handle(),
    ));
    server.await
}
