//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use contact_backend::domain::ports::ContactSubmissionService;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) contact: Arc<dyn ContactSubmissionService>,
}

impl ServerConfig {
    /// Construct a server configuration around the contact use-case.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, contact: Arc<dyn ContactSubmissionService>) -> Self {
        Self { bind_addr, contact }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
