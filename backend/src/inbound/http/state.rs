//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ContactSubmissionService, FixtureContactSubmissionService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Contact submission use-case driven by `POST /api/contact/`.
    pub contact: Arc<dyn ContactSubmissionService>,
}

impl HttpState {
    /// Construct state from the contact submission port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use contact_backend::domain::ports::FixtureContactSubmissionService;
    /// use contact_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureContactSubmissionService));
    /// let _ = state.contact.clone();
    /// ```
    pub fn new(contact: Arc<dyn ContactSubmissionService>) -> Self {
        Self { contact }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixtureContactSubmissionService))
    }
}
