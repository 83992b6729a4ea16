//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit outside the contact
//! use-case, currently trace correlation and request logging.

pub mod trace;

pub use trace::Trace;
