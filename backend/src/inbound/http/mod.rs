//! HTTP inbound adapter exposing the contact form endpoints.

pub mod contact;
pub mod error;
pub mod health;
pub mod state;

pub use error::ApiResult;
