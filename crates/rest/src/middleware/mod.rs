//! HTTP middleware.
//!
//! - [`auth`] - The bearer-token authorization gate for protected routes

pub mod auth;

pub use auth::{bearer_token, require_bearer};
