//! Hospital Middleware Authentication
//!
//! This crate turns staff credentials into signed, time-bound session tokens
//! and back into validated claims.
//!
//! # Components
//!
//! - [`password`] - One-way password hashing ([`Argon2PasswordHasher`])
//! - [`token`] - Session token issue and validation ([`TokenService`])
//! - [`service`] - The login and registration flows ([`AuthService`])
//! - [`error`] - Typed failures plus their deliberately lossy public messages
//!
//! # Example
//!
//! ```
//! use chrono::Duration;
//! use hospital_auth::{TokenConfig, TokenService};
//! use hospital_persistence::tenant::TenantId;
//!
//! let tokens = TokenService::new(&TokenConfig::new("correct horse", Duration::hours(24)));
//! let token = tokens.issue("staff-1", "alice", TenantId::new(1)).unwrap();
//!
//! let claims = tokens.validate(&token).unwrap();
//! assert_eq!(claims.username, "alice");
//! assert_eq!(claims.hospital_id, TenantId::new(1));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use error::{LoginError, PasswordError, RegistrationError, TokenError};
pub use password::{Argon2PasswordHasher, PasswordHasher};
pub use service::{AuthService, Credentials, LoginOutcome};
pub use token::{SessionClaims, TokenConfig, TokenService};
