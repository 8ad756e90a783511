//! HTTP request handlers.
//!
//! - [`health`] - Liveness check
//! - [`staff`] - Staff registration and login
//! - [`patient`] - Tenant-scoped patient search
//! - [`fallback`] - Unknown routes

pub mod fallback;
pub mod health;
pub mod patient;
pub mod staff;

// Re-export handlers for convenience
pub use fallback::not_found_handler;
pub use health::health_handler;
pub use patient::search_patients_handler;
pub use staff::{create_staff_handler, login_handler};
