//! Axum extractors.
//!
//! - [`AuthenticatedStaff`] - Claims attached by the authorization gate
//! - [`PatientSearch`] - Patient search criteria from the query string
//! - [`JsonBody`] - JSON request bodies with API-shaped rejections

mod auth;
mod json;
mod search_params;

pub use auth::AuthenticatedStaff;
pub use json::JsonBody;
pub use search_params::PatientSearch;
