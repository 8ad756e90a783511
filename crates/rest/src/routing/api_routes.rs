//! API route configuration.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use hospital_persistence::core::{PatientStorage, StaffStorage};

use crate::handlers;
use crate::middleware::require_bearer;
use crate::state::AppState;

/// Creates all API routes.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
/// - `POST /api/v1/staff/create` - Staff registration
/// - `POST /api/v1/staff/login` - Staff login
///
/// ## Bearer token required
/// - `GET /api/v1/patient/search` - Patient search
///
/// Anything else answers 404.
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: StaffStorage + PatientStorage + 'static,
{
    let protected = Router::new()
        .route(
            "/api/v1/patient/search",
            get(handlers::search_patients_handler::<S>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer::<S>,
        ));

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/v1/staff/create", post(handlers::create_staff_handler::<S>))
        .route("/api/v1/staff/login", post(handlers::login_handler::<S>))
        .merge(protected)
        .fallback(handlers::not_found_handler)
        .with_state(state)
}
