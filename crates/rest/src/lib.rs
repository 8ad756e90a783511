//! # hospital-rest - HTTP API for the Hospital Middleware
//!
//! This crate exposes staff authentication and tenant-scoped patient search
//! over HTTP. Each hospital is a tenant; a staff member belongs to exactly one
//! hospital and can only search that hospital's patients.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hospital_rest::{create_app_with_config, ServerConfig};
//! use hospital_persistence::backends::sqlite::SqliteBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SqliteBackend::open("hospital.db")?;
//!     backend.init_schema()?;
//!
//!     let app = create_app_with_config(backend, ServerConfig::default())?;
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Method | Path | Auth | Description |
//! |--------|------|------|-------------|
//! | GET | `/health` | - | Health check |
//! | POST | `/api/v1/staff/create` | - | Register a staff member |
//! | POST | `/api/v1/staff/login` | - | Exchange credentials for a session token |
//! | GET | `/api/v1/patient/search` | Bearer | Search the caller's hospital's patients |
//!
//! ## Error Handling
//!
//! All errors are returned as `{"error": "<message>"}`. See [`error`] for the
//! status code mapping. Login failures are deliberately vague.
//!
//! ## Architecture
//!
//! - [`config`] - Server configuration
//! - [`error`] - Error types and their HTTP mapping
//! - [`state`] - Application state (storage, authentication, configuration)
//! - [`middleware`] - The bearer-token authorization gate
//! - [`extractors`] - Axum extractors for claims, search criteria and bodies
//! - [`handlers`] - HTTP request handlers
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, extract::DefaultBodyLimit, http::StatusCode};
use hospital_persistence::core::{PatientStorage, StaffStorage};
use hospital_persistence::error::TenantError;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Result<Router, TenantError>
where
    S: StaffStorage + PatientStorage + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Errors
///
/// Fails if the configured hospital directory cannot be parsed.
///
/// # Example
///
/// ```rust
/// use hospital_rest::{create_app_with_config, ServerConfig};
/// use hospital_persistence::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory().unwrap();
/// backend.init_schema().unwrap();
///
/// let config = ServerConfig {
///     port: 3000,
///     enable_cors: false,
///     ..Default::default()
/// };
/// let app = create_app_with_config(backend, config).unwrap();
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Result<Router, TenantError>
where
    S: StaffStorage + PatientStorage + 'static,
{
    info!(
        backend = storage.backend_name(),
        "Creating hospital API with storage backend"
    );

    let state = AppState::new(Arc::new(storage), config.clone())?;
    info!(hospitals = %state.tenants(), "Serving hospitals");

    let router = routing::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout),
        ));

    let router = router.layer(DefaultBodyLimit::max(config.max_body_size));

    // Add CORS if enabled
    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    let router = router.layer(service_builder);

    // Request IDs wrap everything so traces and responses carry the same ID
    let router = if config.enable_request_id {
        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    } else {
        router
    };

    Ok(router)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    // Configure origins
    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Configure methods
    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    // Configure headers
    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Builds the default log filter for `level`.
///
/// `RUST_LOG`, when set, takes precedence over this.
pub fn default_log_filter(level: &str) -> String {
    format!(
        "hospital_rest={level},hospital_auth={level},hospital_persistence={level},hospital_server={level},tower_http=debug"
    )
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(level)));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
