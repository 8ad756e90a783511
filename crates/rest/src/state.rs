//! Application state for the HTTP API.
//!
//! Everything here is built once at startup and shared read-only by all
//! request handlers.

use std::sync::Arc;

use hospital_auth::{Argon2PasswordHasher, AuthService, TokenService};
use hospital_persistence::core::{PatientStorage, StaffStorage};
use hospital_persistence::error::TenantError;
use hospital_persistence::tenant::TenantDirectory;

use crate::config::ServerConfig;

/// Shared application state.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (must implement [`StaffStorage`] and
///   [`PatientStorage`])
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use hospital_rest::{AppState, ServerConfig};
/// use hospital_persistence::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory().unwrap();
/// let state = AppState::new(Arc::new(backend), ServerConfig::for_testing()).unwrap();
/// assert_eq!(state.tenants().len(), 2);
/// ```
pub struct AppState<S> {
    storage: Arc<S>,
    auth: AuthService<S>,
    tenants: Arc<TenantDirectory>,
    config: Arc<ServerConfig>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            auth: self.auth.clone(),
            tenants: Arc::clone(&self.tenants),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S> AppState<S>
where
    S: StaffStorage + PatientStorage + 'static,
{
    /// Creates the state, wiring the authentication service to the storage
    /// backend, the configured hospital directory and the signing secret.
    ///
    /// # Errors
    ///
    /// Returns the parse error if the hospital directory is invalid.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Result<Self, TenantError> {
        let tenants = Arc::new(config.tenant_directory()?);
        let tokens = Arc::new(TokenService::new(&config.token_config()));

        let auth = AuthService::new(
            Arc::clone(&storage),
            tenants.clone(),
            Arc::new(Argon2PasswordHasher::new()),
            tokens,
        );

        Ok(Self {
            storage,
            auth,
            tenants,
            config: Arc::new(config),
        })
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the authentication service.
    pub fn auth(&self) -> &AuthService<S> {
        &self.auth
    }

    /// Returns the token service used by the authorization gate.
    pub fn tokens(&self) -> &TokenService {
        self.auth.tokens()
    }

    /// Returns the hospital directory.
    pub fn tenants(&self) -> &TenantDirectory {
        &self.tenants
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
