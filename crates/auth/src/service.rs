//! Login and registration flows.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use hospital_persistence::core::StaffStorage;
use hospital_persistence::error::{StorageError, ValidationError};
use hospital_persistence::tenant::{Tenant, TenantResolver};
use hospital_persistence::types::{NewStaff, StaffView};

use crate::error::{LoginError, PasswordError, RegistrationError};
use crate::password::PasswordHasher;
use crate::token::TokenService;

/// Username, password and hospital name or ID, as submitted by a client.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
    /// Hospital name or numeric ID.
    pub hospital: String,
}

impl Credentials {
    /// Creates credentials.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        hospital: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            hospital: hospital.into(),
        }
    }

    /// Checks that every field is present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.is_empty() {
            return Err(ValidationError::MissingRequiredField { field: "username" });
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingRequiredField { field: "password" });
        }
        if self.hospital.is_empty() {
            return Err(ValidationError::MissingRequiredField { field: "hospital" });
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("hospital", &self.hospital)
            .finish()
    }
}

/// A successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOutcome {
    /// Signed session token.
    pub token: String,
    /// The authenticated staff member, without the password hash.
    pub staff: StaffView,
}

/// Orchestrates the credential store, tenant resolver, password hasher and
/// token service.
pub struct AuthService<S> {
    store: Arc<S>,
    tenants: Arc<dyn TenantResolver>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<TokenService>,
}

impl<S> Clone for AuthService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            tenants: Arc::clone(&self.tenants),
            hasher: Arc::clone(&self.hasher),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

impl<S: StaffStorage> AuthService<S> {
    /// Creates the service from its collaborators.
    pub fn new(
        store: Arc<S>,
        tenants: Arc<dyn TenantResolver>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            store,
            tenants,
            hasher,
            tokens,
        }
    }

    /// Returns the token service.
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    async fn resolve_tenant(&self, hospital: &str) -> Result<Option<Tenant>, StorageError> {
        match self.tenants.resolve(hospital).await {
            Ok(tenant) => Ok(Some(tenant)),
            Err(e) if e.is_unknown_tenant() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Hashes on the blocking pool so Argon2 never stalls the async workers.
    async fn hash_password(&self, plaintext: &str) -> Result<String, PasswordError> {
        let hasher = Arc::clone(&self.hasher);
        let plaintext = plaintext.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| PasswordError::Hashing(e.to_string()))?
    }

    async fn verify_password(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordError> {
        let hasher = Arc::clone(&self.hasher);
        let plaintext = plaintext.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hash))
            .await
            .map_err(|e| PasswordError::MalformedHash(e.to_string()))?
    }

    /// Authenticates a staff member and issues a session token.
    ///
    /// Checks run in order: username, hospital, hospital membership, password.
    /// An unknown username and a wrong password fail identically.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<LoginOutcome, LoginError> {
        credentials
            .validate()
            .map_err(|e| LoginError::Validation(e.to_string()))?;

        let Some(staff) = self.store.find_staff_by_username(&credentials.username).await? else {
            warn!(username = %credentials.username, "Login failed: unknown username");
            return Err(LoginError::InvalidCredentials);
        };

        let Some(tenant) = self.resolve_tenant(&credentials.hospital).await? else {
            warn!(
                username = %credentials.username,
                hospital = %credentials.hospital,
                "Login failed: hospital not found"
            );
            return Err(LoginError::InvalidTenant(credentials.hospital.clone()));
        };

        if tenant.id != staff.hospital_id {
            warn!(
                username = %credentials.username,
                staff_hospital = %staff.hospital_id,
                requested_hospital = %tenant.id,
                "Login failed: hospital mismatch"
            );
            return Err(LoginError::TenantMismatch {
                expected: staff.hospital_id,
                supplied: tenant.id,
            });
        }

        if !self
            .verify_password(&credentials.password, &staff.password_hash)
            .await? {
            warn!(username = %credentials.username, "Login failed: wrong password");
            return Err(LoginError::InvalidCredentials);
        }

        let token = self.tokens.issue(&staff.id, &staff.username, staff.hospital_id)?;

        info!(
            username = %staff.username,
            hospital_id = %staff.hospital_id,
            "Staff logged in"
        );

        Ok(LoginOutcome {
            token,
            staff: staff.into(),
        })
    }

    /// Registers a new staff member in the named hospital.
    pub async fn create_staff(&self, credentials: &Credentials) -> Result<StaffView, RegistrationError> {
        credentials
            .validate()
            .map_err(|e| RegistrationError::Validation(e.to_string()))?;

        if self
            .store
            .find_staff_by_username(&credentials.username)
            .await?
            .is_some()
        {
            warn!(username = %credentials.username, "Registration failed: username taken");
            return Err(RegistrationError::UsernameTaken(credentials.username.clone()));
        }

        let Some(tenant) = self.resolve_tenant(&credentials.hospital).await? else {
            warn!(
                username = %credentials.username,
                hospital = %credentials.hospital,
                "Registration failed: hospital not found"
            );
            return Err(RegistrationError::InvalidTenant(credentials.hospital.clone()));
        };

        let hash = self.hash_password(&credentials.password).await?;

        let staff = self
            .store
            .create_staff(NewStaff::new(&credentials.username, hash, tenant))
            .await
            .map_err(|e| {
                if e.is_already_exists() {
                    RegistrationError::UsernameTaken(credentials.username.clone())
                } else {
                    RegistrationError::Store(e)
                }
            })?;

        info!(
            username = %staff.username,
            hospital_id = %staff.hospital_id,
            "Staff registered"
        );

        Ok(staff.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;
    use hospital_persistence::backends::sqlite::SqliteBackend;
    use hospital_persistence::tenant::{TenantDirectory, TenantId};

    use crate::error::{HOSPITAL_VERIFICATION_MESSAGE, INVALID_CREDENTIALS_MESSAGE};
    use crate::password::Argon2PasswordHasher;
    use crate::token::TokenConfig;

    fn service() -> AuthService<SqliteBackend> {
        let backend = SqliteBackend::in_memory().unwrap();
        backend.init_schema().unwrap();

        AuthService::new(
            Arc::new(backend),
            Arc::new(TenantDirectory::default()),
            Arc::new(Argon2PasswordHasher::new()),
            Arc::new(TokenService::new(&TokenConfig::new(
                "test-secret",
                Duration::hours(24),
            ))),
        )
    }

    async fn service_with_alice() -> AuthService<SqliteBackend> {
        let auth = service();
        auth.create_staff(&Credentials::new("alice", "pw123", "Hospital A"))
            .await
            .unwrap();
        auth
    }

    #[tokio::test]
    async fn test_login_issues_token_for_staff_tenant() {
        let auth = service_with_alice().await;

        let outcome = auth
            .authenticate(&Credentials::new("alice", "pw123", "Hospital A"))
            .await
            .unwrap();

        assert_eq!(outcome.staff.username, "alice");
        assert_eq!(outcome.staff.hospital_name, "Hospital A");

        let claims = auth.tokens().validate(&outcome.token).unwrap();
        assert_eq!(claims.hospital_id, TenantId::new(1));
        assert_eq!(claims.sub, outcome.staff.id);

        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json["staff"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_login_accepts_hospital_id() {
        let auth = service_with_alice().await;
        assert!(auth
            .authenticate(&Credentials::new("alice", "pw123", "1"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_are_indistinguishable() {
        let auth = service_with_alice().await;

        let wrong_password = auth
            .authenticate(&Credentials::new("alice", "wrongpw", "Hospital A"))
            .await
            .unwrap_err();
        let unknown_user = auth
            .authenticate(&Credentials::new("mallory", "pw123", "Hospital A"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, LoginError::InvalidCredentials));
        assert!(matches!(unknown_user, LoginError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert_eq!(wrong_password.public_message(), INVALID_CREDENTIALS_MESSAGE);
        assert_eq!(unknown_user.public_message(), INVALID_CREDENTIALS_MESSAGE);
    }

    #[tokio::test]
    async fn test_other_hospital_fails_verification() {
        let auth = service_with_alice().await;

        let err = auth
            .authenticate(&Credentials::new("alice", "pw123", "Hospital B"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LoginError::TenantMismatch { expected, supplied }
                if expected == TenantId::new(1) && supplied == TenantId::new(2)
        ));
        assert_eq!(err.public_message(), HOSPITAL_VERIFICATION_MESSAGE);
    }

    #[tokio::test]
    async fn test_unknown_hospital_on_login() {
        let auth = service_with_alice().await;

        let err = auth
            .authenticate(&Credentials::new("alice", "pw123", "Hospital Z"))
            .await
            .unwrap_err();

        assert!(matches!(err, LoginError::InvalidTenant(_)));
        assert_eq!(err.public_message(), HOSPITAL_VERIFICATION_MESSAGE);
    }

    #[tokio::test]
    async fn test_login_requires_fields() {
        let auth = service();
        let err = auth
            .authenticate(&Credentials::new("alice", "", "Hospital A"))
            .await
            .unwrap_err();

        assert!(matches!(err, LoginError::Validation(_)));
        assert_eq!(err.public_message(), "missing required field: password");
    }

    #[tokio::test]
    async fn test_registration_rejects_duplicates_across_hospitals() {
        let auth = service_with_alice().await;

        let err = auth
            .create_staff(&Credentials::new("alice", "other", "Hospital B"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistrationError::UsernameTaken(_)));
    }

    #[tokio::test]
    async fn test_registration_rejects_unknown_hospital() {
        let auth = service();

        let err = auth
            .create_staff(&Credentials::new("bob", "pw", "hospital a"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidTenant(_)));
    }

    #[tokio::test]
    async fn test_registration_returns_sanitized_view() {
        let auth = service();

        let view = auth
            .create_staff(&Credentials::new("bob", "pw", "2"))
            .await
            .unwrap();
        assert_eq!(view.hospital_id, TenantId::new(2));
        assert_eq!(view.hospital_name, "Hospital B");
    }

    /// Records the thread each hash or verify call runs on.
    #[derive(Default)]
    struct ThreadRecordingHasher {
        inner: Argon2PasswordHasher,
        threads: std::sync::Mutex<Vec<std::thread::ThreadId>>,
    }

    impl PasswordHasher for ThreadRecordingHasher {
        fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
            self.threads.lock().unwrap().push(std::thread::current().id());
            self.inner.hash(plaintext)
        }

        fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordError> {
            self.threads.lock().unwrap().push(std::thread::current().id());
            self.inner.verify(plaintext, hash)
        }
    }

    #[tokio::test]
    async fn test_hashing_runs_off_the_request_thread() {
        let backend = SqliteBackend::in_memory().unwrap();
        backend.init_schema().unwrap();
        let hasher = Arc::new(ThreadRecordingHasher::default());

        let auth = AuthService::new(
            Arc::new(backend),
            Arc::new(TenantDirectory::default()),
            hasher.clone(),
            Arc::new(TokenService::new(&TokenConfig::new(
                "test-secret",
                Duration::hours(24),
            ))),
        );

        auth.create_staff(&Credentials::new("alice", "pw123", "Hospital A"))
            .await
            .unwrap();
        auth.authenticate(&Credentials::new("alice", "pw123", "Hospital A"))
            .await
            .unwrap();

        let request_thread = std::thread::current().id();
        let threads = hasher.threads.lock().unwrap();
        assert_eq!(threads.len(), 2);
        assert!(threads.iter().all(|id| *id != request_thread));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("alice", "pw123", "Hospital A");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("pw123"));
    }
}
