//! Authentication error types.
//!
//! Each error keeps its precise cause for logging and tests. What a client
//! sees is [`public_message`](LoginError::public_message), which collapses
//! causes that must not be distinguishable from the outside.

use hospital_persistence::error::StorageError;
use hospital_persistence::tenant::TenantId;
use thiserror::Error;

/// Message for any internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Message for an unknown username or a wrong password.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "invalid username or password";

/// Message for any hospital verification failure during login.
pub const HOSPITAL_VERIFICATION_MESSAGE: &str = "unable to verify hospital for this user";

/// Message for an unresolvable hospital during registration.
pub const INVALID_HOSPITAL_MESSAGE: &str = "invalid hospital specified";

/// Session token failures.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token's validity window has ended.
    #[error("token is expired")]
    Expired,

    /// Malformed input, bad signature, disallowed algorithm or a token used
    /// before its issue time.
    #[error("invalid token")]
    Invalid,

    /// The token could not be signed.
    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl TokenError {
    /// The message safe to show a client.
    pub fn public_message(&self) -> &'static str {
        match self {
            TokenError::Expired => "token is expired",
            TokenError::Invalid => "invalid token",
            TokenError::Signing(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

/// Password hashing failures.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Hashing a new password failed.
    #[error("failed to hash password: {0}")]
    Hashing(String),

    /// A stored hash is not a valid PHC string.
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// Login failures.
#[derive(Debug, Error)]
pub enum LoginError {
    /// Unknown username or wrong password.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The supplied hospital does not resolve to a tenant.
    #[error("hospital not found: {0}")]
    InvalidTenant(String),

    /// The supplied hospital is not the staff member's hospital.
    #[error("staff belongs to hospital {expected}, login named hospital {supplied}")]
    TenantMismatch {
        /// The staff member's stored tenant.
        expected: TenantId,
        /// The tenant the login request resolved to.
        supplied: TenantId,
    },

    /// The request is missing a required field.
    #[error("invalid login request: {0}")]
    Validation(String),

    /// Token issuance failed.
    #[error(transparent)]
    TokenIssue(#[from] TokenError),

    /// Password verification failed for a reason other than a mismatch.
    #[error(transparent)]
    Hashing(#[from] PasswordError),

    /// The credential store failed.
    #[error(transparent)]
    Store(#[from] StorageError),
}

impl LoginError {
    /// The message safe to show a client.
    ///
    /// ```
    /// use hospital_auth::LoginError;
    /// use hospital_persistence::tenant::TenantId;
    ///
    /// let unknown = LoginError::InvalidTenant("Hospital Z".to_string());
    /// let mismatch = LoginError::TenantMismatch {
    ///     expected: TenantId::new(1),
    ///     supplied: TenantId::new(2),
    /// };
    /// assert_eq!(unknown.public_message(), mismatch.public_message());
    /// ```
    pub fn public_message(&self) -> String {
        match self {
            LoginError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            LoginError::InvalidTenant(_) | LoginError::TenantMismatch { .. } => {
                HOSPITAL_VERIFICATION_MESSAGE.to_string()
            }
            LoginError::Validation(message) => message.clone(),
            LoginError::TokenIssue(_) | LoginError::Hashing(_) | LoginError::Store(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }
}

/// Registration failures.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Another staff member already has this username.
    #[error("username already exists: {0}")]
    UsernameTaken(String),

    /// The supplied hospital does not resolve to a tenant.
    #[error("hospital not found: {0}")]
    InvalidTenant(String),

    /// The request is missing a required field.
    #[error("invalid registration request: {0}")]
    Validation(String),

    /// Hashing the password failed.
    #[error(transparent)]
    Hashing(#[from] PasswordError),

    /// The credential store failed.
    #[error(transparent)]
    Store(#[from] StorageError),
}

impl RegistrationError {
    /// The message safe to show a client.
    pub fn public_message(&self) -> String {
        match self {
            RegistrationError::UsernameTaken(_) => "Username already exists".to_string(),
            RegistrationError::InvalidTenant(_) => INVALID_HOSPITAL_MESSAGE.to_string(),
            RegistrationError::Validation(message) => message.clone(),
            RegistrationError::Hashing(_) | RegistrationError::Store(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hospital_persistence::error::BackendError;

    fn store_failure() -> StorageError {
        StorageError::Backend(BackendError::QueryError {
            message: "relation \"staff\" does not exist".to_string(),
        })
    }

    #[test]
    fn test_token_public_messages() {
        assert_eq!(TokenError::Expired.public_message(), "token is expired");
        assert_eq!(TokenError::Invalid.public_message(), "invalid token");
        assert_eq!(
            TokenError::Signing("key rejected".to_string()).public_message(),
            INTERNAL_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_login_store_failure_is_masked() {
        let err = LoginError::from(store_failure());
        assert!(err.to_string().contains("staff"));
        assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_registration_messages() {
        assert_eq!(
            RegistrationError::InvalidTenant("Hospital Z".to_string()).public_message(),
            INVALID_HOSPITAL_MESSAGE
        );
        assert_eq!(
            RegistrationError::UsernameTaken("alice".to_string()).public_message(),
            "Username already exists"
        );
        assert_eq!(
            RegistrationError::from(store_failure()).public_message(),
            INTERNAL_ERROR_MESSAGE
        );
    }
}
