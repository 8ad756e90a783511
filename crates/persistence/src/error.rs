//! Error types for the persistence layer.
//!
//! This module defines all error types used throughout the persistence layer,
//! following a hierarchy that separates record errors, tenant errors,
//! validation errors and backend errors.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Record state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Tenant resolution errors
    #[error(transparent)]
    Tenant(#[from] TenantError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl StorageError {
    /// Returns `true` if this error reports a uniqueness violation.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, StorageError::Resource(ResourceError::AlreadyExists { .. }))
    }

    /// Returns `true` if this error reports an unresolvable tenant.
    pub fn is_unknown_tenant(&self) -> bool {
        matches!(self, StorageError::Tenant(TenantError::UnknownTenant { .. }))
    }
}

/// Errors related to record state.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The requested record was not found.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// A record with the same unique key already exists.
    #[error("{entity} already exists: {key}")]
    AlreadyExists { entity: &'static str, key: String },
}

/// Errors related to tenant resolution.
#[derive(Error, Debug)]
pub enum TenantError {
    /// The hospital name or ID does not map to a configured tenant.
    #[error("hospital not found: {name_or_id}")]
    UnknownTenant { name_or_id: String },

    /// The hospital directory definition could not be parsed.
    #[error("invalid hospital directory entry '{entry}': {message}")]
    InvalidDirectory { entry: String, message: String },
}

/// Errors related to input validation.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Missing required field.
    #[error("missing required field: {field}")]
    MissingRequiredField { field: &'static str },

    /// A field value is malformed.
    #[error("invalid field {field}: {message}")]
    InvalidField { field: &'static str, message: String },
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Connection pool exhausted.
    #[error("connection pool exhausted for {backend_name}")]
    PoolExhausted { backend_name: String },

    /// Schema migration error.
    #[error("schema migration failed: {message}")]
    MigrationError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Query execution error.
    #[error("query execution failed: {message}")]
    QueryError { message: String },

    /// A stored row could not be decoded.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// Implement conversions from common error types

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Backend(BackendError::SerializationError {
            message: err.to_string(),
        })
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            backend_name: "sqlite".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}

#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for StorageError {
    fn from(_err: r2d2::Error) -> Self {
        StorageError::Backend(BackendError::PoolExhausted {
            backend_name: "sqlite".to_string(),
        })
    }
}

#[cfg(feature = "postgres")]
impl From<tokio_postgres::Error> for StorageError {
    fn from(err: tokio_postgres::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            backend_name: "postgres".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_error_display() {
        let err = StorageError::Resource(ResourceError::AlreadyExists {
            entity: "staff",
            key: "alice".to_string(),
        });
        assert_eq!(err.to_string(), "staff already exists: alice");
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_tenant_error_display() {
        let err = StorageError::from(TenantError::UnknownTenant {
            name_or_id: "Hospital Z".to_string(),
        });
        assert_eq!(err.to_string(), "hospital not found: Hospital Z");
        assert!(err.is_unknown_tenant());
        assert!(!err.is_already_exists());
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::MissingRequiredField { field: "username" };
        assert_eq!(err.to_string(), "missing required field: username");
    }

    #[test]
    fn test_backend_error_keeps_source() {
        let io = std::io::Error::other("disk on fire");
        let err = BackendError::Internal {
            backend_name: "sqlite".to_string(),
            message: io.to_string(),
            source: Some(Box::new(io)),
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("sqlite"));
    }
}
