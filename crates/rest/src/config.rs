//! Server configuration.
//!
//! Configuration is built once at startup and shared read-only afterward.
//! Every field can be set on the command line or from the environment.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `HOSPITAL_SERVER_PORT` | 8080 | Server port |
//! | `HOSPITAL_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `HOSPITAL_LOG_LEVEL` | info | Log level |
//! | `HOSPITAL_MAX_BODY_SIZE` | 1048576 | Max request body (bytes) |
//! | `HOSPITAL_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `HOSPITAL_ENABLE_CORS` | true | Enable CORS |
//! | `HOSPITAL_CORS_ORIGINS` | * | Allowed origins |
//! | `HOSPITAL_CORS_METHODS` | GET,POST,OPTIONS | Allowed methods |
//! | `HOSPITAL_CORS_HEADERS` | Content-Type,Authorization,Accept | Allowed headers |
//! | `HOSPITAL_ENABLE_REQUEST_ID` | true | Set and propagate `x-request-id` |
//! | `HOSPITAL_DATABASE_URL` | hospital.db | SQLite path or `postgres://` URL |
//! | `JWT_SECRET` | a_very_secret_key | Token signing secret |
//! | `JWT_EXPIRY_HOURS` | 24 | Token lifetime (hours) |
//! | `HOSPITAL_DIRECTORY` | 1=Hospital A,2=Hospital B | Hospitals served |
//!
//! # Example
//!
//! ```rust
//! use hospital_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     jwt_secret: "a much longer secret".to_string(),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! assert!(!config.uses_default_secret());
//! ```

use chrono::Duration;
use clap::Parser;

use hospital_auth::TokenConfig;
use hospital_persistence::error::TenantError;
use hospital_persistence::tenant::{TenantDirectory, DEFAULT_DIRECTORY};

/// Signing secret used when none is configured.
pub const DEFAULT_JWT_SECRET: &str = "a_very_secret_key";

/// Longest accepted session token lifetime (100 years).
pub const MAX_JWT_EXPIRY_HOURS: u32 = 100 * 365 * 24;

/// SQLite database used when no database URL is configured.
pub const DEFAULT_DATABASE_PATH: &str = "hospital.db";

/// Server configuration.
#[derive(Clone, Parser)]
#[command(name = "hospital-server")]
#[command(about = "Multi-tenant hospital staff authentication and patient search API")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "HOSPITAL_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "HOSPITAL_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "HOSPITAL_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "HOSPITAL_MAX_BODY_SIZE", default_value = "1048576")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "HOSPITAL_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "HOSPITAL_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "HOSPITAL_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "HOSPITAL_CORS_METHODS", default_value = "GET,POST,OPTIONS")]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "HOSPITAL_CORS_HEADERS",
        default_value = "Content-Type,Authorization,Accept"
    )]
    pub cors_headers: String,

    /// Set and propagate an `x-request-id` header.
    #[arg(long, env = "HOSPITAL_ENABLE_REQUEST_ID", default_value = "true")]
    pub enable_request_id: bool,

    /// SQLite file path or `postgres://` connection string.
    #[arg(long, env = "HOSPITAL_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Session token signing secret.
    #[arg(long, env = "JWT_SECRET", default_value = DEFAULT_JWT_SECRET, hide_env_values = true)]
    pub jwt_secret: String,

    /// Session token lifetime in hours.
    #[arg(long, env = "JWT_EXPIRY_HOURS", default_value = "24")]
    pub jwt_expiry_hours: u32,

    /// Hospitals served, as comma-separated `id=name` entries.
    #[arg(long, env = "HOSPITAL_DIRECTORY", default_value = DEFAULT_DIRECTORY)]
    pub hospitals: String,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("port", &self.port)
            .field("host", &self.host)
            .field("log_level", &self.log_level)
            .field("max_body_size", &self.max_body_size)
            .field("request_timeout", &self.request_timeout)
            .field("enable_cors", &self.enable_cors)
            .field("enable_request_id", &self.enable_request_id)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .field("hospitals", &self.hospitals)
            .finish_non_exhaustive()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 1024 * 1024, // 1MB
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,OPTIONS".to_string(),
            cors_headers: "Content-Type,Authorization,Accept".to_string(),
            enable_request_id: true,
            database_url: None,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_expiry_hours: 24,
            hospitals: DEFAULT_DIRECTORY.to_string(),
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    pub fn from_env() -> Self {
        // Try to parse from environment, falling back to defaults
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the configured database location, defaulting to a local SQLite file.
    pub fn database_location(&self) -> &str {
        self.database_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_DATABASE_PATH)
    }

    /// Returns true when the database location is a PostgreSQL URL.
    pub fn uses_postgres(&self) -> bool {
        let location = self.database_location();
        location.starts_with("postgres://") || location.starts_with("postgresql://")
    }

    /// Returns true when the built-in signing secret is in use.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }

    /// Builds the token signing configuration.
    pub fn token_config(&self) -> TokenConfig {
        TokenConfig::new(
            self.jwt_secret.clone(),
            Duration::hours(i64::from(self.jwt_expiry_hours)),
        )
    }

    /// Parses the hospital directory.
    pub fn tenant_directory(&self) -> Result<TenantDirectory, TenantError> {
        TenantDirectory::parse(&self.hospitals)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.jwt_secret.is_empty() {
            errors.push("JWT secret cannot be empty".to_string());
        }

        if self.jwt_expiry_hours == 0 {
            errors.push("JWT expiry cannot be 0 hours".to_string());
        } else if self.jwt_expiry_hours > MAX_JWT_EXPIRY_HOURS {
            errors.push(format!(
                "JWT expiry cannot exceed {} hours, got {}",
                MAX_JWT_EXPIRY_HOURS, self.jwt_expiry_hours
            ));
        }

        if let Err(e) = self.tenant_directory() {
            errors.push(format!("Hospital directory is invalid: {}", e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0 and disables features that might interfere
    /// with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            max_body_size: 64 * 1024,
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            enable_request_id: false,
            database_url: None,
            jwt_secret: "test-secret".to_string(),
            jwt_expiry_hours: 24,
            hospitals: DEFAULT_DIRECTORY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hospital_auth::TokenService;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert!(config.enable_cors);
        assert!(config.uses_default_secret());
        assert_eq!(config.database_location(), DEFAULT_DATABASE_PATH);
        assert!(!config.uses_postgres());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 3000,
            host: "0.0.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let config = ServerConfig {
            port: 0,
            jwt_secret: String::new(),
            jwt_expiry_hours: 0,
            hospitals: "1=Hospital A,1=Hospital B".to_string(),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e.contains("Port")));
        assert!(errors.iter().any(|e| e.contains("secret")));
        assert!(errors.iter().any(|e| e.contains("expiry")));
        assert!(errors.iter().any(|e| e.contains("duplicate hospital id")));
    }

    #[test]
    fn test_validate_rejects_huge_expiry() {
        let config = ServerConfig {
            jwt_expiry_hours: 4_000_000_000,
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("expiry cannot exceed"));

        let config = ServerConfig {
            jwt_expiry_hours: MAX_JWT_EXPIRY_HOURS,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert!(
            TokenService::new(&config.token_config())
                .issue("staff-1", "alice", hospital_persistence::tenant::TenantId::new(1))
                .is_ok()
        );
    }

    #[test]
    fn test_database_selection() {
        let config = ServerConfig {
            database_url: Some("postgres://hospital@db/hospital".to_string()),
            ..Default::default()
        };
        assert!(config.uses_postgres());

        let config = ServerConfig {
            database_url: Some("/var/lib/hospital/data.db".to_string()),
            ..Default::default()
        };
        assert!(!config.uses_postgres());
        assert_eq!(config.database_location(), "/var/lib/hospital/data.db");
    }

    #[test]
    fn test_token_config() {
        let config = ServerConfig {
            jwt_expiry_hours: 8,
            ..ServerConfig::for_testing()
        };
        assert_eq!(config.token_config().expiry(), Duration::hours(8));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = ServerConfig {
            jwt_secret: "do-not-print".to_string(),
            ..Default::default()
        };
        assert!(!format!("{config:?}").contains("do-not-print"));
    }

    #[test]
    fn test_for_testing() {
        let config = ServerConfig::for_testing();
        assert_eq!(config.port, 0);
        assert!(!config.enable_cors);
        assert!(!config.uses_default_secret());
        assert_eq!(config.tenant_directory().unwrap().len(), 2);
    }
}
