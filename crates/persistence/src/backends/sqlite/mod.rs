//! SQLite backend implementation.
//!
//! Supports in-memory databases (used by tests) and file-based databases.
//!
//! # Example
//!
//! ```no_run
//! use hospital_persistence::backends::sqlite::SqliteBackend;
//! use hospital_persistence::core::PatientStorage;
//! use hospital_persistence::tenant::{TenantContext, TenantId};
//! use hospital_persistence::types::PatientSearchCriteria;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//!
//! let tenant = TenantContext::new(TenantId::new(1));
//! let patients = backend
//!     .search_patients(&tenant, &PatientSearchCriteria::default())
//!     .await?;
//! assert!(patients.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE staff (
//!     id TEXT PRIMARY KEY,
//!     username TEXT NOT NULL UNIQUE,
//!     password_hash TEXT NOT NULL,
//!     hospital_id INTEGER NOT NULL,
//!     hospital_name TEXT NOT NULL,
//!     created_at TEXT NOT NULL,
//!     updated_at TEXT NOT NULL
//! );
//!
//! CREATE TABLE patients (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     hospital_id INTEGER NOT NULL,
//!     patient_hn TEXT NOT NULL,
//!     -- bilingual names, date_of_birth, identifiers, contact fields, gender
//!     UNIQUE (hospital_id, patient_hn)
//! );
//! ```

mod backend;
mod schema;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
pub use schema::SCHEMA_VERSION;
