//! Hospital Middleware Persistence Layer
//!
//! This crate stores staff credentials and reads patient records for a
//! multi-tenant hospital backend. Every hospital is a tenant, and every patient
//! query is scoped to exactly one tenant.
//!
//! # Features
//!
//! - **Credential Store**: staff lookup by username and registration with a
//!   globally unique username
//! - **Tenant Resolver**: deterministic mapping from a hospital name or ID to a
//!   canonical [`TenantId`](tenant::TenantId)
//! - **Patient Search**: sparse multi-field criteria folded into one
//!   tenant-scoped SQL query
//!
//! # Backend Features
//!
//! - `sqlite` (default) - SQLite with in-memory and file modes
//! - `postgres` - PostgreSQL via deadpool-postgres
//!
//! # Architecture
//!
//! - [`tenant`] - Tenant identifiers, scoped contexts and the hospital directory
//! - [`types`] - Staff, patient and search criteria types
//! - [`error`] - Error types for all operations
//! - [`core`] - Storage traits
//! - [`search`] - Predicate-to-SQL translation for patient search
//! - [`backends`] - Backend implementations (SQLite, PostgreSQL)
//!
//! # Quick Start
//!
//! ```
//! use hospital_persistence::tenant::{TenantDirectory, TenantId};
//! use hospital_persistence::types::PatientSearchCriteria;
//!
//! let directory = TenantDirectory::parse("1=Hospital A,2=Hospital B").unwrap();
//! let tenant = directory.lookup("Hospital A").unwrap();
//! assert_eq!(tenant.id, TenantId::new(1));
//!
//! let criteria = PatientSearchCriteria {
//!     first_name_th: Some("สมหมาย".to_string()),
//!     first_name_en: Some("Multi".to_string()),
//!     ..Default::default()
//! };
//! // A bilingual pair collapses into a single OR predicate.
//! assert_eq!(criteria.predicates().len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod search;
pub mod tenant;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use tenant::{Tenant, TenantContext, TenantDirectory, TenantId, TenantResolver};
pub use types::{NewPatient, NewStaff, PatientRecord, PatientSearchCriteria, StaffMember, StaffView};

// Re-export core traits
pub use core::{PatientStorage, StaffStorage};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
