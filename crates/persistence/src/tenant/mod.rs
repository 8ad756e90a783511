//! Tenant management for the hospital backend.
//!
//! Every hospital is a tenant. Staff members belong to exactly one tenant for
//! their lifetime, and patient records are only ever read through a
//! [`TenantContext`] that names the tenant to search.
//!
//! # Core Types
//!
//! - [`TenantId`] - Canonical numeric hospital identifier
//! - [`Tenant`] - A hospital's identifier and display name
//! - [`TenantContext`] - The mandatory scope for patient queries
//! - [`TenantResolver`] - Maps a hospital name or ID to its [`Tenant`]
//! - [`TenantDirectory`] - Static, configuration-backed [`TenantResolver`]
//!
//! # Examples
//!
//! ```
//! use hospital_persistence::tenant::{TenantContext, TenantDirectory, TenantId};
//!
//! let directory = TenantDirectory::parse("1=Hospital A,2=Hospital B").unwrap();
//!
//! // Names match exactly and case-sensitively
//! assert_eq!(directory.lookup("Hospital B").map(|t| t.id), Some(TenantId::new(2)));
//! assert!(directory.lookup("hospital b").is_none());
//!
//! // Numeric identifiers are accepted as well
//! assert_eq!(directory.lookup("1").map(|t| t.name.as_str()), Some("Hospital A"));
//!
//! let scope = TenantContext::new(TenantId::new(2));
//! assert_eq!(scope.tenant_id().get(), 2);
//! ```

mod context;
mod directory;
mod id;

pub use context::TenantContext;
pub use directory::{Tenant, TenantDirectory, TenantResolver, DEFAULT_DIRECTORY};
pub use id::TenantId;
