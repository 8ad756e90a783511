//! Hospital directory and tenant resolution.
//!
//! A [`TenantDirectory`] is the static set of hospitals the deployment serves.
//! It is built once at startup from a `1=Hospital A,2=Hospital B` style
//! definition and never changes afterward.

use std::collections::HashSet;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{StorageResult, TenantError};

use super::id::TenantId;

/// The hospital directory used when none is configured.
pub const DEFAULT_DIRECTORY: &str = "1=Hospital A,2=Hospital B";

/// A hospital tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// Canonical identifier.
    pub id: TenantId,
    /// Display name, matched exactly during resolution.
    pub name: String,
}

impl Tenant {
    /// Creates a tenant.
    pub fn new(id: TenantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Maps a hospital name or identifier to its canonical [`Tenant`].
///
/// Resolution is deterministic over the configured tenant set. Implementations
/// backed by a store may perform I/O, hence the async signature.
#[async_trait]
pub trait TenantResolver: Send + Sync {
    /// Resolves `name_or_id` to a tenant.
    ///
    /// # Errors
    ///
    /// Returns [`TenantError::UnknownTenant`] if nothing matches.
    async fn resolve(&self, name_or_id: &str) -> StorageResult<Tenant>;
}

/// A static, configuration-backed set of hospitals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantDirectory {
    tenants: Vec<Tenant>,
}

impl TenantDirectory {
    /// Builds a directory from a list of tenants.
    ///
    /// Rejects an empty list, a zero identifier, an empty name, and duplicate
    /// identifiers or names.
    pub fn new(tenants: Vec<Tenant>) -> Result<Self, TenantError> {
        if tenants.is_empty() {
            return Err(TenantError::InvalidDirectory {
                entry: String::new(),
                message: "at least one hospital must be configured".to_string(),
            });
        }

        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for tenant in &tenants {
            let entry = format!("{}={}", tenant.id, tenant.name);
            if tenant.id.get() == 0 {
                return Err(TenantError::InvalidDirectory {
                    entry,
                    message: "hospital id must be positive".to_string(),
                });
            }
            if tenant.name.is_empty() {
                return Err(TenantError::InvalidDirectory {
                    entry,
                    message: "hospital name must not be empty".to_string(),
                });
            }
            if !ids.insert(tenant.id) {
                return Err(TenantError::InvalidDirectory {
                    entry,
                    message: format!("duplicate hospital id {}", tenant.id),
                });
            }
            if !names.insert(tenant.name.as_str()) {
                return Err(TenantError::InvalidDirectory {
                    entry,
                    message: format!("duplicate hospital name '{}'", tenant.name),
                });
            }
        }

        Ok(Self { tenants })
    }

    /// Parses a comma-separated list of `id=name` entries.
    ///
    /// Whitespace around entries, identifiers and names is ignored here; it is
    /// only resolution input that is matched verbatim.
    ///
    /// ```
    /// use hospital_persistence::tenant::TenantDirectory;
    ///
    /// let directory = TenantDirectory::parse("1=Hospital A, 2=Hospital B").unwrap();
    /// assert_eq!(directory.len(), 2);
    ///
    /// assert!(TenantDirectory::parse("1=Hospital A,1=Hospital B").is_err());
    /// assert!(TenantDirectory::parse("Hospital A").is_err());
    /// ```
    pub fn parse(definition: &str) -> Result<Self, TenantError> {
        let mut tenants = Vec::new();

        for entry in definition.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (id, name) = entry
                .split_once('=')
                .ok_or_else(|| TenantError::InvalidDirectory {
                    entry: entry.to_string(),
                    message: "expected <id>=<name>".to_string(),
                })?;

            let id: TenantId =
                id.trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| TenantError::InvalidDirectory {
                        entry: entry.to_string(),
                        message: format!("invalid hospital id: {e}"),
                    })?;

            tenants.push(Tenant::new(id, name.trim()));
        }

        Self::new(tenants)
    }

    /// Finds a tenant by exact name, then by numeric identifier.
    ///
    /// An identifier only matches in its canonical decimal form, so `"01"`
    /// and `"+1"` resolve to nothing.
    pub fn lookup(&self, name_or_id: &str) -> Option<&Tenant> {
        if let Some(tenant) = self.tenants.iter().find(|t| t.name == name_or_id) {
            return Some(tenant);
        }

        let id: TenantId = name_or_id.parse().ok()?;
        if id.to_string() != name_or_id {
            return None;
        }
        self.get(id)
    }

    /// Returns the tenant with the given identifier.
    pub fn get(&self, id: TenantId) -> Option<&Tenant> {
        self.tenants.iter().find(|t| t.id == id)
    }

    /// Iterates over the configured tenants in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Tenant> {
        self.tenants.iter()
    }

    /// Number of configured tenants.
    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    /// Always `false` for a directory built through [`TenantDirectory::new`].
    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }
}

impl Default for TenantDirectory {
    fn default() -> Self {
        Self {
            tenants: vec![
                Tenant::new(TenantId::new(1), "Hospital A"),
                Tenant::new(TenantId::new(2), "Hospital B"),
            ],
        }
    }
}

impl fmt::Display for TenantDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tenant) in self.tenants.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", tenant.id, tenant.name)?;
        }
        Ok(())
    }
}

#[async_trait]
impl TenantResolver for TenantDirectory {
    async fn resolve(&self, name_or_id: &str) -> StorageResult<Tenant> {
        self.lookup(name_or_id).cloned().ok_or_else(|| {
            TenantError::UnknownTenant {
                name_or_id: name_or_id.to_string(),
            }
            .into()
        })
    }
}
