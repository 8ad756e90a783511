//! Tenant context for patient queries.
//!
//! This module defines [`TenantContext`], the scope every patient query runs
//! under. The search engine takes the tenant from here and nowhere else, so
//! nothing a client puts in its search criteria can widen or replace it.

use super::id::TenantId;

/// The tenant scope required for all patient storage operations.
///
/// In the HTTP layer a context is built from the tenant claim of a validated
/// session token.
///
/// ```
/// use hospital_persistence::tenant::{TenantContext, TenantId};
///
/// let ctx = TenantContext::new(TenantId::new(1)).with_user_id("alice");
/// assert_eq!(ctx.tenant_id(), TenantId::new(1));
/// assert_eq!(ctx.user_id(), Some("alice"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    tenant_id: TenantId,
    /// Optional username for log correlation.
    user_id: Option<String>,
}

impl TenantContext {
    /// Creates a new tenant context.
    pub fn new(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            user_id: None,
        }
    }

    /// Attaches the acting user for log correlation.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Returns the tenant ID.
    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    /// Returns the acting user, if set.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}
