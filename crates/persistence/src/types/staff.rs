//! Staff credential types.
//!
//! [`StaffMember`] is the stored credential record and deliberately does not
//! implement `Serialize`. The only shape that leaves the service is
//! [`StaffView`], which has no password hash field at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tenant::{Tenant, TenantId};

/// A stored staff member, including the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffMember {
    /// Opaque identifier assigned at registration.
    pub id: String,
    /// Globally unique login name.
    pub username: String,
    /// PHC-format password hash.
    pub password_hash: String,
    /// The tenant this staff member belongs to.
    pub hospital_id: TenantId,
    /// Display name of the tenant at registration time.
    pub hospital_name: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

impl StaffMember {
    /// Returns the sanitized view of this staff member.
    pub fn to_view(&self) -> StaffView {
        StaffView::from(self)
    }
}

/// A staff record safe to return to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffView {
    /// Opaque identifier.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Tenant identifier.
    pub hospital_id: TenantId,
    /// Tenant display name.
    pub hospital_name: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl From<&StaffMember> for StaffView {
    fn from(staff: &StaffMember) -> Self {
        Self {
            id: staff.id.clone(),
            username: staff.username.clone(),
            hospital_id: staff.hospital_id,
            hospital_name: staff.hospital_name.clone(),
            created_at: staff.created_at,
            updated_at: staff.updated_at,
        }
    }
}

impl From<StaffMember> for StaffView {
    fn from(staff: StaffMember) -> Self {
        Self {
            id: staff.id,
            username: staff.username,
            hospital_id: staff.hospital_id,
            hospital_name: staff.hospital_name,
            created_at: staff.created_at,
            updated_at: staff.updated_at,
        }
    }
}

/// Input for registering a staff member.
///
/// The password is already hashed; storage never sees plaintext.
#[derive(Debug, Clone)]
pub struct NewStaff {
    /// Requested login name.
    pub username: String,
    /// PHC-format password hash.
    pub password_hash: String,
    /// The resolved tenant.
    pub tenant: Tenant,
}

impl NewStaff {
    /// Creates a registration input.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>, tenant: Tenant) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            tenant,
        }
    }

    /// Materializes the record with a fresh identifier and timestamps.
    pub fn into_member(self) -> StaffMember {
        let now = Utc::now();
        StaffMember {
            id: uuid::Uuid::new_v4().to_string(),
            username: self.username,
            password_hash: self.password_hash,
            hospital_id: self.tenant.id,
            hospital_name: self.tenant.name,
            created_at: now,
            updated_at: now,
        }
    }
}
