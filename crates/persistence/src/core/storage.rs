//! Storage traits for staff credentials and patient records.
//!
//! Patient search takes a [`TenantContext`] as its first parameter. There is
//! no way to query patients without naming the tenant, and the tenant never
//! comes from the search criteria.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::tenant::TenantContext;
use crate::types::{NewPatient, NewStaff, PatientRecord, PatientSearchCriteria, StaffMember};

/// The credential store.
///
/// # Example
///
/// ```ignore
/// use hospital_persistence::core::StaffStorage;
/// use hospital_persistence::tenant::{Tenant, TenantId};
/// use hospital_persistence::types::NewStaff;
///
/// async fn example<S: StaffStorage>(storage: &S) -> Result<(), StorageError> {
///     let tenant = Tenant::new(TenantId::new(1), "Hospital A");
///     let staff = storage.create_staff(NewStaff::new("alice", hash, tenant)).await?;
///
///     let found = storage.find_staff_by_username("alice").await?;
///     assert_eq!(found.map(|s| s.id), Some(staff.id));
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait StaffStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Looks up a staff member by exact username.
    async fn find_staff_by_username(&self, username: &str) -> StorageResult<Option<StaffMember>>;

    /// Registers a staff member.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(AlreadyExists)` - If the username is taken,
    ///   including when a concurrent registration wins the race
    async fn create_staff(&self, staff: NewStaff) -> StorageResult<StaffMember>;
}

/// Patient record access.
#[async_trait]
pub trait PatientStorage: Send + Sync {
    /// Inserts a patient record. Used for out-of-band seeding only.
    ///
    /// # Errors
    ///
    /// * `StorageError::Validation` - If the hospital number is blank
    /// * `StorageError::Resource(AlreadyExists)` - If the tenant already has a
    ///   record with the same hospital number
    async fn insert_patient(&self, patient: NewPatient) -> StorageResult<PatientRecord>;

    /// Returns every patient of `tenant` matching all supplied criteria.
    ///
    /// Every returned record belongs to `tenant`. Empty criteria return the
    /// tenant's full patient list. Result order is unspecified.
    async fn search_patients(
        &self,
        tenant: &TenantContext,
        criteria: &PatientSearchCriteria,
    ) -> StorageResult<Vec<PatientRecord>>;
}
