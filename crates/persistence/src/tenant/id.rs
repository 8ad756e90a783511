//! Tenant identifier type.
//!
//! This module defines the [`TenantId`] type, the canonical identifier of a
//! hospital. It is what session tokens carry and what every patient row is
//! keyed by.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The canonical identifier of a hospital tenant.
///
/// # Examples
///
/// ```
/// use hospital_persistence::tenant::TenantId;
///
/// let tenant: TenantId = "2".parse().unwrap();
/// assert_eq!(tenant, TenantId::new(2));
/// assert_eq!(tenant.to_string(), "2");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(u32);

impl TenantId {
    /// Creates a tenant ID from its numeric value.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the numeric value.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the value widened for storage in a signed 64-bit column.
    pub fn as_i64(self) -> i64 {
        i64::from(self.0)
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TenantId({})", self.0)
    }
}

impl FromStr for TenantId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(TenantId)
    }
}

impl From<u32> for TenantId {
    fn from(id: u32) -> Self {
        TenantId(id)
    }
}

impl TryFrom<i64> for TenantId {
    type Error = std::num::TryFromIntError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value).map(TenantId)
    }
}
