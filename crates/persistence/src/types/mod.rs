//! Core types for the persistence layer.
//!
//! - [`StaffMember`], [`NewStaff`], [`StaffView`] - Staff credentials and their public view
//! - [`PatientRecord`], [`NewPatient`], [`Gender`] - Patient records
//! - [`PatientSearchCriteria`], [`PatientPredicate`] - Sparse patient search input
//!
//! # Examples
//!
//! ```
//! use hospital_persistence::types::{PatientPredicate, PatientSearchCriteria};
//!
//! let criteria = PatientSearchCriteria {
//!     national_id: Some("1100500012345".to_string()),
//!     date_of_birth: Some("not-a-date".to_string()),
//!     ..Default::default()
//! };
//!
//! // The malformed date is dropped; the national ID still filters.
//! let predicates = criteria.predicates();
//! assert_eq!(predicates.len(), 1);
//! assert!(matches!(predicates[0], PatientPredicate::Equals(..)));
//! ```

mod patient;
mod search_params;
mod staff;

pub use patient::{Gender, NewPatient, PatientRecord};
pub use search_params::{NamePair, NamePart, PatientColumn, PatientPredicate, PatientSearchCriteria};
pub use staff::{NewStaff, StaffMember, StaffView};
