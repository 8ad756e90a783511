//! Patient search translation.
//!
//! Turns a [`TenantContext`](crate::tenant::TenantContext) and the predicates of a
//! [`PatientSearchCriteria`](crate::types::PatientSearchCriteria) into a single
//! parameterized SQL statement. Backends differ only in placeholder syntax and
//! in how they bind [`SqlParam`] values.

mod query_builder;

pub use query_builder::{
    escape_like, PatientQuery, PlaceholderStyle, SqlFragment, SqlParam, PATIENT_COLUMNS,
};
