//! Core storage traits.
//!
//! - [`StaffStorage`] - The credential store
//! - [`PatientStorage`] - Tenant-scoped patient reads, plus seeding
//!
//! Both traits are implemented by every backend in [`crate::backends`].

mod storage;

pub use storage::{PatientStorage, StaffStorage};
