//! Patient search criteria and predicates.
//!
//! A [`PatientSearchCriteria`] is the sparse, client-supplied half of a patient
//! search. It never carries a tenant: scope comes from the caller's
//! [`TenantContext`](crate::tenant::TenantContext). Each supplied field maps to
//! at most one [`PatientPredicate`], and a bilingual name pair given in both
//! scripts maps to a single [`PatientPredicate::EitherContains`].

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

/// Date format accepted for `date_of_birth`.
pub const DATE_OF_BIRTH_FORMAT: &str = "%Y-%m-%d";

/// Optional patient search fields.
///
/// Unknown keys are ignored during deserialization, so a client-supplied
/// hospital identifier has no effect. An empty string is the same as an
/// absent field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[allow(missing_docs)]
pub struct PatientSearchCriteria {
    pub national_id: Option<String>,
    pub passport_id: Option<String>,
    pub first_name_th: Option<String>,
    pub first_name_en: Option<String>,
    pub middle_name_th: Option<String>,
    pub middle_name_en: Option<String>,
    pub last_name_th: Option<String>,
    pub last_name_en: Option<String>,
    /// Calendar date in `YYYY-MM-DD` form.
    pub date_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// Patient columns that search predicates may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum PatientColumn {
    HospitalId,
    NationalId,
    PassportId,
    FirstNameTh,
    FirstNameEn,
    MiddleNameTh,
    MiddleNameEn,
    LastNameTh,
    LastNameEn,
    DateOfBirth,
    PhoneNumber,
    Email,
}

impl PatientColumn {
    /// The SQL column name.
    pub fn as_str(self) -> &'static str {
        match self {
            PatientColumn::HospitalId => "hospital_id",
            PatientColumn::NationalId => "national_id",
            PatientColumn::PassportId => "passport_id",
            PatientColumn::FirstNameTh => "first_name_th",
            PatientColumn::FirstNameEn => "first_name_en",
            PatientColumn::MiddleNameTh => "middle_name_th",
            PatientColumn::MiddleNameEn => "middle_name_en",
            PatientColumn::LastNameTh => "last_name_th",
            PatientColumn::LastNameEn => "last_name_en",
            PatientColumn::DateOfBirth => "date_of_birth",
            PatientColumn::PhoneNumber => "phone_number",
            PatientColumn::Email => "email",
        }
    }
}

/// A name component that exists in both Thai and English.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum NamePart {
    First,
    Middle,
    Last,
}

impl NamePart {
    /// Column holding the Thai variant.
    pub fn thai_column(self) -> PatientColumn {
        match self {
            NamePart::First => PatientColumn::FirstNameTh,
            NamePart::Middle => PatientColumn::MiddleNameTh,
            NamePart::Last => PatientColumn::LastNameTh,
        }
    }

    /// Column holding the English variant.
    pub fn english_column(self) -> PatientColumn {
        match self {
            NamePart::First => PatientColumn::FirstNameEn,
            NamePart::Middle => PatientColumn::MiddleNameEn,
            NamePart::Last => PatientColumn::LastNameEn,
        }
    }
}

/// Both script variants of one name component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePair {
    /// Which component.
    pub part: NamePart,
    /// Substring to find in the Thai column.
    pub thai: String,
    /// Substring to find in the English column.
    pub english: String,
}

/// A single filter over patient rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientPredicate {
    /// Column equals the value.
    Equals(PatientColumn, String),
    /// Column contains the value as a literal substring.
    Contains(PatientColumn, String),
    /// Either name variant contains its value.
    EitherContains(NamePair),
    /// Date of birth equals the date.
    BornOn(NaiveDate),
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl PatientSearchCriteria {
    /// Returns `true` when no field would produce a predicate.
    pub fn is_empty(&self) -> bool {
        self.predicates().is_empty()
    }

    /// Folds the supplied fields into predicates, in a stable order.
    ///
    /// A `date_of_birth` that is not a valid `YYYY-MM-DD` date is logged and
    /// dropped; the remaining predicates still apply.
    ///
    /// ```
    /// use hospital_persistence::types::{NamePart, PatientPredicate, PatientSearchCriteria};
    ///
    /// let criteria = PatientSearchCriteria {
    ///     first_name_th: Some("ZZZ".to_string()),
    ///     first_name_en: Some("Multi".to_string()),
    ///     last_name_en: Some("Smith".to_string()),
    ///     ..Default::default()
    /// };
    ///
    /// let predicates = criteria.predicates();
    /// assert_eq!(predicates.len(), 2);
    /// assert!(matches!(
    ///     &predicates[0],
    ///     PatientPredicate::EitherContains(pair) if pair.part == NamePart::First
    /// ));
    /// ```
    pub fn predicates(&self) -> Vec<PatientPredicate> {
        let mut predicates = Vec::new();

        if let Some(v) = supplied(&self.national_id) {
            predicates.push(PatientPredicate::Equals(PatientColumn::NationalId, v.to_string()));
        }
        if let Some(v) = supplied(&self.passport_id) {
            predicates.push(PatientPredicate::Equals(PatientColumn::PassportId, v.to_string()));
        }

        let names = [
            (NamePart::First, &self.first_name_th, &self.first_name_en),
            (NamePart::Middle, &self.middle_name_th, &self.middle_name_en),
            (NamePart::Last, &self.last_name_th, &self.last_name_en),
        ];
        for (part, thai, english) in names {
            match (supplied(thai), supplied(english)) {
                (Some(th), Some(en)) => predicates.push(PatientPredicate::EitherContains(NamePair {
                    part,
                    thai: th.to_string(),
                    english: en.to_string(),
                })),
                (Some(th), None) => {
                    predicates.push(PatientPredicate::Contains(part.thai_column(), th.to_string()))
                }
                (None, Some(en)) => {
                    predicates.push(PatientPredicate::Contains(part.english_column(), en.to_string()))
                }
                (None, None) => {}
            }
        }

        if let Some(raw) = supplied(&self.date_of_birth) {
            match NaiveDate::parse_from_str(raw, DATE_OF_BIRTH_FORMAT) {
                Ok(date) => predicates.push(PatientPredicate::BornOn(date)),
                Err(e) => warn!(
                    date_of_birth = raw,
                    error = %e,
                    "Ignoring malformed date_of_birth search criterion"
                ),
            }
        }

        if let Some(v) = supplied(&self.phone_number) {
            predicates.push(PatientPredicate::Equals(PatientColumn::PhoneNumber, v.to_string()));
        }
        if let Some(v) = supplied(&self.email) {
            predicates.push(PatientPredicate::Equals(PatientColumn::Email, v.to_string()));
        }

        predicates
    }
}
