//! Patient record types.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::tenant::TenantId;

/// Administrative sex marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    /// "M"
    #[serde(rename = "M")]
    Male,
    /// "F"
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    /// The stored single-letter code.
    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Gender::Male),
            "F" => Ok(Gender::Female),
            other => Err(ValidationError::InvalidField {
                field: "gender",
                message: format!("expected M or F, got '{other}'"),
            }),
        }
    }
}

/// A stored patient record.
///
/// Patient records are populated out-of-band; the service only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct PatientRecord {
    /// Row identifier.
    pub id: i64,
    /// Owning tenant.
    pub hospital_id: TenantId,
    /// Hospital-local record number, unique within the tenant.
    pub patient_hn: String,
    pub first_name_th: Option<String>,
    pub middle_name_th: Option<String>,
    pub last_name_th: Option<String>,
    pub first_name_en: Option<String>,
    pub middle_name_en: Option<String>,
    pub last_name_en: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub national_id: Option<String>,
    pub passport_id: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
}

/// Input for seeding a patient record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct NewPatient {
    pub hospital_id: TenantId,
    pub patient_hn: String,
    pub first_name_th: Option<String>,
    pub middle_name_th: Option<String>,
    pub last_name_th: Option<String>,
    pub first_name_en: Option<String>,
    pub middle_name_en: Option<String>,
    pub last_name_en: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub national_id: Option<String>,
    pub passport_id: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
}

impl NewPatient {
    /// Creates a record with only the required keys set.
    ///
    /// ```
    /// use hospital_persistence::tenant::TenantId;
    /// use hospital_persistence::types::NewPatient;
    ///
    /// let patient = NewPatient {
    ///     first_name_en: Some("Multi".to_string()),
    ///     ..NewPatient::new(TenantId::new(1), "HN-0001")
    /// };
    /// assert!(patient.validate().is_ok());
    /// ```
    pub fn new(hospital_id: TenantId, patient_hn: impl Into<String>) -> Self {
        Self {
            hospital_id,
            patient_hn: patient_hn.into(),
            first_name_th: None,
            middle_name_th: None,
            last_name_th: None,
            first_name_en: None,
            middle_name_en: None,
            last_name_en: None,
            date_of_birth: None,
            national_id: None,
            passport_id: None,
            phone_number: None,
            email: None,
            gender: None,
        }
    }

    /// Checks the required keys.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.patient_hn.trim().is_empty() {
            return Err(ValidationError::MissingRequiredField { field: "patient_hn" });
        }
        if self.hospital_id.get() == 0 {
            return Err(ValidationError::InvalidField {
                field: "hospital_id",
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Attaches the row identifier assigned by the store.
    pub fn into_record(self, id: i64) -> PatientRecord {
        PatientRecord {
            id,
            hospital_id: self.hospital_id,
            patient_hn: self.patient_hn,
            first_name_th: self.first_name_th,
            middle_name_th: self.middle_name_th,
            last_name_th: self.last_name_th,
            first_name_en: self.first_name_en,
            middle_name_en: self.middle_name_en,
            last_name_en: self.last_name_en,
            date_of_birth: self.date_of_birth,
            national_id: self.national_id,
            passport_id: self.passport_id,
            phone_number: self.phone_number,
            email: self.email,
            gender: self.gender,
        }
    }
}
