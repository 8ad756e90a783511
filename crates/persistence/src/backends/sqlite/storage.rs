//! StaffStorage and PatientStorage implementations for SQLite.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::{ToSqlOutput, Type};
use rusqlite::{params, OptionalExtension, Row, ToSql};

use crate::core::{PatientStorage, StaffStorage};
use crate::error::{ResourceError, StorageError, StorageResult};
use crate::search::{PatientQuery, PlaceholderStyle, SqlParam};
use crate::tenant::{TenantContext, TenantId};
use crate::types::{Gender, NewPatient, NewStaff, PatientRecord, PatientSearchCriteria, StaffMember};

use super::SqliteBackend;

const DATE_FORMAT: &str = "%Y-%m-%d";

impl ToSql for SqlParam {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            SqlParam::Text(s) => s.to_sql(),
            SqlParam::Integer(i) => i.to_sql(),
            SqlParam::Date(d) => Ok(ToSqlOutput::from(d.format(DATE_FORMAT).to_string())),
        }
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

fn conversion_error(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn read_tenant_id(row: &Row<'_>, idx: usize) -> rusqlite::Result<TenantId> {
    let raw: i64 = row.get(idx)?;
    TenantId::try_from(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

fn read_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, e))
}

fn read_staff(row: &Row<'_>) -> rusqlite::Result<StaffMember> {
    Ok(StaffMember {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        hospital_id: read_tenant_id(row, 3)?,
        hospital_name: row.get(4)?,
        created_at: read_timestamp(row, 5)?,
        updated_at: read_timestamp(row, 6)?,
    })
}

/// Decodes a row selected with `PATIENT_COLUMNS`.
fn read_patient(row: &Row<'_>) -> rusqlite::Result<PatientRecord> {
    let date_of_birth = row
        .get::<_, Option<String>>(9)?
        .map(|raw| NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|e| conversion_error(9, e)))
        .transpose()?;
    let gender = row
        .get::<_, Option<String>>(14)?
        .map(|raw| raw.parse::<Gender>().map_err(|e| conversion_error(14, e)))
        .transpose()?;

    Ok(PatientRecord {
        id: row.get(0)?,
        hospital_id: read_tenant_id(row, 1)?,
        patient_hn: row.get(2)?,
        first_name_th: row.get(3)?,
        middle_name_th: row.get(4)?,
        last_name_th: row.get(5)?,
        first_name_en: row.get(6)?,
        middle_name_en: row.get(7)?,
        last_name_en: row.get(8)?,
        date_of_birth,
        national_id: row.get(10)?,
        passport_id: row.get(11)?,
        phone_number: row.get(12)?,
        email: row.get(13)?,
        gender,
    })
}

#[async_trait]
impl StaffStorage for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn find_staff_by_username(&self, username: &str) -> StorageResult<Option<StaffMember>> {
        let conn = self.get_connection()?;

        let staff = conn
            .query_row(
                "SELECT id, username, password_hash, hospital_id, hospital_name, created_at, updated_at
                 FROM staff WHERE username = ?1",
                params![username],
                read_staff,
            )
            .optional()?;

        Ok(staff)
    }

    async fn create_staff(&self, staff: NewStaff) -> StorageResult<StaffMember> {
        let conn = self.get_connection()?;
        let member = staff.into_member();

        let result = conn.execute(
            "INSERT INTO staff (id, username, password_hash, hospital_id, hospital_name, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                member.id,
                member.username,
                member.password_hash,
                member.hospital_id.as_i64(),
                member.hospital_name,
                member.created_at.to_rfc3339(),
                member.updated_at.to_rfc3339(),
            ],
        );

        match result {
            Ok(_) => {
                tracing::debug!(
                    username = %member.username,
                    hospital_id = %member.hospital_id,
                    "Inserted staff record"
                );
                Ok(member)
            }
            Err(e) if is_unique_violation(&e) => Err(StorageError::Resource(ResourceError::AlreadyExists {
                entity: "staff",
                key: member.username,
            })),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl PatientStorage for SqliteBackend {
    async fn insert_patient(&self, patient: NewPatient) -> StorageResult<PatientRecord> {
        patient.validate()?;
        let conn = self.get_connection()?;

        let result = conn.execute(
            "INSERT INTO patients (hospital_id, patient_hn,
                 first_name_th, middle_name_th, last_name_th,
                 first_name_en, middle_name_en, last_name_en,
                 date_of_birth, national_id, passport_id, phone_number, email, gender)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                patient.hospital_id.as_i64(),
                patient.patient_hn,
                patient.first_name_th,
                patient.middle_name_th,
                patient.last_name_th,
                patient.first_name_en,
                patient.middle_name_en,
                patient.last_name_en,
                patient.date_of_birth.map(|d| d.format(DATE_FORMAT).to_string()),
                patient.national_id,
                patient.passport_id,
                patient.phone_number,
                patient.email,
                patient.gender.map(Gender::code),
            ],
        );

        match result {
            Ok(_) => Ok(patient.into_record(conn.last_insert_rowid())),
            Err(e) if is_unique_violation(&e) => Err(StorageError::Resource(ResourceError::AlreadyExists {
                entity: "patient",
                key: format!("{}/{}", patient.hospital_id, patient.patient_hn),
            })),
            Err(e) => Err(e.into()),
        }
    }

    async fn search_patients(
        &self,
        tenant: &TenantContext,
        criteria: &PatientSearchCriteria,
    ) -> StorageResult<Vec<PatientRecord>> {
        let query = PatientQuery::new(tenant, criteria).build(PlaceholderStyle::Numbered);
        tracing::debug!(
            hospital_id = %tenant.tenant_id(),
            sql = %query.sql,
            params = query.params.len(),
            "Executing patient search"
        );

        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(&query.sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(query.params.iter()), read_patient)?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?);
        }
        Ok(patients)
    }
}
