//! StaffStorage and PatientStorage implementations for PostgreSQL.

use async_trait::async_trait;
use tokio_postgres::error::SqlState;
use tokio_postgres::types::ToSql;
use tokio_postgres::Row;

use crate::core::{PatientStorage, StaffStorage};
use crate::error::{BackendError, ResourceError, StorageError, StorageResult};
use crate::search::{PatientQuery, PlaceholderStyle, SqlParam};
use crate::tenant::{TenantContext, TenantId};
use crate::types::{Gender, NewPatient, NewStaff, PatientRecord, PatientSearchCriteria, StaffMember};

use super::PostgresBackend;

fn is_unique_violation(err: &tokio_postgres::Error) -> bool {
    err.code() == Some(&SqlState::UNIQUE_VIOLATION)
}

fn decode_error(message: impl Into<String>) -> StorageError {
    StorageError::Backend(BackendError::SerializationError {
        message: message.into(),
    })
}

fn bind(params: &[SqlParam]) -> Vec<&(dyn ToSql + Sync)> {
    params
        .iter()
        .map(|p| match p {
            SqlParam::Text(s) => s as &(dyn ToSql + Sync),
            SqlParam::Integer(i) => i as &(dyn ToSql + Sync),
            SqlParam::Date(d) => d as &(dyn ToSql + Sync),
        })
        .collect()
}

fn read_tenant_id(row: &Row, column: &str) -> StorageResult<TenantId> {
    let raw: i64 = row.try_get(column)?;
    TenantId::try_from(raw).map_err(|e| decode_error(format!("{column}: {e}")))
}

fn read_staff(row: &Row) -> StorageResult<StaffMember> {
    Ok(StaffMember {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        hospital_id: read_tenant_id(row, "hospital_id")?,
        hospital_name: row.try_get("hospital_name")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn read_patient(row: &Row) -> StorageResult<PatientRecord> {
    let gender = row
        .try_get::<_, Option<String>>("gender")?
        .map(|raw| raw.parse::<Gender>())
        .transpose()?;

    Ok(PatientRecord {
        id: row.try_get("id")?,
        hospital_id: read_tenant_id(row, "hospital_id")?,
        patient_hn: row.try_get("patient_hn")?,
        first_name_th: row.try_get("first_name_th")?,
        middle_name_th: row.try_get("middle_name_th")?,
        last_name_th: row.try_get("last_name_th")?,
        first_name_en: row.try_get("first_name_en")?,
        middle_name_en: row.try_get("middle_name_en")?,
        last_name_en: row.try_get("last_name_en")?,
        date_of_birth: row.try_get("date_of_birth")?,
        national_id: row.try_get("national_id")?,
        passport_id: row.try_get("passport_id")?,
        phone_number: row.try_get("phone_number")?,
        email: row.try_get("email")?,
        gender,
    })
}

#[async_trait]
impl StaffStorage for PostgresBackend {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn find_staff_by_username(&self, username: &str) -> StorageResult<Option<StaffMember>> {
        let client = self.get_client().await?;

        let row = client
            .query_opt(
                "SELECT id, username, password_hash, hospital_id, hospital_name, created_at, updated_at
                 FROM staff WHERE username = $1",
                &[&username],
            )
            .await?;

        row.as_ref().map(read_staff).transpose()
    }

    async fn create_staff(&self, staff: NewStaff) -> StorageResult<StaffMember> {
        let client = self.get_client().await?;
        let member = staff.into_member();
        let hospital_id = member.hospital_id.as_i64();

        let result = client
            .execute(
                "INSERT INTO staff (id, username, password_hash, hospital_id, hospital_name, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
                &[
                    &member.id,
                    &member.username,
                    &member.password_hash,
                    &hospital_id,
                    &member.hospital_name,
                    &member.created_at,
                    &member.updated_at,
                ],
            )
            .await;

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
impl PatientStorage for PostgresBackend {
    async fn insert_patient(&self, patient: NewPatient) -> StorageResult<PatientRecord> {
        patient.validate()?;
        let client = self.get_client().await?;
        let hospital_id = patient.hospital_id.as_i64();
        let gender = patient.gender.map(Gender::code);

        let result = client
            .query_one(
                "INSERT INTO patients (hospital_id, patient_hn,
                     first_name_th, middle_name_th, last_name_th,
                     first_name_en, middle_name_en, last_name_en,
                     date_of_birth, national_id, passport_id, phone_number, email, gender)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                 RETURNING id",
                &[
                    &hospital_id,
                    &patient.patient_hn,
                    &patient.first_name_th,
                    &patient.middle_name_th,
                    &patient.last_name_th,
                    &patient.first_name_en,
                    &patient.middle_name_en,
                    &patient.last_name_en,
                    &patient.date_of_birth,
                    &patient.national_id,
                    &patient.passport_id,
                    &patient.phone_number,
                    &patient.email,
                    &gender,
                ],
            )
            .await;

        match result {
            Ok(row) => {
                let id: i64 = row.try_get(0)?;
                Ok(patient.into_record(id))
            }
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
        let query = PatientQuery::new(tenant, criteria).build(PlaceholderStyle::Dollar);
        tracing::debug!(
            hospital_id = %tenant.tenant_id(),
            sql = %query.sql,
            params = query.params.len(),
            "Executing patient search"
        );

        let client = self.get_client().await?;
        let rows = client.query(&query.sql, &bind(&query.params)).await?;

        rows.iter().map(read_patient).collect()
    }
}
