//! PostgreSQL schema definitions and migrations.

use crate::error::{BackendError, StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema.
pub async fn initialize_schema(client: &deadpool_postgres::Client) -> StorageResult<()> {
    let current_version = get_schema_version(client).await?;

    if current_version == 0 {
        create_schema_v1(client).await?;
        set_schema_version(client, SCHEMA_VERSION).await?;
        tracing::info!(version = SCHEMA_VERSION, "Created PostgreSQL schema");
    } else if current_version > SCHEMA_VERSION {
        return Err(pg_error(format!(
            "database schema version {} is newer than supported version {}",
            current_version, SCHEMA_VERSION
        )));
    }

    Ok(())
}

async fn get_schema_version(client: &deadpool_postgres::Client) -> StorageResult<i32> {
    client
        .execute(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER NOT NULL
            )",
            &[],
        )
        .await
        .map_err(|e| pg_error(format!("Failed to create schema_version table: {}", e)))?;

    let row = client
        .query_opt("SELECT version FROM schema_version LIMIT 1", &[])
        .await
        .map_err(|e| pg_error(format!("Failed to query schema version: {}", e)))?;

    Ok(row.map(|r| r.get::<_, i32>(0)).unwrap_or(0))
}

async fn set_schema_version(client: &deadpool_postgres::Client, version: i32) -> StorageResult<()> {
    client
        .execute("DELETE FROM schema_version", &[])
        .await
        .map_err(|e| pg_error(format!("Failed to clear schema_version: {}", e)))?;

    client
        .execute("INSERT INTO schema_version (version) VALUES ($1)", &[&version])
        .await
        .map_err(|e| pg_error(format!("Failed to set schema_version: {}", e)))?;

    Ok(())
}

async fn create_schema_v1(client: &deadpool_postgres::Client) -> StorageResult<()> {
    client
        .batch_execute(
            "
            CREATE TABLE IF NOT EXISTS staff (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                hospital_id BIGINT NOT NULL,
                hospital_name TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_staff_hospital ON staff(hospital_id);

            CREATE TABLE IF NOT EXISTS patients (
                id BIGSERIAL PRIMARY KEY,
                hospital_id BIGINT NOT NULL,
                patient_hn TEXT NOT NULL,
                first_name_th TEXT,
                middle_name_th TEXT,
                last_name_th TEXT,
                first_name_en TEXT,
                middle_name_en TEXT,
                last_name_en TEXT,
                date_of_birth DATE,
                national_id TEXT,
                passport_id TEXT,
                phone_number TEXT,
                email TEXT,
                gender TEXT CHECK (gender IN ('M', 'F')),
                UNIQUE (hospital_id, patient_hn)
            );

            CREATE INDEX IF NOT EXISTS idx_patients_hospital ON patients(hospital_id);
            CREATE INDEX IF NOT EXISTS idx_patients_national_id ON patients(hospital_id, national_id);
            CREATE INDEX IF NOT EXISTS idx_patients_passport_id ON patients(hospital_id, passport_id);
            ",
        )
        .await
        .map_err(|e| pg_error(format!("Failed to create schema v1: {}", e)))?;

    Ok(())
}

fn pg_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::MigrationError { message })
}
