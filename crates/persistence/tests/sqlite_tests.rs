//! SQLite backend integration tests.
//!
//! These tests exercise the credential store and tenant-scoped patient search
//! through the public storage traits.

use chrono::NaiveDate;

use hospital_persistence::backends::sqlite::SqliteBackend;
use hospital_persistence::core::{PatientStorage, StaffStorage};
use hospital_persistence::error::{ResourceError, StorageError};
use hospital_persistence::tenant::{Tenant, TenantContext, TenantId};
use hospital_persistence::types::{Gender, NewPatient, NewStaff, PatientSearchCriteria};

fn create_backend() -> SqliteBackend {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to initialize schema");
    backend
}

fn scope(id: u32) -> TenantContext {
    TenantContext::new(TenantId::new(id))
}

async fn seed(backend: &SqliteBackend) {
    let patients = [
        NewPatient {
            first_name_th: Some("สมหมาย ใจดี".to_string()),
            first_name_en: Some("Multi".to_string()),
            last_name_en: Some("Jaidee".to_string()),
            national_id: Some("N1".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 17),
            phone_number: Some("0810000001".to_string()),
            email: Some("multi@example.com".to_string()),
            gender: Some(Gender::Male),
            ..NewPatient::new(TenantId::new(1), "HN-A-1")
        },
        NewPatient {
            first_name_th: Some("สมศรี".to_string()),
            first_name_en: Some("Somsri".to_string()),
            middle_name_en: Some("Mae".to_string()),
            passport_id: Some("P-778".to_string()),
            gender: Some(Gender::Female),
            ..NewPatient::new(TenantId::new(1), "HN-A-2")
        },
        NewPatient {
            first_name_en: Some("Multi".to_string()),
            national_id: Some("N2".to_string()),
            ..NewPatient::new(TenantId::new(2), "HN-B-1")
        },
    ];

    for patient in patients {
        backend.insert_patient(patient).await.unwrap();
    }
}

async fn search(
    backend: &SqliteBackend,
    tenant: u32,
    criteria: PatientSearchCriteria,
) -> Vec<String> {
    backend
        .search_patients(&scope(tenant), &criteria)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.patient_hn)
        .collect()
}

// ============================================================================
// Credential Store
// ============================================================================

#[tokio::test]
async fn test_staff_round_trip() {
    let backend = create_backend();
    let tenant = Tenant::new(TenantId::new(2), "Hospital B");

    let created = backend
        .create_staff(NewStaff::new("bob", "$argon2id$hash", tenant))
        .await
        .unwrap();
    assert_eq!(created.hospital_id, TenantId::new(2));
    assert_eq!(created.hospital_name, "Hospital B");

    let found = backend.find_staff_by_username("bob").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.password_hash, "$argon2id$hash");
    assert_eq!(found.created_at, created.created_at);
}

#[tokio::test]
async fn test_username_lookup_is_exact() {
    let backend = create_backend();
    backend
        .create_staff(NewStaff::new(
            "alice",
            "hash",
            Tenant::new(TenantId::new(1), "Hospital A"),
        ))
        .await
        .unwrap();

    assert!(backend.find_staff_by_username("alice").await.unwrap().is_some());
    assert!(backend.find_staff_by_username("alic").await.unwrap().is_none());
    assert!(backend.find_staff_by_username("").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_username_is_already_exists() {
    let backend = create_backend();
    let tenant = Tenant::new(TenantId::new(1), "Hospital A");

    backend
        .create_staff(NewStaff::new("alice", "h1", tenant.clone()))
        .await
        .unwrap();
    let err = backend
        .create_staff(NewStaff::new("alice", "h2", tenant))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StorageError::Resource(ResourceError::AlreadyExists { entity: "staff", .. })
    ));
}

#[tokio::test]
async fn test_file_database_persists_staff() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hospital.db");

    {
        let backend = SqliteBackend::open(&path).unwrap();
        backend.init_schema().unwrap();
        backend
            .create_staff(NewStaff::new(
                "carol",
                "hash",
                Tenant::new(TenantId::new(1), "Hospital A"),
            ))
            .await
            .unwrap();
    }

    let backend = SqliteBackend::open(&path).unwrap();
    backend.init_schema().unwrap();
    assert!(backend.find_staff_by_username("carol").await.unwrap().is_some());
}

// ============================================================================
// Patient Search
// ============================================================================

#[tokio::test]
async fn test_empty_criteria_returns_whole_tenant() {
    let backend = create_backend();
    seed(&backend).await;

    let mut hns = search(&backend, 1, PatientSearchCriteria::default()).await;
    hns.sort();
    assert_eq!(hns, vec!["HN-A-1", "HN-A-2"]);

    assert_eq!(search(&backend, 2, PatientSearchCriteria::default()).await, vec!["HN-B-1"]);
    assert!(search(&backend, 3, PatientSearchCriteria::default()).await.is_empty());
}

#[tokio::test]
async fn test_cross_tenant_isolation() {
    let backend = create_backend();
    seed(&backend).await;

    let criteria = PatientSearchCriteria {
        national_id: Some("N1".to_string()),
        ..Default::default()
    };

    assert_eq!(search(&backend, 1, criteria.clone()).await, vec!["HN-A-1"]);
    assert!(search(&backend, 2, criteria).await.is_empty());
}

#[tokio::test]
async fn test_every_result_belongs_to_scope() {
    let backend = create_backend();
    seed(&backend).await;

    let criteria = PatientSearchCriteria {
        first_name_en: Some("Multi".to_string()),
        ..Default::default()
    };

    for tenant in [1, 2] {
        let results = backend.search_patients(&scope(tenant), &criteria).await.unwrap();
        assert_eq!(results.len(), 1);
        assert!(results.iter().all(|p| p.hospital_id == TenantId::new(tenant)));
    }
}

#[tokio::test]
async fn test_thai_substring_match() {
    let backend = create_backend();
    seed(&backend).await;

    let criteria = PatientSearchCriteria {
        first_name_th: Some("สมหมาย".to_string()),
        ..Default::default()
    };
    assert_eq!(search(&backend, 1, criteria).await, vec!["HN-A-1"]);

    let shared_prefix = PatientSearchCriteria {
        first_name_th: Some("สม".to_string()),
        ..Default::default()
    };
    assert_eq!(search(&backend, 1, shared_prefix).await.len(), 2);
}

#[tokio::test]
async fn test_bilingual_pair_uses_or() {
    let backend = create_backend();
    seed(&backend).await;

    let criteria = PatientSearchCriteria {
        first_name_th: Some("ZZZ".to_string()),
        first_name_en: Some("Multi".to_string()),
        ..Default::default()
    };
    assert_eq!(search(&backend, 1, criteria).await, vec!["HN-A-1"]);

    let neither = PatientSearchCriteria {
        first_name_th: Some("ZZZ".to_string()),
        first_name_en: Some("YYY".to_string()),
        ..Default::default()
    };
    assert!(search(&backend, 1, neither).await.is_empty());
}

#[tokio::test]
async fn test_different_groups_combine_with_and() {
    let backend = create_backend();
    seed(&backend).await;

    let matching = PatientSearchCriteria {
        first_name_en: Some("Multi".to_string()),
        email: Some("multi@example.com".to_string()),
        ..Default::default()
    };
    assert_eq!(search(&backend, 1, matching).await, vec!["HN-A-1"]);

    let conflicting = PatientSearchCriteria {
        first_name_en: Some("Multi".to_string()),
        passport_id: Some("P-778".to_string()),
        ..Default::default()
    };
    assert!(search(&backend, 1, conflicting).await.is_empty());
}

#[tokio::test]
async fn test_exact_fields_do_not_match_substrings() {
    let backend = create_backend();
    seed(&backend).await;

    let partial_phone = PatientSearchCriteria {
        phone_number: Some("081000000".to_string()),
        ..Default::default()
    };
    assert!(search(&backend, 1, partial_phone).await.is_empty());

    let passport = PatientSearchCriteria {
        passport_id: Some("P-778".to_string()),
        ..Default::default()
    };
    assert_eq!(search(&backend, 1, passport).await, vec!["HN-A-2"]);
}

#[tokio::test]
async fn test_date_of_birth_filter() {
    let backend = create_backend();
    seed(&backend).await;

    let exact = PatientSearchCriteria {
        date_of_birth: Some("1990-05-17".to_string()),
        ..Default::default()
    };
    assert_eq!(search(&backend, 1, exact).await, vec!["HN-A-1"]);

    let other_day = PatientSearchCriteria {
        date_of_birth: Some("1990-05-18".to_string()),
        ..Default::default()
    };
    assert!(search(&backend, 1, other_day).await.is_empty());
}

#[tokio::test]
async fn test_malformed_date_is_dropped_not_fatal() {
    let backend = create_backend();
    seed(&backend).await;

    let criteria = PatientSearchCriteria {
        date_of_birth: Some("17/05/1990".to_string()),
        middle_name_en: Some("Mae".to_string()),
        ..Default::default()
    };
    assert_eq!(search(&backend, 1, criteria).await, vec!["HN-A-2"]);
}

#[tokio::test]
async fn test_blank_fields_impose_no_constraint() {
    let backend = create_backend();
    seed(&backend).await;

    let criteria = PatientSearchCriteria {
        national_id: Some(String::new()),
        email: Some(String::new()),
        ..Default::default()
    };
    assert_eq!(search(&backend, 1, criteria).await.len(), 2);
}
