//! Common test utilities for HTTP API testing.
//!
//! [`TestHarness`] runs the full application (routes, authorization gate and
//! middleware stack) over an in-memory SQLite backend seeded with patients in
//! two hospitals.

#![allow(dead_code)]

use axum::http::{HeaderValue, header::AUTHORIZATION};
use axum_test::{TestResponse, TestServer};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Value, json};

use hospital_auth::{TokenConfig, TokenService};
use hospital_persistence::backends::sqlite::SqliteBackend;
use hospital_persistence::core::PatientStorage;
use hospital_persistence::tenant::TenantId;
use hospital_persistence::types::{Gender, NewPatient};
use hospital_rest::{ServerConfig, create_app_with_config};

/// Password used for every staff member registered through the harness.
pub const PASSWORD: &str = "pw123";

/// A running test server.
pub struct TestHarness {
    /// The test server instance.
    pub server: TestServer,
    /// Server configuration.
    pub config: ServerConfig,
}

impl TestHarness {
    /// Creates a harness with the testing configuration.
    pub async fn new() -> Self {
        Self::with_config(ServerConfig::for_testing()).await
    }

    /// Creates a harness with a custom configuration.
    pub async fn with_config(config: ServerConfig) -> Self {
        let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
        backend.init_schema().expect("Failed to init schema");
        seed_patients(&backend).await;

        let app = create_app_with_config(backend, config.clone()).expect("Failed to build app");
        let server = TestServer::new(app).expect("Failed to create test server");

        Self { server, config }
    }

    /// Registers a staff member.
    pub async fn register(&self, username: &str, hospital: &str) -> TestResponse {
        self.server
            .post("/api/v1/staff/create")
            .json(&json!({
                "username": username,
                "password": PASSWORD,
                "hospital": hospital,
            }))
            .await
    }

    /// Logs in.
    pub async fn login(&self, username: &str, password: &str, hospital: &str) -> TestResponse {
        self.server
            .post("/api/v1/staff/login")
            .json(&json!({
                "username": username,
                "password": password,
                "hospital": hospital,
            }))
            .await
    }

    /// Registers a staff member, logs in and returns the session token.
    pub async fn token_for(&self, username: &str, hospital: &str) -> String {
        self.register(username, hospital).await.assert_status(axum::http::StatusCode::CREATED);

        let response = self.login(username, PASSWORD, hospital).await;
        response.assert_status_ok();
        response.json::<Value>()["token"]
            .as_str()
            .expect("login response has a token")
            .to_string()
    }

    /// Searches patients with a raw query string.
    pub async fn search(&self, token: &str, query: &str) -> TestResponse {
        self.server
            .get(&format!("/api/v1/patient/search{query}"))
            .add_header(AUTHORIZATION, bearer(token))
            .await
    }

    /// Signs a token with the harness secret, as if issued at `issued_at`.
    pub fn token_issued_at(&self, hospital_id: u32, issued_at: DateTime<Utc>) -> String {
        TokenService::new(&self.config.token_config())
            .issue_at("staff-x", "mallory", TenantId::new(hospital_id), issued_at)
            .expect("Failed to sign token")
    }
}

/// Builds an `Authorization: Bearer` header value.
pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).expect("valid header value")
}

/// Signs a token with an unrelated secret.
pub fn foreign_token(hospital_id: u32) -> String {
    TokenService::new(&TokenConfig::new("some-other-secret", chrono::Duration::hours(1)))
        .issue("staff-x", "mallory", TenantId::new(hospital_id))
        .expect("Failed to sign token")
}

/// Returns the `patient_hn` of every record in a search response, sorted.
pub fn hospital_numbers(response: &TestResponse) -> Vec<String> {
    let mut numbers: Vec<String> = response
        .json::<Vec<Value>>()
        .iter()
        .map(|p| p["patient_hn"].as_str().unwrap_or_default().to_string())
        .collect();
    numbers.sort();
    numbers
}

/// Seeds three patients in Hospital A (ID 1) and two in Hospital B (ID 2).
pub async fn seed_patients(backend: &SqliteBackend) {
    let patients = [
        NewPatient {
            first_name_th: Some("สมหมาย".to_string()),
            last_name_th: Some("ใจดี".to_string()),
            first_name_en: Some("Multi".to_string()),
            last_name_en: Some("Jaidee".to_string()),
            national_id: Some("N1".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 17),
            phone_number: Some("0810000001".to_string()),
            email: Some("multi@example.com".to_string()),
            gender: Some(Gender::Male),
            ..NewPatient::new(TenantId::new(1), "A-001")
        },
        NewPatient {
            first_name_th: Some("สมศรี".to_string()),
            first_name_en: Some("Somsri".to_string()),
            last_name_en: Some("Rakdee".to_string()),
            passport_id: Some("P-778".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 1, 2),
            gender: Some(Gender::Female),
            ..NewPatient::new(TenantId::new(1), "A-002")
        },
        NewPatient {
            first_name_en: Some("Ann_Marie".to_string()),
            email: Some("ann@example.com".to_string()),
            ..NewPatient::new(TenantId::new(1), "A-003")
        },
        NewPatient {
            first_name_th: Some("สมหมาย".to_string()),
            first_name_en: Some("Multi".to_string()),
            national_id: Some("N2".to_string()),
            ..NewPatient::new(TenantId::new(2), "B-001")
        },
        NewPatient {
            first_name_en: Some("Bea".to_string()),
            national_id: Some("N1-B".to_string()),
            ..NewPatient::new(TenantId::new(2), "B-002")
        },
    ];

    for patient in patients {
        backend
            .insert_patient(patient)
            .await
            .unwrap_or_else(|e| panic!("Failed to seed patient: {e}"));
    }
}
