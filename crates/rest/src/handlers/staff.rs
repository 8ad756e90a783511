//! Staff registration and login handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use hospital_auth::Credentials;
use hospital_persistence::core::{PatientStorage, StaffStorage};

use crate::error::RestResult;
use crate::extractors::JsonBody;
use crate::state::AppState;

/// Handler for staff registration.
///
/// # HTTP Request
///
/// `POST /api/v1/staff/create`
///
/// ```json
/// {"username": "alice", "password": "pw123", "hospital": "Hospital A"}
/// ```
///
/// `hospital` may be a hospital name or its numeric ID.
///
/// # Response
///
/// - `201 Created` - The new staff member, without the password hash
/// - `400 Bad Request` - Malformed body, missing field or unknown hospital
/// - `409 Conflict` - Username already exists
pub async fn create_staff_handler<S>(
    State(state): State<AppState<S>>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> RestResult<Response>
where
    S: StaffStorage + PatientStorage + 'static,
{
    debug!(username = %credentials.username, hospital = %credentials.hospital, "Processing staff registration");

    let staff = state.auth().create_staff(&credentials).await?;

    Ok((StatusCode::CREATED, Json(staff)).into_response())
}

/// Handler for staff login.
///
/// # HTTP Request
///
/// `POST /api/v1/staff/login`
///
/// ```json
/// {"username": "alice", "password": "pw123", "hospital": "Hospital A"}
/// ```
///
/// # Response
///
/// - `200 OK` - `{"token": "...", "staff": {...}}`
/// - `400 Bad Request` - Malformed body or missing field
/// - `401 Unauthorized` - Any authentication failure
pub async fn login_handler<S>(
    State(state): State<AppState<S>>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> RestResult<Response>
where
    S: StaffStorage + PatientStorage + 'static,
{
    debug!(username = %credentials.username, hospital = %credentials.hospital, "Processing login");

    let outcome = state.auth().authenticate(&credentials).await?;

    Ok((StatusCode::OK, Json(outcome)).into_response())
}
