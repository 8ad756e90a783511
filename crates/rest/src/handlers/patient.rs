//! Patient search handler.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use tracing::debug;

use hospital_persistence::core::{PatientStorage, StaffStorage};

use crate::error::RestResult;
use crate::extractors::{AuthenticatedStaff, PatientSearch};
use crate::state::AppState;

/// Handler for patient search.
///
/// The search is scoped to the hospital in the caller's session token. A
/// hospital named in the query string is ignored.
///
/// # HTTP Request
///
/// `GET /api/v1/patient/search?first_name_th=...&national_id=...`
///
/// Recognized parameters: `national_id`, `passport_id`, `first_name_th`,
/// `first_name_en`, `middle_name_th`, `middle_name_en`, `last_name_th`,
/// `last_name_en`, `date_of_birth` (`YYYY-MM-DD`), `phone_number`, `email`.
///
/// # Response
///
/// - `200 OK` - JSON array of matching patients, possibly empty
/// - `400 Bad Request` - Query string cannot be decoded
/// - `401 Unauthorized` - Missing, malformed, expired or invalid token
pub async fn search_patients_handler<S>(
    State(state): State<AppState<S>>,
    staff: AuthenticatedStaff,
    PatientSearch(criteria): PatientSearch,
) -> RestResult<Response>
where
    S: StaffStorage + PatientStorage + 'static,
{
    let tenant = staff.tenant_context();
    debug!(
        hospital_id = %tenant.tenant_id(),
        criteria = ?criteria,
        "Processing patient search"
    );

    let patients = state.storage().search_patients(&tenant, &criteria).await?;
    debug!(count = patients.len(), "Patient search complete");

    Ok(Json(patients).into_response())
}
