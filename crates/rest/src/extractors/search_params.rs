//! Patient search criteria extractor.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use hospital_persistence::types::PatientSearchCriteria;

use crate::error::RestError;

/// Patient search criteria decoded from the query string.
///
/// Unknown keys, including any client-supplied hospital identifier, are
/// ignored. A query string that cannot be decoded is rejected with 400.
#[derive(Debug, Clone, Default)]
pub struct PatientSearch(pub PatientSearchCriteria);

impl PatientSearch {
    /// Returns the criteria.
    pub fn criteria(&self) -> &PatientSearchCriteria {
        &self.0
    }

    /// Consumes the extractor and returns the criteria.
    pub fn into_inner(self) -> PatientSearchCriteria {
        self.0
    }
}

impl<S> FromRequestParts<S> for PatientSearch
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(criteria) = Query::<PatientSearchCriteria>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| RestError::bad_request(rejection.body_text()))?;
        Ok(PatientSearch(criteria))
    }
}
