//! Bearer-token authorization gate.
//!
//! Protected routes are wrapped with [`require_bearer`] through
//! `axum::middleware::from_fn_with_state`. The gate rejects the request before
//! any handler runs unless the `Authorization` header carries a valid session
//! token. On success the decoded [`SessionClaims`] are inserted into the
//! request extensions, where
//! [`AuthenticatedStaff`](crate::extractors::AuthenticatedStaff) reads them.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use hospital_auth::SessionClaims;
use hospital_persistence::core::{PatientStorage, StaffStorage};

use crate::error::RestError;
use crate::state::AppState;

const BEARER: &str = "bearer";

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively. Returns `None` when the header
/// is missing, not valid ASCII, uses another scheme or carries no token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER) {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Middleware requiring a valid session token.
pub async fn require_bearer<S>(
    State(state): State<AppState<S>>,
    mut request: Request,
    next: Next,
) -> Response
where
    S: StaffStorage + PatientStorage + 'static,
{
    let Some(token) = bearer_token(request.headers()) else {
        debug!(path = %request.uri().path(), "Rejected request without bearer token");
        return RestError::unauthorized("missing or malformed authorization header").into_response();
    };

    let claims: SessionClaims = match state.tokens().validate(token) {
        Ok(claims) => claims,
        Err(e) => {
            warn!(path = %request.uri().path(), error = %e, "Rejected session token");
            return RestError::from(e).into_response();
        }
    };

    debug!(
        staff_id = %claims.sub,
        hospital_id = %claims.hospital_id,
        "Authorized request"
    );
    request.extensions_mut().insert(claims);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("BEARER abc")), Some("abc"));
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("Basic YWxpY2U6cHc=")), None);
        assert_eq!(bearer_token(&headers("abc.def.ghi")), None);
    }
}
