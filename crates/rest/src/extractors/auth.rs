//! Authenticated staff extractor.

use axum::{extract::FromRequestParts, http::request::Parts};

use hospital_auth::SessionClaims;
use hospital_persistence::tenant::{TenantContext, TenantId};

use crate::error::RestError;

/// The staff member behind a request that passed the authorization gate.
///
/// Only usable on routes wrapped with
/// [`require_bearer`](crate::middleware::require_bearer). Anywhere else the
/// claims are absent and extraction fails with 401.
///
/// # Example
///
/// ```rust,ignore
/// use hospital_rest::extractors::AuthenticatedStaff;
///
/// async fn handler(staff: AuthenticatedStaff) {
///     println!("hospital: {}", staff.hospital_id());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedStaff {
    claims: SessionClaims,
}

impl AuthenticatedStaff {
    /// Wraps validated claims.
    pub fn new(claims: SessionClaims) -> Self {
        Self { claims }
    }

    /// Returns the validated claims.
    pub fn claims(&self) -> &SessionClaims {
        &self.claims
    }

    /// Returns the staff member's hospital.
    pub fn hospital_id(&self) -> TenantId {
        self.claims.hospital_id
    }

    /// Builds the patient search scope from the token, never from the request.
    pub fn tenant_context(&self) -> TenantContext {
        TenantContext::new(self.claims.hospital_id).with_user_id(self.claims.sub.clone())
    }
}

impl<S> FromRequestParts<S> for AuthenticatedStaff
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionClaims>()
            .cloned()
            .map(AuthenticatedStaff::new)
            .ok_or_else(|| RestError::unauthorized("missing or malformed authorization header"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims() -> SessionClaims {
        SessionClaims {
            sub: "staff-7".to_string(),
            username: "alice".to_string(),
            hospital_id: TenantId::new(2),
            iat: 0,
            exp: 60,
        }
    }

    #[test]
    fn test_tenant_context_comes_from_claims() {
        let staff = AuthenticatedStaff::new(claims());
        let context = staff.tenant_context();

        assert_eq!(context.tenant_id(), TenantId::new(2));
        assert_eq!(context.user_id(), Some("staff-7"));
    }

    #[tokio::test]
    async fn test_extract_from_extensions() {
        let (mut parts, ()) = axum::http::Request::new(()).into_parts();
        parts.extensions.insert(claims());

        let staff = AuthenticatedStaff::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(staff.claims().username, "alice");
    }

    #[tokio::test]
    async fn test_missing_claims_is_unauthorized() {
        let (mut parts, ()) = axum::http::Request::new(()).into_parts();

        let err = AuthenticatedStaff::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }
}
