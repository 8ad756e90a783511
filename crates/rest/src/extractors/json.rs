//! JSON body extractor.

use axum::extract::{FromRequest, Json, Request};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::RestError;

/// A JSON request body.
///
/// Works like [`axum::Json`] but rejects with the API's `{"error": ...}`
/// shape: 413 when the body exceeds the configured limit, 400 otherwise.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for RestError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            RestError::PayloadTooLarge
        } else {
            RestError::bad_request(rejection.body_text())
        }
    }
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use hospital_auth::Credentials;

    fn request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_decodes_credentials() {
        let JsonBody(credentials) = JsonBody::<Credentials>::from_request(
            request(r#"{"username":"alice","password":"pw","hospital":"Hospital A"}"#),
            &(),
        )
        .await
        .unwrap();
        assert_eq!(credentials.username, "alice");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let err = JsonBody::<Credentials>::from_request(request("{not json"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let err = JsonBody::<Credentials>::from_request(request(r#"{"username":"alice"}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
