//! Fallback for unmatched routes.

use crate::error::RestError;

/// Responds 404 `{"error": "Resource not found"}` to any unmatched request.
pub async fn not_found_handler() -> RestError {
    RestError::NotFound
}
