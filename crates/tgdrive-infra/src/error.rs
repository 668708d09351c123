//! HTTP error response body
//!
//! The `IntoResponse` implementation for `AppError` lives in the binary crate
//! (tgdrive-api): the orphan rule forbids implementing axum's trait for a
//! tgdrive-core type here.

use serde::Serialize;

/// Standard error response format for HTTP endpoints
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_are_omitted() {
        let body = ErrorResponse {
            error: "Not found".to_string(),
            code: "NOT_FOUND".to_string(),
            details: None,
            error_type: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Not found", "code": "NOT_FOUND"}));
    }
}
