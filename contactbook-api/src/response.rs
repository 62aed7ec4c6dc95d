/// Response envelope shared by every endpoint
///
/// ```json
/// { "success": true, "data": { ... } }
/// { "success": false, "message": "Contact not found" }
/// ```

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::ValidationErrorDetail;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Per-field validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            details: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            details: None,
        }
    }

    pub fn validation_error(
        message: impl Into<String>,
        details: Vec<ValidationErrorDetail>,
    ) -> Self {
        Self {
            details: Some(details),
            ..Self::error(message)
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let value = serde_json::to_value(ApiResponse::ok(json!({ "id": 1 }))).unwrap();
        assert_eq!(value, json!({ "success": true, "data": { "id": 1 } }));

        let value =
            serde_json::to_value(ApiResponse::ok(Vec::<i32>::new()).with_message("Nothing yet"))
                .unwrap();
        assert_eq!(
            value,
            json!({ "success": true, "data": [], "message": "Nothing yet" })
        );
    }

    #[test]
    fn test_validation_envelope() {
        let details = vec![ValidationErrorDetail {
            field: "phone".to_string(),
            message: "Phone is required".to_string(),
        }];
        let value =
            serde_json::to_value(ApiResponse::validation_error("Request validation failed", details))
                .unwrap();

        assert_eq!(
            value,
            json!({
                "success": false,
                "message": "Request validation failed",
                "details": [{ "field": "phone", "message": "Phone is required" }]
            })
        );
    }
}
