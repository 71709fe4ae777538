use serde::{Deserialize, Serialize};

use crate::middlewares::current_request_id;

/// 字段级校验错误
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "requestId")]
    pub request_id: String,
}

impl<T> ApiResponse<T> {
    fn build(success: bool, message: String, data: Option<T>) -> Self {
        Self {
            success,
            message,
            data,
            errors: None,
            timestamp: chrono::Utc::now(),
            request_id: current_request_id(),
        }
    }

    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::build(true, message.into(), Some(data))
    }

    pub fn error(data: T, message: impl Into<String>) -> Self {
        Self::build(false, message.into(), Some(data))
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self::build(true, message.into(), None)
    }

    pub fn error_empty(message: impl Into<String>) -> Self {
        Self::build(false, message.into(), None)
    }

    pub fn validation_failed(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        let mut response = Self::build(false, message.into(), None);
        response.errors = Some(errors);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let value = serde_json::to_value(ApiResponse::success(42, "ok")).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "ok");
        assert_eq!(value["data"], 42);
        assert!(value.get("errors").is_none());
        assert!(value.get("requestId").is_some());
        assert!(value.get("timestamp").is_some());
    }

    #[test]
    fn test_validation_envelope_lists_fields() {
        let value = serde_json::to_value(ApiResponse::validation_failed(
            "Validation failed",
            vec![FieldError::new("code", "code is required")],
        ))
        .unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("data").is_none());
        assert_eq!(value["errors"][0]["field"], "code");
    }
}
