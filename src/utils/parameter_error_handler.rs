use actix_web::{
    Error, HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
};
use std::fmt;

use crate::models::{ApiResponse, FieldError};

fn bad_request<E>(err: E, message: &str, field: &str, detail: String) -> Error
where
    E: fmt::Debug + fmt::Display + 'static,
{
    let body = ApiResponse::<()>::validation_failed(message, vec![FieldError::new(field, detail)]);
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// JSON 请求体解析失败时返回统一信封
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let detail = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
        JsonPayloadError::Overflow { limit }
        | JsonPayloadError::OverflowKnownLength { limit, .. } => {
            format!("Request body exceeds {limit} bytes")
        }
        JsonPayloadError::Deserialize(e) => e.to_string(),
        other => other.to_string(),
    };
    tracing::debug!("Rejected JSON payload: {}", detail);
    bad_request(err, "Invalid request body", "body", detail)
}

/// 查询参数解析失败时返回统一信封
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let detail = err.to_string();
    tracing::debug!("Rejected query string: {}", detail);
    bad_request(err, "Invalid query parameters", "query", detail)
}
