pub mod rate_limit;
pub mod request_id;
pub mod require_jwt;
pub mod require_permission;

pub use rate_limit::RateLimit;
pub use request_id::{RequestId, current_request_id};
pub use require_jwt::RequireJWT;
pub use require_permission::RequirePermission;

use actix_web::{HttpResponse, http::StatusCode};

use crate::models::ApiResponse;

// 辅助函数：创建统一信封格式的错误响应
pub(crate) fn create_error_response(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse::<()>::error_empty(message))
}
