//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称和 HTTP 状态码。
//! 实现了 `actix_web::ResponseError`，处理函数可以直接用 `?` 返回错误，
//! 由全局映射渲染为统一的响应信封。

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;
use tracing::{error, warn};

use crate::models::ApiResponse;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - status() 方法 - 返回 HTTP 状态码
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_campus_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CampusError {
            $($variant(String),)*
        }

        impl CampusError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CampusError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CampusError::$variant(_) => $type_name,)*
                }
            }

            /// 获取 HTTP 状态码
            pub fn status(&self) -> StatusCode {
                match self {
                    $(CampusError::$variant(_) => StatusCode::$status,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CampusError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CampusError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CampusError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_campus_errors! {
    CacheConnection("E001", "Cache Connection Error", INTERNAL_SERVER_ERROR),
    CachePluginNotFound("E002", "Cache Plugin Not Found", INTERNAL_SERVER_ERROR),
    DatabaseConfig("E003", "Database Configuration Error", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E004", "Database Connection Error", INTERNAL_SERVER_ERROR),
    DatabaseOperation("E005", "Database Operation Error", INTERNAL_SERVER_ERROR),
    FileOperation("E006", "File Operation Error", INTERNAL_SERVER_ERROR),
    Validation("E007", "Validation Error", BAD_REQUEST),
    NotFound("E008", "Resource Not Found", NOT_FOUND),
    Serialization("E009", "Serialization Error", INTERNAL_SERVER_ERROR),
    Conflict("E010", "Resource Conflict", CONFLICT),
    DateParse("E011", "Date Parse Error", BAD_REQUEST),
    Authentication("E012", "Authentication Error", UNAUTHORIZED),
    Authorization("E013", "Authorization Error", FORBIDDEN),
    TokenMissing("E014", "Token Missing", UNAUTHORIZED),
    TokenExpired("E015", "Token Expired", UNAUTHORIZED),
    TokenInvalid("E016", "Token Invalid", UNAUTHORIZED),
    AccountLocked("E017", "Account Locked", LOCKED),
    Payment("E018", "Payment Error", PAYMENT_REQUIRED),
    RateLimited("E019", "Rate Limit Exceeded", TOO_MANY_REQUESTS),
    Internal("E020", "Internal Error", INTERNAL_SERVER_ERROR),
}

impl CampusError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为可预期的业务错误（非 5xx）
    pub fn is_operational(&self) -> bool {
        !self.status().is_server_error()
    }

    /// 返回给客户端的消息，服务端错误不暴露内部细节
    pub fn public_message(&self) -> &str {
        if self.is_operational() {
            self.message()
        } else {
            "Internal server error"
        }
    }
}

impl fmt::Display for CampusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CampusError {}

impl ResponseError for CampusError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        if !self.is_operational() {
            error!(
                request_id = %crate::middlewares::current_request_id(),
                "[{}] {}",
                self.code(),
                self.format_simple()
            );
        }

        HttpResponse::build(self.status())
            .json(ApiResponse::<()>::error_empty(self.public_message()))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CampusError {
    fn from(err: sea_orm::DbErr) -> Self {
        // 约束详情含表名与 SQL，只写日志不返回给客户端
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                warn!("Unique constraint violated: {detail}");
                CampusError::Conflict("Resource already exists".into())
            }
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(detail)) => {
                warn!("Foreign key constraint violated: {detail}");
                CampusError::Validation("Referenced resource does not exist".into())
            }
            _ => CampusError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CampusError {
    fn from(err: std::io::Error) -> Self {
        CampusError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CampusError {
    fn from(err: serde_json::Error) -> Self {
        CampusError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for CampusError {
    fn from(err: chrono::ParseError) -> Self {
        CampusError::DateParse(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for CampusError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::ExpiredSignature => CampusError::TokenExpired("Token has expired".into()),
            _ => CampusError::TokenInvalid(format!("Invalid token: {err}")),
        }
    }
}

impl From<argon2::password_hash::Error> for CampusError {
    fn from(err: argon2::password_hash::Error) -> Self {
        CampusError::Internal(format!("Password hashing failed: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, CampusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CampusError::cache_connection("test").code(), "E001");
        assert_eq!(CampusError::database_config("test").code(), "E003");
        assert_eq!(CampusError::validation("test").code(), "E007");
        assert_eq!(CampusError::authentication("test").code(), "E012");
        assert_eq!(CampusError::payment("test").code(), "E018");
    }

    #[test]
    fn test_error_status() {
        assert_eq!(
            CampusError::validation("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CampusError::authentication("x").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            CampusError::token_expired("x").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            CampusError::authorization("x").status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(CampusError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(CampusError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(
            CampusError::payment("x").status(),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(CampusError::account_locked("x").status(), StatusCode::LOCKED);
    }

    #[test]
    fn test_public_message_is_sanitized() {
        let err = CampusError::database_operation("syntax error near SELECT");
        assert_eq!(err.public_message(), "Internal server error");

        let err = CampusError::not_found("Course not found");
        assert_eq!(err.public_message(), "Course not found");
    }

    #[test]
    fn test_format_simple() {
        let err = CampusError::validation("Invalid URL");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid URL"));
    }

    #[test]
    fn test_jwt_error_classification() {
        use jsonwebtoken::errors::{Error, ErrorKind};

        let expired: CampusError = Error::from(ErrorKind::ExpiredSignature).into();
        assert_eq!(expired.code(), "E015");

        let invalid: CampusError = Error::from(ErrorKind::InvalidSignature).into();
        assert_eq!(invalid.code(), "E016");
    }
}
