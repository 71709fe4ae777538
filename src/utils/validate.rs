use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::models::{ApiResponse, FieldError};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9][A-Z0-9_-]*$").expect("Invalid code regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{9,15}$").expect("Invalid phone regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
        "Password1",
        "Qwerty123",
        "Abcd1234",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

/// 字段校验失败的集合，渲染为 400 并附带 `errors` 列表
#[derive(Debug, Clone, Default)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "Validation failed: {joined}")
    }
}

impl std::error::Error for ValidationErrors {}

impl ResponseError for ValidationErrors {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::BadRequest().json(ApiResponse::<()>::validation_failed(
            "Validation failed",
            self.errors.clone(),
        ))
    }
}

/// 请求体校验
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// 逐字段收集校验错误
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        self.errors.push(FieldError::new(field, message));
        self
    }

    pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
        if !ok {
            self.add(field, message);
        }
        self
    }

    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(
            !value.trim().is_empty(),
            field,
            &format!("{field} is required"),
        )
    }

    pub fn length(&mut self, field: &str, value: &str, min: usize, max: usize) -> &mut Self {
        let len = value.trim().chars().count();
        self.check(
            (min..=max).contains(&len),
            field,
            &format!("{field} length must be between {min} and {max} characters"),
        )
    }

    pub fn optional_length(
        &mut self,
        field: &str,
        value: Option<&str>,
        min: usize,
        max: usize,
    ) -> &mut Self {
        if let Some(value) = value {
            self.length(field, value, min, max);
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if let Err(msg) = validate_email(value) {
            self.add(field, msg);
        }
        self
    }

    pub fn code(&mut self, field: &str, value: &str) -> &mut Self {
        self.length(field, value, 2, 20);
        self.check(
            CODE_RE.is_match(value),
            field,
            &format!("{field} must contain only uppercase letters, digits, '-' or '_'"),
        )
    }

    pub fn phone(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.check(
                PHONE_RE.is_match(value),
                field,
                &format!("{field} must be a valid phone number"),
            );
        }
        self
    }

    pub fn password(&mut self, field: &str, value: &str) -> &mut Self {
        if let Err(msg) = validate_password_simple(value) {
            self.add(field, msg);
        }
        self
    }

    pub fn range<T: PartialOrd + fmt::Display>(
        &mut self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> &mut Self {
        let ok = value >= min && value <= max;
        self.check(
            ok,
            field,
            &format!("{field} must be between {min} and {max}"),
        )
    }

    pub fn positive(&mut self, field: &str, value: f64) -> &mut Self {
        self.check(
            value.is_finite() && value > 0.0,
            field,
            &format!("{field} must be greater than 0"),
        )
    }

    pub fn date_order(
        &mut self,
        field: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> &mut Self {
        if let (Some(start), Some(end)) = (start, end) {
            self.check(
                end >= start,
                field,
                &format!("{field} must not be before the start date"),
            );
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                errors: std::mem::take(&mut self.errors),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("MyP@ssw0rd").is_valid);
        assert!(validate_password("SecurePass123").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_no_uppercase() {
        let result = validate_password("abcd1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Password1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }

    #[test]
    fn test_validator_collects_all_errors() {
        let err = Validator::new()
            .required("name", " ")
            .code("code", "bad code")
            .range("credits", 0, 1, 30)
            .email("email", "nope")
            .finish()
            .unwrap_err();

        let fields: Vec<&str> = err.errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"code"));
        assert!(fields.contains(&"credits"));
        assert!(fields.contains(&"email"));
    }

    #[test]
    fn test_validator_passes_clean_input() {
        assert!(
            Validator::new()
                .required("name", "Diploma in IT")
                .code("code", "DIT")
                .phone("phone", Some("+254712345678"))
                .positive("amount", 1500.0)
                .finish()
                .is_ok()
        );
    }

    #[test]
    fn test_date_order() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 10);
        let end = NaiveDate::from_ymd_opt(2025, 1, 9);
        assert!(
            Validator::new()
                .date_order("end_date", start, end)
                .finish()
                .is_err()
        );
    }
}
