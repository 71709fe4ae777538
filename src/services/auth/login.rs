use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::errors::CampusError;
use crate::models::{
    ApiResponse,
    auth::{requests::LoginRequest, responses::LoginResponse},
};
use crate::services::AuditEvent;
use crate::storage::UserStorage;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;
use crate::utils::validate::Validate;

use super::AuthService;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    login_request.validate()?;

    let storage = service.get_storage(request)?;
    let security = &service.get_config().security;
    let email = login_request.email.trim().to_lowercase();

    // 1. 查找用户，账号不存在与密码错误返回同样的信息
    let Some(user) = storage.get_user_by_email(&email).await? else {
        return Err(CampusError::authentication(INVALID_CREDENTIALS).into());
    };

    // 2. 锁定期内即使密码正确也拒绝
    let now = Utc::now();
    if user.is_locked_at(now) {
        warn!("Login attempt on locked account {}", user.id);
        return Err(CampusError::account_locked(
            "Account is temporarily locked due to too many failed login attempts",
        )
        .into());
    }

    if !user.is_active() {
        return Err(CampusError::authentication("Account is not active").into());
    }

    // 3. 校验密码，失败时累计次数，达到上限后锁定
    if !verify_password(&login_request.password, &user.password_hash) {
        // 上一次锁定已过期时重新计数
        let previous = if user.locked_until.is_some() {
            0
        } else {
            user.failed_login_attempts
        };
        let attempts = previous + 1;
        let locked_until = (attempts >= security.max_login_attempts)
            .then(|| now + Duration::minutes(security.lockout_minutes));

        storage
            .record_login_failure(user.id, attempts, locked_until)
            .await?;

        if locked_until.is_some() {
            warn!(
                "Account {} locked for {} minutes after {} failed attempts",
                user.id, security.lockout_minutes, attempts
            );
            AuditEvent::new("lockout", "user")
                .resource_id(user.id)
                .record(storage.as_ref(), request, Some(user.id))
                .await;
            return Err(CampusError::account_locked(
                "Account is temporarily locked due to too many failed login attempts",
            )
            .into());
        }

        return Err(CampusError::authentication(INVALID_CREDENTIALS).into());
    }

    // 4. 成功：清零计数并记录登录时间
    storage.record_login_success(user.id).await?;

    let token_pair = JwtUtils::generate_token_pair(&user)?;
    let user_with_profile = storage
        .get_user_with_profile(user.id)
        .await?
        .ok_or_else(|| CampusError::not_found("User not found"))?;

    info!("User {} logged in successfully", user.id);
    AuditEvent::new("login", "user")
        .resource_id(user.id)
        .record(storage.as_ref(), request, Some(user.id))
        .await;

    let access_cookie = JwtUtils::access_token_cookie(&token_pair.access_token);
    let refresh_cookie = JwtUtils::refresh_token_cookie(&token_pair.refresh_token);

    let response = LoginResponse {
        user: user_with_profile,
        access_token: token_pair.access_token,
        refresh_token: token_pair.refresh_token,
        expires_in: token_pair.expires_in,
    };

    Ok(HttpResponse::Ok()
        .cookie(access_cookie)
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}
