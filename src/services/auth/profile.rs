use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, auth::requests::ChangePasswordRequest};
use crate::services::AuditEvent;
use crate::storage::UserStorage;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::Validate;

use super::AuthService;

pub async fn handle_me(service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user_id = RequireJWT::extract_user_id(request)
        .ok_or_else(|| CampusError::authentication("Authentication required"))?;

    let storage = service.get_storage(request)?;
    let user = storage
        .get_user_with_profile(user_id)
        .await?
        .ok_or_else(|| CampusError::not_found("User not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        user,
        "User information retrieved successfully",
    )))
}

pub async fn handle_change_password(
    service: &AuthService,
    change_request: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    change_request.validate()?;

    let current = RequireJWT::extract_user(request)
        .ok_or_else(|| CampusError::authentication("Authentication required"))?;

    let storage = service.get_storage(request)?;
    // 缓存中的用户不含密码哈希，重新读取
    let user = storage
        .get_user_by_id(current.id)
        .await?
        .ok_or_else(|| CampusError::not_found("User not found"))?;

    if !verify_password(&change_request.current_password, &user.password_hash) {
        return Err(CampusError::validation("Current password is incorrect").into());
    }

    let password_hash = hash_password(&change_request.new_password)?;
    storage.update_password(user.id, &password_hash).await?;

    RequireJWT::evict_user(request, user.id).await;

    info!("User {} changed their password", user.id);
    AuditEvent::new("change_password", "user")
        .resource_id(user.id)
        .record(storage.as_ref(), request, Some(user.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
        "Password changed successfully",
    )))
}
