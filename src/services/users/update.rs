use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, users::requests::UpdateUserRequest};
use crate::rbac::{self, perm};
use crate::services::AuditEvent;
use crate::storage::UserStorage;
use crate::utils::validate::Validate;

/// 修改邮箱、角色或状态，仅限持有完整 `users:write` 的角色
pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    update_data.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    rbac::authorize(&actor, perm::USERS_WRITE, None)?;
    let storage = service.get_storage(request)?;

    if let Some(email) = update_data.email.as_mut() {
        *email = email.trim().to_lowercase();
        if let Some(existing) = storage.get_user_by_email(email).await?
            && existing.id != user_id
        {
            return Err(CampusError::conflict("Email is already registered").into());
        }
    }

    let user = storage
        .update_user(user_id, update_data)
        .await?
        .ok_or_else(|| CampusError::not_found("User not found"))?;
    RequireJWT::evict_user(request, user.id).await;

    AuditEvent::update("user", user.id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(user, "User updated successfully")))
}
