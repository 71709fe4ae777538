use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, users::requests::UpdateProfileRequest};
use crate::rbac::{self, OwnerField, ResourceFields, perm};
use crate::services::AuditEvent;
use crate::storage::UserStorage;
use crate::utils::validate::Validate;

// 本人或持有完整权限的角色可访问
pub async fn get_profile(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    rbac::authorize(
        &actor,
        perm::USERS_READ,
        Some(&ResourceFields::new().with(OwnerField::UserId, user_id)),
    )?;

    let storage = service.get_storage(request)?;
    let profile = storage
        .get_profile(user_id)
        .await?
        .ok_or_else(|| CampusError::not_found("Profile not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        profile,
        "Profile retrieved successfully",
    )))
}

pub async fn update_profile(
    service: &UserService,
    user_id: i64,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    update_data.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    rbac::authorize(
        &actor,
        perm::USERS_WRITE,
        Some(&ResourceFields::new().with(OwnerField::UserId, user_id)),
    )?;

    let storage = service.get_storage(request)?;
    let profile = storage
        .update_profile(user_id, update_data)
        .await?
        .ok_or_else(|| CampusError::not_found("Profile not found"))?;

    AuditEvent::update("profile", user_id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        profile,
        "Profile updated successfully",
    )))
}
