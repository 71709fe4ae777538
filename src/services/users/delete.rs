use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::services::AuditEvent;
use crate::storage::UserStorage;

pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;

    // 禁止删除当前用户
    if user_id == actor.id {
        return Err(CampusError::validation("Cannot delete your own account").into());
    }

    let storage = service.get_storage(request)?;
    if !storage.delete_user(user_id).await? {
        return Err(CampusError::not_found("User not found").into());
    }
    RequireJWT::evict_user(request, user_id).await;

    info!("User {} deleted by {}", user_id, actor.id);
    AuditEvent::delete("user", user_id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("User deleted successfully")))
}
