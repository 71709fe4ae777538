use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::rbac::{self, perm};
use crate::storage::UserStorage;

pub async fn get_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let user = storage
        .get_user_with_profile(user_id)
        .await?
        .ok_or_else(|| CampusError::not_found("User not found"))?;
    rbac::authorize(&actor, perm::USERS_READ, Some(&user.user))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(user, "User retrieved successfully")))
}
