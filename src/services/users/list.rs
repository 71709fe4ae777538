use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, users::requests::UserListParams};
use crate::rbac::{self, perm};
use crate::storage::UserStorage;

pub async fn list_users(
    service: &UserService,
    query: UserListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 仅持有 `users:read_own` 的角色不能浏览用户列表
    rbac::authorize(&RequireJWT::extract_actor(request)?, perm::USERS_READ, None)?;

    let storage = service.get_storage(request)?;
    let users = storage.list_users(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        users,
        "User list retrieved successfully",
    )))
}
