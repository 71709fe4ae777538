use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    users::requests::{CreateUserRequest, NewUser},
};
use crate::rbac::{self, perm};
use crate::services::AuditEvent;
use crate::storage::UserStorage;
use crate::utils::password::hash_password;
use crate::utils::validate::Validate;

pub async fn create_user(
    service: &UserService,
    user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    user_data.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    rbac::authorize(&actor, perm::USERS_WRITE, None)?;
    let storage = service.get_storage(request)?;

    let email = user_data.email.trim().to_lowercase();
    if storage.get_user_by_email(&email).await?.is_some() {
        return Err(CampusError::conflict("Email is already registered").into());
    }

    let user = storage
        .create_user(NewUser {
            email,
            password_hash: hash_password(&user_data.password)?,
            role: user_data.role,
            first_name: user_data.first_name,
            last_name: user_data.last_name,
            phone: user_data.phone,
            gender: None,
            date_of_birth: None,
        })
        .await?;

    info!("User {} created with role {}", user.user.id, user.user.role);
    AuditEvent::create("user", user.user.id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(user, "User created successfully")))
}
