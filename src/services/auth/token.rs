use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::errors::CampusError;
use crate::middlewares::create_error_response;
use crate::models::{ApiResponse, auth::responses::RefreshResponse};
use crate::storage::UserStorage;
use crate::utils::jwt::{ACCESS_TOKEN_COOKIE, JwtUtils, REFRESH_TOKEN_COOKIE};

use super::AuthService;

/// 用 refresh token 轮换整对令牌
pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(refresh_token) = JwtUtils::extract_refresh_token(request) else {
        return Err(CampusError::token_missing("Refresh token is missing").into());
    };

    let claims = match JwtUtils::verify_refresh_token(&refresh_token) {
        Ok(claims) => claims,
        Err(e) => {
            info!("Refresh token rejected: {}", e);
            // 清除无效的 Cookie
            let mut response = create_error_response(e.status(), e.public_message());
            response.add_cookie(&JwtUtils::expired_cookie(ACCESS_TOKEN_COOKIE))?;
            response.add_cookie(&JwtUtils::expired_cookie(REFRESH_TOKEN_COOKIE))?;
            return Ok(response);
        }
    };

    let storage = service.get_storage(request)?;
    let user = storage
        .get_user_by_id(claims.user_id()?)
        .await?
        .filter(|user| user.is_active())
        .ok_or_else(|| CampusError::authentication("User no longer exists or is not active"))?;

    let token_pair = JwtUtils::generate_token_pair(&user)?;

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::access_token_cookie(&token_pair.access_token))
        .cookie(JwtUtils::refresh_token_cookie(&token_pair.refresh_token))
        .json(ApiResponse::success(
            RefreshResponse {
                access_token: token_pair.access_token,
                expires_in: token_pair.expires_in,
            },
            "Token refreshed successfully",
        )))
}
