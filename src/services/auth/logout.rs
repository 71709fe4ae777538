use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::utils::jwt::{ACCESS_TOKEN_COOKIE, JwtUtils, REFRESH_TOKEN_COOKIE};

/// 处理用户登出
///
/// 清除两个令牌 Cookie，并把缓存中该 token 对应的用户移除。
pub async fn handle_logout(request: &HttpRequest) -> ActixResult<HttpResponse> {
    if let Some(token) = JwtUtils::extract_access_token(request)
        && let Ok(claims) = JwtUtils::verify_access_token(&token)
        && let Ok(user_id) = claims.user_id()
    {
        RequireJWT::evict_user(request, user_id).await;
    }

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::expired_cookie(ACCESS_TOKEN_COOKIE))
        .cookie(JwtUtils::expired_cookie(REFRESH_TOKEN_COOKIE))
        .json(ApiResponse::<()>::success_empty("Logout successful")))
}
