use serde::Serialize;

use crate::models::users::entities::UserWithProfile;

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: UserWithProfile,
    pub access_token: String,
    pub refresh_token: String,
    /// access token 有效期（秒）
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub expires_in: i64,
}
