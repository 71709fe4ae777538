use crate::config::{AppConfig, JwtConfig};
use crate::errors::{CampusError, Result};
use crate::models::users::entities::User;
use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // 用户 ID
    pub email: String,
    pub role: String,
    pub token_type: TokenType,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64> {
        self.sub
            .parse::<i64>()
            .map_err(|_| CampusError::token_invalid("Invalid token subject"))
    }
}

// Token 对
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// access token 有效期（秒）
    pub expires_in: i64,
}

pub struct JwtUtils;

impl JwtUtils {
    fn secret_for(config: &JwtConfig, token_type: TokenType) -> &str {
        match token_type {
            TokenType::Access => &config.secret,
            TokenType::Refresh => &config.refresh_secret,
        }
    }

    fn lifetime(config: &JwtConfig, token_type: TokenType) -> chrono::Duration {
        match token_type {
            TokenType::Access => chrono::Duration::minutes(config.access_token_expiry),
            TokenType::Refresh => chrono::Duration::days(config.refresh_token_expiry),
        }
    }

    // 按指定配置签发 Token
    pub fn issue_with(config: &JwtConfig, user: &User, token_type: TokenType) -> Result<String> {
        let now = chrono::Utc::now();
        let expiration = now + Self::lifetime(config, token_type);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role.to_string(),
            token_type,
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
        };

        let encoding_key = EncodingKey::from_secret(Self::secret_for(config, token_type).as_bytes());
        Ok(encode(&Header::default(), &claims, &encoding_key)?)
    }

    // 按指定配置校验签名、过期时间、签发者、受众以及 token 类型
    pub fn verify_with(config: &JwtConfig, token: &str, expected: TokenType) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(Self::secret_for(config, expected).as_bytes());
        let mut validation = Validation::default();
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &decoding_key, &validation)?.claims;
        if claims.token_type != expected {
            return Err(CampusError::token_invalid("Unexpected token type"));
        }
        Ok(claims)
    }

    // 生成完整的 Token 对
    pub fn generate_token_pair(user: &User) -> Result<TokenPair> {
        let config = &AppConfig::get().jwt;
        Ok(TokenPair {
            access_token: Self::issue_with(config, user, TokenType::Access)?,
            refresh_token: Self::issue_with(config, user, TokenType::Refresh)?,
            expires_in: config.access_token_expiry * 60,
        })
    }

    pub fn verify_access_token(token: &str) -> Result<Claims> {
        Self::verify_with(&AppConfig::get().jwt, token, TokenType::Access)
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims> {
        Self::verify_with(&AppConfig::get().jwt, token, TokenType::Refresh)
    }

    fn build_cookie(name: &'static str, value: String, max_age: chrono::Duration) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(name, value)
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(
                max_age.num_seconds(),
            ))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production()) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 创建 Access Token Cookie
    pub fn access_token_cookie(token: &str) -> Cookie<'static> {
        let config = &AppConfig::get().jwt;
        Self::build_cookie(
            ACCESS_TOKEN_COOKIE,
            token.to_string(),
            Self::lifetime(config, TokenType::Access),
        )
    }

    /// 创建 Refresh Token Cookie
    pub fn refresh_token_cookie(token: &str) -> Cookie<'static> {
        let config = &AppConfig::get().jwt;
        Self::build_cookie(
            REFRESH_TOKEN_COOKIE,
            token.to_string(),
            Self::lifetime(config, TokenType::Refresh),
        )
    }

    /// 创建立即过期的 Cookie（用于注销）
    pub fn expired_cookie(name: &'static str) -> Cookie<'static> {
        Self::build_cookie(name, String::new(), chrono::Duration::zero())
    }

    /// 从 Cookie 中提取 Access Token，缺失时回退到 `Authorization: Bearer`
    pub fn extract_access_token(req: &HttpRequest) -> Option<String> {
        if let Some(cookie) = req.cookie(ACCESS_TOKEN_COOKIE)
            && !cookie.value().is_empty()
        {
            return Some(cookie.value().to_string());
        }

        req.headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }

    /// 从 Cookie 中提取 Refresh Token
    pub fn extract_refresh_token(req: &HttpRequest) -> Option<String> {
        req.cookie(REFRESH_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{UserRole, UserStatus};
    use actix_web::http::StatusCode;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "access-secret-for-tests".into(),
            refresh_secret: "refresh-secret-for-tests".into(),
            issuer: "campus-server".into(),
            audience: "campus-clients".into(),
            access_token_expiry: 15,
            refresh_token_expiry: 7,
        }
    }

    fn test_user() -> User {
        let now = chrono::Utc::now();
        User {
            id: 42,
            email: "lecturer@campus.local".into(),
            password_hash: String::new(),
            role: UserRole::Lecturer,
            status: UserStatus::Active,
            failed_login_attempts: 0,
            locked_until: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_access_token_carries_identity() {
        let config = test_config();
        let token = JwtUtils::issue_with(&config, &test_user(), TokenType::Access).unwrap();
        let claims = JwtUtils::verify_with(&config, &token, TokenType::Access).unwrap();

        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.email, "lecturer@campus.local");
        assert_eq!(claims.role, "LECTURER");
        assert_eq!(claims.iss, "campus-server");
        assert_eq!(claims.aud, "campus-clients");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let config = test_config();
        let refresh = JwtUtils::issue_with(&config, &test_user(), TokenType::Refresh).unwrap();

        // 使用不同密钥签名，作为 access token 校验时签名不匹配
        let err = JwtUtils::verify_with(&config, &refresh, TokenType::Access).unwrap_err();
        assert!(matches!(err, CampusError::TokenInvalid(_)));
        assert!(JwtUtils::verify_with(&config, &refresh, TokenType::Refresh).is_ok());
    }

    #[test]
    fn test_same_secret_still_checks_type() {
        let mut config = test_config();
        config.refresh_secret = config.secret.clone();
        let refresh = JwtUtils::issue_with(&config, &test_user(), TokenType::Refresh).unwrap();
        let err = JwtUtils::verify_with(&config, &refresh, TokenType::Access).unwrap_err();
        assert!(matches!(err, CampusError::TokenInvalid(_)));
    }

    #[test]
    fn test_expired_token_is_classified() {
        let mut config = test_config();
        config.access_token_expiry = -5;
        let token = JwtUtils::issue_with(&config, &test_user(), TokenType::Access).unwrap();

        let err = JwtUtils::verify_with(&config, &token, TokenType::Access).unwrap_err();
        assert!(matches!(err, CampusError::TokenExpired(_)));
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_wrong_issuer_or_audience_rejected() {
        let config = test_config();
        let token = JwtUtils::issue_with(&config, &test_user(), TokenType::Access).unwrap();

        let mut other = test_config();
        other.issuer = "someone-else".into();
        assert!(JwtUtils::verify_with(&other, &token, TokenType::Access).is_err());

        let mut other = test_config();
        other.audience = "another-app".into();
        assert!(JwtUtils::verify_with(&other, &token, TokenType::Access).is_err());
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let err = JwtUtils::verify_with(&test_config(), "not.a.jwt", TokenType::Access).unwrap_err();
        assert!(matches!(err, CampusError::TokenInvalid(_)));
    }

    #[test]
    fn test_token_extraction_prefers_cookie() {
        use actix_web::test::TestRequest;

        let req = TestRequest::default()
            .cookie(Cookie::new(ACCESS_TOKEN_COOKIE, "from-cookie"))
            .insert_header(("Authorization", "Bearer from-header"))
            .to_http_request();
        assert_eq!(
            JwtUtils::extract_access_token(&req).as_deref(),
            Some("from-cookie")
        );

        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer from-header"))
            .to_http_request();
        assert_eq!(
            JwtUtils::extract_access_token(&req).as_deref(),
            Some("from-header")
        );

        let req = TestRequest::default().to_http_request();
        assert!(JwtUtils::extract_access_token(&req).is_none());
    }
}
