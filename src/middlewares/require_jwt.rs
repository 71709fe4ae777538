/*!
 * JWT 认证中间件
 *
 * 校验 access token（优先读取 `accessToken` Cookie，缺失时回退到
 * `Authorization: Bearer`），把解析出的活跃用户写入请求扩展。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * web::scope("/api/v1/courses")
 *     .wrap(RequirePermission::new(perm::COURSES_READ))
 *     .wrap(RequireJWT)
 * ```
 *
 * 处理函数中通过 `RequireJWT::extract_user` / `RequireJWT::extract_actor` 读取当前用户。
 *
 * ## 失败分类
 *
 * - 缺少 token → 401 `Authentication token is missing`
 * - token 过期 → 401 `Token has expired`
 * - 签名、签发者、受众或类型不匹配 → 401 `Invalid token`
 * - 用户不存在或非活跃 → 401
 */

use crate::cache::{CacheResult, ObjectCache, user_cache_key};
use crate::config::AppConfig;
use crate::errors::{CampusError, Result};
use crate::models::users::entities::{User, UserStatus};
use crate::rbac::Actor;
use crate::storage::{Storage, UserStorage};
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireJWT;

fn app_state<T: ?Sized + 'static>(req: &ServiceRequest) -> Result<Arc<T>> {
    req.app_data::<web::Data<Arc<T>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| CampusError::internal("Application state is not configured"))
}

// 从缓存读取用户，反序列化失败时清除该条目
async fn cached_user(cache: &dyn ObjectCache, key: &str) -> Option<User> {
    match cache.get_raw(key).await {
        CacheResult::Found(json) => match serde_json::from_str::<User>(&json) {
            Ok(user) => Some(user),
            Err(_) => {
                cache.remove(key).await;
                None
            }
        },
        _ => None,
    }
}

// 提取并验证 JWT access token，返回对应的活跃用户
async fn authenticate(req: &ServiceRequest) -> Result<User> {
    let token = JwtUtils::extract_access_token(req.request())
        .ok_or_else(|| CampusError::token_missing("Authentication token is missing"))?;

    let claims = JwtUtils::verify_access_token(&token)?;

    let user_id = claims.user_id()?;

    let cache = app_state::<dyn ObjectCache>(req)?;
    let key = user_cache_key(user_id);
    if let Some(user) = cached_user(cache.as_ref(), &key).await {
        return Ok(user);
    }

    let storage = app_state::<dyn Storage>(req)?;
    let user = storage
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| CampusError::authentication("User no longer exists"))?;

    if user.status != UserStatus::Active {
        return Err(CampusError::authentication("Account is not active"));
    }

    if let Ok(user_json) = serde_json::to_string(&user) {
        cache
            .insert_raw(key, user_json, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            match authenticate(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(err.status(), err.public_message())
                            .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 当前认证用户；仅在应用了 RequireJWT 的路由中可用
    pub fn extract_user(req: &HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }

    /// 清除用户缓存，角色、状态变更或账号删除后立即生效
    pub async fn evict_user(req: &HttpRequest, user_id: i64) {
        if let Some(cache) = req.app_data::<web::Data<Arc<dyn ObjectCache>>>() {
            cache.remove(&user_cache_key(user_id)).await;
        }
    }

    /// 当前用户对应的权限主体，缺失时返回 401
    pub fn extract_actor(req: &HttpRequest) -> Result<Actor> {
        req.extensions()
            .get::<User>()
            .map(Actor::from)
            .ok_or_else(|| CampusError::authentication("Authentication required"))
    }
}
