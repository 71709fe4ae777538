/*!
 * 速率限制中间件
 *
 * 固定窗口计数：每个键在窗口开始时计数归零，窗口内超过上限返回 429。
 * 键为 `前缀:user:<id>`（已认证）或 `前缀:ip:<地址>`。
 *
 * ```rust,ignore
 * web::scope("/api/v1/auth").wrap(RateLimit::auth())
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::config::AppConfig;
use crate::errors::CampusError;
use crate::models::ApiResponse;
use crate::models::users::entities::User;

#[derive(Debug, Clone, Copy)]
struct RateWindow {
    count: u32,
    started: Instant,
}

/// 全局计数表，长时间无访问的键自动清理
static RATE_LIMIT_CACHE: Lazy<Cache<String, RateWindow>> = Lazy::new(|| {
    Cache::builder()
        .time_to_idle(Duration::from_secs(3600))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    enabled: bool,
    /// 窗口内允许的最大请求数
    max_requests: u32,
    window_secs: u64,
    key_prefix: String,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            enabled: true,
            max_requests,
            window_secs: window_secs.max(1),
            key_prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    fn from_config(max_requests: fn(&crate::config::RateLimitConfig) -> u32, prefix: &str) -> Self {
        let config = &AppConfig::get().rate_limit;
        let mut limit = Self::new(max_requests(config), config.window_secs).with_prefix(prefix);
        limit.enabled = config.enabled;
        limit
    }

    /// 认证端点（登录、刷新）
    pub fn auth() -> Self {
        Self::from_config(|c| c.auth_max_requests, "auth")
    }

    /// 通用 API
    pub fn api() -> Self {
        Self::from_config(|c| c.api_max_requests, "api")
    }
}

/// 从请求中提取客户端 IP
///
/// 部署在反向代理后面时依赖代理正确设置 `X-Forwarded-For` / `Forwarded`。
fn extract_client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    if let Some(ref ip) = connection_ip
        && is_valid_ip(ip)
    {
        return ip.clone();
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP")
        && let Ok(ip) = real_ip.to_str()
    {
        let ip = ip.trim();
        if is_valid_ip(ip) {
            return ip.to_string();
        }
    }

    connection_ip.unwrap_or_else(|| "unknown".to_string())
}

fn is_valid_ip(ip: &str) -> bool {
    use std::net::{IpAddr, SocketAddr};
    ip.parse::<IpAddr>().is_ok() || ip.parse::<SocketAddr>().is_ok()
}

fn rate_limit_key(req: &ServiceRequest, prefix: &str) -> String {
    // 先释放 extensions 的借用，connection_info 内部需要 extensions_mut
    let user_id = req.extensions().get::<User>().map(|user| user.id);
    let identifier = match user_id {
        Some(id) => format!("user:{id}"),
        None => format!("ip:{}", extract_client_ip(req)),
    };

    if prefix.is_empty() {
        identifier
    } else {
        format!("{prefix}:{identifier}")
    }
}

/// 计入一次请求，返回窗口内的累计次数与窗口剩余时间
async fn hit(key: String, window: Duration) -> (u32, Duration) {
    let now = Instant::now();
    let entry = RATE_LIMIT_CACHE
        .entry(key)
        .and_upsert_with(|existing| {
            let next = match existing.map(|entry| entry.into_value()) {
                Some(current) if now.duration_since(current.started) < window => RateWindow {
                    count: current.count.saturating_add(1),
                    started: current.started,
                },
                _ => RateWindow {
                    count: 1,
                    started: now,
                },
            };
            ready(next)
        })
        .await;

    let current = entry.into_value();
    let remaining = window.saturating_sub(now.duration_since(current.started));
    (current.count, remaining)
}

fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    let err = CampusError::rate_limited("Too many requests, please try again later");
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(err.public_message()))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let limit = self.limit.clone();

        Box::pin(async move {
            if !limit.enabled {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            let key = rate_limit_key(&req, &limit.key_prefix);
            let (count, remaining) = hit(key.clone(), Duration::from_secs(limit.window_secs)).await;

            if count > limit.max_requests {
                warn!(
                    "Rate limit exceeded for key: {} (count: {}/{})",
                    key, count, limit.max_requests
                );
                let retry_after = remaining.as_secs().max(1);
                return Ok(req.into_response(
                    create_rate_limit_response(retry_after).map_into_right_body(),
                ));
            }

            let res = srv.call(req).await?.map_into_left_body();
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};

    #[actix_web::test]
    async fn test_window_counts_and_resets() {
        let key = format!("test:{}", uuid::Uuid::new_v4());
        let window = Duration::from_millis(200);

        assert_eq!(hit(key.clone(), window).await.0, 1);
        assert_eq!(hit(key.clone(), window).await.0, 2);

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(hit(key, window).await.0, 1);
    }

    #[actix_web::test]
    async fn test_rejects_after_limit() {
        let app = test::init_service(
            App::new()
                .wrap(RateLimit::new(2, 60).with_prefix("unit"))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let ip = "203.0.113.77";
        for _ in 0..2 {
            let req = test::TestRequest::get()
                .uri("/")
                .insert_header(("X-Forwarded-For", ip))
                .to_request();
            assert!(test::call_service(&app, req).await.status().is_success());
        }

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header(("X-Forwarded-For", ip))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(res.headers().contains_key("Retry-After"));

        // 其他 IP 不受影响
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header(("X-Forwarded-For", "203.0.113.78"))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());
    }

    #[actix_web::test]
    async fn test_counts_by_peer_address_without_forwarded_header() {
        let app = test::init_service(
            App::new()
                .wrap(RateLimit::new(1, 60).with_prefix(&format!("peer-{}", uuid::Uuid::new_v4())))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let peer: std::net::SocketAddr = "198.51.100.9:40000".parse().unwrap();
        let req = test::TestRequest::get().uri("/").peer_addr(peer).to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::get().uri("/").peer_addr(peer).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[actix_web::test]
    async fn test_anonymous_key_uses_peer_ip() {
        let req = test::TestRequest::get()
            .uri("/")
            .peer_addr("198.51.100.10:40000".parse().unwrap())
            .to_srv_request();
        assert_eq!(rate_limit_key(&req, "api"), "api:ip:198.51.100.10");
    }
}
