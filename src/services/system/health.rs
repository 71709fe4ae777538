use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::warn;

use super::SystemService;
use crate::models::{ApiResponse, AppStartTime, system::HealthResponse};

/// 健康检查
///
/// 数据库不可用时返回 503，响应体仍包含版本与运行时长。
pub async fn handle_health(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let database_ok = match service.get_storage(request) {
        Ok(storage) => match storage.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Database health check failed: {}", e);
                false
            }
        },
        Err(e) => {
            warn!("Health check without storage: {}", e);
            false
        }
    };

    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| {
            chrono::Utc::now()
                .signed_duration_since(start.start_datetime)
                .num_seconds()
        })
        .unwrap_or_default();

    let health = HealthResponse {
        status: if database_ok { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds,
        database: if database_ok { "up" } else { "down" },
    };

    if database_ok {
        Ok(HttpResponse::Ok().json(ApiResponse::success(health, "Service is healthy")))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(ApiResponse::error(
            health,
            "Database is unavailable",
        )))
    }
}
