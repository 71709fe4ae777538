pub mod health;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

crate::services::lazy_service!(
    /// 系统状态
    SystemService
);

impl SystemService {
    // 健康检查，无需认证
    pub async fn health(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        health::handle_health(self, request).await
    }
}
