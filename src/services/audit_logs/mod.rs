pub mod list;
pub mod record;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::audit_logs::requests::AuditLogListParams;

pub use record::AuditEvent;

crate::services::lazy_service!(
    /// 审计日志查询
    AuditLogService
);

impl AuditLogService {
    pub async fn list_audit_logs(
        &self,
        query: AuditLogListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_audit_logs(self, query, request).await
    }
}
