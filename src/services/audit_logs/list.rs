use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuditLogService;
use crate::models::ApiResponse;
use crate::models::audit_logs::requests::AuditLogListParams;
use crate::storage::AuditLogStorage;

pub async fn handle_list_audit_logs(
    service: &AuditLogService,
    query: AuditLogListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let logs = storage.list_audit_logs(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        logs,
        "Audit logs retrieved successfully",
    )))
}
