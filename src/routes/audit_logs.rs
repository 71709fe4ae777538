use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequirePermission};
use crate::models::audit_logs::requests::AuditLogListParams;
use crate::rbac::perm;
use crate::services::AuditLogService;

static AUDIT_LOG_SERVICE: Lazy<AuditLogService> = Lazy::new(AuditLogService::new_lazy);

pub async fn list_audit_logs(
    req: HttpRequest,
    query: web::Query<AuditLogListParams>,
) -> ActixResult<HttpResponse> {
    AUDIT_LOG_SERVICE
        .list_audit_logs(query.into_inner(), &req)
        .await
}

pub fn configure_audit_log_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/audit-logs")
            .wrap(RequirePermission::new(perm::AUDIT_LOGS_READ))
            .wrap(middlewares::RequireJWT)
            .wrap(middlewares::RateLimit::api())
            .route("", web::get().to(list_audit_logs)),
    );
}
