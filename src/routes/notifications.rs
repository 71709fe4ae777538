use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequirePermission as Allow};
use crate::models::notifications::requests::{CreateNotificationRequest, NotificationListParams};
use crate::rbac::perm;
use crate::services::NotificationService;
use crate::utils::SafeIDI64;

static NOTIFICATION_SERVICE: Lazy<NotificationService> = Lazy::new(NotificationService::new_lazy);

pub async fn list_notifications(
    req: HttpRequest,
    query: web::Query<NotificationListParams>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .list_notifications(query.into_inner(), &req)
        .await
}

pub async fn create_notification(
    req: HttpRequest,
    data: web::Json<CreateNotificationRequest>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .create_notification(data.into_inner(), &req)
        .await
}

pub async fn unread_count(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.unread_count(&req).await
}

pub async fn mark_read(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.mark_read(id.0, &req).await
}

pub async fn mark_all_read(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.mark_all_read(&req).await
}

pub fn configure_notification_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notifications")
            .wrap(middlewares::RequireJWT)
            .wrap(middlewares::RateLimit::api())
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_notifications)
                            .wrap(Allow::new(perm::NOTIFICATIONS_READ)),
                    )
                    .route(
                        web::post()
                            .to(create_notification)
                            .wrap(Allow::new(perm::NOTIFICATIONS_WRITE)),
                    ),
            )
            .route(
                "/unread-count",
                web::get()
                    .to(unread_count)
                    .wrap(Allow::new(perm::NOTIFICATIONS_READ)),
            )
            .route(
                "/read-all",
                web::put()
                    .to(mark_all_read)
                    .wrap(Allow::new(perm::NOTIFICATIONS_WRITE)),
            )
            .route(
                "/{id}/read",
                web::put()
                    .to(mark_read)
                    .wrap(Allow::new(perm::NOTIFICATIONS_WRITE)),
            ),
    );
}
