use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::NotificationService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, notifications::requests::CreateNotificationRequest};
use crate::rbac::{self, perm};
use crate::services::AuditEvent;
use crate::storage::{NotificationStorage, UserStorage};
use crate::utils::validate::Validate;

/// 向指定用户发送通知，需要完整的写权限
pub async fn handle_create(
    service: &NotificationService,
    notification: CreateNotificationRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    notification.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    rbac::authorize(&actor, perm::NOTIFICATIONS_WRITE, None)?;

    let storage = service.get_storage(request)?;
    storage
        .get_user_by_id(notification.recipient_id)
        .await?
        .ok_or_else(|| CampusError::validation("Recipient does not exist"))?;

    let notification = storage.create_notification(notification).await?;
    info!(
        "Notification {} sent to user {}",
        notification.id, notification.recipient_id
    );
    AuditEvent::create("notification", notification.id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        notification,
        "Notification created successfully",
    )))
}
