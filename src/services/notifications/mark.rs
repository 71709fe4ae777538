use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde::Serialize;

use super::NotificationService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::rbac::{self, perm};
use crate::storage::NotificationStorage;

#[derive(Debug, Serialize)]
struct MarkedCount {
    updated: u64,
}

pub async fn handle_mark_read(
    service: &NotificationService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let notification = storage
        .get_notification_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Notification not found"))?;
    rbac::authorize(&actor, perm::NOTIFICATIONS_WRITE, Some(&notification))?;

    let notification = storage
        .mark_notification_read(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Notification not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        notification,
        "Notification marked as read",
    )))
}

pub async fn handle_mark_all_read(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let updated = storage.mark_all_notifications_read(actor.id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MarkedCount { updated },
        "All notifications marked as read",
    )))
}
