use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    notifications::{entities::UnreadCount, requests::NotificationListParams},
};
use crate::rbac::perm;
use crate::services::scoped_owner;
use crate::storage::NotificationStorage;

pub async fn handle_list(
    service: &NotificationService,
    mut query: NotificationListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    query.recipient_id = scoped_owner(&actor, perm::NOTIFICATIONS_READ, query.recipient_id)?;

    let storage = service.get_storage(request)?;
    let notifications = storage.list_notifications(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        notifications,
        "Notifications retrieved successfully",
    )))
}

pub async fn handle_unread_count(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let unread = storage.count_unread_notifications(actor.id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UnreadCount { unread },
        "Unread count retrieved successfully",
    )))
}
