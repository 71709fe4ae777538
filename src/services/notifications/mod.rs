pub mod create;
pub mod list;
pub mod mark;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::notifications::requests::{CreateNotificationRequest, NotificationListParams};

crate::services::lazy_service!(
    /// 站内通知
    NotificationService
);

impl NotificationService {
    // 普通用户只能看到自己的通知
    pub async fn list_notifications(
        &self,
        query: NotificationListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list(self, query, request).await
    }

    pub async fn unread_count(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::handle_unread_count(self, request).await
    }

    pub async fn create_notification(
        &self,
        notification: CreateNotificationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create(self, notification, request).await
    }

    pub async fn mark_read(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        mark::handle_mark_read(self, id, request).await
    }

    pub async fn mark_all_read(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        mark::handle_mark_all_read(self, request).await
    }
}
