//! 馆藏与借阅

pub mod items;
pub mod loans;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::config::AppConfig;
use crate::models::library::requests::{
    CheckoutRequest, CreateLibraryItemRequest, LibraryItemListParams, LoanListParams,
    UpdateLibraryItemRequest,
};

crate::services::lazy_service!(
    /// 图书馆服务
    LibraryService
);

impl LibraryService {
    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    pub async fn list_items(
        &self,
        query: LibraryItemListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        items::handle_list(self, query, request).await
    }

    pub async fn get_item(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        items::handle_get(self, id, request).await
    }

    pub async fn create_item(
        &self,
        item: CreateLibraryItemRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        items::handle_create(self, item, request).await
    }

    // 修改总册数时可借册数随之调整
    pub async fn update_item(
        &self,
        id: i64,
        update: UpdateLibraryItemRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        items::handle_update(self, id, update, request).await
    }

    pub async fn delete_item(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        items::handle_delete(self, id, request).await
    }

    pub async fn checkout(
        &self,
        checkout_request: CheckoutRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        loans::handle_checkout(self, checkout_request, request).await
    }

    pub async fn return_loan(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        loans::handle_return(self, id, request).await
    }

    pub async fn list_loans(
        &self,
        query: LoanListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        loans::handle_list(self, query, request).await
    }

    pub async fn get_loan(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        loans::handle_get(self, id, request).await
    }
}
