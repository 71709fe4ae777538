use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LibraryService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    library::{
        entities::adjusted_available,
        requests::{CreateLibraryItemRequest, LibraryItemListParams, UpdateLibraryItemRequest},
    },
};
use crate::services::{AuditEvent, ensure_unreferenced};
use crate::storage::LibraryStorage;
use crate::utils::validate::Validate;

pub async fn handle_list(
    service: &LibraryService,
    query: LibraryItemListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let items = storage.list_library_items(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        items,
        "Library items retrieved successfully",
    )))
}

pub async fn handle_get(
    service: &LibraryService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let item = storage
        .get_library_item_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Library item not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        item,
        "Library item retrieved successfully",
    )))
}

pub async fn handle_create(
    service: &LibraryService,
    item: CreateLibraryItemRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    item.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    if storage.get_library_item_by_isbn(&item.isbn).await?.is_some() {
        return Err(CampusError::conflict("An item with this ISBN already exists").into());
    }

    let item = storage.create_library_item(item).await?;
    AuditEvent::create("library_item", item.id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        item,
        "Library item created successfully",
    )))
}

pub async fn handle_update(
    service: &LibraryService,
    id: i64,
    update: UpdateLibraryItemRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    update.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let item = storage
        .get_library_item_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Library item not found"))?;

    // 总册数不能少于已借出的册数
    let available = match update.total_copies {
        Some(new_total) => Some(
            adjusted_available(item.total_copies, item.available_copies, new_total).ok_or_else(
                || {
                    CampusError::conflict(format!(
                        "Total copies cannot be lower than the {} copies on loan",
                        item.total_copies - item.available_copies
                    ))
                },
            )?,
        ),
        None => None,
    };

    let item = storage
        .update_library_item(id, update, available)
        .await?
        .ok_or_else(|| CampusError::not_found("Library item not found"))?;
    AuditEvent::update("library_item", id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        item,
        "Library item updated successfully",
    )))
}

// 有借阅记录的馆藏不能删除
pub async fn handle_delete(
    service: &LibraryService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    storage
        .get_library_item_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Library item not found"))?;
    ensure_unreferenced(
        storage.count_loans_for_item(id).await?,
        "Cannot delete library item with loan history",
    )?;

    storage.delete_library_item(id).await?;
    AuditEvent::delete("library_item", id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
        "Library item deleted successfully",
    )))
}
