use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FinanceService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    finance::requests::{
        CreateFeeStructureRequest, FeeStructureListParams, UpdateFeeStructureRequest,
    },
};
use crate::services::{AuditEvent, ensure_unreferenced};
use crate::storage::{FinanceStorage, ProgramStorage};
use crate::utils::validate::Validate;

pub async fn handle_list(
    service: &FinanceService,
    query: FeeStructureListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let fees = storage.list_fee_structures(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        fees,
        "Fee structures retrieved successfully",
    )))
}

pub async fn handle_get(
    service: &FinanceService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let fee = storage
        .get_fee_structure_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Fee structure not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        fee,
        "Fee structure retrieved successfully",
    )))
}

// 同一专业、学年、学期只能有一个收费标准
pub async fn handle_create(
    service: &FinanceService,
    fee: CreateFeeStructureRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    fee.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    if storage.get_program_by_id(fee.program_id).await?.is_none() {
        return Err(CampusError::validation("Program does not exist").into());
    }
    if storage
        .find_fee_structure(fee.program_id, &fee.academic_year, fee.semester)
        .await?
        .is_some()
    {
        return Err(CampusError::conflict(
            "Fee structure already exists for this program and term",
        )
        .into());
    }

    let fee = storage.create_fee_structure(fee).await?;
    AuditEvent::create("fee_structure", fee.id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        fee,
        "Fee structure created successfully",
    )))
}

pub async fn handle_update(
    service: &FinanceService,
    id: i64,
    update: UpdateFeeStructureRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    update.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let fee = storage
        .update_fee_structure(id, update)
        .await?
        .ok_or_else(|| CampusError::not_found("Fee structure not found"))?;
    AuditEvent::update("fee_structure", id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        fee,
        "Fee structure updated successfully",
    )))
}

pub async fn handle_delete(
    service: &FinanceService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    storage
        .get_fee_structure_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Fee structure not found"))?;
    ensure_unreferenced(
        storage.count_invoices_for_fee_structure(id).await?,
        "Cannot delete fee structure with generated invoices",
    )?;

    storage.delete_fee_structure(id).await?;
    AuditEvent::delete("fee_structure", id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
        "Fee structure deleted successfully",
    )))
}
