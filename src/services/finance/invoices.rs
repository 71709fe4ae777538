use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{Duration, Utc};
use tracing::info;

use super::FinanceService;
use crate::errors::{CampusError, Result};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    finance::{
        entities::InvoiceStatus,
        requests::{
            CreateInvoiceRequest, GenerateInvoiceRequest, InvoiceItemInput, InvoiceListParams,
            NewInvoice,
        },
    },
};
use crate::rbac::{self, OwnerField, ResourceFields, perm};
use crate::services::{AuditEvent, scoped_owner};
use crate::storage::{FinanceStorage, Storage, StudentStorage};
use crate::utils::numbering::{
    invoice_number, invoice_number_prefix, invoice_sequence, next_sequence,
};
use crate::utils::validate::Validate;

// 当月账单序号递增
async fn next_invoice_number(storage: &dyn Storage) -> Result<String> {
    let today = Utc::now().date_naive();
    let existing = storage
        .invoice_numbers_with_prefix(&invoice_number_prefix(today))
        .await?;
    Ok(invoice_number(today, next_sequence(existing, invoice_sequence)))
}

pub async fn handle_list(
    service: &FinanceService,
    mut query: InvoiceListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    query.student_id = scoped_owner(&actor, perm::INVOICES_READ, query.student_id)?;

    let storage = service.get_storage(request)?;
    let invoices = storage.list_invoices(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        invoices,
        "Invoices retrieved successfully",
    )))
}

/// 读取时顺带把过期未付的账单标记为逾期
pub async fn handle_get(
    service: &FinanceService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let mut detail = storage
        .get_invoice_detail(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Invoice not found"))?;
    rbac::authorize(&actor, perm::INVOICES_READ, Some(&detail))?;

    let invoice = &detail.invoice;
    let status = InvoiceStatus::recompute(
        invoice.status,
        invoice.total_amount,
        invoice.amount_paid,
        invoice.due_date,
        Utc::now().date_naive(),
    );
    if status != invoice.status
        && let Some(updated) = storage.set_invoice_status(id, status).await?
    {
        detail.invoice = updated;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        detail,
        "Invoice retrieved successfully",
    )))
}

pub async fn handle_create(
    service: &FinanceService,
    invoice: CreateInvoiceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    invoice.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    if storage.get_student_by_id(invoice.student_id).await?.is_none() {
        return Err(CampusError::validation("Student does not exist").into());
    }

    let detail = storage
        .create_invoice(NewInvoice {
            invoice_number: next_invoice_number(storage.as_ref()).await?,
            student_id: invoice.student_id,
            fee_structure_id: None,
            description: invoice.description,
            due_date: invoice.due_date,
            created_by: Some(actor.id),
            items: invoice.items,
        })
        .await?;

    info!(
        "Invoice {} issued to student {} for {:.2}",
        detail.invoice.invoice_number, detail.invoice.student_id, detail.invoice.total_amount
    );
    AuditEvent::create("invoice", detail.invoice.id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        detail,
        "Invoice created successfully",
    )))
}

/// 单条明细，金额取收费标准；未指定到期日时按配置的付款期限
pub async fn handle_generate(
    service: &FinanceService,
    generate_request: GenerateInvoiceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let student = storage
        .get_student_by_id(generate_request.student_id)
        .await?
        .ok_or_else(|| CampusError::validation("Student does not exist"))?;
    let fee = storage
        .get_fee_structure_by_id(generate_request.fee_structure_id)
        .await?
        .ok_or_else(|| CampusError::not_found("Fee structure not found"))?;
    if fee.program_id != student.program_id {
        return Err(CampusError::validation(
            "Fee structure belongs to a different program",
        )
        .into());
    }

    let due_days = service.get_config().finance.invoice_due_days;
    let due_date = generate_request
        .due_date
        .unwrap_or_else(|| Utc::now().date_naive() + Duration::days(due_days));
    let description = fee.description.clone().unwrap_or_else(|| {
        format!("Tuition fees {} semester {}", fee.academic_year, fee.semester)
    });

    let detail = storage
        .create_invoice(NewInvoice {
            invoice_number: next_invoice_number(storage.as_ref()).await?,
            student_id: student.id,
            fee_structure_id: Some(fee.id),
            description: Some(description.clone()),
            due_date,
            created_by: Some(actor.id),
            items: vec![InvoiceItemInput {
                description,
                quantity: 1,
                unit_amount: fee.amount,
            }],
        })
        .await?;

    AuditEvent::create("invoice", detail.invoice.id)
        .details(format!("generated from fee structure {}", fee.id))
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        detail,
        "Invoice generated successfully",
    )))
}

// 已有缴费的账单不能取消
pub async fn handle_cancel(
    service: &FinanceService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let invoice = storage
        .get_invoice_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Invoice not found"))?;
    if invoice.status == InvoiceStatus::Cancelled {
        return Err(CampusError::conflict("Invoice is already cancelled").into());
    }
    if invoice.amount_paid > 0.0 {
        return Err(CampusError::conflict(
            "Cannot cancel an invoice that has payments",
        )
        .into());
    }

    let invoice = storage
        .set_invoice_status(id, InvoiceStatus::Cancelled)
        .await?
        .ok_or_else(|| CampusError::not_found("Invoice not found"))?;
    AuditEvent::new("cancel", "invoice")
        .resource_id(id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        invoice,
        "Invoice cancelled successfully",
    )))
}

pub async fn handle_student_balance(
    service: &FinanceService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    rbac::authorize(
        &actor,
        perm::INVOICES_READ,
        Some(&ResourceFields::new().with(OwnerField::StudentId, student_id)),
    )?;

    let storage = service.get_storage(request)?;
    if storage.get_student_by_id(student_id).await?.is_none() {
        return Err(CampusError::not_found("Student not found").into());
    }
    let balance = storage.student_balance(student_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        balance,
        "Student balance retrieved successfully",
    )))
}
