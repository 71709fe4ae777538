use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::FinanceService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    finance::{
        entities::{InvoiceStatus, MONEY_EPSILON, round_money},
        requests::{NewPayment, PaymentListParams, RecordPaymentRequest},
    },
};
use crate::rbac::{self, perm};
use crate::services::{AuditEvent, scoped_owner};
use crate::storage::FinanceStorage;
use crate::utils::numbering::receipt_number;
use crate::utils::validate::Validate;

/// 记录一笔缴费并重新计算账单状态
///
/// 金额必须为正且不超过未付余额，否则返回 402；流水号重复返回 409。
pub async fn handle_record(
    service: &FinanceService,
    payment: RecordPaymentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    payment.validate()?;
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let invoice = storage
        .get_invoice_by_id(payment.invoice_id)
        .await?
        .ok_or_else(|| CampusError::not_found("Invoice not found"))?;
    // 学生只能为自己的账单缴费
    rbac::authorize(&actor, perm::PAYMENTS_WRITE, Some(&invoice))?;

    if invoice.status == InvoiceStatus::Cancelled {
        return Err(CampusError::payment("Cannot pay a cancelled invoice").into());
    }

    let amount = round_money(payment.amount);
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CampusError::payment("Payment amount must be positive").into());
    }
    let balance = invoice.balance();
    if amount > balance + MONEY_EPSILON {
        return Err(CampusError::payment(format!(
            "Payment amount exceeds the outstanding balance of {balance:.2}"
        ))
        .into());
    }

    let reference = payment.reference.trim().to_string();
    if storage.get_payment_by_reference(&reference).await?.is_some() {
        return Err(CampusError::conflict("Payment reference already used").into());
    }

    // 先占用余额，并发缴费中后到的一笔在这里失败
    let Some(updated) = storage.apply_invoice_payment(invoice.id, amount).await? else {
        return Err(CampusError::payment(
            "Payment amount exceeds the outstanding balance or the invoice was cancelled",
        )
        .into());
    };
    let status = updated.status;

    let recorded = storage
        .create_payment(NewPayment {
            invoice_id: invoice.id,
            student_id: invoice.student_id,
            amount,
            method: payment.method,
            reference,
            receipt_number: receipt_number(),
            recorded_by: Some(actor.id),
        })
        .await;

    // 缴费记录写入失败时退回占用的金额
    let recorded = match recorded {
        Ok(recorded) => recorded,
        Err(e) => {
            match storage.apply_invoice_payment(invoice.id, -amount).await {
                Ok(Some(_)) => {}
                Ok(None) => warn!("Could not release {:.2} on invoice {}", amount, invoice.id),
                Err(cleanup) => warn!(
                    "Failed to release {:.2} on invoice {}: {}",
                    amount, invoice.id, cleanup
                ),
            }
            return Err(e.into());
        }
    };

    info!(
        "Payment {} of {:.2} recorded on invoice {} ({})",
        recorded.receipt_number, amount, invoice.invoice_number, status
    );
    AuditEvent::create("payment", recorded.id)
        .details(format!("invoice {} -> {}", invoice.invoice_number, status))
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        recorded,
        "Payment recorded successfully",
    )))
}

pub async fn handle_list(
    service: &FinanceService,
    mut query: PaymentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    query.student_id = scoped_owner(&actor, perm::PAYMENTS_READ, query.student_id)?;

    let storage = service.get_storage(request)?;
    let payments = storage.list_payments(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        payments,
        "Payments retrieved successfully",
    )))
}

pub async fn handle_get(
    service: &FinanceService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let payment = storage
        .get_payment_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Payment not found"))?;
    rbac::authorize(&actor, perm::PAYMENTS_READ, Some(&payment))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        payment,
        "Payment retrieved successfully",
    )))
}
