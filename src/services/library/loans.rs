use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{Duration, Utc};
use tracing::{info, warn};

use super::LibraryService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    library::{
        entities::{LoanStatus, compute_fine},
        requests::{CheckoutRequest, LoanListParams},
    },
};
use crate::rbac::{self, perm};
use crate::services::{AuditEvent, scoped_owner};
use crate::storage::{LibraryStorage, UserStorage};

/// 借出一册
///
/// 借阅人在借数量不能超过上限；可借册数通过条件更新扣减，没有余量时返回 409。
pub async fn handle_checkout(
    service: &LibraryService,
    checkout_request: CheckoutRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;
    let library = &service.get_config().library;
    let today = Utc::now().date_naive();

    let borrower = storage
        .get_user_by_id(checkout_request.borrower_id)
        .await?
        .ok_or_else(|| CampusError::validation("Borrower does not exist"))?;
    if !borrower.is_active() {
        return Err(CampusError::validation("Borrower account is not active").into());
    }

    let item = storage
        .get_library_item_by_id(checkout_request.library_item_id)
        .await?
        .ok_or_else(|| CampusError::not_found("Library item not found"))?;

    let due_date = checkout_request
        .due_date
        .unwrap_or_else(|| today + Duration::days(library.loan_days));
    if due_date < today {
        return Err(CampusError::validation("Due date cannot be in the past").into());
    }

    let active = storage.count_active_loans_for_borrower(borrower.id).await?;
    if active >= library.max_active_loans {
        return Err(CampusError::conflict(format!(
            "Borrower already has the maximum of {} active loans",
            library.max_active_loans
        ))
        .into());
    }

    if !storage.adjust_available_copies(item.id, -1).await? {
        return Err(CampusError::conflict("No copies of this item are available").into());
    }

    let loan = match storage
        .create_loan(item.id, borrower.id, Some(actor.id), due_date)
        .await
    {
        Ok(loan) => loan,
        Err(e) => {
            // 借阅记录写入失败时归还扣减的册数
            if let Err(restore) = storage.adjust_available_copies(item.id, 1).await {
                warn!("Failed to restore available copies of item {}: {}", item.id, restore);
            }
            return Err(e.into());
        }
    };

    info!(
        "Item {} checked out to user {} until {}",
        item.id, borrower.id, due_date
    );
    AuditEvent::new("checkout", "loan")
        .resource_id(loan.id)
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        loan,
        "Item checked out successfully",
    )))
}

/// 归还，逾期按天计算罚款
pub async fn handle_return(
    service: &LibraryService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let loan = storage
        .get_loan_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Loan not found"))?;
    if loan.status != LoanStatus::Active {
        return Err(CampusError::conflict("Loan has already been returned").into());
    }

    let fine = compute_fine(
        loan.due_date,
        Utc::now().date_naive(),
        service.get_config().library.fine_per_day,
    );
    let returned = storage
        .return_loan(id, fine)
        .await?
        .ok_or_else(|| CampusError::not_found("Loan not found"))?;

    if !storage
        .adjust_available_copies(loan.library_item_id, 1)
        .await?
    {
        warn!(
            "Available copies of item {} already at total when returning loan {}",
            loan.library_item_id, id
        );
    }

    AuditEvent::new("return", "loan")
        .resource_id(id)
        .details(format!("fine {fine:.2}"))
        .record(storage.as_ref(), request, Some(actor.id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        returned,
        "Item returned successfully",
    )))
}

pub async fn handle_list(
    service: &LibraryService,
    mut query: LoanListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    query.borrower_id = scoped_owner(&actor, perm::LOANS_READ, query.borrower_id)?;

    let storage = service.get_storage(request)?;
    let loans = storage.list_loans(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        loans,
        "Loans retrieved successfully",
    )))
}

pub async fn handle_get(
    service: &LibraryService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(request)?;
    let storage = service.get_storage(request)?;

    let loan = storage
        .get_loan_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("Loan not found"))?;
    rbac::authorize(&actor, perm::LOANS_READ, Some(&loan))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(loan, "Loan retrieved successfully")))
}
