//! 收费标准、账单与缴费路由

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequirePermission as Allow};
use crate::models::finance::requests::{
    CreateFeeStructureRequest, CreateInvoiceRequest, FeeStructureListParams,
    GenerateInvoiceRequest, InvoiceListParams, PaymentListParams, RecordPaymentRequest,
    UpdateFeeStructureRequest,
};
use crate::rbac::perm;
use crate::services::FinanceService;
use crate::utils::SafeIDI64;

static FINANCE_SERVICE: Lazy<FinanceService> = Lazy::new(FinanceService::new_lazy);

// 收费标准
pub async fn list_fee_structures(
    req: HttpRequest,
    query: web::Query<FeeStructureListParams>,
) -> ActixResult<HttpResponse> {
    FINANCE_SERVICE
        .list_fee_structures(query.into_inner(), &req)
        .await
}

pub async fn get_fee_structure(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FINANCE_SERVICE.get_fee_structure(id.0, &req).await
}

pub async fn create_fee_structure(
    req: HttpRequest,
    data: web::Json<CreateFeeStructureRequest>,
) -> ActixResult<HttpResponse> {
    FINANCE_SERVICE
        .create_fee_structure(data.into_inner(), &req)
        .await
}

pub async fn update_fee_structure(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateFeeStructureRequest>,
) -> ActixResult<HttpResponse> {
    FINANCE_SERVICE
        .update_fee_structure(id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_fee_structure(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FINANCE_SERVICE.delete_fee_structure(id.0, &req).await
}

// 账单
pub async fn list_invoices(
    req: HttpRequest,
    query: web::Query<InvoiceListParams>,
) -> ActixResult<HttpResponse> {
    FINANCE_SERVICE.list_invoices(query.into_inner(), &req).await
}

pub async fn get_invoice(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FINANCE_SERVICE.get_invoice(id.0, &req).await
}

pub async fn create_invoice(
    req: HttpRequest,
    data: web::Json<CreateInvoiceRequest>,
) -> ActixResult<HttpResponse> {
    FINANCE_SERVICE.create_invoice(data.into_inner(), &req).await
}

pub async fn generate_invoice(
    req: HttpRequest,
    data: web::Json<GenerateInvoiceRequest>,
) -> ActixResult<HttpResponse> {
    FINANCE_SERVICE
        .generate_invoice(data.into_inner(), &req)
        .await
}

pub async fn cancel_invoice(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FINANCE_SERVICE.cancel_invoice(id.0, &req).await
}

// `{id}` 为学生 ID
pub async fn student_balance(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FINANCE_SERVICE.student_balance(id.0, &req).await
}

// 缴费
pub async fn record_payment(
    req: HttpRequest,
    data: web::Json<RecordPaymentRequest>,
) -> ActixResult<HttpResponse> {
    FINANCE_SERVICE.record_payment(data.into_inner(), &req).await
}

pub async fn list_payments(
    req: HttpRequest,
    query: web::Query<PaymentListParams>,
) -> ActixResult<HttpResponse> {
    FINANCE_SERVICE.list_payments(query.into_inner(), &req).await
}

pub async fn get_payment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FINANCE_SERVICE.get_payment(id.0, &req).await
}

pub fn configure_finance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/fee-structures")
            .wrap(middlewares::RequireJWT)
            .wrap(middlewares::RateLimit::api())
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_fee_structures)
                            .wrap(Allow::new(perm::FEE_STRUCTURES_READ)),
                    )
                    .route(
                        web::post()
                            .to(create_fee_structure)
                            .wrap(Allow::new(perm::FEE_STRUCTURES_WRITE)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_fee_structure)
                            .wrap(Allow::new(perm::FEE_STRUCTURES_READ)),
                    )
                    .route(
                        web::put()
                            .to(update_fee_structure)
                            .wrap(Allow::new(perm::FEE_STRUCTURES_WRITE)),
                    )
                    .route(
                        web::delete()
                            .to(delete_fee_structure)
                            .wrap(Allow::new(perm::FEE_STRUCTURES_DELETE)),
                    ),
            ),
    )
    .service(
        // 固定路径需先于 `/{id}` 注册
        web::scope("/api/v1/invoices")
            .wrap(middlewares::RequireJWT)
            .wrap(middlewares::RateLimit::api())
            .service(
                web::resource("")
                    .route(web::get().to(list_invoices).wrap(Allow::new(perm::INVOICES_READ)))
                    .route(web::post().to(create_invoice).wrap(Allow::new(perm::INVOICES_WRITE))),
            )
            .route(
                "/generate",
                web::post()
                    .to(generate_invoice)
                    .wrap(Allow::new(perm::INVOICES_WRITE)),
            )
            .route(
                "/balance/{id}",
                web::get()
                    .to(student_balance)
                    .wrap(Allow::new(perm::INVOICES_READ)),
            )
            .route(
                "/{id}",
                web::get().to(get_invoice).wrap(Allow::new(perm::INVOICES_READ)),
            )
            .route(
                "/{id}/cancel",
                web::post()
                    .to(cancel_invoice)
                    .wrap(Allow::new(perm::INVOICES_DELETE)),
            ),
    )
    .service(
        web::scope("/api/v1/payments")
            .wrap(middlewares::RequireJWT)
            .wrap(middlewares::RateLimit::api())
            .service(
                web::resource("")
                    .route(web::get().to(list_payments).wrap(Allow::new(perm::PAYMENTS_READ)))
                    .route(web::post().to(record_payment).wrap(Allow::new(perm::PAYMENTS_WRITE))),
            )
            .route(
                "/{id}",
                web::get().to(get_payment).wrap(Allow::new(perm::PAYMENTS_READ)),
            ),
    );
}
