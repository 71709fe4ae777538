//! 收费标准、账单与缴费

pub mod fee_structures;
pub mod invoices;
pub mod payments;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::config::AppConfig;
use crate::models::finance::requests::{
    CreateFeeStructureRequest, CreateInvoiceRequest, FeeStructureListParams,
    GenerateInvoiceRequest, InvoiceListParams, PaymentListParams, RecordPaymentRequest,
    UpdateFeeStructureRequest,
};

crate::services::lazy_service!(
    /// 财务服务
    FinanceService
);

impl FinanceService {
    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    pub async fn list_fee_structures(
        &self,
        query: FeeStructureListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        fee_structures::handle_list(self, query, request).await
    }

    pub async fn get_fee_structure(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        fee_structures::handle_get(self, id, request).await
    }

    pub async fn create_fee_structure(
        &self,
        fee: CreateFeeStructureRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        fee_structures::handle_create(self, fee, request).await
    }

    pub async fn update_fee_structure(
        &self,
        id: i64,
        update: UpdateFeeStructureRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        fee_structures::handle_update(self, id, update, request).await
    }

    pub async fn delete_fee_structure(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        fee_structures::handle_delete(self, id, request).await
    }

    pub async fn list_invoices(
        &self,
        query: InvoiceListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        invoices::handle_list(self, query, request).await
    }

    pub async fn get_invoice(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        invoices::handle_get(self, id, request).await
    }

    pub async fn create_invoice(
        &self,
        invoice: CreateInvoiceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        invoices::handle_create(self, invoice, request).await
    }

    // 按收费标准为学生生成账单
    pub async fn generate_invoice(
        &self,
        generate_request: GenerateInvoiceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        invoices::handle_generate(self, generate_request, request).await
    }

    pub async fn cancel_invoice(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        invoices::handle_cancel(self, id, request).await
    }

    pub async fn student_balance(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        invoices::handle_student_balance(self, student_id, request).await
    }

    pub async fn record_payment(
        &self,
        payment: RecordPaymentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        payments::handle_record(self, payment, request).await
    }

    pub async fn list_payments(
        &self,
        query: PaymentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        payments::handle_list(self, query, request).await
    }

    pub async fn get_payment(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        payments::handle_get(self, id, request).await
    }
}
