use chrono::NaiveDate;
use serde::Deserialize;

use super::entities::{InvoiceStatus, PaymentMethod};
use crate::models::class_sections::requests::is_valid_academic_year;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_option_from_str;
use crate::utils::validate::{Validate, ValidationErrors, Validator};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeeStructureListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub program_id: Option<i64>,
    pub academic_year: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub semester: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFeeStructureRequest {
    pub program_id: i64,
    pub academic_year: String,
    pub semester: i32,
    pub amount: f64,
    pub description: Option<String>,
}

impl Validate for CreateFeeStructureRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.range("semester", self.semester, 1, 3)
            .positive("amount", self.amount);
        v.check(
            is_valid_academic_year(&self.academic_year),
            "academic_year",
            "academic_year must look like 2025/2026",
        );
        v.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFeeStructureRequest {
    pub amount: Option<f64>,
    pub description: Option<String>,
}

impl Validate for UpdateFeeStructureRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        if let Some(amount) = self.amount {
            v.positive("amount", amount);
        }
        v.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub student_id: Option<i64>,
    pub status: Option<InvoiceStatus>,
    /// 按账单号模糊匹配
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceItemInput {
    pub description: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    pub unit_amount: f64,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoiceRequest {
    pub student_id: i64,
    pub due_date: NaiveDate,
    pub description: Option<String>,
    pub items: Vec<InvoiceItemInput>,
}

impl Validate for CreateInvoiceRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.check(
            !self.items.is_empty(),
            "items",
            "items must contain at least one entry",
        );
        for (index, item) in self.items.iter().enumerate() {
            let field = format!("items[{index}]");
            v.length(&format!("{field}.description"), &item.description, 1, 255)
                .range(&format!("{field}.quantity"), item.quantity, 1, 1000)
                .positive(&format!("{field}.unit_amount"), item.unit_amount);
        }
        v.finish()
    }
}

/// 按收费标准为学生生成账单
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateInvoiceRequest {
    pub student_id: i64,
    pub fee_structure_id: i64,
    /// 缺省为今天加上 `finance.invoice_due_days`
    pub due_date: Option<NaiveDate>,
}

/// 存储层新建账单
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub invoice_number: String,
    pub student_id: i64,
    pub fee_structure_id: Option<i64>,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub created_by: Option<i64>,
    pub items: Vec<InvoiceItemInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub invoice_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub student_id: Option<i64>,
    pub method: Option<PaymentMethod>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordPaymentRequest {
    pub invoice_id: i64,
    pub amount: f64,
    pub method: PaymentMethod,
    pub reference: String,
}

impl Validate for RecordPaymentRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .length("reference", &self.reference, 4, 64)
            .finish()
    }
}

/// 存储层新建付款
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub invoice_id: i64,
    pub student_id: i64,
    pub amount: f64,
    pub method: PaymentMethod,
    pub reference: String,
    pub receipt_number: String,
    pub recorded_by: Option<i64>,
}
