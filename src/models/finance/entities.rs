use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::enums::string_enum;
use crate::rbac::{OwnerField, Owned};

string_enum! {
    InvoiceStatus {
        Unpaid => "unpaid",
        Partial => "partial",
        Paid => "paid",
        Overdue => "overdue",
        Cancelled => "cancelled",
    }
}

impl InvoiceStatus {
    /// 根据已付金额与到期日重新计算状态，已取消的账单保持不变
    pub fn recompute(
        current: InvoiceStatus,
        total_amount: f64,
        amount_paid: f64,
        due_date: NaiveDate,
        today: NaiveDate,
    ) -> InvoiceStatus {
        if current == InvoiceStatus::Cancelled {
            return InvoiceStatus::Cancelled;
        }
        if amount_paid >= total_amount - MONEY_EPSILON {
            InvoiceStatus::Paid
        } else if amount_paid > MONEY_EPSILON {
            InvoiceStatus::Partial
        } else if due_date < today {
            InvoiceStatus::Overdue
        } else {
            InvoiceStatus::Unpaid
        }
    }
}

string_enum! {
    PaymentMethod {
        Cash => "cash",
        Bank => "bank",
        Mpesa => "mpesa",
    }
}

string_enum! {
    PaymentStatus {
        Completed => "completed",
        Reversed => "reversed",
    }
}

/// 金额比较容差
pub const MONEY_EPSILON: f64 = 0.005;

/// 金额统一保留两位小数
pub fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeStructure {
    pub id: i64,
    pub program_id: i64,
    pub academic_year: String,
    pub semester: i32,
    pub amount: f64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub invoice_number: String,
    pub student_id: i64,
    pub fee_structure_id: Option<i64>,
    pub description: Option<String>,
    pub total_amount: f64,
    pub amount_paid: f64,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    pub fn balance(&self) -> f64 {
        round_money(self.total_amount - self.amount_paid).max(0.0)
    }
}

impl Owned for Invoice {
    fn owner(&self, field: OwnerField) -> Option<i64> {
        match field {
            OwnerField::StudentId => Some(self.student_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub id: i64,
    pub invoice_id: i64,
    pub description: String,
    pub quantity: i32,
    pub unit_amount: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDetail {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub balance: f64,
    pub items: Vec<InvoiceItem>,
}

impl Owned for InvoiceDetail {
    fn owner(&self, field: OwnerField) -> Option<i64> {
        self.invoice.owner(field)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub invoice_id: i64,
    pub student_id: i64,
    pub amount: f64,
    pub method: PaymentMethod,
    /// 银行流水号或 M-Pesa 交易码
    pub reference: String,
    pub receipt_number: String,
    pub status: PaymentStatus,
    pub recorded_by: Option<i64>,
    pub paid_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Owned for Payment {
    fn owner(&self, field: OwnerField) -> Option<i64> {
        match field {
            OwnerField::StudentId => Some(self.student_id),
            _ => None,
        }
    }
}

/// 学生的账务汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentBalance {
    pub student_id: i64,
    pub total_invoiced: f64,
    pub total_paid: f64,
    pub balance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_invoice_status_recompute() {
        let today = date("2025-03-01");
        let future = date("2025-04-01");
        let past = date("2025-02-01");

        assert_eq!(
            InvoiceStatus::recompute(InvoiceStatus::Unpaid, 100.0, 0.0, future, today),
            InvoiceStatus::Unpaid
        );
        assert_eq!(
            InvoiceStatus::recompute(InvoiceStatus::Unpaid, 100.0, 0.0, past, today),
            InvoiceStatus::Overdue
        );
        assert_eq!(
            InvoiceStatus::recompute(InvoiceStatus::Unpaid, 100.0, 40.0, past, today),
            InvoiceStatus::Partial
        );
        assert_eq!(
            InvoiceStatus::recompute(InvoiceStatus::Partial, 100.0, 100.0, past, today),
            InvoiceStatus::Paid
        );
        assert_eq!(
            InvoiceStatus::recompute(InvoiceStatus::Cancelled, 100.0, 100.0, past, today),
            InvoiceStatus::Cancelled
        );
    }

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(10.005_1), 10.01);
        assert_eq!(round_money(0.1 + 0.2), 0.3);
    }
}
