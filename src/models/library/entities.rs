use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::enums::string_enum;
use crate::rbac::{OwnerField, Owned};

string_enum! {
    LoanStatus {
        Active => "active",
        Returned => "returned",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryItem {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: Option<String>,
    pub category: Option<String>,
    pub publication_year: Option<i32>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    pub library_item_id: i64,
    pub borrower_id: i64,
    pub issued_by: Option<i64>,
    pub borrowed_at: DateTime<Utc>,
    pub due_date: NaiveDate,
    pub returned_at: Option<DateTime<Utc>>,
    pub status: LoanStatus,
    pub fine_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Loan {
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        self.status == LoanStatus::Active && today > self.due_date
    }
}

impl Owned for Loan {
    fn owner(&self, field: OwnerField) -> Option<i64> {
        match field {
            OwnerField::BorrowerId => Some(self.borrower_id),
            _ => None,
        }
    }
}

/// 逾期罚款：逾期天数 × 每日罚金，按期归还为 0
pub fn compute_fine(due_date: NaiveDate, returned_on: NaiveDate, fine_per_day: f64) -> f64 {
    let days_overdue = (returned_on - due_date).num_days().max(0);
    ((days_overdue as f64 * fine_per_day) * 100.0).round() / 100.0
}

/// 调整总册数后的可借册数，已借出的册数保持不变
pub fn adjusted_available(
    total_copies: i32,
    available_copies: i32,
    new_total: i32,
) -> Option<i32> {
    let on_loan = total_copies - available_copies;
    let available = new_total - on_loan;
    (available >= 0).then_some(available)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_fine_counts_days_overdue() {
        assert_eq!(compute_fine(date("2025-03-10"), date("2025-03-10"), 10.0), 0.0);
        assert_eq!(compute_fine(date("2025-03-10"), date("2025-03-05"), 10.0), 0.0);
        assert_eq!(compute_fine(date("2025-03-10"), date("2025-03-13"), 10.0), 30.0);
        assert_eq!(compute_fine(date("2025-03-10"), date("2025-03-11"), 2.5), 2.5);
    }

    #[test]
    fn test_adjusted_available() {
        assert_eq!(adjusted_available(5, 3, 7), Some(5));
        assert_eq!(adjusted_available(5, 3, 2), Some(0));
        assert_eq!(adjusted_available(5, 3, 1), None);
    }
}
