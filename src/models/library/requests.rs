use chrono::NaiveDate;
use serde::Deserialize;

use super::entities::LoanStatus;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_option_from_str;
use crate::utils::validate::{Validate, ValidationErrors, Validator};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibraryItemListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub category: Option<String>,
    /// 按书名、作者或 ISBN 模糊匹配
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub available_only: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLibraryItemRequest {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: Option<String>,
    pub category: Option<String>,
    pub publication_year: Option<i32>,
    pub total_copies: i32,
}

impl Validate for CreateLibraryItemRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.length("isbn", &self.isbn, 10, 17)
            .length("title", &self.title, 1, 255)
            .length("author", &self.author, 1, 160)
            .range("total_copies", self.total_copies, 1, 10_000);
        if let Some(year) = self.publication_year {
            v.range("publication_year", year, 1400, 2100);
        }
        v.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLibraryItemRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub category: Option<String>,
    pub publication_year: Option<i32>,
    pub total_copies: Option<i32>,
}

impl Validate for UpdateLibraryItemRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.optional_length("title", self.title.as_deref(), 1, 255)
            .optional_length("author", self.author.as_deref(), 1, 160);
        if let Some(total) = self.total_copies {
            v.range("total_copies", total, 0, 10_000);
        }
        v.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoanListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub borrower_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub library_item_id: Option<i64>,
    pub status: Option<LoanStatus>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub overdue_only: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub library_item_id: i64,
    pub borrower_id: i64,
    /// 缺省为今天加上 `library.loan_days`
    pub due_date: Option<NaiveDate>,
}
