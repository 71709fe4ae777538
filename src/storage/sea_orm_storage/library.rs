//! 图书馆存储操作：馆藏与借阅

use super::{SeaOrmStorage, delete_conflict, search_pattern};
use crate::entity::prelude::{LibraryItemActiveModel, LibraryItems, LoanActiveModel, Loans};
use crate::entity::{format_date, library_items, loans};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    library::{
        entities::{LibraryItem, Loan, LoanStatus},
        requests::{
            CreateLibraryItemRequest, LibraryItemListParams, LoanListParams,
            UpdateLibraryItemRequest,
        },
    },
};
use crate::storage::LibraryStorage;
use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

#[async_trait::async_trait]
impl LibraryStorage for SeaOrmStorage {
    async fn create_library_item(&self, req: CreateLibraryItemRequest) -> Result<LibraryItem> {
        let now = chrono::Utc::now().timestamp();

        let model = LibraryItemActiveModel {
            isbn: Set(req.isbn),
            title: Set(req.title),
            author: Set(req.author),
            publisher: Set(req.publisher),
            category: Set(req.category),
            publication_year: Set(req.publication_year),
            total_copies: Set(req.total_copies),
            available_copies: Set(req.total_copies),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?.into_library_item())
    }

    async fn get_library_item_by_id(&self, id: i64) -> Result<Option<LibraryItem>> {
        let result = LibraryItems::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_library_item()))
    }

    async fn get_library_item_by_isbn(&self, isbn: &str) -> Result<Option<LibraryItem>> {
        let result = LibraryItems::find()
            .filter(library_items::Column::Isbn.eq(isbn))
            .one(&self.db)
            .await?;
        Ok(result.map(|m| m.into_library_item()))
    }

    async fn list_library_items(
        &self,
        params: LibraryItemListParams,
    ) -> Result<PaginatedResponse<LibraryItem>> {
        use library_items::Column;

        let mut select = LibraryItems::find();

        if let Some(ref category) = params.category {
            select = select.filter(Column::Category.eq(category.as_str()));
        }
        if params.available_only == Some(true) {
            select = select.filter(Column::AvailableCopies.gt(0));
        }
        if let Some(pattern) = search_pattern(params.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(&pattern))
                    .add(Column::Author.contains(&pattern))
                    .add(Column::Isbn.contains(&pattern)),
            );
        }

        let select = select.order_by_asc(Column::Title).order_by_asc(Column::Id);
        self.paginate(select, &params.pagination, |m| m.into_library_item())
            .await
    }

    async fn update_library_item(
        &self,
        id: i64,
        update: UpdateLibraryItemRequest,
        available_copies: Option<i32>,
    ) -> Result<Option<LibraryItem>> {
        if LibraryItems::find_by_id(id).one(&self.db).await?.is_none() {
            return Ok(None);
        }

        let mut model = LibraryItemActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(author) = update.author {
            model.author = Set(author);
        }
        if let Some(publisher) = update.publisher {
            model.publisher = Set(Some(publisher));
        }
        if let Some(category) = update.category {
            model.category = Set(Some(category));
        }
        if let Some(year) = update.publication_year {
            model.publication_year = Set(Some(year));
        }
        if let Some(total) = update.total_copies {
            model.total_copies = Set(total);
        }
        if let Some(available) = available_copies {
            model.available_copies = Set(available);
        }

        Ok(Some(model.update(&self.db).await?.into_library_item()))
    }

    async fn delete_library_item(&self, id: i64) -> Result<bool> {
        let result = LibraryItems::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(delete_conflict("Library item"))?;
        Ok(result.rows_affected > 0)
    }

    async fn adjust_available_copies(&self, id: i64, delta: i32) -> Result<bool> {
        use library_items::Column;

        // 单条 UPDATE 完成检查与修改，并发借还不会越界
        let result = LibraryItems::update_many()
            .col_expr(
                Column::AvailableCopies,
                Expr::cust_with_values("available_copies + ?", [delta]),
            )
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(id))
            .filter(Expr::cust_with_values(
                "available_copies + ? BETWEEN 0 AND total_copies",
                [delta],
            ))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn create_loan(
        &self,
        library_item_id: i64,
        borrower_id: i64,
        issued_by: Option<i64>,
        due_date: NaiveDate,
    ) -> Result<Loan> {
        let now = chrono::Utc::now().timestamp();

        let model = LoanActiveModel {
            library_item_id: Set(library_item_id),
            borrower_id: Set(borrower_id),
            issued_by: Set(issued_by),
            borrowed_at: Set(now),
            due_date: Set(format_date(due_date)),
            returned_at: Set(None),
            status: Set(LoanStatus::Active.to_string()),
            fine_amount: Set(0.0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?.into_loan())
    }

    async fn get_loan_by_id(&self, id: i64) -> Result<Option<Loan>> {
        let result = Loans::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_loan()))
    }

    async fn list_loans(&self, params: LoanListParams) -> Result<PaginatedResponse<Loan>> {
        use loans::Column;

        let mut select = Loans::find();

        if let Some(borrower_id) = params.borrower_id {
            select = select.filter(Column::BorrowerId.eq(borrower_id));
        }
        if let Some(library_item_id) = params.library_item_id {
            select = select.filter(Column::LibraryItemId.eq(library_item_id));
        }
        if let Some(status) = params.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if params.overdue_only == Some(true) {
            let today = format_date(chrono::Utc::now().date_naive());
            select = select
                .filter(Column::Status.eq(LoanStatus::Active.to_string()))
                .filter(Column::DueDate.lt(today));
        }

        let select = select
            .order_by_desc(Column::BorrowedAt)
            .order_by_desc(Column::Id);
        self.paginate(select, &params.pagination, |m| m.into_loan())
            .await
    }

    async fn return_loan(&self, id: i64, fine_amount: f64) -> Result<Option<Loan>> {
        if Loans::find_by_id(id).one(&self.db).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let model = LoanActiveModel {
            id: Set(id),
            returned_at: Set(Some(now)),
            status: Set(LoanStatus::Returned.to_string()),
            fine_amount: Set(fine_amount),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(Some(model.update(&self.db).await?.into_loan()))
    }

    async fn count_active_loans_for_borrower(&self, borrower_id: i64) -> Result<u64> {
        Ok(Loans::find()
            .filter(loans::Column::BorrowerId.eq(borrower_id))
            .filter(loans::Column::Status.eq(LoanStatus::Active.to_string()))
            .count(&self.db)
            .await?)
    }

    async fn count_loans_for_item(&self, library_item_id: i64) -> Result<u64> {
        Ok(Loans::find()
            .filter(loans::Column::LibraryItemId.eq(library_item_id))
            .count(&self.db)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(isbn: &str, copies: i32) -> CreateLibraryItemRequest {
        CreateLibraryItemRequest {
            isbn: isbn.to_string(),
            title: "Engineering Mathematics".into(),
            author: "K. A. Stroud".into(),
            publisher: None,
            category: Some("mathematics".into()),
            publication_year: Some(2020),
            total_copies: copies,
        }
    }

    #[actix_web::test]
    async fn test_available_copies_stay_in_bounds() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let created = storage
            .create_library_item(item("9781137031204", 1))
            .await
            .unwrap();
        assert_eq!(created.available_copies, 1);

        assert!(storage.adjust_available_copies(created.id, -1).await.unwrap());
        // 已无可借册数
        assert!(!storage.adjust_available_copies(created.id, -1).await.unwrap());
        assert!(storage.adjust_available_copies(created.id, 1).await.unwrap());
        // 不能超过总册数
        assert!(!storage.adjust_available_copies(created.id, 1).await.unwrap());

        let reloaded = storage
            .get_library_item_by_id(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.available_copies, 1);
    }

    #[actix_web::test]
    async fn test_duplicate_isbn_conflicts() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_library_item(item("9780131103627", 2))
            .await
            .unwrap();
        let err = storage
            .create_library_item(item("9780131103627", 3))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::errors::CampusError::Conflict(_)));
    }
}
