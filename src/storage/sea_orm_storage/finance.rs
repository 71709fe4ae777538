//! 财务存储操作：收费标准、账单与缴费

use super::{SeaOrmStorage, delete_conflict, search_pattern};
use crate::entity::format_date;
use crate::entity::prelude::{
    FeeStructureActiveModel, FeeStructures, InvoiceActiveModel, InvoiceItemActiveModel,
    InvoiceItems, Invoices, PaymentActiveModel, Payments,
};
use crate::entity::{fee_structures, invoice_items, invoices, payments};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    finance::{
        entities::{
            FeeStructure, Invoice, InvoiceDetail, InvoiceStatus, Payment, PaymentStatus,
            MONEY_EPSILON, StudentBalance, round_money,
        },
        requests::{
            CreateFeeStructureRequest, FeeStructureListParams, InvoiceListParams, NewInvoice,
            NewPayment, PaymentListParams, UpdateFeeStructureRequest,
        },
    },
};
use crate::storage::FinanceStorage;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    async fn load_invoice_detail(&self, invoice: Invoice) -> Result<InvoiceDetail> {
        let items = InvoiceItems::find()
            .filter(invoice_items::Column::InvoiceId.eq(invoice.id))
            .order_by_asc(invoice_items::Column::Id)
            .all(&self.db)
            .await?;

        Ok(InvoiceDetail {
            balance: invoice.balance(),
            items: items.into_iter().map(|m| m.into_invoice_item()).collect(),
            invoice,
        })
    }
}

#[async_trait::async_trait]
impl FinanceStorage for SeaOrmStorage {
    async fn create_fee_structure(&self, req: CreateFeeStructureRequest) -> Result<FeeStructure> {
        let now = chrono::Utc::now().timestamp();

        let model = FeeStructureActiveModel {
            program_id: Set(req.program_id),
            academic_year: Set(req.academic_year),
            semester: Set(req.semester),
            amount: Set(round_money(req.amount)),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?.into_fee_structure())
    }

    async fn get_fee_structure_by_id(&self, id: i64) -> Result<Option<FeeStructure>> {
        let result = FeeStructures::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_fee_structure()))
    }

    async fn find_fee_structure(
        &self,
        program_id: i64,
        academic_year: &str,
        semester: i32,
    ) -> Result<Option<FeeStructure>> {
        let result = FeeStructures::find()
            .filter(fee_structures::Column::ProgramId.eq(program_id))
            .filter(fee_structures::Column::AcademicYear.eq(academic_year))
            .filter(fee_structures::Column::Semester.eq(semester))
            .one(&self.db)
            .await?;
        Ok(result.map(|m| m.into_fee_structure()))
    }

    async fn list_fee_structures(
        &self,
        params: FeeStructureListParams,
    ) -> Result<PaginatedResponse<FeeStructure>> {
        use fee_structures::Column;

        let mut select = FeeStructures::find();

        if let Some(program_id) = params.program_id {
            select = select.filter(Column::ProgramId.eq(program_id));
        }
        if let Some(ref academic_year) = params.academic_year {
            select = select.filter(Column::AcademicYear.eq(academic_year.as_str()));
        }
        if let Some(semester) = params.semester {
            select = select.filter(Column::Semester.eq(semester));
        }

        let select = select
            .order_by_desc(Column::AcademicYear)
            .order_by_asc(Column::Semester)
            .order_by_asc(Column::ProgramId);
        self.paginate(select, &params.pagination, |m| m.into_fee_structure())
            .await
    }

    async fn update_fee_structure(
        &self,
        id: i64,
        update: UpdateFeeStructureRequest,
    ) -> Result<Option<FeeStructure>> {
        if FeeStructures::find_by_id(id).one(&self.db).await?.is_none() {
            return Ok(None);
        }

        let mut model = FeeStructureActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(amount) = update.amount {
            model.amount = Set(round_money(amount));
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        Ok(Some(model.update(&self.db).await?.into_fee_structure()))
    }

    async fn delete_fee_structure(&self, id: i64) -> Result<bool> {
        let result = FeeStructures::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(delete_conflict("Fee structure"))?;
        Ok(result.rows_affected > 0)
    }

    async fn create_invoice(&self, req: NewInvoice) -> Result<InvoiceDetail> {
        let now = chrono::Utc::now().timestamp();

        let lines: Vec<(String, i32, f64, f64)> = req
            .items
            .into_iter()
            .map(|item| {
                let unit_amount = round_money(item.unit_amount);
                let amount = round_money(item.quantity as f64 * unit_amount);
                (item.description, item.quantity, unit_amount, amount)
            })
            .collect();
        let total_amount = round_money(lines.iter().map(|line| line.3).sum());

        let invoice = InvoiceActiveModel {
            invoice_number: Set(req.invoice_number),
            student_id: Set(req.student_id),
            fee_structure_id: Set(req.fee_structure_id),
            description: Set(req.description),
            total_amount: Set(total_amount),
            amount_paid: Set(0.0),
            due_date: Set(format_date(req.due_date)),
            status: Set(InvoiceStatus::Unpaid.to_string()),
            created_by: Set(req.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        let mut items = Vec::with_capacity(lines.len());
        for (description, quantity, unit_amount, amount) in lines {
            let item = InvoiceItemActiveModel {
                invoice_id: Set(invoice.id),
                description: Set(description),
                quantity: Set(quantity),
                unit_amount: Set(unit_amount),
                amount: Set(amount),
                ..Default::default()
            }
            .insert(&self.db)
            .await?;
            items.push(item.into_invoice_item());
        }

        let invoice = invoice.into_invoice();
        Ok(InvoiceDetail {
            balance: invoice.balance(),
            invoice,
            items,
        })
    }

    async fn get_invoice_by_id(&self, id: i64) -> Result<Option<Invoice>> {
        let result = Invoices::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_invoice()))
    }

    async fn get_invoice_detail(&self, id: i64) -> Result<Option<InvoiceDetail>> {
        let Some(invoice) = self.get_invoice_by_id(id).await? else {
            return Ok(None);
        };
        Ok(Some(self.load_invoice_detail(invoice).await?))
    }

    async fn list_invoices(&self, params: InvoiceListParams) -> Result<PaginatedResponse<Invoice>> {
        use invoices::Column;

        let mut select = Invoices::find();

        if let Some(student_id) = params.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(status) = params.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(pattern) = search_pattern(params.search.as_deref()) {
            select = select.filter(Column::InvoiceNumber.contains(&pattern));
        }

        let select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);
        self.paginate(select, &params.pagination, |m| m.into_invoice())
            .await
    }

    async fn invoice_numbers_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(Invoices::find()
            .select_only()
            .column(invoices::Column::InvoiceNumber)
            .filter(invoices::Column::InvoiceNumber.starts_with(prefix))
            .into_tuple()
            .all(&self.db)
            .await?)
    }

    async fn count_invoices_for_fee_structure(&self, fee_structure_id: i64) -> Result<u64> {
        Ok(Invoices::find()
            .filter(invoices::Column::FeeStructureId.eq(fee_structure_id))
            .count(&self.db)
            .await?)
    }

    async fn apply_invoice_payment(&self, id: i64, amount: f64) -> Result<Option<Invoice>> {
        use invoices::Column;

        // 余额检查与累加在同一条 UPDATE 中完成，并发缴费不会超付
        let result = Invoices::update_many()
            .col_expr(
                Column::AmountPaid,
                Expr::cust_with_values("amount_paid + ?", [amount]),
            )
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.ne(InvoiceStatus::Cancelled.to_string()))
            .filter(Expr::cust_with_values(
                "amount_paid + ? BETWEEN ? AND total_amount + ?",
                [amount, -MONEY_EPSILON, MONEY_EPSILON],
            ))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let Some(model) = Invoices::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let invoice = model.into_invoice();
        let status = InvoiceStatus::recompute(
            invoice.status,
            invoice.total_amount,
            invoice.amount_paid,
            invoice.due_date,
            chrono::Utc::now().date_naive(),
        );
        if status == invoice.status {
            return Ok(Some(invoice));
        }
        self.set_invoice_status(id, status).await
    }

    async fn set_invoice_status(&self, id: i64, status: InvoiceStatus) -> Result<Option<Invoice>> {
        if Invoices::find_by_id(id).one(&self.db).await?.is_none() {
            return Ok(None);
        }

        let model = InvoiceActiveModel {
            id: Set(id),
            status: Set(status.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        Ok(Some(model.update(&self.db).await?.into_invoice()))
    }

    async fn student_balance(&self, student_id: i64) -> Result<StudentBalance> {
        use invoices::Column;

        // 已取消的账单不计入
        let rows: Vec<(f64, f64)> = Invoices::find()
            .select_only()
            .column(Column::TotalAmount)
            .column(Column::AmountPaid)
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Status.ne(InvoiceStatus::Cancelled.to_string()))
            .into_tuple()
            .all(&self.db)
            .await?;

        let total_invoiced = round_money(rows.iter().map(|(total, _)| total).sum());
        let total_paid = round_money(rows.iter().map(|(_, paid)| paid).sum());

        Ok(StudentBalance {
            student_id,
            total_invoiced,
            total_paid,
            balance: round_money(total_invoiced - total_paid),
        })
    }

    async fn create_payment(&self, req: NewPayment) -> Result<Payment> {
        let now = chrono::Utc::now().timestamp();

        let model = PaymentActiveModel {
            invoice_id: Set(req.invoice_id),
            student_id: Set(req.student_id),
            amount: Set(round_money(req.amount)),
            method: Set(req.method.to_string()),
            reference: Set(req.reference),
            receipt_number: Set(req.receipt_number),
            status: Set(PaymentStatus::Completed.to_string()),
            recorded_by: Set(req.recorded_by),
            paid_at: Set(now),
            created_at: Set(now),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?.into_payment())
    }

    async fn get_payment_by_id(&self, id: i64) -> Result<Option<Payment>> {
        let result = Payments::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_payment()))
    }

    async fn get_payment_by_reference(&self, reference: &str) -> Result<Option<Payment>> {
        let result = Payments::find()
            .filter(payments::Column::Reference.eq(reference))
            .one(&self.db)
            .await?;
        Ok(result.map(|m| m.into_payment()))
    }

    async fn list_payments(&self, params: PaymentListParams) -> Result<PaginatedResponse<Payment>> {
        use payments::Column;

        let mut select = Payments::find();

        if let Some(invoice_id) = params.invoice_id {
            select = select.filter(Column::InvoiceId.eq(invoice_id));
        }
        if let Some(student_id) = params.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(method) = params.method {
            select = select.filter(Column::Method.eq(method.to_string()));
        }

        let select = select
            .order_by_desc(Column::PaidAt)
            .order_by_desc(Column::Id);
        self.paginate(select, &params.pagination, |m| m.into_payment())
            .await
    }
}
