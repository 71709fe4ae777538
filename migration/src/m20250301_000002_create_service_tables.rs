use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn pk<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn fk<T, C, U, D>(from: (T, C), to: (U, D), on_delete: ForeignKeyAction) -> ForeignKeyCreateStatement
where
    T: IntoIden,
    C: IntoIden,
    U: IntoIden,
    D: IntoIden,
{
    ForeignKey::create()
        .from(from.0, from.1)
        .to(to.0, to.1)
        .on_delete(on_delete)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 收费标准表
        manager
            .create_table(
                Table::create()
                    .table(FeeStructures::Table)
                    .if_not_exists()
                    .col(pk(FeeStructures::Id))
                    .col(
                        ColumnDef::new(FeeStructures::ProgramId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeeStructures::AcademicYear)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeeStructures::Semester).integer().not_null())
                    .col(ColumnDef::new(FeeStructures::Amount).double().not_null())
                    .col(ColumnDef::new(FeeStructures::Description).string().null())
                    .col(
                        ColumnDef::new(FeeStructures::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeeStructures::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(&mut fk(
                        (FeeStructures::Table, FeeStructures::ProgramId),
                        (Programs::Table, Programs::Id),
                        ForeignKeyAction::Restrict,
                    ))
                    .to_owned(),
            )
            .await?;

        // 账单表
        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .if_not_exists()
                    .col(pk(Invoices::Id))
                    .col(
                        ColumnDef::new(Invoices::InvoiceNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Invoices::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Invoices::FeeStructureId).big_integer().null())
                    .col(ColumnDef::new(Invoices::Description).string().null())
                    .col(ColumnDef::new(Invoices::TotalAmount).double().not_null())
                    .col(
                        ColumnDef::new(Invoices::AmountPaid)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Invoices::DueDate).string().not_null())
                    .col(ColumnDef::new(Invoices::Status).string().not_null())
                    .col(ColumnDef::new(Invoices::CreatedBy).big_integer().null())
                    .col(ColumnDef::new(Invoices::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Invoices::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut fk(
                        (Invoices::Table, Invoices::StudentId),
                        (Students::Table, Students::Id),
                        ForeignKeyAction::Restrict,
                    ))
                    .foreign_key(&mut fk(
                        (Invoices::Table, Invoices::FeeStructureId),
                        (FeeStructures::Table, FeeStructures::Id),
                        ForeignKeyAction::SetNull,
                    ))
                    .foreign_key(&mut fk(
                        (Invoices::Table, Invoices::CreatedBy),
                        (Users::Table, Users::Id),
                        ForeignKeyAction::SetNull,
                    ))
                    .to_owned(),
            )
            .await?;

        // 账单明细表
        manager
            .create_table(
                Table::create()
                    .table(InvoiceItems::Table)
                    .if_not_exists()
                    .col(pk(InvoiceItems::Id))
                    .col(
                        ColumnDef::new(InvoiceItems::InvoiceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(InvoiceItems::Description).string().not_null())
                    .col(
                        ColumnDef::new(InvoiceItems::Quantity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(InvoiceItems::UnitAmount).double().not_null())
                    .col(ColumnDef::new(InvoiceItems::Amount).double().not_null())
                    .foreign_key(&mut fk(
                        (InvoiceItems::Table, InvoiceItems::InvoiceId),
                        (Invoices::Table, Invoices::Id),
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        // 付款表
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(pk(Payments::Id))
                    .col(ColumnDef::new(Payments::InvoiceId).big_integer().not_null())
                    .col(ColumnDef::new(Payments::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Payments::Amount).double().not_null())
                    .col(ColumnDef::new(Payments::Method).string().not_null())
                    .col(
                        ColumnDef::new(Payments::Reference)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Payments::ReceiptNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Payments::Status).string().not_null())
                    .col(ColumnDef::new(Payments::RecordedBy).big_integer().null())
                    .col(ColumnDef::new(Payments::PaidAt).big_integer().not_null())
                    .col(ColumnDef::new(Payments::CreatedAt).big_integer().not_null())
                    .foreign_key(&mut fk(
                        (Payments::Table, Payments::InvoiceId),
                        (Invoices::Table, Invoices::Id),
                        ForeignKeyAction::Restrict,
                    ))
                    .foreign_key(&mut fk(
                        (Payments::Table, Payments::StudentId),
                        (Students::Table, Students::Id),
                        ForeignKeyAction::Restrict,
                    ))
                    .to_owned(),
            )
            .await?;

        // 馆藏表
        manager
            .create_table(
                Table::create()
                    .table(LibraryItems::Table)
                    .if_not_exists()
                    .col(pk(LibraryItems::Id))
                    .col(
                        ColumnDef::new(LibraryItems::Isbn)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(LibraryItems::Title).string().not_null())
                    .col(ColumnDef::new(LibraryItems::Author).string().not_null())
                    .col(ColumnDef::new(LibraryItems::Publisher).string().null())
                    .col(ColumnDef::new(LibraryItems::Category).string().null())
                    .col(ColumnDef::new(LibraryItems::PublicationYear).integer().null())
                    .col(ColumnDef::new(LibraryItems::TotalCopies).integer().not_null())
                    .col(
                        ColumnDef::new(LibraryItems::AvailableCopies)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LibraryItems::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LibraryItems::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 借阅表
        manager
            .create_table(
                Table::create()
                    .table(Loans::Table)
                    .if_not_exists()
                    .col(pk(Loans::Id))
                    .col(ColumnDef::new(Loans::LibraryItemId).big_integer().not_null())
                    .col(ColumnDef::new(Loans::BorrowerId).big_integer().not_null())
                    .col(ColumnDef::new(Loans::IssuedBy).big_integer().null())
                    .col(ColumnDef::new(Loans::BorrowedAt).big_integer().not_null())
                    .col(ColumnDef::new(Loans::DueDate).string().not_null())
                    .col(ColumnDef::new(Loans::ReturnedAt).big_integer().null())
                    .col(ColumnDef::new(Loans::Status).string().not_null())
                    .col(
                        ColumnDef::new(Loans::FineAmount)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Loans::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Loans::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut fk(
                        (Loans::Table, Loans::LibraryItemId),
                        (LibraryItems::Table, LibraryItems::Id),
                        ForeignKeyAction::Restrict,
                    ))
                    .foreign_key(&mut fk(
                        (Loans::Table, Loans::BorrowerId),
                        (Users::Table, Users::Id),
                        ForeignKeyAction::Restrict,
                    ))
                    .to_owned(),
            )
            .await?;

        // 科研项目表
        manager
            .create_table(
                Table::create()
                    .table(ResearchProjects::Table)
                    .if_not_exists()
                    .col(pk(ResearchProjects::Id))
                    .col(ColumnDef::new(ResearchProjects::Title).string().not_null())
                    .col(ColumnDef::new(ResearchProjects::Description).text().null())
                    .col(
                        ColumnDef::new(ResearchProjects::PrincipalInvestigatorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ResearchProjects::Status).string().not_null())
                    .col(ColumnDef::new(ResearchProjects::StartDate).string().null())
                    .col(ColumnDef::new(ResearchProjects::EndDate).string().null())
                    .col(ColumnDef::new(ResearchProjects::Budget).double().null())
                    .col(ColumnDef::new(ResearchProjects::FundingSource).string().null())
                    .col(
                        ColumnDef::new(ResearchProjects::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ResearchProjects::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(&mut fk(
                        (
                            ResearchProjects::Table,
                            ResearchProjects::PrincipalInvestigatorId,
                        ),
                        (Users::Table, Users::Id),
                        ForeignKeyAction::Restrict,
                    ))
                    .to_owned(),
            )
            .await?;

        // 项目成员表
        manager
            .create_table(
                Table::create()
                    .table(ProjectMembers::Table)
                    .if_not_exists()
                    .col(pk(ProjectMembers::Id))
                    .col(
                        ColumnDef::new(ProjectMembers::ProjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProjectMembers::UserId).big_integer().not_null())
                    .col(ColumnDef::new(ProjectMembers::MemberRole).string().not_null())
                    .col(
                        ColumnDef::new(ProjectMembers::JoinedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(&mut fk(
                        (ProjectMembers::Table, ProjectMembers::ProjectId),
                        (ResearchProjects::Table, ResearchProjects::Id),
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut fk(
                        (ProjectMembers::Table, ProjectMembers::UserId),
                        (Users::Table, Users::Id),
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        // 通知表
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(pk(Notifications::Id))
                    .col(
                        ColumnDef::new(Notifications::RecipientId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::Title).string().not_null())
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(ColumnDef::new(Notifications::Kind).string().not_null())
                    .col(
                        ColumnDef::new(Notifications::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Notifications::ReadAt).big_integer().null())
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(&mut fk(
                        (Notifications::Table, Notifications::RecipientId),
                        (Users::Table, Users::Id),
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        // 审计日志表（用户删除后保留记录）
        manager
            .create_table(
                Table::create()
                    .table(AuditLogs::Table)
                    .if_not_exists()
                    .col(pk(AuditLogs::Id))
                    .col(ColumnDef::new(AuditLogs::UserId).big_integer().null())
                    .col(ColumnDef::new(AuditLogs::Action).string().not_null())
                    .col(ColumnDef::new(AuditLogs::Resource).string().not_null())
                    .col(ColumnDef::new(AuditLogs::ResourceId).big_integer().null())
                    .col(ColumnDef::new(AuditLogs::Details).text().null())
                    .col(ColumnDef::new(AuditLogs::IpAddress).string().null())
                    .col(ColumnDef::new(AuditLogs::CreatedAt).big_integer().not_null())
                    .foreign_key(&mut fk(
                        (AuditLogs::Table, AuditLogs::UserId),
                        (Users::Table, Users::Id),
                        ForeignKeyAction::SetNull,
                    ))
                    .to_owned(),
            )
            .await?;

        let indexes = [
            Index::create()
                .if_not_exists()
                .name("idx_fee_structures_unique")
                .table(FeeStructures::Table)
                .col(FeeStructures::ProgramId)
                .col(FeeStructures::AcademicYear)
                .col(FeeStructures::Semester)
                .unique()
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("idx_invoices_student")
                .table(Invoices::Table)
                .col(Invoices::StudentId)
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("idx_invoice_items_invoice")
                .table(InvoiceItems::Table)
                .col(InvoiceItems::InvoiceId)
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("idx_payments_invoice")
                .table(Payments::Table)
                .col(Payments::InvoiceId)
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("idx_loans_borrower_status")
                .table(Loans::Table)
                .col(Loans::BorrowerId)
                .col(Loans::Status)
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("idx_project_members_unique")
                .table(ProjectMembers::Table)
                .col(ProjectMembers::ProjectId)
                .col(ProjectMembers::UserId)
                .unique()
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("idx_notifications_recipient_read")
                .table(Notifications::Table)
                .col(Notifications::RecipientId)
                .col(Notifications::IsRead)
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("idx_audit_logs_created_at")
                .table(AuditLogs::Table)
                .col(AuditLogs::CreatedAt)
                .to_owned(),
        ];
        for index in indexes {
            manager.create_index(index).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuditLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ResearchProjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Loans::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LibraryItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(InvoiceItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Invoices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FeeStructures::Table).to_owned())
            .await?;
        Ok(())
    }
}

// 前一个迁移中已创建的表，仅用于外键引用
#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Programs {
    #[sea_orm(iden = "programs")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum FeeStructures {
    #[sea_orm(iden = "fee_structures")]
    Table,
    Id,
    ProgramId,
    AcademicYear,
    Semester,
    Amount,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Invoices {
    #[sea_orm(iden = "invoices")]
    Table,
    Id,
    InvoiceNumber,
    StudentId,
    FeeStructureId,
    Description,
    TotalAmount,
    AmountPaid,
    DueDate,
    Status,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum InvoiceItems {
    #[sea_orm(iden = "invoice_items")]
    Table,
    Id,
    InvoiceId,
    Description,
    Quantity,
    UnitAmount,
    Amount,
}

#[derive(DeriveIden)]
enum Payments {
    #[sea_orm(iden = "payments")]
    Table,
    Id,
    InvoiceId,
    StudentId,
    Amount,
    Method,
    Reference,
    ReceiptNumber,
    Status,
    RecordedBy,
    PaidAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum LibraryItems {
    #[sea_orm(iden = "library_items")]
    Table,
    Id,
    Isbn,
    Title,
    Author,
    Publisher,
    Category,
    PublicationYear,
    TotalCopies,
    AvailableCopies,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Loans {
    #[sea_orm(iden = "loans")]
    Table,
    Id,
    LibraryItemId,
    BorrowerId,
    IssuedBy,
    BorrowedAt,
    DueDate,
    ReturnedAt,
    Status,
    FineAmount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ResearchProjects {
    #[sea_orm(iden = "research_projects")]
    Table,
    Id,
    Title,
    Description,
    PrincipalInvestigatorId,
    Status,
    StartDate,
    EndDate,
    Budget,
    FundingSource,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProjectMembers {
    #[sea_orm(iden = "project_members")]
    Table,
    Id,
    ProjectId,
    UserId,
    MemberRole,
    JoinedAt,
}

#[derive(DeriveIden)]
enum Notifications {
    #[sea_orm(iden = "notifications")]
    Table,
    Id,
    RecipientId,
    Title,
    Message,
    Kind,
    IsRead,
    ReadAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AuditLogs {
    #[sea_orm(iden = "audit_logs")]
    Table,
    Id,
    UserId,
    Action,
    Resource,
    ResourceId,
    Details,
    IpAddress,
    CreatedAt,
}
