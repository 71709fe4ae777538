use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 自增主键
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
        // 用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk(Users::Id))
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(
                        ColumnDef::new(Users::FailedLoginAttempts)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Users::LockedUntil).big_integer().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 用户资料表（一对一）
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(pk(Profiles::Id))
                    .col(
                        ColumnDef::new(Profiles::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Profiles::FirstName).string().not_null())
                    .col(ColumnDef::new(Profiles::LastName).string().not_null())
                    .col(ColumnDef::new(Profiles::Phone).string().null())
                    .col(ColumnDef::new(Profiles::Gender).string().null())
                    .col(ColumnDef::new(Profiles::DateOfBirth).string().null())
                    .col(ColumnDef::new(Profiles::Address).string().null())
                    .col(ColumnDef::new(Profiles::AvatarUrl).string().null())
                    .col(ColumnDef::new(Profiles::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Profiles::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut fk(
                        (Profiles::Table, Profiles::UserId),
                        (Users::Table, Users::Id),
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        // 学院表
        manager
            .create_table(
                Table::create()
                    .table(Faculties::Table)
                    .if_not_exists()
                    .col(pk(Faculties::Id))
                    .col(
                        ColumnDef::new(Faculties::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Faculties::Name).string().not_null())
                    .col(ColumnDef::new(Faculties::Description).text().null())
                    .col(ColumnDef::new(Faculties::DeanId).big_integer().null())
                    .col(ColumnDef::new(Faculties::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Faculties::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut fk(
                        (Faculties::Table, Faculties::DeanId),
                        (Users::Table, Users::Id),
                        ForeignKeyAction::SetNull,
                    ))
                    .to_owned(),
            )
            .await?;

        // 系表
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(pk(Departments::Id))
                    .col(
                        ColumnDef::new(Departments::FacultyId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Departments::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Departments::Name).string().not_null())
                    .col(ColumnDef::new(Departments::Description).text().null())
                    .col(ColumnDef::new(Departments::HeadId).big_integer().null())
                    .col(
                        ColumnDef::new(Departments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Departments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(&mut fk(
                        (Departments::Table, Departments::FacultyId),
                        (Faculties::Table, Faculties::Id),
                        ForeignKeyAction::Restrict,
                    ))
                    .foreign_key(&mut fk(
                        (Departments::Table, Departments::HeadId),
                        (Users::Table, Users::Id),
                        ForeignKeyAction::SetNull,
                    ))
                    .to_owned(),
            )
            .await?;

        // 专业表
        manager
            .create_table(
                Table::create()
                    .table(Programs::Table)
                    .if_not_exists()
                    .col(pk(Programs::Id))
                    .col(
                        ColumnDef::new(Programs::DepartmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Programs::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Programs::Name).string().not_null())
                    .col(ColumnDef::new(Programs::Level).string().not_null())
                    .col(ColumnDef::new(Programs::DurationYears).integer().not_null())
                    .col(ColumnDef::new(Programs::Description).text().null())
                    .col(ColumnDef::new(Programs::Status).string().not_null())
                    .col(ColumnDef::new(Programs::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Programs::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut fk(
                        (Programs::Table, Programs::DepartmentId),
                        (Departments::Table, Departments::Id),
                        ForeignKeyAction::Restrict,
                    ))
                    .to_owned(),
            )
            .await?;

        // 讲师档案表（主键即用户 ID）
        manager
            .create_table(
                Table::create()
                    .table(Lecturers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lecturers::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Lecturers::StaffNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Lecturers::DepartmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Lecturers::Specialization).string().null())
                    .col(ColumnDef::new(Lecturers::HireDate).string().null())
                    .col(ColumnDef::new(Lecturers::Status).string().not_null())
                    .col(ColumnDef::new(Lecturers::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Lecturers::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut fk(
                        (Lecturers::Table, Lecturers::Id),
                        (Users::Table, Users::Id),
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut fk(
                        (Lecturers::Table, Lecturers::DepartmentId),
                        (Departments::Table, Departments::Id),
                        ForeignKeyAction::Restrict,
                    ))
                    .to_owned(),
            )
            .await?;

        // 学生档案表（主键即用户 ID）
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Students::StudentNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::ProgramId).big_integer().not_null())
                    .col(ColumnDef::new(Students::AdmissionDate).string().not_null())
                    .col(ColumnDef::new(Students::YearOfStudy).integer().not_null())
                    .col(ColumnDef::new(Students::Status).string().not_null())
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut fk(
                        (Students::Table, Students::Id),
                        (Users::Table, Users::Id),
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut fk(
                        (Students::Table, Students::ProgramId),
                        (Programs::Table, Programs::Id),
                        ForeignKeyAction::Restrict,
                    ))
                    .to_owned(),
            )
            .await?;

        // 课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(pk(Courses::Id))
                    .col(ColumnDef::new(Courses::ProgramId).big_integer().not_null())
                    .col(ColumnDef::new(Courses::LecturerId).big_integer().null())
                    .col(
                        ColumnDef::new(Courses::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Courses::Title).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text().null())
                    .col(ColumnDef::new(Courses::Credits).integer().not_null())
                    .col(ColumnDef::new(Courses::Semester).integer().not_null())
                    .col(ColumnDef::new(Courses::Status).string().not_null())
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut fk(
                        (Courses::Table, Courses::ProgramId),
                        (Programs::Table, Programs::Id),
                        ForeignKeyAction::Restrict,
                    ))
                    .foreign_key(&mut fk(
                        (Courses::Table, Courses::LecturerId),
                        (Lecturers::Table, Lecturers::Id),
                        ForeignKeyAction::SetNull,
                    ))
                    .to_owned(),
            )
            .await?;

        // 教学班表
        manager
            .create_table(
                Table::create()
                    .table(ClassSections::Table)
                    .if_not_exists()
                    .col(pk(ClassSections::Id))
                    .col(
                        ColumnDef::new(ClassSections::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassSections::LecturerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClassSections::SectionCode).string().not_null())
                    .col(
                        ColumnDef::new(ClassSections::AcademicYear)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClassSections::Semester).integer().not_null())
                    .col(ColumnDef::new(ClassSections::Capacity).integer().not_null())
                    .col(ColumnDef::new(ClassSections::Room).string().null())
                    .col(ColumnDef::new(ClassSections::Schedule).string().null())
                    .col(ColumnDef::new(ClassSections::Status).string().not_null())
                    .col(
                        ColumnDef::new(ClassSections::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassSections::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(&mut fk(
                        (ClassSections::Table, ClassSections::CourseId),
                        (Courses::Table, Courses::Id),
                        ForeignKeyAction::Restrict,
                    ))
                    .foreign_key(&mut fk(
                        (ClassSections::Table, ClassSections::LecturerId),
                        (Lecturers::Table, Lecturers::Id),
                        ForeignKeyAction::Restrict,
                    ))
                    .to_owned(),
            )
            .await?;

        // 选课表
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(pk(Enrollments::Id))
                    .col(
                        ColumnDef::new(Enrollments::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::ClassSectionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Enrollments::Status).string().not_null())
                    .col(
                        ColumnDef::new(Enrollments::EnrolledAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(&mut fk(
                        (Enrollments::Table, Enrollments::StudentId),
                        (Students::Table, Students::Id),
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut fk(
                        (Enrollments::Table, Enrollments::ClassSectionId),
                        (ClassSections::Table, ClassSections::Id),
                        ForeignKeyAction::Restrict,
                    ))
                    .to_owned(),
            )
            .await?;

        // 考勤表
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(pk(Attendance::Id))
                    .col(
                        ColumnDef::new(Attendance::ClassSectionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Attendance::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Attendance::Date).string().not_null())
                    .col(ColumnDef::new(Attendance::Status).string().not_null())
                    .col(ColumnDef::new(Attendance::Remarks).string().null())
                    .col(
                        ColumnDef::new(Attendance::RecordedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Attendance::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Attendance::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut fk(
                        (Attendance::Table, Attendance::ClassSectionId),
                        (ClassSections::Table, ClassSections::Id),
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut fk(
                        (Attendance::Table, Attendance::StudentId),
                        (Students::Table, Students::Id),
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        // 评估表
        manager
            .create_table(
                Table::create()
                    .table(Assessments::Table)
                    .if_not_exists()
                    .col(pk(Assessments::Id))
                    .col(
                        ColumnDef::new(Assessments::ClassSectionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assessments::Title).string().not_null())
                    .col(ColumnDef::new(Assessments::Description).text().null())
                    .col(ColumnDef::new(Assessments::Kind).string().not_null())
                    .col(ColumnDef::new(Assessments::MaxScore).double().not_null())
                    .col(ColumnDef::new(Assessments::Weight).double().not_null())
                    .col(ColumnDef::new(Assessments::DueDate).string().null())
                    .col(ColumnDef::new(Assessments::Status).string().not_null())
                    .col(
                        ColumnDef::new(Assessments::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assessments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assessments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(&mut fk(
                        (Assessments::Table, Assessments::ClassSectionId),
                        (ClassSections::Table, ClassSections::Id),
                        ForeignKeyAction::Restrict,
                    ))
                    .to_owned(),
            )
            .await?;

        // 成绩表
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(pk(Grades::Id))
                    .col(ColumnDef::new(Grades::AssessmentId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::Score).double().not_null())
                    .col(ColumnDef::new(Grades::Letter).string().not_null())
                    .col(ColumnDef::new(Grades::Remarks).string().null())
                    .col(ColumnDef::new(Grades::GradedBy).big_integer().not_null())
                    .col(ColumnDef::new(Grades::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Grades::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut fk(
                        (Grades::Table, Grades::AssessmentId),
                        (Assessments::Table, Assessments::Id),
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut fk(
                        (Grades::Table, Grades::StudentId),
                        (Students::Table, Students::Id),
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        // 索引
        let indexes = [
            Index::create()
                .if_not_exists()
                .name("idx_users_role")
                .table(Users::Table)
                .col(Users::Role)
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("idx_departments_faculty")
                .table(Departments::Table)
                .col(Departments::FacultyId)
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("idx_programs_department")
                .table(Programs::Table)
                .col(Programs::DepartmentId)
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("idx_courses_program")
                .table(Courses::Table)
                .col(Courses::ProgramId)
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("idx_students_program")
                .table(Students::Table)
                .col(Students::ProgramId)
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("idx_class_sections_unique")
                .table(ClassSections::Table)
                .col(ClassSections::CourseId)
                .col(ClassSections::SectionCode)
                .col(ClassSections::AcademicYear)
                .col(ClassSections::Semester)
                .unique()
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("idx_enrollments_unique")
                .table(Enrollments::Table)
                .col(Enrollments::StudentId)
                .col(Enrollments::ClassSectionId)
                .unique()
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("idx_attendance_unique")
                .table(Attendance::Table)
                .col(Attendance::ClassSectionId)
                .col(Attendance::StudentId)
                .col(Attendance::Date)
                .unique()
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("idx_assessments_section")
                .table(Assessments::Table)
                .col(Assessments::ClassSectionId)
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("idx_grades_unique")
                .table(Grades::Table)
                .col(Grades::AssessmentId)
                .col(Grades::StudentId)
                .unique()
                .to_owned(),
        ];
        for index in indexes {
            manager.create_index(index).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assessments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClassSections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Lecturers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Programs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Faculties::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Email,
    PasswordHash,
    Role,
    Status,
    FailedLoginAttempts,
    LockedUntil,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Profiles {
    #[sea_orm(iden = "profiles")]
    Table,
    Id,
    UserId,
    FirstName,
    LastName,
    Phone,
    Gender,
    DateOfBirth,
    Address,
    AvatarUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Faculties {
    #[sea_orm(iden = "faculties")]
    Table,
    Id,
    Code,
    Name,
    Description,
    DeanId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Departments {
    #[sea_orm(iden = "departments")]
    Table,
    Id,
    FacultyId,
    Code,
    Name,
    Description,
    HeadId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Programs {
    #[sea_orm(iden = "programs")]
    Table,
    Id,
    DepartmentId,
    Code,
    Name,
    Level,
    DurationYears,
    Description,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Lecturers {
    #[sea_orm(iden = "lecturers")]
    Table,
    Id,
    StaffNumber,
    DepartmentId,
    Specialization,
    HireDate,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    StudentNumber,
    ProgramId,
    AdmissionDate,
    YearOfStudy,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    ProgramId,
    LecturerId,
    Code,
    Title,
    Description,
    Credits,
    Semester,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ClassSections {
    #[sea_orm(iden = "class_sections")]
    Table,
    Id,
    CourseId,
    LecturerId,
    SectionCode,
    AcademicYear,
    Semester,
    Capacity,
    Room,
    Schedule,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Enrollments {
    #[sea_orm(iden = "enrollments")]
    Table,
    Id,
    StudentId,
    ClassSectionId,
    Status,
    EnrolledAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Attendance {
    #[sea_orm(iden = "attendance")]
    Table,
    Id,
    ClassSectionId,
    StudentId,
    Date,
    Status,
    Remarks,
    RecordedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Assessments {
    #[sea_orm(iden = "assessments")]
    Table,
    Id,
    ClassSectionId,
    Title,
    Description,
    Kind,
    MaxScore,
    Weight,
    DueDate,
    Status,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Grades {
    #[sea_orm(iden = "grades")]
    Table,
    Id,
    AssessmentId,
    StudentId,
    Score,
    Letter,
    Remarks,
    GradedBy,
    CreatedAt,
    UpdatedAt,
}
