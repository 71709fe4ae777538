//! 存储抽象
//!
//! 按业务域拆分为多个子 trait，`Storage` 汇总全部子 trait，
//! 服务层通过 `Arc<dyn Storage>` 访问。调用具体方法时需要引入对应的子 trait。

use chrono::{DateTime, NaiveDate, Utc};

use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    assessments::{
        entities::{Assessment, AssessmentStatus},
        requests::{AssessmentListParams, CreateAssessmentRequest, UpdateAssessmentRequest},
    },
    attendance::{
        entities::{Attendance, AttendanceStatus},
        requests::{AttendanceEntry, AttendanceListParams},
    },
    audit_logs::{entities::AuditLog, requests::{AuditLogListParams, NewAuditLog}},
    class_sections::{
        entities::ClassSection,
        requests::{ClassSectionListParams, CreateClassSectionRequest, UpdateClassSectionRequest},
    },
    courses::{
        entities::Course,
        requests::{CourseListParams, CreateCourseRequest, UpdateCourseRequest},
    },
    departments::{
        entities::Department,
        requests::{CreateDepartmentRequest, DepartmentListParams, UpdateDepartmentRequest},
    },
    enrollments::{
        entities::{Enrollment, EnrollmentStatus},
        requests::EnrollmentListParams,
    },
    faculties::{
        entities::Faculty,
        requests::{CreateFacultyRequest, FacultyListParams, UpdateFacultyRequest},
    },
    finance::{
        entities::{
            FeeStructure, Invoice, InvoiceDetail, InvoiceStatus, Payment, StudentBalance,
        },
        requests::{
            CreateFeeStructureRequest, FeeStructureListParams, InvoiceListParams, NewInvoice,
            NewPayment, PaymentListParams, UpdateFeeStructureRequest,
        },
    },
    grades::{entities::Grade, requests::GradeListParams},
    lecturers::{
        entities::{Lecturer, LecturerDetail},
        requests::{LecturerListParams, NewLecturer, UpdateLecturerRequest},
    },
    library::{
        entities::{LibraryItem, Loan},
        requests::{
            CreateLibraryItemRequest, LibraryItemListParams, LoanListParams,
            UpdateLibraryItemRequest,
        },
    },
    notifications::{
        entities::Notification,
        requests::{CreateNotificationRequest, NotificationListParams},
    },
    programs::{
        entities::Program,
        requests::{CreateProgramRequest, ProgramListParams, UpdateProgramRequest},
    },
    research::{
        entities::{ProjectMember, ResearchProject, ResearchProjectDetail},
        requests::{
            CreateResearchProjectRequest, ResearchProjectListParams,
            UpdateResearchProjectRequest,
        },
    },
    students::{
        entities::{Student, StudentDetail},
        requests::{NewStudent, StudentListParams, UpdateStudentRequest},
    },
    users::{
        entities::{Profile, User, UserWithProfile},
        requests::{NewUser, UpdateProfileRequest, UpdateUserRequest, UserListParams},
    },
};

pub mod sea_orm_storage;

pub use sea_orm_storage::SeaOrmStorage;

#[async_trait::async_trait]
pub trait UserStorage: Send + Sync {
    // 创建用户并写入资料
    async fn create_user(&self, user: NewUser) -> Result<UserWithProfile>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn get_user_with_profile(&self, id: i64) -> Result<Option<UserWithProfile>>;
    async fn list_users(&self, params: UserListParams) -> Result<PaginatedResponse<UserWithProfile>>;
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn delete_user(&self, id: i64) -> Result<bool>;
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool>;

    /// 资料管理
    async fn get_profile(&self, user_id: i64) -> Result<Option<Profile>>;
    async fn update_profile(
        &self,
        user_id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Profile>>;

    /// 登录安全
    // 记录一次失败的登录，`locked_until` 非空时同时锁定账号
    async fn record_login_failure(
        &self,
        id: i64,
        attempts: i32,
        locked_until: Option<DateTime<Utc>>,
    ) -> Result<()>;
    // 登录成功：清零失败计数、解除锁定并记录登录时间
    async fn record_login_success(&self, id: i64) -> Result<()>;
}

#[async_trait::async_trait]
pub trait FacultyStorage: Send + Sync {
    async fn create_faculty(&self, faculty: CreateFacultyRequest) -> Result<Faculty>;
    async fn get_faculty_by_id(&self, id: i64) -> Result<Option<Faculty>>;
    async fn get_faculty_by_code(&self, code: &str) -> Result<Option<Faculty>>;
    async fn list_faculties(&self, params: FacultyListParams) -> Result<PaginatedResponse<Faculty>>;
    async fn update_faculty(&self, id: i64, update: UpdateFacultyRequest)
    -> Result<Option<Faculty>>;
    async fn delete_faculty(&self, id: i64) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait DepartmentStorage: Send + Sync {
    async fn create_department(&self, department: CreateDepartmentRequest) -> Result<Department>;
    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>>;
    async fn get_department_by_code(&self, code: &str) -> Result<Option<Department>>;
    async fn list_departments(
        &self,
        params: DepartmentListParams,
    ) -> Result<PaginatedResponse<Department>>;
    async fn update_department(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>>;
    async fn delete_department(&self, id: i64) -> Result<bool>;
    async fn count_departments_in_faculty(&self, faculty_id: i64) -> Result<u64>;
}

#[async_trait::async_trait]
pub trait ProgramStorage: Send + Sync {
    async fn create_program(&self, program: CreateProgramRequest) -> Result<Program>;
    async fn get_program_by_id(&self, id: i64) -> Result<Option<Program>>;
    async fn get_program_by_code(&self, code: &str) -> Result<Option<Program>>;
    async fn list_programs(&self, params: ProgramListParams) -> Result<PaginatedResponse<Program>>;
    async fn update_program(&self, id: i64, update: UpdateProgramRequest)
    -> Result<Option<Program>>;
    async fn delete_program(&self, id: i64) -> Result<bool>;
    async fn count_programs_in_department(&self, department_id: i64) -> Result<u64>;
}

#[async_trait::async_trait]
pub trait CourseStorage: Send + Sync {
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>>;
    async fn list_courses(&self, params: CourseListParams) -> Result<PaginatedResponse<Course>>;
    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>>;
    async fn delete_course(&self, id: i64) -> Result<bool>;
    async fn count_courses_in_program(&self, program_id: i64) -> Result<u64>;
}

#[async_trait::async_trait]
pub trait StudentStorage: Send + Sync {
    async fn create_student(&self, student: NewStudent) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_detail(&self, id: i64) -> Result<Option<StudentDetail>>;
    async fn list_students(&self, params: StudentListParams)
    -> Result<PaginatedResponse<StudentDetail>>;
    async fn update_student(&self, id: i64, update: UpdateStudentRequest)
    -> Result<Option<Student>>;
    // 某专业以 `suffix` 结尾的全部学号，用于生成下一个序号
    async fn student_numbers_with_suffix(&self, program_id: i64, suffix: &str)
    -> Result<Vec<String>>;
    async fn count_active_students_in_program(&self, program_id: i64) -> Result<u64>;
}

#[async_trait::async_trait]
pub trait LecturerStorage: Send + Sync {
    async fn create_lecturer(&self, lecturer: NewLecturer) -> Result<Lecturer>;
    async fn get_lecturer_by_id(&self, id: i64) -> Result<Option<Lecturer>>;
    async fn get_lecturer_by_staff_number(&self, staff_number: &str) -> Result<Option<Lecturer>>;
    async fn get_lecturer_detail(&self, id: i64) -> Result<Option<LecturerDetail>>;
    async fn list_lecturers(
        &self,
        params: LecturerListParams,
    ) -> Result<PaginatedResponse<LecturerDetail>>;
    async fn update_lecturer(
        &self,
        id: i64,
        update: UpdateLecturerRequest,
    ) -> Result<Option<Lecturer>>;
    async fn staff_numbers_with_prefix(&self, prefix: &str) -> Result<Vec<String>>;
    async fn count_lecturers_in_department(&self, department_id: i64) -> Result<u64>;
}

#[async_trait::async_trait]
pub trait ClassSectionStorage: Send + Sync {
    async fn create_class_section(&self, section: CreateClassSectionRequest)
    -> Result<ClassSection>;
    async fn get_class_section_by_id(&self, id: i64) -> Result<Option<ClassSection>>;
    // 按唯一组合（课程、班号、学年、学期）查找
    async fn find_class_section(
        &self,
        course_id: i64,
        section_code: &str,
        academic_year: &str,
        semester: i32,
    ) -> Result<Option<ClassSection>>;
    async fn list_class_sections(
        &self,
        params: ClassSectionListParams,
    ) -> Result<PaginatedResponse<ClassSection>>;
    async fn update_class_section(
        &self,
        id: i64,
        update: UpdateClassSectionRequest,
    ) -> Result<Option<ClassSection>>;
    async fn delete_class_section(&self, id: i64) -> Result<bool>;
    async fn count_class_sections_for_course(&self, course_id: i64) -> Result<u64>;
}

#[async_trait::async_trait]
pub trait EnrollmentStorage: Send + Sync {
    async fn create_enrollment(&self, student_id: i64, class_section_id: i64)
    -> Result<Enrollment>;
    async fn get_enrollment_by_id(&self, id: i64) -> Result<Option<Enrollment>>;
    async fn find_enrollment(
        &self,
        student_id: i64,
        class_section_id: i64,
    ) -> Result<Option<Enrollment>>;
    async fn set_enrollment_status(
        &self,
        id: i64,
        status: EnrollmentStatus,
    ) -> Result<Option<Enrollment>>;
    async fn list_enrollments(
        &self,
        params: EnrollmentListParams,
    ) -> Result<PaginatedResponse<Enrollment>>;
    async fn count_active_enrollments(&self, class_section_id: i64) -> Result<u64>;
    // 包含已退课的记录，用于删除前的依赖检查
    async fn count_enrollments_for_section(&self, class_section_id: i64) -> Result<u64>;
}

#[async_trait::async_trait]
pub trait AttendanceStorage: Send + Sync {
    // 同一班级、学生、日期只保留一条记录
    async fn upsert_attendance(
        &self,
        class_section_id: i64,
        date: NaiveDate,
        entry: AttendanceEntry,
        recorded_by: i64,
    ) -> Result<Attendance>;
    async fn list_attendance(
        &self,
        params: AttendanceListParams,
    ) -> Result<PaginatedResponse<Attendance>>;
    async fn attendance_statuses(
        &self,
        student_id: i64,
        class_section_id: Option<i64>,
    ) -> Result<Vec<AttendanceStatus>>;
}

#[async_trait::async_trait]
pub trait AssessmentStorage: Send + Sync {
    async fn create_assessment(
        &self,
        assessment: CreateAssessmentRequest,
        created_by: i64,
    ) -> Result<Assessment>;
    async fn get_assessment_by_id(&self, id: i64) -> Result<Option<Assessment>>;
    async fn list_assessments(
        &self,
        params: AssessmentListParams,
    ) -> Result<PaginatedResponse<Assessment>>;
    async fn update_assessment(
        &self,
        id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>>;
    async fn set_assessment_status(
        &self,
        id: i64,
        status: AssessmentStatus,
    ) -> Result<Option<Assessment>>;
    async fn delete_assessment(&self, id: i64) -> Result<bool>;
    async fn count_assessments_for_section(&self, class_section_id: i64) -> Result<u64>;
}

#[async_trait::async_trait]
pub trait GradeStorage: Send + Sync {
    // 同一考核、学生只保留一条成绩
    async fn upsert_grade(
        &self,
        assessment_id: i64,
        student_id: i64,
        score: f64,
        letter: &str,
        remarks: Option<String>,
        graded_by: i64,
    ) -> Result<Grade>;
    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>>;
    async fn list_grades(&self, params: GradeListParams) -> Result<PaginatedResponse<Grade>>;
    async fn count_grades_for_assessment(&self, assessment_id: i64) -> Result<u64>;
}

#[async_trait::async_trait]
pub trait FinanceStorage: Send + Sync {
    /// 收费标准
    async fn create_fee_structure(&self, fee: CreateFeeStructureRequest) -> Result<FeeStructure>;
    async fn get_fee_structure_by_id(&self, id: i64) -> Result<Option<FeeStructure>>;
    async fn find_fee_structure(
        &self,
        program_id: i64,
        academic_year: &str,
        semester: i32,
    ) -> Result<Option<FeeStructure>>;
    async fn list_fee_structures(
        &self,
        params: FeeStructureListParams,
    ) -> Result<PaginatedResponse<FeeStructure>>;
    async fn update_fee_structure(
        &self,
        id: i64,
        update: UpdateFeeStructureRequest,
    ) -> Result<Option<FeeStructure>>;
    async fn delete_fee_structure(&self, id: i64) -> Result<bool>;

    /// 账单
    // 依次写入账单与明细，金额由明细汇总
    async fn create_invoice(&self, invoice: NewInvoice) -> Result<InvoiceDetail>;
    async fn get_invoice_by_id(&self, id: i64) -> Result<Option<Invoice>>;
    async fn get_invoice_detail(&self, id: i64) -> Result<Option<InvoiceDetail>>;
    async fn list_invoices(&self, params: InvoiceListParams) -> Result<PaginatedResponse<Invoice>>;
    async fn invoice_numbers_with_prefix(&self, prefix: &str) -> Result<Vec<String>>;
    async fn count_invoices_for_fee_structure(&self, fee_structure_id: i64) -> Result<u64>;
    // 原子地累加已付金额并刷新状态；会超出应付总额或账单已取消时返回 None
    async fn apply_invoice_payment(&self, id: i64, amount: f64) -> Result<Option<Invoice>>;
    async fn set_invoice_status(&self, id: i64, status: InvoiceStatus) -> Result<Option<Invoice>>;
    async fn student_balance(&self, student_id: i64) -> Result<StudentBalance>;

    /// 缴费
    async fn create_payment(&self, payment: NewPayment) -> Result<Payment>;
    async fn get_payment_by_id(&self, id: i64) -> Result<Option<Payment>>;
    async fn get_payment_by_reference(&self, reference: &str) -> Result<Option<Payment>>;
    async fn list_payments(&self, params: PaymentListParams) -> Result<PaginatedResponse<Payment>>;
}

#[async_trait::async_trait]
pub trait LibraryStorage: Send + Sync {
    /// 馆藏
    async fn create_library_item(&self, item: CreateLibraryItemRequest) -> Result<LibraryItem>;
    async fn get_library_item_by_id(&self, id: i64) -> Result<Option<LibraryItem>>;
    async fn get_library_item_by_isbn(&self, isbn: &str) -> Result<Option<LibraryItem>>;
    async fn list_library_items(
        &self,
        params: LibraryItemListParams,
    ) -> Result<PaginatedResponse<LibraryItem>>;
    // `available_copies` 由服务层根据在借数量计算后传入
    async fn update_library_item(
        &self,
        id: i64,
        update: UpdateLibraryItemRequest,
        available_copies: Option<i32>,
    ) -> Result<Option<LibraryItem>>;
    async fn delete_library_item(&self, id: i64) -> Result<bool>;
    // 条件更新可借数量，越界时返回 false
    async fn adjust_available_copies(&self, id: i64, delta: i32) -> Result<bool>;

    /// 借阅
    async fn create_loan(
        &self,
        library_item_id: i64,
        borrower_id: i64,
        issued_by: Option<i64>,
        due_date: NaiveDate,
    ) -> Result<Loan>;
    async fn get_loan_by_id(&self, id: i64) -> Result<Option<Loan>>;
    async fn list_loans(&self, params: LoanListParams) -> Result<PaginatedResponse<Loan>>;
    async fn return_loan(&self, id: i64, fine_amount: f64) -> Result<Option<Loan>>;
    async fn count_active_loans_for_borrower(&self, borrower_id: i64) -> Result<u64>;
    async fn count_loans_for_item(&self, library_item_id: i64) -> Result<u64>;
}

#[async_trait::async_trait]
pub trait ResearchStorage: Send + Sync {
    async fn create_project(
        &self,
        project: CreateResearchProjectRequest,
        principal_investigator_id: i64,
    ) -> Result<ResearchProject>;
    async fn get_project_by_id(&self, id: i64) -> Result<Option<ResearchProject>>;
    async fn get_project_detail(&self, id: i64) -> Result<Option<ResearchProjectDetail>>;
    async fn list_projects(
        &self,
        params: ResearchProjectListParams,
    ) -> Result<PaginatedResponse<ResearchProject>>;
    async fn update_project(
        &self,
        id: i64,
        update: UpdateResearchProjectRequest,
    ) -> Result<Option<ResearchProject>>;
    async fn delete_project(&self, id: i64) -> Result<bool>;

    /// 项目成员
    async fn add_project_member(
        &self,
        project_id: i64,
        user_id: i64,
        member_role: &str,
    ) -> Result<ProjectMember>;
    async fn find_project_member(
        &self,
        project_id: i64,
        user_id: i64,
    ) -> Result<Option<ProjectMember>>;
    async fn remove_project_member(&self, project_id: i64, user_id: i64) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait NotificationStorage: Send + Sync {
    async fn create_notification(
        &self,
        notification: CreateNotificationRequest,
    ) -> Result<Notification>;
    async fn get_notification_by_id(&self, id: i64) -> Result<Option<Notification>>;
    async fn list_notifications(
        &self,
        params: NotificationListParams,
    ) -> Result<PaginatedResponse<Notification>>;
    async fn mark_notification_read(&self, id: i64) -> Result<Option<Notification>>;
    async fn mark_all_notifications_read(&self, recipient_id: i64) -> Result<u64>;
    async fn count_unread_notifications(&self, recipient_id: i64) -> Result<u64>;
}

#[async_trait::async_trait]
pub trait AuditLogStorage: Send + Sync {
    async fn create_audit_log(&self, log: NewAuditLog) -> Result<AuditLog>;
    async fn list_audit_logs(&self, params: AuditLogListParams)
    -> Result<PaginatedResponse<AuditLog>>;
}

/// 全部存储能力
#[async_trait::async_trait]
pub trait Storage:
    UserStorage
    + FacultyStorage
    + DepartmentStorage
    + ProgramStorage
    + CourseStorage
    + StudentStorage
    + LecturerStorage
    + ClassSectionStorage
    + EnrollmentStorage
    + AttendanceStorage
    + AssessmentStorage
    + GradeStorage
    + FinanceStorage
    + LibraryStorage
    + ResearchStorage
    + NotificationStorage
    + AuditLogStorage
    + Send
    + Sync
{
    // 数据库连通性检查
    async fn ping(&self) -> Result<()>;
}
