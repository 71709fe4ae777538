//! 预导入模块，方便使用

pub use super::assessments::{
    ActiveModel as AssessmentActiveModel, Entity as Assessments, Model as AssessmentModel,
};
pub use super::attendance::{
    ActiveModel as AttendanceActiveModel, Entity as AttendanceRecords, Model as AttendanceModel,
};
pub use super::audit_logs::{
    ActiveModel as AuditLogActiveModel, Entity as AuditLogs, Model as AuditLogModel,
};
pub use super::class_sections::{
    ActiveModel as ClassSectionActiveModel, Entity as ClassSections, Model as ClassSectionModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::departments::{
    ActiveModel as DepartmentActiveModel, Entity as Departments, Model as DepartmentModel,
};
pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::faculties::{
    ActiveModel as FacultyActiveModel, Entity as Faculties, Model as FacultyModel,
};
pub use super::fee_structures::{
    ActiveModel as FeeStructureActiveModel, Entity as FeeStructures, Model as FeeStructureModel,
};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::invoice_items::{
    ActiveModel as InvoiceItemActiveModel, Entity as InvoiceItems, Model as InvoiceItemModel,
};
pub use super::invoices::{
    ActiveModel as InvoiceActiveModel, Entity as Invoices, Model as InvoiceModel,
};
pub use super::lecturers::{
    ActiveModel as LecturerActiveModel, Entity as Lecturers, Model as LecturerModel,
};
pub use super::library_items::{
    ActiveModel as LibraryItemActiveModel, Entity as LibraryItems, Model as LibraryItemModel,
};
pub use super::loans::{ActiveModel as LoanActiveModel, Entity as Loans, Model as LoanModel};
pub use super::notifications::{
    ActiveModel as NotificationActiveModel, Entity as Notifications, Model as NotificationModel,
};
pub use super::payments::{
    ActiveModel as PaymentActiveModel, Entity as Payments, Model as PaymentModel,
};
pub use super::profiles::{
    ActiveModel as ProfileActiveModel, Entity as Profiles, Model as ProfileModel,
};
pub use super::programs::{
    ActiveModel as ProgramActiveModel, Entity as Programs, Model as ProgramModel,
};
pub use super::project_members::{
    ActiveModel as ProjectMemberActiveModel, Entity as ProjectMembers, Model as ProjectMemberModel,
};
pub use super::research_projects::{
    ActiveModel as ResearchProjectActiveModel, Entity as ResearchProjects,
    Model as ResearchProjectModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
