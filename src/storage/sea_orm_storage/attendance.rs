//! 考勤存储操作

use super::SeaOrmStorage;
use crate::entity::attendance::Column;
use crate::entity::format_date;
use crate::entity::prelude::{AttendanceActiveModel, AttendanceRecords};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    attendance::{
        entities::{Attendance, AttendanceStatus},
        requests::{AttendanceEntry, AttendanceListParams},
    },
};
use crate::storage::AttendanceStorage;
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

#[async_trait::async_trait]
impl AttendanceStorage for SeaOrmStorage {
    async fn upsert_attendance(
        &self,
        class_section_id: i64,
        date: NaiveDate,
        entry: AttendanceEntry,
        recorded_by: i64,
    ) -> Result<Attendance> {
        let now = chrono::Utc::now().timestamp();
        let date = format_date(date);

        let existing = AttendanceRecords::find()
            .filter(Column::ClassSectionId.eq(class_section_id))
            .filter(Column::StudentId.eq(entry.student_id))
            .filter(Column::Date.eq(date.as_str()))
            .one(&self.db)
            .await?;

        // 同一天重复提交时覆盖原记录
        let saved = match existing {
            Some(record) => {
                let mut model: AttendanceActiveModel = record.into();
                model.status = Set(entry.status.to_string());
                model.remarks = Set(entry.remarks);
                model.recorded_by = Set(recorded_by);
                model.updated_at = Set(now);
                model.update(&self.db).await?
            }
            None => {
                AttendanceActiveModel {
                    class_section_id: Set(class_section_id),
                    student_id: Set(entry.student_id),
                    date: Set(date),
                    status: Set(entry.status.to_string()),
                    remarks: Set(entry.remarks),
                    recorded_by: Set(recorded_by),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await?
            }
        };

        Ok(saved.into_attendance())
    }

    async fn list_attendance(
        &self,
        params: AttendanceListParams,
    ) -> Result<PaginatedResponse<Attendance>> {
        let mut select = AttendanceRecords::find();

        if let Some(class_section_id) = params.class_section_id {
            select = select.filter(Column::ClassSectionId.eq(class_section_id));
        }
        if let Some(student_id) = params.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(status) = params.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        // 日期以 YYYY-MM-DD 存储，字符串比较即日期比较
        if let Some(from) = params.date_from {
            select = select.filter(Column::Date.gte(format_date(from)));
        }
        if let Some(to) = params.date_to {
            select = select.filter(Column::Date.lte(format_date(to)));
        }

        let select = select
            .order_by_desc(Column::Date)
            .order_by_asc(Column::StudentId);
        self.paginate(select, &params.pagination, |m| m.into_attendance())
            .await
    }

    async fn attendance_statuses(
        &self,
        student_id: i64,
        class_section_id: Option<i64>,
    ) -> Result<Vec<AttendanceStatus>> {
        let mut select = AttendanceRecords::find()
            .select_only()
            .column(Column::Status)
            .filter(Column::StudentId.eq(student_id));

        if let Some(class_section_id) = class_section_id {
            select = select.filter(Column::ClassSectionId.eq(class_section_id));
        }

        let statuses: Vec<String> = select.into_tuple().all(&self.db).await?;
        Ok(statuses
            .iter()
            .filter_map(|s| s.parse::<AttendanceStatus>().ok())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::prelude::{
        ClassSectionActiveModel, CourseActiveModel, DepartmentActiveModel, FacultyActiveModel,
        ProgramActiveModel, StudentActiveModel, UserActiveModel,
    };

    // 直接写入最小的外键链：学院 → 系 → 专业 → 课程 → 班级，以及一名学生和一名教师用户
    async fn seed(storage: &SeaOrmStorage) -> (i64, i64, i64) {
        let db = &storage.db;
        let now = chrono::Utc::now().timestamp();
        let user = |email: &str, role: &str| UserActiveModel {
            email: Set(email.to_string()),
            password_hash: Set("x".into()),
            role: Set(role.into()),
            status: Set("active".into()),
            failed_login_attempts: Set(0),
            locked_until: Set(None),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let lecturer = user("lec@campus.local", "LECTURER").insert(db).await.unwrap();
        let student = user("stu@campus.local", "STUDENT").insert(db).await.unwrap();

        let faculty = FacultyActiveModel {
            code: Set("FE".into()),
            name: Set("Engineering".into()),
            description: Set(None),
            dean_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        let department = DepartmentActiveModel {
            faculty_id: Set(faculty.id),
            code: Set("EE".into()),
            name: Set("Electrical".into()),
            description: Set(None),
            head_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        let program = ProgramActiveModel {
            department_id: Set(department.id),
            code: Set("DEE".into()),
            name: Set("Diploma in Electrical".into()),
            level: Set("diploma".into()),
            duration_years: Set(3),
            description: Set(None),
            status: Set("active".into()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        StudentActiveModel {
            id: Set(student.id),
            student_number: Set("DEE/0001/2025".into()),
            program_id: Set(program.id),
            admission_date: Set("2025-01-06".into()),
            year_of_study: Set(1),
            status: Set("active".into()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
        .unwrap();
        let course = CourseActiveModel {
            program_id: Set(program.id),
            lecturer_id: Set(None),
            code: Set("DEE101".into()),
            title: Set("Circuits".into()),
            description: Set(None),
            credits: Set(3),
            semester: Set(1),
            status: Set("active".into()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        let section = ClassSectionActiveModel {
            course_id: Set(course.id),
            lecturer_id: Set(lecturer.id),
            section_code: Set("A".into()),
            academic_year: Set("2025/2026".into()),
            semester: Set(1),
            capacity: Set(30),
            room: Set(None),
            schedule: Set(None),
            status: Set("open".into()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        (section.id, student.id, lecturer.id)
    }

    #[actix_web::test]
    async fn test_same_day_is_overwritten() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let (section_id, student_id, lecturer_id) = seed(&storage).await;
        let day = NaiveDate::from_ymd_opt(2025, 9, 8).unwrap();

        let first = storage
            .upsert_attendance(
                section_id,
                day,
                AttendanceEntry {
                    student_id,
                    status: AttendanceStatus::Absent,
                    remarks: None,
                },
                lecturer_id,
            )
            .await
            .unwrap();
        let second = storage
            .upsert_attendance(
                section_id,
                day,
                AttendanceEntry {
                    student_id,
                    status: AttendanceStatus::Late,
                    remarks: Some("bus delay".into()),
                },
                lecturer_id,
            )
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.status, AttendanceStatus::Late);

        let statuses = storage
            .attendance_statuses(student_id, Some(section_id))
            .await
            .unwrap();
        assert_eq!(statuses, vec![AttendanceStatus::Late]);
    }

    #[actix_web::test]
    async fn test_date_range_filter() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let (section_id, student_id, lecturer_id) = seed(&storage).await;
        for day in [1, 8, 15] {
            storage
                .upsert_attendance(
                    section_id,
                    NaiveDate::from_ymd_opt(2025, 9, day).unwrap(),
                    AttendanceEntry {
                        student_id,
                        status: AttendanceStatus::Present,
                        remarks: None,
                    },
                    lecturer_id,
                )
                .await
                .unwrap();
        }

        let page = storage
            .list_attendance(AttendanceListParams {
                date_from: NaiveDate::from_ymd_opt(2025, 9, 2),
                date_to: NaiveDate::from_ymd_opt(2025, 9, 15),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 2);
        assert_eq!(page.items[0].date, NaiveDate::from_ymd_opt(2025, 9, 15).unwrap());
    }
}
