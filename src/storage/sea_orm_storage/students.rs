//! 学生档案存储操作
//!
//! 学生与用户共用主键，邮箱与资料从 users / profiles 批量补齐。

use super::{SeaOrmStorage, people_matching, search_pattern};
use crate::entity::format_date;
use crate::entity::prelude::{StudentActiveModel, StudentModel, Students};
use crate::entity::students::Column;
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    students::{
        entities::{Student, StudentDetail, StudentStatus},
        requests::{NewStudent, StudentListParams, UpdateStudentRequest},
    },
};
use crate::storage::StudentStorage;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    // 为一组学生补齐邮箱与资料
    async fn attach_student_people(&self, students: Vec<Student>) -> Result<Vec<StudentDetail>> {
        let ids: Vec<i64> = students.iter().map(|s| s.id).collect();
        let (mut emails, mut profiles) = self.load_people(&ids).await?;

        Ok(students
            .into_iter()
            .map(|student| StudentDetail {
                email: emails.remove(&student.id).unwrap_or_default(),
                profile: profiles.remove(&student.id),
                student,
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl StudentStorage for SeaOrmStorage {
    async fn create_student(&self, req: NewStudent) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = StudentActiveModel {
            id: Set(req.user_id),
            student_number: Set(req.student_number),
            program_id: Set(req.program_id),
            admission_date: Set(format_date(req.admission_date)),
            year_of_study: Set(req.year_of_study),
            status: Set(StudentStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(model.insert(&self.db).await?.into_student())
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_student()))
    }

    async fn get_student_detail(&self, id: i64) -> Result<Option<StudentDetail>> {
        let Some(student) = self.get_student_by_id(id).await? else {
            return Ok(None);
        };
        Ok(self.attach_student_people(vec![student]).await?.pop())
    }

    async fn list_students(
        &self,
        params: StudentListParams,
    ) -> Result<PaginatedResponse<StudentDetail>> {
        let mut select = Students::find();

        if let Some(program_id) = params.program_id {
            select = select.filter(Column::ProgramId.eq(program_id));
        }
        if let Some(year) = params.year_of_study {
            select = select.filter(Column::YearOfStudy.eq(year));
        }
        if let Some(status) = params.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 学号、邮箱或姓名
        if let Some(pattern) = search_pattern(params.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(Column::StudentNumber.contains(&pattern))
                    .add(people_matching(Column::Id, &pattern)),
            );
        }

        let select = select.order_by_asc(Column::StudentNumber);
        let page = self
            .paginate(select, &params.pagination, StudentModel::into_student)
            .await?;

        let details = self.attach_student_people(page.items).await?;
        Ok(PaginatedResponse::new(details, page.pagination))
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        if Students::find_by_id(id).one(&self.db).await?.is_none() {
            return Ok(None);
        }

        let mut model = StudentActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(program_id) = update.program_id {
            model.program_id = Set(program_id);
        }
        if let Some(year) = update.year_of_study {
            model.year_of_study = Set(year);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        Ok(Some(model.update(&self.db).await?.into_student()))
    }

    async fn student_numbers_with_suffix(
        &self,
        program_id: i64,
        suffix: &str,
    ) -> Result<Vec<String>> {
        Ok(Students::find()
            .select_only()
            .column(Column::StudentNumber)
            .filter(Column::ProgramId.eq(program_id))
            .filter(Column::StudentNumber.ends_with(suffix))
            .into_tuple()
            .all(&self.db)
            .await?)
    }

    async fn count_active_students_in_program(&self, program_id: i64) -> Result<u64> {
        Ok(Students::find()
            .filter(Column::ProgramId.eq(program_id))
            .filter(Column::Status.eq(StudentStatus::Active.to_string()))
            .count(&self.db)
            .await?)
    }
}
