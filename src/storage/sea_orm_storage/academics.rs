//! 学院、系、专业与课程存储操作

use super::{SeaOrmStorage, delete_conflict, search_pattern};
use crate::entity::prelude::{
    CourseActiveModel, Courses, DepartmentActiveModel, Departments, FacultyActiveModel, Faculties,
    ProgramActiveModel, Programs,
};
use crate::entity::{courses, departments, faculties, programs};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    courses::{
        entities::{Course, CourseStatus},
        requests::{CourseListParams, CreateCourseRequest, UpdateCourseRequest},
    },
    departments::{
        entities::Department,
        requests::{CreateDepartmentRequest, DepartmentListParams, UpdateDepartmentRequest},
    },
    faculties::{
        entities::Faculty,
        requests::{CreateFacultyRequest, FacultyListParams, UpdateFacultyRequest},
    },
    programs::{
        entities::{Program, ProgramStatus},
        requests::{CreateProgramRequest, ProgramListParams, UpdateProgramRequest},
    },
};
use crate::storage::{CourseStorage, DepartmentStorage, FacultyStorage, ProgramStorage};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

#[async_trait::async_trait]
impl FacultyStorage for SeaOrmStorage {
    async fn create_faculty(&self, req: CreateFacultyRequest) -> Result<Faculty> {
        let now = chrono::Utc::now().timestamp();

        let model = FacultyActiveModel {
            code: Set(req.code),
            name: Set(req.name),
            description: Set(req.description),
            dean_id: Set(req.dean_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?.into_faculty())
    }

    async fn get_faculty_by_id(&self, id: i64) -> Result<Option<Faculty>> {
        let result = Faculties::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_faculty()))
    }

    async fn get_faculty_by_code(&self, code: &str) -> Result<Option<Faculty>> {
        let result = Faculties::find()
            .filter(faculties::Column::Code.eq(code))
            .one(&self.db)
            .await?;
        Ok(result.map(|m| m.into_faculty()))
    }

    async fn list_faculties(&self, params: FacultyListParams) -> Result<PaginatedResponse<Faculty>> {
        use faculties::Column;

        let mut select = Faculties::find();

        if let Some(dean_id) = params.dean_id {
            select = select.filter(Column::DeanId.eq(dean_id));
        }

        if let Some(pattern) = search_pattern(params.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(Column::Code.contains(&pattern))
                    .add(Column::Name.contains(&pattern)),
            );
        }

        let select = select.order_by_asc(Column::Code);
        self.paginate(select, &params.pagination, |m| m.into_faculty())
            .await
    }

    async fn update_faculty(
        &self,
        id: i64,
        update: UpdateFacultyRequest,
    ) -> Result<Option<Faculty>> {
        if Faculties::find_by_id(id).one(&self.db).await?.is_none() {
            return Ok(None);
        }

        let mut model = FacultyActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(code) = update.code {
            model.code = Set(code);
        }
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(dean_id) = update.dean_id {
            model.dean_id = Set(Some(dean_id));
        }

        Ok(Some(model.update(&self.db).await?.into_faculty()))
    }

    async fn delete_faculty(&self, id: i64) -> Result<bool> {
        let result = Faculties::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(delete_conflict("Faculty"))?;
        Ok(result.rows_affected > 0)
    }
}

#[async_trait::async_trait]
impl DepartmentStorage for SeaOrmStorage {
    async fn create_department(&self, req: CreateDepartmentRequest) -> Result<Department> {
        let now = chrono::Utc::now().timestamp();

        let model = DepartmentActiveModel {
            faculty_id: Set(req.faculty_id),
            code: Set(req.code),
            name: Set(req.name),
            description: Set(req.description),
            head_id: Set(req.head_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?.into_department())
    }

    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>> {
        let result = Departments::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_department()))
    }

    async fn get_department_by_code(&self, code: &str) -> Result<Option<Department>> {
        let result = Departments::find()
            .filter(departments::Column::Code.eq(code))
            .one(&self.db)
            .await?;
        Ok(result.map(|m| m.into_department()))
    }

    async fn list_departments(
        &self,
        params: DepartmentListParams,
    ) -> Result<PaginatedResponse<Department>> {
        use departments::Column;

        let mut select = Departments::find();

        if let Some(faculty_id) = params.faculty_id {
            select = select.filter(Column::FacultyId.eq(faculty_id));
        }

        if let Some(pattern) = search_pattern(params.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(Column::Code.contains(&pattern))
                    .add(Column::Name.contains(&pattern)),
            );
        }

        let select = select.order_by_asc(Column::Code);
        self.paginate(select, &params.pagination, |m| m.into_department())
            .await
    }

    async fn update_department(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>> {
        if Departments::find_by_id(id).one(&self.db).await?.is_none() {
            return Ok(None);
        }

        let mut model = DepartmentActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(faculty_id) = update.faculty_id {
            model.faculty_id = Set(faculty_id);
        }
        if let Some(code) = update.code {
            model.code = Set(code);
        }
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(head_id) = update.head_id {
            model.head_id = Set(Some(head_id));
        }

        Ok(Some(model.update(&self.db).await?.into_department()))
    }

    async fn delete_department(&self, id: i64) -> Result<bool> {
        let result = Departments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(delete_conflict("Department"))?;
        Ok(result.rows_affected > 0)
    }

    async fn count_departments_in_faculty(&self, faculty_id: i64) -> Result<u64> {
        Ok(Departments::find()
            .filter(departments::Column::FacultyId.eq(faculty_id))
            .count(&self.db)
            .await?)
    }
}

#[async_trait::async_trait]
impl ProgramStorage for SeaOrmStorage {
    async fn create_program(&self, req: CreateProgramRequest) -> Result<Program> {
        let now = chrono::Utc::now().timestamp();

        let model = ProgramActiveModel {
            department_id: Set(req.department_id),
            code: Set(req.code),
            name: Set(req.name),
            level: Set(req.level.to_string()),
            duration_years: Set(req.duration_years),
            description: Set(req.description),
            status: Set(ProgramStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?.into_program())
    }

    async fn get_program_by_id(&self, id: i64) -> Result<Option<Program>> {
        let result = Programs::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_program()))
    }

    async fn get_program_by_code(&self, code: &str) -> Result<Option<Program>> {
        let result = Programs::find()
            .filter(programs::Column::Code.eq(code))
            .one(&self.db)
            .await?;
        Ok(result.map(|m| m.into_program()))
    }

    async fn list_programs(&self, params: ProgramListParams) -> Result<PaginatedResponse<Program>> {
        use programs::Column;

        let mut select = Programs::find();

        if let Some(department_id) = params.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }
        if let Some(level) = params.level {
            select = select.filter(Column::Level.eq(level.to_string()));
        }
        if let Some(status) = params.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        if let Some(pattern) = search_pattern(params.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(Column::Code.contains(&pattern))
                    .add(Column::Name.contains(&pattern)),
            );
        }

        let select = select.order_by_asc(Column::Code);
        self.paginate(select, &params.pagination, |m| m.into_program())
            .await
    }

    async fn update_program(
        &self,
        id: i64,
        update: UpdateProgramRequest,
    ) -> Result<Option<Program>> {
        if Programs::find_by_id(id).one(&self.db).await?.is_none() {
            return Ok(None);
        }

        let mut model = ProgramActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(department_id) = update.department_id {
            model.department_id = Set(department_id);
        }
        if let Some(code) = update.code {
            model.code = Set(code);
        }
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(level) = update.level {
            model.level = Set(level.to_string());
        }
        if let Some(duration_years) = update.duration_years {
            model.duration_years = Set(duration_years);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        Ok(Some(model.update(&self.db).await?.into_program()))
    }

    async fn delete_program(&self, id: i64) -> Result<bool> {
        let result = Programs::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(delete_conflict("Program"))?;
        Ok(result.rows_affected > 0)
    }

    async fn count_programs_in_department(&self, department_id: i64) -> Result<u64> {
        Ok(Programs::find()
            .filter(programs::Column::DepartmentId.eq(department_id))
            .count(&self.db)
            .await?)
    }
}

#[async_trait::async_trait]
impl CourseStorage for SeaOrmStorage {
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = CourseActiveModel {
            program_id: Set(req.program_id),
            lecturer_id: Set(req.lecturer_id),
            code: Set(req.code),
            title: Set(req.title),
            description: Set(req.description),
            credits: Set(req.credits),
            semester: Set(req.semester),
            status: Set(CourseStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?.into_course())
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_course()))
    }

    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(courses::Column::Code.eq(code))
            .one(&self.db)
            .await?;
        Ok(result.map(|m| m.into_course()))
    }

    async fn list_courses(&self, params: CourseListParams) -> Result<PaginatedResponse<Course>> {
        use courses::Column;

        let mut select = Courses::find();

        if let Some(program_id) = params.program_id {
            select = select.filter(Column::ProgramId.eq(program_id));
        }
        if let Some(lecturer_id) = params.lecturer_id {
            select = select.filter(Column::LecturerId.eq(lecturer_id));
        }
        if let Some(semester) = params.semester {
            select = select.filter(Column::Semester.eq(semester));
        }
        if let Some(status) = params.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        if let Some(pattern) = search_pattern(params.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(Column::Code.contains(&pattern))
                    .add(Column::Title.contains(&pattern)),
            );
        }

        let select = select
            .order_by_asc(Column::Semester)
            .order_by_asc(Column::Code);
        self.paginate(select, &params.pagination, |m| m.into_course())
            .await
    }

    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>> {
        if Courses::find_by_id(id).one(&self.db).await?.is_none() {
            return Ok(None);
        }

        let mut model = CourseActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(program_id) = update.program_id {
            model.program_id = Set(program_id);
        }
        if let Some(lecturer_id) = update.lecturer_id {
            model.lecturer_id = Set(Some(lecturer_id));
        }
        if let Some(code) = update.code {
            model.code = Set(code);
        }
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(credits) = update.credits {
            model.credits = Set(credits);
        }
        if let Some(semester) = update.semester {
            model.semester = Set(semester);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        Ok(Some(model.update(&self.db).await?.into_course()))
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(delete_conflict("Course"))?;
        Ok(result.rows_affected > 0)
    }

    async fn count_courses_in_program(&self, program_id: i64) -> Result<u64> {
        Ok(Courses::find()
            .filter(courses::Column::ProgramId.eq(program_id))
            .count(&self.db)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaginationQuery;
    use crate::models::programs::entities::ProgramLevel;

    async fn seed(storage: &SeaOrmStorage) -> (Faculty, Department, Program) {
        let faculty = storage
            .create_faculty(CreateFacultyRequest {
                code: "FCI".into(),
                name: "Computing and Informatics".into(),
                description: None,
                dean_id: None,
            })
            .await
            .unwrap();
        let department = storage
            .create_department(CreateDepartmentRequest {
                faculty_id: faculty.id,
                code: "ICT".into(),
                name: "Information Technology".into(),
                description: None,
                head_id: None,
            })
            .await
            .unwrap();
        let program = storage
            .create_program(CreateProgramRequest {
                department_id: department.id,
                code: "DIT".into(),
                name: "Diploma in IT".into(),
                level: ProgramLevel::Diploma,
                duration_years: 3,
                description: None,
            })
            .await
            .unwrap();
        (faculty, department, program)
    }

    fn course(program_id: i64, code: &str, semester: i32) -> CreateCourseRequest {
        CreateCourseRequest {
            program_id,
            lecturer_id: None,
            code: code.into(),
            title: format!("Course {code}"),
            description: None,
            credits: 3,
            semester,
        }
    }

    #[actix_web::test]
    async fn test_restricted_parent_delete_is_conflict() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let (faculty, _, _) = seed(&storage).await;

        let err = storage.delete_faculty(faculty.id).await.unwrap_err();
        assert_eq!(err.status(), actix_web::http::StatusCode::CONFLICT);
        assert!(storage.get_faculty_by_id(faculty.id).await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn test_course_pagination_slices() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let (_, _, program) = seed(&storage).await;
        for n in 1..=7 {
            storage
                .create_course(course(program.id, &format!("DIT10{n}"), 1))
                .await
                .unwrap();
        }

        let page = storage
            .list_courses(CourseListParams {
                pagination: PaginationQuery { page: 3, limit: 3 },
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 7);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].code, "DIT107");
    }

    #[actix_web::test]
    async fn test_partial_update_keeps_other_fields() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let (_, _, program) = seed(&storage).await;
        let created = storage
            .create_course(course(program.id, "DIT201", 2))
            .await
            .unwrap();

        let updated = storage
            .update_course(
                created.id,
                UpdateCourseRequest {
                    title: Some("Data Structures".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Data Structures");
        assert_eq!(updated.code, "DIT201");
        assert_eq!(updated.semester, 2);

        assert!(
            storage
                .update_course(9999, UpdateCourseRequest::default())
                .await
                .unwrap()
                .is_none()
        );
    }
}
