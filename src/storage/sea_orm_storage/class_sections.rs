//! 开课班级存储操作

use super::{SeaOrmStorage, delete_conflict};
use crate::entity::class_sections::Column;
use crate::entity::prelude::{ClassSectionActiveModel, ClassSections};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    class_sections::{
        entities::{ClassSection, SectionStatus},
        requests::{ClassSectionListParams, CreateClassSectionRequest, UpdateClassSectionRequest},
    },
};
use crate::storage::ClassSectionStorage;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

#[async_trait::async_trait]
impl ClassSectionStorage for SeaOrmStorage {
    async fn create_class_section(&self, req: CreateClassSectionRequest) -> Result<ClassSection> {
        let now = chrono::Utc::now().timestamp();

        let model = ClassSectionActiveModel {
            course_id: Set(req.course_id),
            lecturer_id: Set(req.lecturer_id),
            section_code: Set(req.section_code),
            academic_year: Set(req.academic_year),
            semester: Set(req.semester),
            capacity: Set(req.capacity),
            room: Set(req.room),
            schedule: Set(req.schedule),
            status: Set(SectionStatus::Open.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?.into_class_section())
    }

    async fn get_class_section_by_id(&self, id: i64) -> Result<Option<ClassSection>> {
        let result = ClassSections::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_class_section()))
    }

    async fn find_class_section(
        &self,
        course_id: i64,
        section_code: &str,
        academic_year: &str,
        semester: i32,
    ) -> Result<Option<ClassSection>> {
        let result = ClassSections::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::SectionCode.eq(section_code))
            .filter(Column::AcademicYear.eq(academic_year))
            .filter(Column::Semester.eq(semester))
            .one(&self.db)
            .await?;
        Ok(result.map(|m| m.into_class_section()))
    }

    async fn list_class_sections(
        &self,
        params: ClassSectionListParams,
    ) -> Result<PaginatedResponse<ClassSection>> {
        let mut select = ClassSections::find();

        if let Some(course_id) = params.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(lecturer_id) = params.lecturer_id {
            select = select.filter(Column::LecturerId.eq(lecturer_id));
        }
        if let Some(ref academic_year) = params.academic_year {
            select = select.filter(Column::AcademicYear.eq(academic_year.as_str()));
        }
        if let Some(semester) = params.semester {
            select = select.filter(Column::Semester.eq(semester));
        }
        if let Some(status) = params.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let select = select
            .order_by_desc(Column::AcademicYear)
            .order_by_asc(Column::Semester)
            .order_by_asc(Column::SectionCode);
        self.paginate(select, &params.pagination, |m| m.into_class_section())
            .await
    }

    async fn update_class_section(
        &self,
        id: i64,
        update: UpdateClassSectionRequest,
    ) -> Result<Option<ClassSection>> {
        if ClassSections::find_by_id(id).one(&self.db).await?.is_none() {
            return Ok(None);
        }

        let mut model = ClassSectionActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(lecturer_id) = update.lecturer_id {
            model.lecturer_id = Set(lecturer_id);
        }
        if let Some(capacity) = update.capacity {
            model.capacity = Set(capacity);
        }
        if let Some(room) = update.room {
            model.room = Set(Some(room));
        }
        if let Some(schedule) = update.schedule {
            model.schedule = Set(Some(schedule));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        Ok(Some(model.update(&self.db).await?.into_class_section()))
    }

    async fn delete_class_section(&self, id: i64) -> Result<bool> {
        let result = ClassSections::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(delete_conflict("Class section"))?;
        Ok(result.rows_affected > 0)
    }

    async fn count_class_sections_for_course(&self, course_id: i64) -> Result<u64> {
        Ok(ClassSections::find()
            .filter(Column::CourseId.eq(course_id))
            .count(&self.db)
            .await?)
    }
}
