//! 选课存储操作

use super::SeaOrmStorage;
use crate::entity::enrollments::Column;
use crate::entity::prelude::{EnrollmentActiveModel, Enrollments};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    enrollments::{
        entities::{Enrollment, EnrollmentStatus},
        requests::EnrollmentListParams,
    },
};
use crate::storage::EnrollmentStorage;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

#[async_trait::async_trait]
impl EnrollmentStorage for SeaOrmStorage {
    async fn create_enrollment(&self, student_id: i64, class_section_id: i64) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();

        let model = EnrollmentActiveModel {
            student_id: Set(student_id),
            class_section_id: Set(class_section_id),
            status: Set(EnrollmentStatus::Enrolled.to_string()),
            enrolled_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?.into_enrollment())
    }

    async fn get_enrollment_by_id(&self, id: i64) -> Result<Option<Enrollment>> {
        let result = Enrollments::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_enrollment()))
    }

    async fn find_enrollment(
        &self,
        student_id: i64,
        class_section_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ClassSectionId.eq(class_section_id))
            .one(&self.db)
            .await?;
        Ok(result.map(|m| m.into_enrollment()))
    }

    async fn set_enrollment_status(
        &self,
        id: i64,
        status: EnrollmentStatus,
    ) -> Result<Option<Enrollment>> {
        if Enrollments::find_by_id(id).one(&self.db).await?.is_none() {
            return Ok(None);
        }

        let model = EnrollmentActiveModel {
            id: Set(id),
            status: Set(status.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        Ok(Some(model.update(&self.db).await?.into_enrollment()))
    }

    async fn list_enrollments(
        &self,
        params: EnrollmentListParams,
    ) -> Result<PaginatedResponse<Enrollment>> {
        let mut select = Enrollments::find();

        if let Some(student_id) = params.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(class_section_id) = params.class_section_id {
            select = select.filter(Column::ClassSectionId.eq(class_section_id));
        }
        if let Some(status) = params.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let select = select
            .order_by_desc(Column::EnrolledAt)
            .order_by_desc(Column::Id);
        self.paginate(select, &params.pagination, |m| m.into_enrollment())
            .await
    }

    async fn count_active_enrollments(&self, class_section_id: i64) -> Result<u64> {
        Ok(Enrollments::find()
            .filter(Column::ClassSectionId.eq(class_section_id))
            .filter(Column::Status.eq(EnrollmentStatus::Enrolled.to_string()))
            .count(&self.db)
            .await?)
    }

    async fn count_enrollments_for_section(&self, class_section_id: i64) -> Result<u64> {
        Ok(Enrollments::find()
            .filter(Column::ClassSectionId.eq(class_section_id))
            .count(&self.db)
            .await?)
    }
}
