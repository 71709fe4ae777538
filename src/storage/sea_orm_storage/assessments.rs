//! 考核存储操作

use super::{SeaOrmStorage, delete_conflict};
use crate::entity::assessments::Column;
use crate::entity::format_date;
use crate::entity::prelude::{AssessmentActiveModel, Assessments};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    assessments::{
        entities::{Assessment, AssessmentStatus},
        requests::{AssessmentListParams, CreateAssessmentRequest, UpdateAssessmentRequest},
    },
};
use crate::storage::AssessmentStorage;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

#[async_trait::async_trait]
impl AssessmentStorage for SeaOrmStorage {
    async fn create_assessment(
        &self,
        req: CreateAssessmentRequest,
        created_by: i64,
    ) -> Result<Assessment> {
        let now = chrono::Utc::now().timestamp();

        let model = AssessmentActiveModel {
            class_section_id: Set(req.class_section_id),
            title: Set(req.title),
            description: Set(req.description),
            kind: Set(req.kind.to_string()),
            max_score: Set(req.max_score),
            weight: Set(req.weight),
            due_date: Set(req.due_date.map(format_date)),
            status: Set(AssessmentStatus::Draft.to_string()),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?.into_assessment())
    }

    async fn get_assessment_by_id(&self, id: i64) -> Result<Option<Assessment>> {
        let result = Assessments::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_assessment()))
    }

    async fn list_assessments(
        &self,
        params: AssessmentListParams,
    ) -> Result<PaginatedResponse<Assessment>> {
        let mut select = Assessments::find();

        if let Some(class_section_id) = params.class_section_id {
            select = select.filter(Column::ClassSectionId.eq(class_section_id));
        }
        if let Some(kind) = params.kind {
            select = select.filter(Column::Kind.eq(kind.to_string()));
        }
        if let Some(status) = params.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);
        self.paginate(select, &params.pagination, |m| m.into_assessment())
            .await
    }

    async fn update_assessment(
        &self,
        id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>> {
        if Assessments::find_by_id(id).one(&self.db).await?.is_none() {
            return Ok(None);
        }

        let mut model = AssessmentActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(kind) = update.kind {
            model.kind = Set(kind.to_string());
        }
        if let Some(max_score) = update.max_score {
            model.max_score = Set(max_score);
        }
        if let Some(weight) = update.weight {
            model.weight = Set(weight);
        }
        if let Some(due_date) = update.due_date {
            model.due_date = Set(Some(format_date(due_date)));
        }

        Ok(Some(model.update(&self.db).await?.into_assessment()))
    }

    async fn set_assessment_status(
        &self,
        id: i64,
        status: AssessmentStatus,
    ) -> Result<Option<Assessment>> {
        if Assessments::find_by_id(id).one(&self.db).await?.is_none() {
            return Ok(None);
        }

        let model = AssessmentActiveModel {
            id: Set(id),
            status: Set(status.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        Ok(Some(model.update(&self.db).await?.into_assessment()))
    }

    async fn delete_assessment(&self, id: i64) -> Result<bool> {
        let result = Assessments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(delete_conflict("Assessment"))?;
        Ok(result.rows_affected > 0)
    }

    async fn count_assessments_for_section(&self, class_section_id: i64) -> Result<u64> {
        Ok(Assessments::find()
            .filter(Column::ClassSectionId.eq(class_section_id))
            .count(&self.db)
            .await?)
    }
}
