//! 成绩存储操作

use super::SeaOrmStorage;
use crate::entity::grades::Column;
use crate::entity::prelude::{GradeActiveModel, Grades};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    grades::{entities::Grade, requests::GradeListParams},
};
use crate::storage::GradeStorage;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

#[async_trait::async_trait]
impl GradeStorage for SeaOrmStorage {
    async fn upsert_grade(
        &self,
        assessment_id: i64,
        student_id: i64,
        score: f64,
        letter: &str,
        remarks: Option<String>,
        graded_by: i64,
    ) -> Result<Grade> {
        let now = chrono::Utc::now().timestamp();

        let existing = Grades::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await?;

        let saved = match existing {
            Some(grade) => {
                let mut model: GradeActiveModel = grade.into();
                model.score = Set(score);
                model.letter = Set(letter.to_string());
                model.remarks = Set(remarks);
                model.graded_by = Set(graded_by);
                model.updated_at = Set(now);
                model.update(&self.db).await?
            }
            None => {
                GradeActiveModel {
                    assessment_id: Set(assessment_id),
                    student_id: Set(student_id),
                    score: Set(score),
                    letter: Set(letter.to_string()),
                    remarks: Set(remarks),
                    graded_by: Set(graded_by),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await?
            }
        };

        Ok(saved.into_grade())
    }

    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_grade()))
    }

    async fn list_grades(&self, params: GradeListParams) -> Result<PaginatedResponse<Grade>> {
        let mut select = Grades::find();

        if let Some(assessment_id) = params.assessment_id {
            select = select.filter(Column::AssessmentId.eq(assessment_id));
        }
        if let Some(student_id) = params.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        let select = select
            .order_by_desc(Column::UpdatedAt)
            .order_by_desc(Column::Id);
        self.paginate(select, &params.pagination, |m| m.into_grade())
            .await
    }

    async fn count_grades_for_assessment(&self, assessment_id: i64) -> Result<u64> {
        Ok(Grades::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .count(&self.db)
            .await?)
    }
}
