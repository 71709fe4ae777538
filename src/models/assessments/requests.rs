use chrono::NaiveDate;
use serde::Deserialize;

use super::entities::{AssessmentKind, AssessmentStatus};
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_option_from_str;
use crate::utils::validate::{Validate, ValidationErrors, Validator};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssessmentListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub class_section_id: Option<i64>,
    pub kind: Option<AssessmentKind>,
    pub status: Option<AssessmentStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssessmentRequest {
    pub class_section_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub kind: AssessmentKind,
    pub max_score: f64,
    pub weight: f64,
    pub due_date: Option<NaiveDate>,
}

impl Validate for CreateAssessmentRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .length("title", &self.title, 2, 160)
            .positive("max_score", self.max_score)
            .range("weight", self.weight, 0.0, 100.0)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAssessmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: Option<AssessmentKind>,
    pub max_score: Option<f64>,
    pub weight: Option<f64>,
    pub due_date: Option<NaiveDate>,
}

impl Validate for UpdateAssessmentRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.optional_length("title", self.title.as_deref(), 2, 160);
        if let Some(max_score) = self.max_score {
            v.positive("max_score", max_score);
        }
        if let Some(weight) = self.weight {
            v.range("weight", weight, 0.0, 100.0);
        }
        v.finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransitionAssessmentRequest {
    pub status: AssessmentStatus,
}
