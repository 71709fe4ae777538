use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::enums::string_enum;

string_enum! {
    AssessmentKind {
        Cat => "cat",
        Assignment => "assignment",
        Practical => "practical",
        Project => "project",
        Exam => "exam",
    }
}

string_enum! {
    /// 评估状态，只能按顺序前进一步
    AssessmentStatus {
        Draft => "draft",
        Published => "published",
        Grading => "grading",
        Completed => "completed",
    }
}

impl AssessmentStatus {
    pub fn next(&self) -> Option<AssessmentStatus> {
        match self {
            AssessmentStatus::Draft => Some(AssessmentStatus::Published),
            AssessmentStatus::Published => Some(AssessmentStatus::Grading),
            AssessmentStatus::Grading => Some(AssessmentStatus::Completed),
            AssessmentStatus::Completed => None,
        }
    }

    pub fn can_transition_to(&self, target: AssessmentStatus) -> bool {
        self.next() == Some(target)
    }

    /// 可以录入成绩的状态
    pub fn accepts_grades(&self) -> bool {
        matches!(
            self,
            AssessmentStatus::Published | AssessmentStatus::Grading
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub id: i64,
    pub class_section_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub kind: AssessmentKind,
    pub max_score: f64,
    /// 在期末总评中的权重（百分比）
    pub weight: f64,
    pub due_date: Option<NaiveDate>,
    pub status: AssessmentStatus,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions_only_move_forward_one_step() {
        use AssessmentStatus::*;
        assert!(Draft.can_transition_to(Published));
        assert!(Published.can_transition_to(Grading));
        assert!(Grading.can_transition_to(Completed));

        assert!(!Draft.can_transition_to(Grading));
        assert!(!Published.can_transition_to(Draft));
        assert!(!Completed.can_transition_to(Draft));
        assert_eq!(Completed.next(), None);
    }

    #[test]
    fn test_grade_window() {
        assert!(!AssessmentStatus::Draft.accepts_grades());
        assert!(AssessmentStatus::Published.accepts_grades());
        assert!(AssessmentStatus::Grading.accepts_grades());
        assert!(!AssessmentStatus::Completed.accepts_grades());
    }
}
