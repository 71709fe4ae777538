use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rbac::{OwnerField, Owned};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    pub id: i64,
    pub assessment_id: i64,
    pub student_id: i64,
    pub score: f64,
    pub letter: String,
    pub remarks: Option<String>,
    pub graded_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Grade {
    fn owner(&self, field: OwnerField) -> Option<i64> {
        match field {
            OwnerField::StudentId => Some(self.student_id),
            _ => None,
        }
    }
}

/// 按得分率计算等级：A ≥ 70，B ≥ 60，C ≥ 50，D ≥ 40，否则 E
pub fn letter_for(score: f64, max_score: f64) -> &'static str {
    if max_score <= 0.0 {
        return "E";
    }
    let percentage = score * 100.0 / max_score;
    match percentage {
        p if p >= 70.0 => "A",
        p if p >= 60.0 => "B",
        p if p >= 50.0 => "C",
        p if p >= 40.0 => "D",
        _ => "E",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_boundaries() {
        assert_eq!(letter_for(70.0, 100.0), "A");
        assert_eq!(letter_for(69.99, 100.0), "B");
        assert_eq!(letter_for(60.0, 100.0), "B");
        assert_eq!(letter_for(50.0, 100.0), "C");
        assert_eq!(letter_for(40.0, 100.0), "D");
        assert_eq!(letter_for(39.0, 100.0), "E");
        // 按比例而不是原始分
        assert_eq!(letter_for(21.0, 30.0), "A");
        assert_eq!(letter_for(5.0, 0.0), "E");
    }
}
