//! 考勤实体

use sea_orm::entity::prelude::*;

use super::{to_date, to_datetime};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_section_id: i64,
    pub student_id: i64,
    pub date: String,
    pub status: String,
    pub remarks: Option<String>,
    pub recorded_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attendance(self) -> crate::models::attendance::entities::Attendance {
        use crate::models::attendance::entities::{Attendance, AttendanceStatus};

        Attendance {
            id: self.id,
            class_section_id: self.class_section_id,
            student_id: self.student_id,
            date: to_date(&self.date),
            status: self
                .status
                .parse::<AttendanceStatus>()
                .unwrap_or(AttendanceStatus::Absent),
            remarks: self.remarks,
            recorded_by: self.recorded_by,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
