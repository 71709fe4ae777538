//! 教学班实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "class_sections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub lecturer_id: i64,
    pub section_code: String,
    pub academic_year: String,
    pub semester: i32,
    pub capacity: i32,
    pub room: Option<String>,
    pub schedule: Option<String>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::assessments::Entity")]
    Assessments,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_class_section(self) -> crate::models::class_sections::entities::ClassSection {
        use crate::models::class_sections::entities::{ClassSection, SectionStatus};

        ClassSection {
            id: self.id,
            course_id: self.course_id,
            lecturer_id: self.lecturer_id,
            section_code: self.section_code,
            academic_year: self.academic_year,
            semester: self.semester,
            capacity: self.capacity,
            room: self.room,
            schedule: self.schedule,
            status: self
                .status
                .parse::<SectionStatus>()
                .unwrap_or(SectionStatus::Open),
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
