//! 教师档案存储操作

use super::{SeaOrmStorage, people_matching, search_pattern};
use crate::entity::format_date;
use crate::entity::lecturers::Column;
use crate::entity::prelude::{LecturerActiveModel, LecturerModel, Lecturers};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    lecturers::{
        entities::{Lecturer, LecturerDetail, LecturerStatus},
        requests::{LecturerListParams, NewLecturer, UpdateLecturerRequest},
    },
};
use crate::storage::LecturerStorage;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    async fn attach_lecturer_people(
        &self,
        lecturers: Vec<Lecturer>,
    ) -> Result<Vec<LecturerDetail>> {
        let ids: Vec<i64> = lecturers.iter().map(|l| l.id).collect();
        let (mut emails, mut profiles) = self.load_people(&ids).await?;

        Ok(lecturers
            .into_iter()
            .map(|lecturer| LecturerDetail {
                email: emails.remove(&lecturer.id).unwrap_or_default(),
                profile: profiles.remove(&lecturer.id),
                lecturer,
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl LecturerStorage for SeaOrmStorage {
    async fn create_lecturer(&self, req: NewLecturer) -> Result<Lecturer> {
        let now = chrono::Utc::now().timestamp();

        let model = LecturerActiveModel {
            id: Set(req.user_id),
            staff_number: Set(req.staff_number),
            department_id: Set(req.department_id),
            specialization: Set(req.specialization),
            hire_date: Set(req.hire_date.map(format_date)),
            status: Set(LecturerStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(model.insert(&self.db).await?.into_lecturer())
    }

    async fn get_lecturer_by_id(&self, id: i64) -> Result<Option<Lecturer>> {
        let result = Lecturers::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_lecturer()))
    }

    async fn get_lecturer_by_staff_number(&self, staff_number: &str) -> Result<Option<Lecturer>> {
        let result = Lecturers::find()
            .filter(Column::StaffNumber.eq(staff_number))
            .one(&self.db)
            .await?;
        Ok(result.map(|m| m.into_lecturer()))
    }

    async fn get_lecturer_detail(&self, id: i64) -> Result<Option<LecturerDetail>> {
        let Some(lecturer) = self.get_lecturer_by_id(id).await? else {
            return Ok(None);
        };
        Ok(self.attach_lecturer_people(vec![lecturer]).await?.pop())
    }

    async fn list_lecturers(
        &self,
        params: LecturerListParams,
    ) -> Result<PaginatedResponse<LecturerDetail>> {
        let mut select = Lecturers::find();

        if let Some(department_id) = params.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }
        if let Some(status) = params.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        if let Some(pattern) = search_pattern(params.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(Column::StaffNumber.contains(&pattern))
                    .add(Column::Specialization.contains(&pattern))
                    .add(people_matching(Column::Id, &pattern)),
            );
        }

        let select = select.order_by_asc(Column::StaffNumber);
        let page = self
            .paginate(select, &params.pagination, LecturerModel::into_lecturer)
            .await?;

        let details = self.attach_lecturer_people(page.items).await?;
        Ok(PaginatedResponse::new(details, page.pagination))
    }

    async fn update_lecturer(
        &self,
        id: i64,
        update: UpdateLecturerRequest,
    ) -> Result<Option<Lecturer>> {
        if Lecturers::find_by_id(id).one(&self.db).await?.is_none() {
            return Ok(None);
        }

        let mut model = LecturerActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(department_id) = update.department_id {
            model.department_id = Set(department_id);
        }
        if let Some(specialization) = update.specialization {
            model.specialization = Set(Some(specialization));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        Ok(Some(model.update(&self.db).await?.into_lecturer()))
    }

    async fn staff_numbers_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(Lecturers::find()
            .select_only()
            .column(Column::StaffNumber)
            .filter(Column::StaffNumber.starts_with(prefix))
            .into_tuple()
            .all(&self.db)
            .await?)
    }

    async fn count_lecturers_in_department(&self, department_id: i64) -> Result<u64> {
        Ok(Lecturers::find()
            .filter(Column::DepartmentId.eq(department_id))
            .count(&self.db)
            .await?)
    }
}
