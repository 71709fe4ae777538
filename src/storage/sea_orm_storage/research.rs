//! 科研项目存储操作

use super::{SeaOrmStorage, delete_conflict, search_pattern};
use crate::entity::prelude::{
    ProjectMemberActiveModel, ProjectMembers, ResearchProjectActiveModel, ResearchProjects,
};
use crate::entity::{format_date, project_members, research_projects};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    research::{
        entities::{ProjectMember, ProjectStatus, ResearchProject, ResearchProjectDetail},
        requests::{
            CreateResearchProjectRequest, ResearchProjectListParams, UpdateResearchProjectRequest,
        },
    },
};
use crate::storage::ResearchStorage;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

#[async_trait::async_trait]
impl ResearchStorage for SeaOrmStorage {
    async fn create_project(
        &self,
        req: CreateResearchProjectRequest,
        principal_investigator_id: i64,
    ) -> Result<ResearchProject> {
        let now = chrono::Utc::now().timestamp();

        let model = ResearchProjectActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            principal_investigator_id: Set(principal_investigator_id),
            status: Set(ProjectStatus::Proposed.to_string()),
            start_date: Set(req.start_date.map(format_date)),
            end_date: Set(req.end_date.map(format_date)),
            budget: Set(req.budget),
            funding_source: Set(req.funding_source),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?.into_research_project())
    }

    async fn get_project_by_id(&self, id: i64) -> Result<Option<ResearchProject>> {
        let result = ResearchProjects::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_research_project()))
    }

    async fn get_project_detail(&self, id: i64) -> Result<Option<ResearchProjectDetail>> {
        let Some(project) = self.get_project_by_id(id).await? else {
            return Ok(None);
        };

        let members = ProjectMembers::find()
            .filter(project_members::Column::ProjectId.eq(id))
            .order_by_asc(project_members::Column::JoinedAt)
            .all(&self.db)
            .await?;

        Ok(Some(ResearchProjectDetail {
            project,
            members: members
                .into_iter()
                .map(|m| m.into_project_member())
                .collect(),
        }))
    }

    async fn list_projects(
        &self,
        params: ResearchProjectListParams,
    ) -> Result<PaginatedResponse<ResearchProject>> {
        use research_projects::Column;

        let mut select = ResearchProjects::find();

        if let Some(status) = params.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(pi) = params.principal_investigator_id {
            select = select.filter(Column::PrincipalInvestigatorId.eq(pi));
        }
        if let Some(pattern) = search_pattern(params.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(&pattern))
                    .add(Column::FundingSource.contains(&pattern)),
            );
        }

        let select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);
        self.paginate(select, &params.pagination, |m| m.into_research_project())
            .await
    }

    async fn update_project(
        &self,
        id: i64,
        update: UpdateResearchProjectRequest,
    ) -> Result<Option<ResearchProject>> {
        if ResearchProjects::find_by_id(id).one(&self.db).await?.is_none() {
            return Ok(None);
        }

        let mut model = ResearchProjectActiveModel {
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
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(start_date) = update.start_date {
            model.start_date = Set(Some(format_date(start_date)));
        }
        if let Some(end_date) = update.end_date {
            model.end_date = Set(Some(format_date(end_date)));
        }
        if let Some(budget) = update.budget {
            model.budget = Set(Some(budget));
        }
        if let Some(funding_source) = update.funding_source {
            model.funding_source = Set(Some(funding_source));
        }

        Ok(Some(model.update(&self.db).await?.into_research_project()))
    }

    async fn delete_project(&self, id: i64) -> Result<bool> {
        // 成员随项目一起删除
        ProjectMembers::delete_many()
            .filter(project_members::Column::ProjectId.eq(id))
            .exec(&self.db)
            .await?;

        let result = ResearchProjects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(delete_conflict("Research project"))?;
        Ok(result.rows_affected > 0)
    }

    async fn add_project_member(
        &self,
        project_id: i64,
        user_id: i64,
        member_role: &str,
    ) -> Result<ProjectMember> {
        let model = ProjectMemberActiveModel {
            project_id: Set(project_id),
            user_id: Set(user_id),
            member_role: Set(member_role.to_string()),
            joined_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?.into_project_member())
    }

    async fn find_project_member(
        &self,
        project_id: i64,
        user_id: i64,
    ) -> Result<Option<ProjectMember>> {
        let result = ProjectMembers::find()
            .filter(project_members::Column::ProjectId.eq(project_id))
            .filter(project_members::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(result.map(|m| m.into_project_member()))
    }

    async fn remove_project_member(&self, project_id: i64, user_id: i64) -> Result<bool> {
        let result = ProjectMembers::delete_many()
            .filter(project_members::Column::ProjectId.eq(project_id))
            .filter(project_members::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
