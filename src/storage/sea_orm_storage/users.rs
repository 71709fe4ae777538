//! 用户与资料存储操作

use super::{SeaOrmStorage, delete_conflict, people_matching, search_pattern};
use crate::entity::format_date;
use crate::entity::prelude::{ProfileActiveModel, Profiles, UserActiveModel, Users};
use crate::entity::{profiles, users::Column};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    users::{
        entities::{Profile, User, UserStatus, UserWithProfile},
        requests::{NewUser, UpdateProfileRequest, UpdateUserRequest, UserListParams},
    },
};
use crate::storage::UserStorage;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

#[async_trait::async_trait]
impl UserStorage for SeaOrmStorage {
    async fn create_user(&self, req: NewUser) -> Result<UserWithProfile> {
        let now = chrono::Utc::now().timestamp();

        let user = UserActiveModel {
            email: Set(req.email),
            password_hash: Set(req.password_hash),
            role: Set(req.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            failed_login_attempts: Set(0),
            locked_until: Set(None),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        // 资料与用户分开写入
        let profile = ProfileActiveModel {
            user_id: Set(user.id),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            phone: Set(req.phone),
            gender: Set(req.gender),
            date_of_birth: Set(req.date_of_birth.map(format_date)),
            address: Set(None),
            avatar_url: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(UserWithProfile {
            user: user.into_user(),
            profile: Some(profile.into_profile()),
        })
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_user()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(result.map(|m| m.into_user()))
    }

    async fn get_user_with_profile(&self, id: i64) -> Result<Option<UserWithProfile>> {
        let result = Users::find_by_id(id)
            .find_also_related(Profiles)
            .one(&self.db)
            .await?;

        Ok(result.map(|(user, profile)| UserWithProfile {
            user: user.into_user(),
            profile: profile.map(|p| p.into_profile()),
        }))
    }

    async fn list_users(&self, params: UserListParams) -> Result<PaginatedResponse<UserWithProfile>> {
        let mut select = Users::find();

        if let Some(role) = params.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        if let Some(status) = params.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 按邮箱或姓名搜索
        if let Some(pattern) = search_pattern(params.search.as_deref()) {
            select = select.filter(people_matching(Column::Id, &pattern));
        }

        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        let page = self
            .paginate(select, &params.pagination, |m| m.into_user())
            .await?;

        let ids: Vec<i64> = page.items.iter().map(|u| u.id).collect();
        let (_, mut profiles) = self.load_people(&ids).await?;

        Ok(page.map(|user| UserWithProfile {
            profile: profiles.remove(&user.id),
            user,
        }))
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        // 先检查用户是否存在
        if Users::find_by_id(id).one(&self.db).await?.is_none() {
            return Ok(None);
        }

        let mut model = UserActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(email) = update.email {
            model.email = Set(email);
        }

        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let updated = model.update(&self.db).await?;
        Ok(Some(updated.into_user()))
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(delete_conflict("User"))?;

        Ok(result.rows_affected > 0)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(Column::PasswordHash, Expr::value(password_hash))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn get_profile(&self, user_id: i64) -> Result<Option<Profile>> {
        let result = Profiles::find()
            .filter(profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(result.map(|m| m.into_profile()))
    }

    async fn update_profile(
        &self,
        user_id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Profile>> {
        let Some(existing) = Profiles::find()
            .filter(profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut model: ProfileActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(gender) = update.gender {
            model.gender = Set(Some(gender));
        }
        if let Some(date_of_birth) = update.date_of_birth {
            model.date_of_birth = Set(Some(format_date(date_of_birth)));
        }
        if let Some(address) = update.address {
            model.address = Set(Some(address));
        }
        if let Some(avatar_url) = update.avatar_url {
            model.avatar_url = Set(Some(avatar_url));
        }

        let updated = model.update(&self.db).await?;
        Ok(Some(updated.into_profile()))
    }

    async fn record_login_failure(
        &self,
        id: i64,
        attempts: i32,
        locked_until: Option<DateTime<Utc>>,
    ) -> Result<()> {
        Users::update_many()
            .col_expr(Column::FailedLoginAttempts, Expr::value(attempts))
            .col_expr(
                Column::LockedUntil,
                Expr::value(locked_until.map(|t| t.timestamp())),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(())
    }

    async fn record_login_success(&self, id: i64) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        Users::update_many()
            .col_expr(Column::FailedLoginAttempts, Expr::value(0))
            .col_expr(Column::LockedUntil, Expr::value(Option::<i64>::None))
            .col_expr(Column::LastLogin, Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    fn new_user(email: &str, first: &str, last: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::Student,
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone: None,
            gender: None,
            date_of_birth: None,
        }
    }

    #[actix_web::test]
    async fn test_create_user_writes_profile() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let created = storage
            .create_user(new_user("amina@campus.local", "Amina", "Otieno"))
            .await
            .unwrap();

        let loaded = storage
            .get_user_with_profile(created.user.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.user.email, "amina@campus.local");
        assert_eq!(loaded.profile.unwrap().full_name(), "Amina Otieno");
    }

    #[actix_web::test]
    async fn test_duplicate_email_is_conflict() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_user(new_user("dup@campus.local", "A", "B"))
            .await
            .unwrap();
        let err = storage
            .create_user(new_user("dup@campus.local", "C", "D"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), actix_web::http::StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_search_matches_name_or_email() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_user(new_user("kamau@campus.local", "Brian", "Kamau"))
            .await
            .unwrap();
        storage
            .create_user(new_user("wanjiru@campus.local", "Grace", "Wanjiru"))
            .await
            .unwrap();

        let by_name = storage
            .list_users(UserListParams {
                search: Some("grace".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_name.pagination.total, 1);
        assert_eq!(by_name.items[0].user.email, "wanjiru@campus.local");

        let by_email = storage
            .list_users(UserListParams {
                search: Some("kamau@".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_email.pagination.total, 1);
    }

    #[actix_web::test]
    async fn test_login_bookkeeping() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let id = storage
            .create_user(new_user("lock@campus.local", "L", "K"))
            .await
            .unwrap()
            .user
            .id;

        let until = Utc::now() + chrono::Duration::minutes(30);
        storage.record_login_failure(id, 5, Some(until)).await.unwrap();
        let user = storage.get_user_by_id(id).await.unwrap().unwrap();
        assert_eq!(user.failed_login_attempts, 5);
        assert!(user.is_locked_at(Utc::now()));

        storage.record_login_success(id).await.unwrap();
        let user = storage.get_user_by_id(id).await.unwrap().unwrap();
        assert_eq!(user.failed_login_attempts, 0);
        assert!(user.locked_until.is_none());
        assert!(user.last_login.is_some());
    }
}
