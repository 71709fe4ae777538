//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod academics;
mod assessments;
mod attendance;
mod audit_logs;
mod class_sections;
mod enrollments;
mod finance;
mod grades;
mod lecturers;
mod library;
mod notifications;
mod research;
mod students;
mod users;

use std::collections::HashMap;
use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::sea_query::Query;
use sea_orm::{
    ColumnTrait, Condition, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, Select,
};
use tracing::info;

use crate::config::{AppConfig, DatabaseConfig};
use crate::entity::{profiles, users as user_entity};
use crate::errors::{CampusError, Result};
use crate::models::users::entities::Profile;
use crate::models::{PaginatedResponse, PaginationInfo, PaginationQuery};
use crate::storage::Storage;
use crate::utils::escape_like_pattern;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database.url, &config.database).await
    }

    /// 连接指定数据库并运行迁移
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CampusError::database_operation(format!("Migration failed: {e}")))?;

        info!("SeaORM storage ready, database: {}", redact_url(&db_url));

        Ok(Self { db })
    }

    /// 内存 SQLite，供测试使用
    pub async fn in_memory() -> Result<Self> {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            pool_size: 1,
            timeout: 5,
        };
        Self::connect(&config.url, &config).await
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CampusError::database_config(format!("Invalid SQLite URL: {e}")))?
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("temp_store", "memory");

        if !in_memory {
            opt = opt
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("wal_autocheckpoint", "1000");
        }

        // 内存库每个连接各自独立，只能使用单连接且不能被回收
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.pool_size.max(1))
                .min_connections(1)
                .test_before_acquire(true)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| CampusError::database_connection(format!("SQLite connection failed: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(config.pool_size.min(5))
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CampusError::database_connection(format!("Cannot connect to database: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CampusError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql://, or a .db/.sqlite path"
            )))
        }
    }

    /// 通用分页：统计总数并取出当前页
    pub(crate) async fn paginate<E, T>(
        &self,
        select: Select<E>,
        pagination: &PaginationQuery,
        convert: impl Fn(E::Model) -> T,
    ) -> Result<PaginatedResponse<T>>
    where
        E: EntityTrait,
        E::Model: Send + Sync + 'static,
    {
        let page = pagination.page();
        let limit = pagination.limit();

        let paginator = select.paginate(&self.db, limit);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page - 1).await?;

        Ok(PaginatedResponse::new(
            models.into_iter().map(convert).collect(),
            PaginationInfo::new(page, limit, total),
        ))
    }

    /// 批量读取用户邮箱与资料
    pub(crate) async fn load_people(
        &self,
        ids: &[i64],
    ) -> Result<(HashMap<i64, String>, HashMap<i64, Profile>)> {
        if ids.is_empty() {
            return Ok((HashMap::new(), HashMap::new()));
        }

        let emails = user_entity::Entity::find()
            .filter(user_entity::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| (m.id, m.email))
            .collect();

        let profiles = profiles::Entity::find()
            .filter(profiles::Column::UserId.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| (m.user_id, m.into_profile()))
            .collect();

        Ok((emails, profiles))
    }
}

/// 规范化搜索关键字：去除首尾空白并转义通配符，空串视为未提供
pub(crate) fn search_pattern(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(escape_like_pattern)
}

/// 按邮箱或姓名匹配人员，`id_column` 是与 users.id 对应的列
pub(crate) fn people_matching<C: ColumnTrait>(id_column: C, pattern: &str) -> Condition {
    let by_email = Query::select()
        .column(user_entity::Column::Id)
        .from(user_entity::Entity)
        .and_where(user_entity::Column::Email.contains(pattern))
        .to_owned();

    let by_name = Query::select()
        .column(profiles::Column::UserId)
        .from(profiles::Entity)
        .cond_where(
            Condition::any()
                .add(profiles::Column::FirstName.contains(pattern))
                .add(profiles::Column::LastName.contains(pattern)),
        )
        .to_owned();

    Condition::any()
        .add(id_column.in_subquery(by_email))
        .add(id_column.in_subquery(by_name))
}

/// 删除被外键引用的记录时返回 409
pub(crate) fn delete_conflict(resource: &'static str) -> impl FnOnce(DbErr) -> CampusError {
    move |err| match err.sql_err() {
        Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(_)) => {
            CampusError::conflict(format!("{resource} is still referenced by other records"))
        }
        _ => CampusError::from(err),
    }
}

// 日志中隐藏连接串里的密码
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}

#[async_trait::async_trait]
impl Storage for SeaOrmStorage {
    async fn ping(&self) -> Result<()> {
        self.db
            .execute_unprepared("SELECT 1")
            .await
            .map(|_| ())
            .map_err(|e| CampusError::database_connection(format!("Database ping failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("campus.db").unwrap(),
            "sqlite://campus.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert!(SeaOrmStorage::build_database_url("postgres://u:p@host/db").is_ok());
        assert!(SeaOrmStorage::build_database_url("ftp://nope").is_err());
    }

    #[test]
    fn test_redact_url_hides_credentials() {
        assert_eq!(
            redact_url("postgres://campus:secret@db:5432/campus"),
            "postgres://***@db:5432/campus"
        );
        assert_eq!(redact_url("sqlite::memory:"), "sqlite::memory:");
    }

    #[test]
    fn test_search_pattern_ignores_blank() {
        assert_eq!(search_pattern(Some("   ")), None);
        assert_eq!(search_pattern(None), None);
        assert_eq!(search_pattern(Some(" 50%")), Some("50\\%".to_string()));
    }

    #[actix_web::test]
    async fn test_in_memory_storage_migrates_and_pings() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        assert!(storage.ping().await.is_ok());
    }
}
