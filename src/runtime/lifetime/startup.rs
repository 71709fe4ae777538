use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::{ObjectCache, get_object_cache_plugin, register_builtin_plugins};
use crate::config::AppConfig;
use crate::errors::{CampusError, Result};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::NewUser;
use crate::storage::{SeaOrmStorage, Storage, UserStorage};
use crate::utils::password::hash_password;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 按名称构造缓存后端
async fn build_cache(name: &str) -> Result<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name).ok_or_else(|| {
        CampusError::cache_plugin_not_found(format!("Cache backend '{name}' not found in registry"))
    })?;
    let cache = constructor().await?;
    Ok(Arc::from(cache))
}

/// 创建缓存实例，配置的后端不可用时回退到 Moka
pub async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    register_builtin_plugins();
    let cache_type = &AppConfig::get().cache.cache_type;

    warn!("Attempting to create {} cache backend", cache_type);

    match build_cache(cache_type).await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", cache_type);
            Ok(cache)
        }
        Err(e) if cache_type != "moka" => {
            warn!("Failed to create {} cache: {}", cache_type, e);
            warn!("Falling back to memory cache");
            build_cache("moka").await
        }
        Err(e) => Err(e),
    }
}

/// 初始化默认管理员账号
///
/// 配置的管理员邮箱不存在时创建；失败只记录日志，不阻止启动。
pub async fn seed_admin(storage: &Arc<dyn Storage>) {
    let app = &AppConfig::get().app;
    let email = app.admin_email.trim().to_lowercase();

    match storage.get_user_by_email(&email).await {
        Ok(Some(user)) => {
            debug!("Admin account already present (ID: {}), skipping seed", user.id);
            return;
        }
        Ok(None) => info!("Creating default admin account {}", email),
        Err(e) => {
            warn!("Failed to look up admin account: {}, skipping admin seed", e);
            return;
        }
    }

    let password_hash = match hash_password(&app.admin_password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin = NewUser {
        email,
        password_hash,
        role: UserRole::Admin,
        first_name: "System".to_string(),
        last_name: "Administrator".to_string(),
        phone: None,
        gender: None,
        date_of_birth: None,
    };

    match storage.create_user(admin).await {
        Ok(user) => {
            info!("Default admin account created (ID: {})", user.user.id);
            if app.admin_password == crate::config::DEFAULT_ADMIN_PASSWORD {
                warn!("Admin account uses the default password, change it after first login");
            }
        }
        Err(e) => warn!("Failed to create admin account: {}", e),
    }
}

/// 准备服务器启动的上下文
///
/// 依次安装 TLS 加密提供者、连接数据库并迁移、写入管理员、创建缓存。
pub async fn prepare_server_startup() -> Result<StartupContext> {
    // 重复安装时返回 Err，忽略即可
    let _ = rustls::crypto::ring::default_provider().install_default();

    let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_async().await?);
    warn!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await;

    let cache = create_cache().await?;
    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
    }
    warn!("Cache backend initialized");

    Ok(StartupContext { storage, cache })
}
