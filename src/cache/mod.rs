//! 对象缓存
//!
//! 后端通过名称注册到全局表，启动时按 `cache.type` 选择；Redis 不可用时回退到 Moka。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use register::{get_object_cache_plugin, register_builtin_plugins};
pub use traits::{CacheResult, ObjectCache};

/// 声明缓存插件的注册函数
///
/// 生成 `pub fn register()`，把 `$ty::new()` 包装为异步构造器写入注册表。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        pub fn register() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        let cache = <$ty>::new()
                            .map_err($crate::errors::CampusError::cache_connection)?;
                        Ok::<_, $crate::errors::CampusError>(
                            Box::new(cache) as Box<dyn $crate::cache::ObjectCache>
                        )
                    }) as $crate::cache::register::BoxedObjectCacheFuture
                }),
            );
        }
    };
}

/// 缓存中已认证用户的键，按用户 ID 存放以便资料变更时失效
pub fn user_cache_key(user_id: i64) -> String {
    format!("user:{user_id}")
}
