//! Campus - 理工学院管理平台后端服务
//!
//! 基于 Actix Web 与 SeaORM 的 REST 服务，覆盖学籍、教学、财务、图书馆与科研。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 请求 ID、限流、认证与权限中间件
//! - `models`: 数据模型定义
//! - `rbac`: 角色权限表与归属判定
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod rbac;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;

use std::sync::Arc;

use actix_web::web;

use crate::cache::ObjectCache;
use crate::config::AppConfig;
use crate::models::AppStartTime;
use crate::storage::Storage;
use crate::utils::{json_error_handler, query_error_handler};

/// 注册共享状态、提取器配置与全部路由
///
/// 服务器与集成测试共用，保证两者的应用结构一致。
pub fn configure_app(
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
    start_time: AppStartTime,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PayloadConfig::new(
                AppConfig::get().server.limits.max_payload_size,
            ))
            .app_data(web::Data::new(storage))
            .app_data(web::Data::new(cache))
            .app_data(web::Data::new(start_time))
            .configure(routes::configure_routes);
    }
}
