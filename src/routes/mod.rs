//! HTTP 路由
//!
//! 每个模块提供一个 `configure_*_routes`，在 `App::configure` 中注册。
//! 业务路由统一挂载在 `/api/v1` 下，外层依次为限流、JWT 认证与权限校验。

pub mod academics;
pub mod audit_logs;
pub mod auth;
pub mod finance;
pub mod library;
pub mod notifications;
pub mod people;
pub mod research;
pub mod system;
pub mod teaching;
pub mod users;

pub use academics::configure_academics_routes;
pub use audit_logs::configure_audit_log_routes;
pub use auth::configure_auth_routes;
pub use finance::configure_finance_routes;
pub use library::configure_library_routes;
pub use notifications::configure_notification_routes;
pub use people::configure_people_routes;
pub use research::configure_research_routes;
pub use system::configure_system_routes;
pub use teaching::configure_teaching_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// 注册全部路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_system_routes)
        .configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_academics_routes)
        .configure(configure_people_routes)
        .configure(configure_teaching_routes)
        .configure(configure_finance_routes)
        .configure(configure_library_routes)
        .configure(configure_research_routes)
        .configure(configure_notification_routes)
        .configure(configure_audit_log_routes);
}
