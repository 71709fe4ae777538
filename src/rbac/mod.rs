//! 基于角色的访问控制（RBAC）
//!
//! 判定流程：
//! 1. 没有用户或用户没有角色 → 拒绝
//! 2. 角色直接持有该权限 → 允许
//! 3. 角色持有对应的 `_own` 权限且提供了资源实例 → 由归属谓词决定
//! 4. 其他情况 → 拒绝
//!
//! 判定本身不会报错，调用方（中间件或服务层）负责把 `false` 转成 403。

pub mod ownership;
pub mod table;

pub use ownership::{OwnerField, Owned, ResourceFields};
pub use table::perm;

use crate::errors::{CampusError, Result};
use crate::models::users::entities::{User, UserRole};

const OWN_SUFFIX: &str = "_own";

/// 参与权限判定的主体
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub role: Option<UserRole>,
}

impl Actor {
    pub fn new(id: i64, role: UserRole) -> Self {
        Self {
            id,
            role: Some(role),
        }
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.role)
    }
}

/// 列表查询的可见范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessScope {
    /// 可见全部记录
    All,
    /// 仅可见归属于自己的记录
    Own,
}

/// 由 `resource:action` 推导出 `resource:action_own`
pub fn own_form(permission: &str) -> String {
    format!("{permission}{OWN_SUFFIX}")
}

fn is_own_permission(permission: &str) -> bool {
    permission.ends_with(OWN_SUFFIX)
}

fn check_ownership(actor: &Actor, own_permission: &str, resource: &dyn ownership::Owned) -> bool {
    ownership::predicate_for(own_permission)
        .map(|predicate| predicate(actor, resource))
        .unwrap_or(false)
}

/// 判断主体是否拥有权限，可选地针对具体资源实例
pub fn has_permission(
    actor: Option<&Actor>,
    permission: &str,
    resource: Option<&dyn ownership::Owned>,
) -> bool {
    let Some(actor) = actor else {
        return false;
    };
    let Some(role) = actor.role else {
        return false;
    };

    // 直接请求 `_own` 权限时，提供了资源就必须满足归属谓词
    if is_own_permission(permission) {
        if !table::role_holds(role, permission) {
            return false;
        }
        return match resource {
            Some(resource) => check_ownership(actor, permission, resource),
            None => true,
        };
    }

    if table::role_holds(role, permission) {
        return true;
    }

    let own = own_form(permission);
    match resource {
        Some(resource) if table::role_holds(role, &own) => check_ownership(actor, &own, resource),
        _ => false,
    }
}

/// 任一权限满足即可
pub fn has_any_permission(
    actor: Option<&Actor>,
    permissions: &[&str],
    resource: Option<&dyn ownership::Owned>,
) -> bool {
    permissions
        .iter()
        .any(|permission| has_permission(actor, permission, resource))
}

/// 所有权限都必须满足
pub fn has_all_permissions(
    actor: Option<&Actor>,
    permissions: &[&str],
    resource: Option<&dyn ownership::Owned>,
) -> bool {
    permissions
        .iter()
        .all(|permission| has_permission(actor, permission, resource))
}

/// 在不知道具体资源时，主体是否可能通过该权限检查（持有权限本身或其 `_own` 形式）
pub fn may_attempt(actor: Option<&Actor>, permission: &str) -> bool {
    match actor.and_then(|a| a.role) {
        Some(role) => {
            table::role_holds(role, permission) || table::role_holds(role, &own_form(permission))
        }
        None => false,
    }
}

/// 列表查询范围：持有完整权限可见全部，仅持有 `_own` 权限时只可见自己的记录
pub fn list_scope(actor: &Actor, permission: &str) -> Option<AccessScope> {
    let role = actor.role?;
    if table::role_holds(role, permission) {
        Some(AccessScope::All)
    } else if table::role_holds(role, &own_form(permission)) {
        Some(AccessScope::Own)
    } else {
        None
    }
}

/// `has_permission` 的 Result 形式，供服务层直接 `?`
pub fn authorize(
    actor: &Actor,
    permission: &str,
    resource: Option<&dyn ownership::Owned>,
) -> Result<()> {
    if has_permission(Some(actor), permission, resource) {
        Ok(())
    } else {
        tracing::info!(
            "Permission '{}' denied for user {} (role: {:?})",
            permission,
            actor.id,
            actor.role
        );
        Err(CampusError::authorization("Insufficient permissions"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ROLES: [UserRole; 6] = [
        UserRole::Admin,
        UserRole::Lecturer,
        UserRole::Student,
        UserRole::Finance,
        UserRole::Librarian,
        UserRole::It,
    ];

    fn every_permission() -> Vec<&'static str> {
        let mut all: Vec<&'static str> = ALL_ROLES
            .iter()
            .flat_map(|role| table::permissions_for(*role).iter().copied())
            .collect();
        all.sort_unstable();
        all.dedup();
        all
    }

    #[test]
    fn test_missing_actor_or_role_is_denied() {
        assert!(!has_permission(None, perm::COURSES_READ, None));

        let anonymous = Actor { id: 1, role: None };
        assert!(!has_permission(Some(&anonymous), perm::COURSES_READ, None));
        assert!(!may_attempt(Some(&anonymous), perm::COURSES_READ));
    }

    #[test]
    fn test_held_permissions_granted_regardless_of_resource() {
        let stranger = ResourceFields::new()
            .with(OwnerField::LecturerId, 999)
            .with(OwnerField::StudentId, 999);

        for role in ALL_ROLES {
            let actor = Actor::new(1, role);
            for permission in table::permissions_for(role) {
                if is_own_permission(permission) {
                    continue;
                }
                assert!(has_permission(Some(&actor), permission, None));
                assert!(has_permission(Some(&actor), permission, Some(&stranger)));
            }
        }
    }

    #[test]
    fn test_unheld_permissions_denied_without_ownership() {
        for role in ALL_ROLES {
            let actor = Actor::new(1, role);
            for permission in every_permission() {
                if table::role_holds(role, permission) {
                    continue;
                }
                assert!(
                    !has_permission(Some(&actor), permission, None),
                    "{role} should not hold {permission}"
                );
            }
        }
    }

    #[test]
    fn test_lecturer_owns_course() {
        let lecturer_a = Actor::new(10, UserRole::Lecturer);
        let own_course = ResourceFields::new().with(OwnerField::LecturerId, 10);
        let other_course = ResourceFields::new().with(OwnerField::LecturerId, 11);

        assert!(has_permission(
            Some(&lecturer_a),
            "courses:write_own",
            Some(&own_course)
        ));
        assert!(!has_permission(
            Some(&lecturer_a),
            "courses:write_own",
            Some(&other_course)
        ));

        // 通过基础权限名称检查时同样走归属谓词
        assert!(has_permission(
            Some(&lecturer_a),
            perm::COURSES_WRITE,
            Some(&own_course)
        ));
        assert!(!has_permission(
            Some(&lecturer_a),
            perm::COURSES_WRITE,
            Some(&other_course)
        ));
        // 没有资源时不能借 `_own` 获得完整权限
        assert!(!has_permission(Some(&lecturer_a), perm::COURSES_WRITE, None));
    }

    #[test]
    fn test_resource_without_owner_field_is_denied() {
        let student = Actor::new(5, UserRole::Student);
        let resource = ResourceFields::new().with(OwnerField::LecturerId, 5);
        assert!(!has_permission(
            Some(&student),
            perm::INVOICES_READ,
            Some(&resource)
        ));
    }

    #[test]
    fn test_every_held_own_permission_has_predicate() {
        let registered: Vec<&str> = ownership::registered_keys().collect();
        for role in ALL_ROLES {
            for permission in table::permissions_for(role) {
                if is_own_permission(permission) {
                    assert!(
                        registered.contains(permission),
                        "missing predicate for {permission}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_composite_checks() {
        let finance = Actor::new(3, UserRole::Finance);
        assert!(has_any_permission(
            Some(&finance),
            &[perm::USERS_DELETE, perm::INVOICES_WRITE],
            None
        ));
        assert!(!has_all_permissions(
            Some(&finance),
            &[perm::USERS_DELETE, perm::INVOICES_WRITE],
            None
        ));
        assert!(has_all_permissions(
            Some(&finance),
            &[perm::PAYMENTS_READ, perm::INVOICES_WRITE],
            None
        ));
    }

    #[test]
    fn test_list_scope() {
        let admin = Actor::new(1, UserRole::Admin);
        let student = Actor::new(2, UserRole::Student);
        let librarian = Actor::new(3, UserRole::Librarian);

        assert_eq!(
            list_scope(&admin, perm::INVOICES_READ),
            Some(AccessScope::All)
        );
        assert_eq!(
            list_scope(&student, perm::INVOICES_READ),
            Some(AccessScope::Own)
        );
        assert_eq!(list_scope(&librarian, perm::INVOICES_READ), None);
    }

    #[test]
    fn test_authorize_maps_to_forbidden() {
        let student = Actor::new(2, UserRole::Student);
        let err = authorize(&student, perm::USERS_DELETE, None).unwrap_err();
        assert_eq!(err.status(), actix_web::http::StatusCode::FORBIDDEN);
    }
}
