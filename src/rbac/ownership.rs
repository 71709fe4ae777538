//! `_own` 权限的归属判定
//!
//! 每个 `_own` 权限对应一个谓词：资源上的某个归属字段必须等于当前用户 ID。

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::Actor;

/// 资源上可用于归属判定的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerField {
    UserId,
    StudentId,
    LecturerId,
    BorrowerId,
    PrincipalInvestigatorId,
    RecipientId,
}

/// 可参与归属判定的资源
pub trait Owned {
    fn owner(&self, field: OwnerField) -> Option<i64>;
}

/// 临时拼装的资源字段，适用于尚未落库的资源（例如创建请求）
#[derive(Debug, Clone, Default)]
pub struct ResourceFields {
    fields: HashMap<OwnerField, i64>,
}

impl ResourceFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: OwnerField, value: i64) -> Self {
        self.fields.insert(field, value);
        self
    }
}

impl Owned for ResourceFields {
    fn owner(&self, field: OwnerField) -> Option<i64> {
        self.fields.get(&field).copied()
    }
}

pub type OwnershipPredicate = fn(&Actor, &dyn Owned) -> bool;

macro_rules! owned_by {
    ($field:ident) => {
        (|actor: &Actor, resource: &dyn Owned| {
            resource.owner(OwnerField::$field) == Some(actor.id)
        }) as OwnershipPredicate
    };
}

static OWNERSHIP_PREDICATES: Lazy<HashMap<&'static str, OwnershipPredicate>> = Lazy::new(|| {
    HashMap::from([
        ("users:read_own", owned_by!(UserId)),
        ("users:write_own", owned_by!(UserId)),
        ("students:read_own", owned_by!(StudentId)),
        ("lecturers:read_own", owned_by!(LecturerId)),
        ("lecturers:write_own", owned_by!(LecturerId)),
        ("courses:write_own", owned_by!(LecturerId)),
        ("class_sections:write_own", owned_by!(LecturerId)),
        ("enrollments:read_own", owned_by!(StudentId)),
        ("enrollments:write_own", owned_by!(StudentId)),
        ("enrollments:delete_own", owned_by!(StudentId)),
        ("attendance:read_own", owned_by!(StudentId)),
        ("attendance:write_own", owned_by!(LecturerId)),
        ("assessments:write_own", owned_by!(LecturerId)),
        ("assessments:delete_own", owned_by!(LecturerId)),
        ("grades:read_own", owned_by!(StudentId)),
        ("grades:write_own", owned_by!(LecturerId)),
        ("invoices:read_own", owned_by!(StudentId)),
        ("payments:read_own", owned_by!(StudentId)),
        ("payments:write_own", owned_by!(StudentId)),
        ("loans:read_own", owned_by!(BorrowerId)),
        ("research:write_own", owned_by!(PrincipalInvestigatorId)),
        ("research:delete_own", owned_by!(PrincipalInvestigatorId)),
        ("notifications:read_own", owned_by!(RecipientId)),
        ("notifications:write_own", owned_by!(RecipientId)),
    ])
});

/// 查找 `_own` 权限对应的谓词
pub fn predicate_for(permission: &str) -> Option<OwnershipPredicate> {
    OWNERSHIP_PREDICATES.get(permission).copied()
}

/// 注册的 `_own` 权限键
pub fn registered_keys() -> impl Iterator<Item = &'static str> {
    OWNERSHIP_PREDICATES.keys().copied()
}
