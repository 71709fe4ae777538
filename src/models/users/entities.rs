use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::enums::string_enum;
use crate::rbac::{OwnerField, Owned};

string_enum! {
    /// 用户角色
    UserRole {
        Admin => "ADMIN",
        Lecturer => "LECTURER",
        Student => "STUDENT",
        Finance => "FINANCE",
        Librarian => "LIBRARIAN",
        It => "IT",
    }
}

string_enum! {
    /// 用户状态
    UserStatus {
        Active => "active",
        Inactive => "inactive",
        Suspended => "suspended",
    }
}

// 用户资料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    #[serde(skip_serializing, default)]
    pub failed_login_attempts: i32,
    pub locked_until: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 账号在给定时间点是否处于锁定窗口内
    pub fn is_locked_at(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.is_some_and(|until| until > now)
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

/// 带资料的用户
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserWithProfile {
    #[serde(flatten)]
    pub user: User,
    pub profile: Option<Profile>,
}

impl Owned for User {
    fn owner(&self, field: OwnerField) -> Option<i64> {
        match field {
            OwnerField::UserId => Some(self.id),
            _ => None,
        }
    }
}

impl Owned for Profile {
    fn owner(&self, field: OwnerField) -> Option<i64> {
        match field {
            OwnerField::UserId => Some(self.user_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(locked_until: Option<DateTime<Utc>>) -> User {
        let now = Utc::now();
        User {
            id: 1,
            email: "a@b.co".to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::Student,
            status: UserStatus::Active,
            failed_login_attempts: 0,
            locked_until,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_role_strings() {
        assert_eq!(UserRole::It.to_string(), "IT");
        assert_eq!("LIBRARIAN".parse::<UserRole>().unwrap(), UserRole::Librarian);
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_lock_window() {
        let now = Utc::now();
        assert!(!user(None).is_locked_at(now));
        assert!(user(Some(now + chrono::Duration::minutes(5))).is_locked_at(now));
        assert!(!user(Some(now - chrono::Duration::seconds(1))).is_locked_at(now));
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let value = serde_json::to_value(user(None)).unwrap();
        assert!(value.get("password_hash").is_none());
        assert!(value.get("failed_login_attempts").is_none());
        assert_eq!(value["role"], "STUDENT");
    }
}
