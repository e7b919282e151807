use chrono::{DateTime, Utc};
use sea_orm::{sea_query::StringLen, DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::admin_entity as admins;

/// 管理员角色，权限按 rank 比较
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminRole {
    #[sea_orm(string_value = "SUPERADMIN")]
    Superadmin,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    #[sea_orm(string_value = "MODERATOR")]
    Moderator,
}

impl AdminRole {
    /// 权限序号，SUPERADMIN > ADMIN > MODERATOR
    pub fn rank(&self) -> u8 {
        match self {
            AdminRole::Superadmin => 3,
            AdminRole::Admin => 2,
            AdminRole::Moderator => 1,
        }
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminRole::Superadmin => write!(f, "SUPERADMIN"),
            AdminRole::Admin => write!(f, "ADMIN"),
            AdminRole::Moderator => write!(f, "MODERATOR"),
        }
    }
}

/// 创建管理员请求
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAdminRequest {
    #[schema(example = "运营小王")]
    pub name: String,
    #[schema(example = "ops@example.com")]
    pub email: String,
    /// 明文密码，入库前做 bcrypt 哈希
    pub password: String,
    /// 缺省 MODERATOR
    pub role: Option<AdminRole>,
    pub two_factor: Option<bool>,
}

/// 更新管理员请求，字段均可选
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateAdminRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    /// 传入时重新哈希
    pub password: Option<String>,
    pub role: Option<AdminRole>,
    pub two_factor: Option<bool>,
}

/// 登录请求
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ops@example.com")]
    pub email: String,
    pub password: String,
}

/// 管理员响应，不含密码哈希
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminResponse {
    pub admin_id: i64,
    pub name: String,
    pub email: String,
    pub role: AdminRole,
    pub two_factor: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<admins::Model> for AdminResponse {
    fn from(m: admins::Model) -> Self {
        AdminResponse {
            admin_id: m.admin_id,
            name: m.name,
            email: m.email,
            role: m.role,
            two_factor: m.two_factor,
            created_at: m.created_at.unwrap_or_else(Utc::now),
            last_login: m.last_login,
        }
    }
}

/// 按角色统计管理员数量
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleStatsResponse {
    pub superadmins: i64,
    pub admins: i64,
    pub moderators: i64,
    pub total: i64,
}

/// 单个管理员的操作统计
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminStatsResponse {
    pub admin_id: i64,
    /// 创建的活动数
    pub contests_created: i64,
    /// 执行的开奖批次数
    pub draws_executed: i64,
    /// 审计日志条数
    pub activities_logged: i64,
}

/// 权限校验查询参数
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PermissionQuery {
    /// 所需最低角色
    pub role: AdminRole,
}

/// 权限校验结果
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PermissionResponse {
    pub admin_id: i64,
    pub required_role: AdminRole,
    pub allowed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_rank_hierarchy() {
        assert!(AdminRole::Superadmin.rank() > AdminRole::Admin.rank());
        assert!(AdminRole::Admin.rank() > AdminRole::Moderator.rank());
    }

    #[test]
    fn test_role_serializes_screaming_snake() {
        let json = serde_json::to_string(&AdminRole::Superadmin).unwrap();
        assert_eq!(json, "\"SUPERADMIN\"");
        let back: AdminRole = serde_json::from_str("\"MODERATOR\"").unwrap();
        assert_eq!(back, AdminRole::Moderator);
    }
}
