use crate::models::AdminRole;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 管理员账号实体，password_hash 存 bcrypt，对外响应走 AdminResponse
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub admin_id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: AdminRole,
    pub two_factor: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
