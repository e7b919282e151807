use crate::models::ActivityStatus;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 管理员操作审计实体，只追加不修改
/// admin_id 弱引用，不加外键（账号删除后审计记录保留）
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "admin_activity_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub log_id: i64,
    pub admin_id: i64,
    /// 操作名，如 CREATE_CONTEST / EXECUTE_RANDOM_DRAW
    pub action: String,
    pub target_table: String,
    pub target_id: Option<i64>,
    pub status: ActivityStatus,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
