use crate::models::{ContestStatus, EntryRules};
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 抽奖活动实体
/// 说明:
/// - status / entry_rules 存 SCREAMING_SNAKE 字符串，由应用层 enum 映射
/// - created_by 弱引用管理员，不加外键（管理员删除后活动保留）
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "contests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub contest_id: i64,
    pub name: String,
    pub theme: Option<String>,
    pub description: Option<String>,
    /// 报名窗口开始
    pub start_date: DateTime<Utc>,
    /// 报名窗口结束 (必须晚于 start_date)
    pub end_date: DateTime<Utc>,
    pub status: ContestStatus,
    pub entry_rules: Option<EntryRules>,
    pub created_by: Option<i64>,
    pub qr_code_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
