use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 参与者报名实体
/// 说明:
/// - validated 表示人工/自动核验通过，只有核验通过者能进入抽奖池
/// - is_duplicate 标记重复报名 (MULTIPLE_ENTRY 规则下保留但打标)
/// - unique_token 每人一个 uuid，供签到/核验链接使用
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "participants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub participant_id: i64,
    pub contest_id: i64,
    pub name: String,
    /// 邮箱或手机号
    pub contact: String,
    pub validated: bool,
    pub is_duplicate: bool,
    pub unique_token: String,
    pub entry_timestamp: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
