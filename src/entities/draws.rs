use crate::models::DrawMode;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 开奖批次实体
/// executed_by 弱引用管理员ID，不加外键（历史批次需要保留）
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "draws")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub draw_id: i64,
    pub contest_id: i64,
    pub executed_by: i64,
    pub draw_mode: DrawMode,
    pub total_winners: i32,
    pub executed_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
