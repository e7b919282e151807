use crate::models::PrizeStatus;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 中奖记录实体
/// 说明:
/// - prize_id 可空：允许先抽人后配奖
/// - prize_status 为发奖流转状态，只能向前推进
/// - claimed_at / dispatched_at 在进入对应状态时打点
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "winners")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub winner_id: i64,
    pub draw_id: i64,
    pub participant_id: i64,
    pub prize_id: Option<i64>,
    pub notified: bool,
    pub notified_at: Option<DateTime<Utc>>,
    pub prize_status: PrizeStatus,
    pub claimed_at: Option<DateTime<Utc>>,
    pub dispatched_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
