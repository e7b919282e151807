use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::prize_entity as prizes;

/// 创建奖品请求
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePrizeRequest {
    pub contest_id: i64,
    #[schema(example = "Bluetooth Speaker")]
    pub prize_name: String,
    /// 单件价值 (美分)，缺省 0
    pub value_cents: Option<i64>,
    /// 可发放件数，缺省 1
    pub quantity: Option<i32>,
    pub description: Option<String>,
}

/// 更新奖品请求，None 字段保持不变
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdatePrizeRequest {
    pub prize_name: Option<String>,
    pub value_cents: Option<i64>,
    pub quantity: Option<i32>,
    pub description: Option<String>,
}

/// 奖品响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrizeResponse {
    pub prize_id: i64,
    pub contest_id: i64,
    pub prize_name: String,
    pub value_cents: i64,
    pub quantity: i32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<prizes::Model> for PrizeResponse {
    fn from(m: prizes::Model) -> Self {
        PrizeResponse {
            prize_id: m.prize_id,
            contest_id: m.contest_id,
            prize_name: m.prize_name,
            value_cents: m.value_cents,
            quantity: m.quantity,
            description: m.description,
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
        }
    }
}

/// 某活动的奖品发放统计
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeStatsResponse {
    /// 总件数 (按 quantity 加总)
    pub total_prizes: i64,
    /// 已中出件数
    pub won_prizes: i64,
    /// 剩余件数
    pub available_prizes: i64,
    /// 总价值 (美分, value_cents * quantity 加总)
    pub total_value_cents: i64,
    /// 奖品种类数
    pub prize_count: i64,
}
