use chrono::{DateTime, Utc};
use sea_orm::{sea_query::StringLen, DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{draw_entity as draws, winner_entity as winners};
use crate::models::{ParticipantResponse, PrizeResponse};

/// 开奖方式
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrawMode {
    #[sea_orm(string_value = "RANDOM")]
    Random,
    #[sea_orm(string_value = "MANUAL")]
    Manual,
}

impl std::fmt::Display for DrawMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawMode::Random => write!(f, "RANDOM"),
            DrawMode::Manual => write!(f, "MANUAL"),
        }
    }
}

/// 发奖流转状态，只能按 rank 向前推进（允许跳级）
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrizeStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "NOTIFIED")]
    Notified,
    #[sea_orm(string_value = "CLAIMED")]
    Claimed,
    #[sea_orm(string_value = "DISPATCHED")]
    Dispatched,
    #[sea_orm(string_value = "DELIVERED")]
    Delivered,
}

impl PrizeStatus {
    /// 流转序号，状态更新要求 rank 严格递增
    pub fn rank(&self) -> u8 {
        match self {
            PrizeStatus::Pending => 0,
            PrizeStatus::Notified => 1,
            PrizeStatus::Claimed => 2,
            PrizeStatus::Dispatched => 3,
            PrizeStatus::Delivered => 4,
        }
    }
}

impl std::fmt::Display for PrizeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrizeStatus::Pending => write!(f, "PENDING"),
            PrizeStatus::Notified => write!(f, "NOTIFIED"),
            PrizeStatus::Claimed => write!(f, "CLAIMED"),
            PrizeStatus::Dispatched => write!(f, "DISPATCHED"),
            PrizeStatus::Delivered => write!(f, "DELIVERED"),
        }
    }
}

/// 随机开奖请求
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RandomDrawRequest {
    pub contest_id: i64,
    /// 执行批次的管理员ID
    pub executed_by: i64,
    /// 本批次抽取人数 (≥1 且不超过已核验报名数)
    pub number_of_winners: i32,
    /// 可选的配奖列表，第 i 名中奖者配 prize_ids[i]
    pub prize_ids: Option<Vec<i64>>,
}

/// 手动开奖请求，中奖顺序即 participant_ids 顺序
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ManualDrawRequest {
    pub contest_id: i64,
    pub executed_by: i64,
    /// 必须全部属于该活动且已核验
    pub participant_ids: Vec<i64>,
    pub prize_ids: Option<Vec<i64>>,
}

/// 中奖通知标记更新请求
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateNotificationRequest {
    pub notified: bool,
}

/// 发奖状态更新请求
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateWinnerStatusRequest {
    pub prize_status: PrizeStatus,
}

/// 中奖记录响应，附带参与者与奖品信息
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WinnerResponse {
    pub winner_id: i64,
    pub draw_id: i64,
    pub participant_id: i64,
    pub prize_id: Option<i64>,
    pub notified: bool,
    pub notified_at: Option<DateTime<Utc>>,
    pub prize_status: PrizeStatus,
    pub claimed_at: Option<DateTime<Utc>>,
    pub dispatched_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub participant: Option<ParticipantResponse>,
    pub prize: Option<PrizeResponse>,
}

impl WinnerResponse {
    pub fn from_parts(
        m: winners::Model,
        participant: Option<ParticipantResponse>,
        prize: Option<PrizeResponse>,
    ) -> Self {
        WinnerResponse {
            winner_id: m.winner_id,
            draw_id: m.draw_id,
            participant_id: m.participant_id,
            prize_id: m.prize_id,
            notified: m.notified,
            notified_at: m.notified_at,
            prize_status: m.prize_status,
            claimed_at: m.claimed_at,
            dispatched_at: m.dispatched_at,
            created_at: m.created_at.unwrap_or_else(Utc::now),
            participant,
            prize,
        }
    }
}

/// 开奖批次响应，附带全部中奖记录
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DrawResponse {
    pub draw_id: i64,
    pub contest_id: i64,
    pub executed_by: i64,
    pub draw_mode: DrawMode,
    pub total_winners: i32,
    pub executed_at: DateTime<Utc>,
    pub winners: Vec<WinnerResponse>,
}

impl DrawResponse {
    pub fn from_parts(m: draws::Model, winners: Vec<WinnerResponse>) -> Self {
        DrawResponse {
            draw_id: m.draw_id,
            contest_id: m.contest_id,
            executed_by: m.executed_by,
            draw_mode: m.draw_mode,
            total_winners: m.total_winners,
            executed_at: m.executed_at.unwrap_or_else(Utc::now),
            winners,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prize_status_rank_order() {
        assert!(PrizeStatus::Pending.rank() < PrizeStatus::Notified.rank());
        assert!(PrizeStatus::Notified.rank() < PrizeStatus::Claimed.rank());
        assert!(PrizeStatus::Claimed.rank() < PrizeStatus::Dispatched.rank());
        assert!(PrizeStatus::Dispatched.rank() < PrizeStatus::Delivered.rank());
    }

    #[test]
    fn test_prize_status_serializes_screaming_snake() {
        let json = serde_json::to_string(&PrizeStatus::Dispatched).unwrap();
        assert_eq!(json, "\"DISPATCHED\"");
        let back: PrizeStatus = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(back, PrizeStatus::Pending);
    }
}
