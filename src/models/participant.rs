use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::participant_entity as participants;

/// 新增报名请求
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddParticipantRequest {
    pub contest_id: i64,
    #[schema(example = "Jane Doe")]
    pub name: String,
    /// 邮箱或手机号
    #[schema(example = "jane@example.com")]
    pub contact: String,
}

/// 更新报名请求，None 字段保持不变
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateParticipantRequest {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub validated: Option<bool>,
    pub is_duplicate: Option<bool>,
}

/// 核验状态更新请求
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateValidationRequest {
    pub validated: bool,
}

/// 报名响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantResponse {
    pub participant_id: i64,
    pub contest_id: i64,
    pub name: String,
    pub contact: String,
    pub validated: bool,
    pub is_duplicate: bool,
    pub unique_token: String,
    pub entry_timestamp: DateTime<Utc>,
}

impl From<participants::Model> for ParticipantResponse {
    fn from(m: participants::Model) -> Self {
        ParticipantResponse {
            participant_id: m.participant_id,
            contest_id: m.contest_id,
            name: m.name,
            contact: m.contact,
            validated: m.validated,
            is_duplicate: m.is_duplicate,
            unique_token: m.unique_token,
            entry_timestamp: m.entry_timestamp.unwrap_or_else(Utc::now),
        }
    }
}

/// 某活动的报名统计
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParticipantStatsResponse {
    pub total: i64,
    pub validated: i64,
    /// 未核验数 = total - validated
    pub pending: i64,
}
