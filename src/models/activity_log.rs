use chrono::{DateTime, Utc};
use sea_orm::{sea_query::StringLen, DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::activity_log_entity as activity_log;

/// 操作结果状态
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityStatus {
    #[sea_orm(string_value = "SUCCESS")]
    Success,
    #[sea_orm(string_value = "FAILURE")]
    Failure,
    #[sea_orm(string_value = "PENDING")]
    Pending,
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityStatus::Success => write!(f, "SUCCESS"),
            ActivityStatus::Failure => write!(f, "FAILURE"),
            ActivityStatus::Pending => write!(f, "PENDING"),
        }
    }
}

/// 操作日志查询参数
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ActivityLogQuery {
    /// 按操作者过滤
    pub admin_id: Option<i64>,
    /// 返回条数上限，缺省 50
    pub limit: Option<u64>,
}

/// 操作日志响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityLogResponse {
    pub log_id: i64,
    pub admin_id: i64,
    pub action: String,
    pub target_table: String,
    pub target_id: Option<i64>,
    pub status: ActivityStatus,
    pub timestamp: DateTime<Utc>,
}

impl From<activity_log::Model> for ActivityLogResponse {
    fn from(m: activity_log::Model) -> Self {
        ActivityLogResponse {
            log_id: m.log_id,
            admin_id: m.admin_id,
            action: m.action,
            target_table: m.target_table,
            target_id: m.target_id,
            status: m.status,
            timestamp: m.timestamp.unwrap_or_else(Utc::now),
        }
    }
}
