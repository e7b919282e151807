use chrono::{DateTime, Utc};
use sea_orm::{sea_query::StringLen, DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::contest_entity as contests;

/// 活动生命周期状态
/// DRAFT 创建后的初始状态，由管理员手动推进，CANCELLED 为终态
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContestStatus {
    #[sea_orm(string_value = "DRAFT")]
    Draft,
    #[sea_orm(string_value = "UPCOMING")]
    Upcoming,
    #[sea_orm(string_value = "ONGOING")]
    Ongoing,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

impl std::fmt::Display for ContestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContestStatus::Draft => write!(f, "DRAFT"),
            ContestStatus::Upcoming => write!(f, "UPCOMING"),
            ContestStatus::Ongoing => write!(f, "ONGOING"),
            ContestStatus::Completed => write!(f, "COMPLETED"),
            ContestStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// 报名规则：ONE_ENTRY 同一联系方式只能报一次，MULTIPLE_ENTRY 允许重复但打标
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryRules {
    #[sea_orm(string_value = "ONE_ENTRY")]
    OneEntry,
    #[sea_orm(string_value = "MULTIPLE_ENTRY")]
    MultipleEntry,
}

impl std::fmt::Display for EntryRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryRules::OneEntry => write!(f, "ONE_ENTRY"),
            EntryRules::MultipleEntry => write!(f, "MULTIPLE_ENTRY"),
        }
    }
}

/// 创建活动请求
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateContestRequest {
    #[schema(example = "Mid-Autumn Giveaway")]
    pub name: String,
    pub theme: Option<String>,
    pub description: Option<String>,
    /// 报名窗口开始 (RFC3339)
    pub start_date: DateTime<Utc>,
    /// 报名窗口结束，必须严格晚于 start_date
    pub end_date: DateTime<Utc>,
    /// 缺省 DRAFT
    pub status: Option<ContestStatus>,
    pub entry_rules: Option<EntryRules>,
    /// 创建者管理员ID，提供时会记一条审计日志
    pub created_by: Option<i64>,
    pub qr_code_url: Option<String>,
}

/// 更新活动请求，None 字段保持不变
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateContestRequest {
    pub name: Option<String>,
    pub theme: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<ContestStatus>,
    pub entry_rules: Option<EntryRules>,
    pub qr_code_url: Option<String>,
}

/// 活动列表查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ContestQuery {
    /// 按状态筛选，缺省返回全部
    pub status: Option<ContestStatus>,
}

/// 活动响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContestResponse {
    pub contest_id: i64,
    pub name: String,
    pub theme: Option<String>,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: ContestStatus,
    pub entry_rules: Option<EntryRules>,
    pub created_by: Option<i64>,
    pub qr_code_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<contests::Model> for ContestResponse {
    fn from(m: contests::Model) -> Self {
        ContestResponse {
            contest_id: m.contest_id,
            name: m.name,
            theme: m.theme,
            description: m.description,
            start_date: m.start_date,
            end_date: m.end_date,
            status: m.status,
            entry_rules: m.entry_rules,
            created_by: m.created_by,
            qr_code_url: m.qr_code_url,
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
        }
    }
}
