use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::entities::activity_log_entity as activity_log;
use crate::error::AppResult;
use crate::models::{ActivityLogResponse, ActivityStatus};

const DEFAULT_RECENT_LIMIT: u64 = 50;

/// 管理员操作审计服务，只追加不修改
#[derive(Clone)]
pub struct ActivityLogService {
    pool: DatabaseConnection,
}

impl ActivityLogService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 追加一条审计记录，写失败只告警不阻断业务
    pub async fn log(
        &self,
        admin_id: i64,
        action: &str,
        target_table: &str,
        target_id: Option<i64>,
        status: ActivityStatus,
    ) {
        let entry = activity_log::ActiveModel {
            admin_id: Set(admin_id),
            action: Set(action.to_string()),
            target_table: Set(target_table.to_string()),
            target_id: Set(target_id),
            status: Set(status),
            timestamp: Set(Some(Utc::now())),
            ..Default::default()
        };
        if let Err(e) = entry.insert(&self.pool).await {
            log::warn!("Failed to record activity {action} for admin {admin_id}: {e}");
        }
    }

    /// 最近的审计记录，新的在前
    pub async fn recent(
        &self,
        admin_id: Option<i64>,
        limit: Option<u64>,
    ) -> AppResult<Vec<ActivityLogResponse>> {
        let mut query = activity_log::Entity::find();
        if let Some(admin_id) = admin_id {
            query = query.filter(activity_log::Column::AdminId.eq(admin_id));
        }
        let models = query
            .order_by_desc(activity_log::Column::Timestamp)
            .limit(limit.unwrap_or(DEFAULT_RECENT_LIMIT))
            .all(&self.pool)
            .await?;
        Ok(models.into_iter().map(ActivityLogResponse::from).collect())
    }

    /// 某管理员的审计条数
    pub async fn count_for_admin(&self, admin_id: i64) -> AppResult<u64> {
        Ok(activity_log::Entity::find()
            .filter(activity_log::Column::AdminId.eq(admin_id))
            .count(&self.pool)
            .await?)
    }
}
