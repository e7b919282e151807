use chrono::Utc;

use crate::error::{AppError, AppResult};
use crate::models::{
    ActivityStatus, ContestResponse, ContestStatus, CreateContestRequest, UpdateContestRequest,
};
use crate::services::ActivityLogService;
use crate::storage::{ContestPatch, ContestStore, NewContest};

/// 活动管理服务，读写都走远端优先、本地兜底的活动集合
#[derive(Clone)]
pub struct ContestService {
    store: ContestStore,
    activity_log: ActivityLogService,
}

impl ContestService {
    pub fn new(store: ContestStore, activity_log: ActivityLogService) -> Self {
        Self {
            store,
            activity_log,
        }
    }

    /// 创建活动，报名窗口必须满足 end_date 严格晚于 start_date
    pub async fn create_contest(&self, request: CreateContestRequest) -> AppResult<ContestResponse> {
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Contest name must not be empty".to_string(),
            ));
        }
        if request.end_date <= request.start_date {
            return Err(AppError::ValidationError(
                "end_date must be later than start_date".to_string(),
            ));
        }

        let created = self
            .store
            .create(NewContest {
                name: request.name.trim().to_string(),
                theme: request.theme,
                description: request.description,
                start_date: request.start_date,
                end_date: request.end_date,
                status: request.status.unwrap_or(ContestStatus::Draft),
                entry_rules: request.entry_rules,
                created_by: request.created_by,
                qr_code_url: request.qr_code_url,
            })
            .await?;

        if let Some(admin_id) = request.created_by {
            self.activity_log
                .log(
                    admin_id,
                    "CREATE_CONTEST",
                    "contests",
                    Some(created.contest_id),
                    ActivityStatus::Success,
                )
                .await;
        }

        Ok(ContestResponse::from(created))
    }

    /// 活动列表，新的在前，可按状态过滤
    pub async fn get_contests(
        &self,
        status: Option<ContestStatus>,
    ) -> AppResult<Vec<ContestResponse>> {
        let records = self.store.fetch_all().await?;
        Ok(records
            .into_iter()
            .filter(|c| status.as_ref().is_none_or(|s| &c.status == s))
            .map(ContestResponse::from)
            .collect())
    }

    /// 进行中的活动：状态 ONGOING 且当前时间在报名窗口内
    pub async fn get_active_contests(&self) -> AppResult<Vec<ContestResponse>> {
        let now = Utc::now();
        let records = self.store.fetch_all().await?;
        Ok(records
            .into_iter()
            .filter(|c| c.status == ContestStatus::Ongoing && c.start_date <= now && now <= c.end_date)
            .map(ContestResponse::from)
            .collect())
    }

    pub async fn get_contest(&self, contest_id: i64) -> AppResult<ContestResponse> {
        let record = self
            .store
            .fetch_by_id(contest_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contest {contest_id} not found")))?;
        Ok(ContestResponse::from(record))
    }

    /// 更新活动，对合并后的生效窗口重新校验
    pub async fn update_contest(
        &self,
        contest_id: i64,
        request: UpdateContestRequest,
    ) -> AppResult<ContestResponse> {
        let current = self
            .store
            .fetch_by_id(contest_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contest {contest_id} not found")))?;

        if let Some(name) = &request.name {
            if name.trim().is_empty() {
                return Err(AppError::ValidationError(
                    "Contest name must not be empty".to_string(),
                ));
            }
        }
        let effective_start = request.start_date.unwrap_or(current.start_date);
        let effective_end = request.end_date.unwrap_or(current.end_date);
        if effective_end <= effective_start {
            return Err(AppError::ValidationError(
                "end_date must be later than start_date".to_string(),
            ));
        }

        let updated = self
            .store
            .update(
                contest_id,
                ContestPatch {
                    name: request.name.map(|n| n.trim().to_string()),
                    theme: request.theme,
                    description: request.description,
                    start_date: request.start_date,
                    end_date: request.end_date,
                    status: request.status,
                    entry_rules: request.entry_rules,
                    qr_code_url: request.qr_code_url,
                },
            )
            .await?;
        Ok(ContestResponse::from(updated))
    }

    pub async fn delete_contest(&self, contest_id: i64) -> AppResult<()> {
        self.store.delete(contest_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::contest_entity as contests;
    use crate::storage::{LocalContests, RemoteContests};
    use chrono::Duration;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("luckydraw-test-{}", uuid::Uuid::new_v4()))
    }

    fn service(db: DatabaseConnection, dir: &PathBuf) -> ContestService {
        let store = ContestStore::new(
            RemoteContests::new(db.clone()),
            LocalContests::new(dir),
            "contest",
        );
        ContestService::new(store, ActivityLogService::new(db))
    }

    fn contest_row(contest_id: i64, status: ContestStatus) -> contests::Model {
        let now = Utc::now();
        contests::Model {
            contest_id,
            name: format!("Contest {contest_id}"),
            theme: None,
            description: None,
            start_date: now - Duration::days(1),
            end_date: now + Duration::days(1),
            status,
            entry_rules: None,
            created_by: None,
            qr_code_url: None,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    fn create_request() -> CreateContestRequest {
        let now = Utc::now();
        CreateContestRequest {
            name: "Spring Giveaway".to_string(),
            theme: Some("spring".to_string()),
            description: None,
            start_date: now,
            end_date: now + Duration::days(7),
            status: None,
            entry_rules: None,
            created_by: None,
            qr_code_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_inverted_window() {
        let dir = temp_dir();
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service(db, &dir);

        let mut request = create_request();
        request.end_date = request.start_date;
        let result = service.create_contest(request).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let dir = temp_dir();
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service(db, &dir);

        let mut request = create_request();
        request.name = "   ".to_string();
        let result = service.create_contest(request).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_create_defaults_to_draft() {
        let dir = temp_dir();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![contest_row(1, ContestStatus::Draft)]])
            .into_connection();
        let service = service(db, &dir);

        let created = service.create_contest(create_request()).await.unwrap();
        assert_eq!(created.contest_id, 1);
        assert_eq!(created.status, ContestStatus::Draft);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_create_survives_remote_outage() {
        let dir = temp_dir();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([sea_orm::DbErr::Custom("connection refused".to_string())])
            .into_connection();
        let service = service(db, &dir);

        // 远端失败后写入本地文件，调用方无感
        let created = service.create_contest(create_request()).await.unwrap();
        assert_eq!(created.name, "Spring Giveaway");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_status_filter() {
        let dir = temp_dir();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                contest_row(2, ContestStatus::Ongoing),
                contest_row(1, ContestStatus::Completed),
            ]])
            .into_connection();
        let service = service(db, &dir);

        let ongoing = service
            .get_contests(Some(ContestStatus::Ongoing))
            .await
            .unwrap();
        assert_eq!(ongoing.len(), 1);
        assert_eq!(ongoing[0].contest_id, 2);
    }

    #[tokio::test]
    async fn test_active_requires_window_and_status() {
        let dir = temp_dir();
        let now = Utc::now();
        let mut expired = contest_row(1, ContestStatus::Ongoing);
        expired.start_date = now - Duration::days(10);
        expired.end_date = now - Duration::days(3);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                contest_row(2, ContestStatus::Ongoing),
                contest_row(3, ContestStatus::Draft),
                expired,
            ]])
            .into_connection();
        let service = service(db, &dir);

        let active = service.get_active_contests().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].contest_id, 2);
    }

    #[tokio::test]
    async fn test_update_validates_effective_window() {
        let dir = temp_dir();
        let current = contest_row(5, ContestStatus::Draft);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![current.clone()]])
            .into_connection();
        let service = service(db, &dir);

        // 只挪 end_date 也要和现存 start_date 合并校验
        let result = service
            .update_contest(
                5,
                UpdateContestRequest {
                    name: None,
                    theme: None,
                    description: None,
                    start_date: None,
                    end_date: Some(current.start_date - Duration::hours(1)),
                    status: None,
                    entry_rules: None,
                    qr_code_url: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
