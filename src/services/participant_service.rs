use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    AddParticipantRequest, EntryRules, ParticipantResponse, ParticipantStatsResponse,
    UpdateParticipantRequest,
};
use crate::storage::{ContestStore, NewParticipant, ParticipantPatch, ParticipantStore};
use crate::utils::is_valid_contact;

/// 报名管理服务
/// 重复报名在 (contest_id, contact) 维度判定：ONE_ENTRY 拒绝，MULTIPLE_ENTRY 放行并打标
#[derive(Clone)]
pub struct ParticipantService {
    store: ParticipantStore,
    contests: ContestStore,
}

impl ParticipantService {
    pub fn new(store: ParticipantStore, contests: ContestStore) -> Self {
        Self { store, contests }
    }

    pub async fn add_participant(
        &self,
        request: AddParticipantRequest,
    ) -> AppResult<ParticipantResponse> {
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Participant name must not be empty".to_string(),
            ));
        }
        let contact = request.contact.trim().to_string();
        if !is_valid_contact(&contact) {
            return Err(AppError::ValidationError(
                "Contact must be a valid email address or phone number".to_string(),
            ));
        }

        let contest = self
            .contests
            .fetch_by_id(request.contest_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Contest {} not found", request.contest_id))
            })?;

        let duplicate = self.is_duplicate_entry(request.contest_id, &contact).await?;
        // 未设置报名规则的活动按 ONE_ENTRY 处理
        let entry_rules = contest.entry_rules.unwrap_or(EntryRules::OneEntry);
        if duplicate && entry_rules == EntryRules::OneEntry {
            return Err(AppError::ValidationError(
                "This contact has already entered the contest".to_string(),
            ));
        }

        let created = self
            .store
            .create(NewParticipant {
                contest_id: request.contest_id,
                name: request.name.trim().to_string(),
                contact,
                validated: false,
                is_duplicate: duplicate,
                unique_token: Uuid::new_v4().to_string(),
            })
            .await?;
        Ok(ParticipantResponse::from(created))
    }

    pub async fn get_participants_by_contest(
        &self,
        contest_id: i64,
    ) -> AppResult<Vec<ParticipantResponse>> {
        let records = self.store.fetch_all().await?;
        Ok(records
            .into_iter()
            .filter(|p| p.contest_id == contest_id)
            .map(ParticipantResponse::from)
            .collect())
    }

    pub async fn get_participant(&self, participant_id: i64) -> AppResult<ParticipantResponse> {
        let record = self
            .store
            .fetch_by_id(participant_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Participant {participant_id} not found")))?;
        Ok(ParticipantResponse::from(record))
    }

    /// 按报名令牌查询，供签到/核验链接使用
    pub async fn get_participant_by_token(&self, token: &str) -> AppResult<ParticipantResponse> {
        let records = self.store.fetch_all().await?;
        records
            .into_iter()
            .find(|p| p.unique_token == token)
            .map(ParticipantResponse::from)
            .ok_or_else(|| AppError::NotFound("Participant token not found".to_string()))
    }

    pub async fn update_participant(
        &self,
        participant_id: i64,
        request: UpdateParticipantRequest,
    ) -> AppResult<ParticipantResponse> {
        if let Some(name) = &request.name {
            if name.trim().is_empty() {
                return Err(AppError::ValidationError(
                    "Participant name must not be empty".to_string(),
                ));
            }
        }
        if let Some(contact) = &request.contact {
            if !is_valid_contact(contact.trim()) {
                return Err(AppError::ValidationError(
                    "Contact must be a valid email address or phone number".to_string(),
                ));
            }
        }

        let updated = self
            .store
            .update(
                participant_id,
                ParticipantPatch {
                    name: request.name.map(|n| n.trim().to_string()),
                    contact: request.contact.map(|c| c.trim().to_string()),
                    validated: request.validated,
                    is_duplicate: request.is_duplicate,
                },
            )
            .await?;
        Ok(ParticipantResponse::from(updated))
    }

    /// 核验开关，只有核验通过者会进入抽奖池
    pub async fn update_validation(
        &self,
        participant_id: i64,
        validated: bool,
    ) -> AppResult<ParticipantResponse> {
        let updated = self
            .store
            .update(
                participant_id,
                ParticipantPatch {
                    validated: Some(validated),
                    ..Default::default()
                },
            )
            .await?;
        Ok(ParticipantResponse::from(updated))
    }

    pub async fn get_validated_participants(
        &self,
        contest_id: i64,
    ) -> AppResult<Vec<ParticipantResponse>> {
        let records = self.store.fetch_all().await?;
        Ok(records
            .into_iter()
            .filter(|p| p.contest_id == contest_id && p.validated)
            .map(ParticipantResponse::from)
            .collect())
    }

    /// 同一活动下同一联系方式（忽略大小写）是否已报名
    pub async fn is_duplicate_entry(&self, contest_id: i64, contact: &str) -> AppResult<bool> {
        let records = self.store.fetch_all().await?;
        Ok(records.iter().any(|p| {
            p.contest_id == contest_id && p.contact.eq_ignore_ascii_case(contact)
        }))
    }

    pub async fn participant_stats(
        &self,
        contest_id: i64,
    ) -> AppResult<ParticipantStatsResponse> {
        let records = self.store.fetch_all().await?;
        let total = records
            .iter()
            .filter(|p| p.contest_id == contest_id)
            .count() as i64;
        let validated = records
            .iter()
            .filter(|p| p.contest_id == contest_id && p.validated)
            .count() as i64;
        Ok(ParticipantStatsResponse {
            total,
            validated,
            pending: total - validated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{contest_entity as contests, participant_entity as participants};
    use crate::models::ContestStatus;
    use crate::storage::{LocalContests, LocalParticipants, RemoteContests, RemoteParticipants};
    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("luckydraw-test-{}", uuid::Uuid::new_v4()))
    }

    fn service(db: DatabaseConnection, dir: &PathBuf) -> ParticipantService {
        let store = ParticipantStore::new(
            RemoteParticipants::new(db.clone()),
            LocalParticipants::new(dir),
            "participant",
        );
        let contests = ContestStore::new(
            RemoteContests::new(db),
            LocalContests::new(dir),
            "contest",
        );
        ParticipantService::new(store, contests)
    }

    fn contest_row(entry_rules: Option<EntryRules>) -> contests::Model {
        let now = Utc::now();
        contests::Model {
            contest_id: 1,
            name: "Contest".to_string(),
            theme: None,
            description: None,
            start_date: now - Duration::days(1),
            end_date: now + Duration::days(1),
            status: ContestStatus::Ongoing,
            entry_rules,
            created_by: None,
            qr_code_url: None,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    fn participant_row(participant_id: i64, contact: &str, validated: bool) -> participants::Model {
        participants::Model {
            participant_id,
            contest_id: 1,
            name: format!("P{participant_id}"),
            contact: contact.to_string(),
            validated,
            is_duplicate: false,
            unique_token: format!("token-{participant_id}"),
            entry_timestamp: Some(Utc::now()),
        }
    }

    fn add_request(contact: &str) -> AddParticipantRequest {
        AddParticipantRequest {
            contest_id: 1,
            name: "Jane".to_string(),
            contact: contact.to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_contact() {
        let dir = temp_dir();
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service(db, &dir);

        let result = service.add_participant(add_request("not a contact")).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_add_rejects_duplicate_under_one_entry() {
        let dir = temp_dir();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![contest_row(Some(EntryRules::OneEntry))]])
            .append_query_results([vec![participant_row(1, "jane@example.com", true)]])
            .into_connection();
        let service = service(db, &dir);

        // 大小写不同也算同一联系方式
        let result = service.add_participant(add_request("Jane@Example.com")).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_add_flags_duplicate_under_multiple_entry() {
        let dir = temp_dir();
        let mut created = participant_row(2, "jane@example.com", false);
        created.is_duplicate = true;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![contest_row(Some(EntryRules::MultipleEntry))]])
            .append_query_results([vec![participant_row(1, "jane@example.com", true)]])
            .append_query_results([vec![created]])
            .into_connection();
        let service = service(db, &dir);

        let response = service
            .add_participant(add_request("jane@example.com"))
            .await
            .unwrap();
        assert!(response.is_duplicate);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_add_defaults_to_one_entry_when_rules_unset() {
        let dir = temp_dir();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![contest_row(None)]])
            .append_query_results([vec![participant_row(1, "jane@example.com", true)]])
            .into_connection();
        let service = service(db, &dir);

        let result = service.add_participant(add_request("jane@example.com")).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_stats_counts_validated_and_pending() {
        let dir = temp_dir();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                participant_row(3, "c@example.com", false),
                participant_row(2, "b@example.com", true),
                participant_row(1, "a@example.com", true),
            ]])
            .into_connection();
        let service = service(db, &dir);

        let stats = service.participant_stats(1).await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.validated, 2);
        assert_eq!(stats.pending, 1);
    }

    #[tokio::test]
    async fn test_lookup_by_token() {
        let dir = temp_dir();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                participant_row(2, "b@example.com", true),
                participant_row(1, "a@example.com", false),
            ]])
            .into_connection();
        let service = service(db, &dir);

        let found = service.get_participant_by_token("token-1").await.unwrap();
        assert_eq!(found.participant_id, 1);
    }

    #[tokio::test]
    async fn test_lookup_by_unknown_token_is_not_found() {
        let dir = temp_dir();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<participants::Model>::new()])
            .into_connection();
        let service = service(db, &dir);

        let missing = service.get_participant_by_token("nope").await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }
}
