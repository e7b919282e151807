use std::collections::{HashMap, HashSet};

use chrono::Utc;
use rand::seq::SliceRandom;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::entities::{
    draw_entity as draws, participant_entity as participants, prize_entity as prizes,
    winner_entity as winners,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    ActivityStatus, DrawMode, DrawResponse, ManualDrawRequest, ParticipantResponse, PrizeResponse,
    PrizeStatus, RandomDrawRequest, WinnerResponse,
};
use crate::services::ActivityLogService;

/// 开奖引擎
/// 抽奖池、批次与中奖记录只走远端数据库；批次与中奖记录在同一事务内写入
#[derive(Clone)]
pub struct DrawService {
    pool: DatabaseConnection,
    activity_log: ActivityLogService,
}

impl DrawService {
    pub fn new(pool: DatabaseConnection, activity_log: ActivityLogService) -> Self {
        Self { pool, activity_log }
    }

    /// 随机开奖：从已核验报名中无偏抽取 number_of_winners 人
    pub async fn execute_random_draw(&self, request: RandomDrawRequest) -> AppResult<DrawResponse> {
        let executed_by = request.executed_by;
        let result = self.random_draw_inner(request).await;
        self.log_outcome(executed_by, "EXECUTE_RANDOM_DRAW", &result)
            .await;
        result
    }

    /// 手动开奖：中奖顺序即请求中 participant_ids 的顺序
    pub async fn execute_manual_draw(&self, request: ManualDrawRequest) -> AppResult<DrawResponse> {
        let executed_by = request.executed_by;
        let result = self.manual_draw_inner(request).await;
        self.log_outcome(executed_by, "EXECUTE_MANUAL_DRAW", &result)
            .await;
        result
    }

    async fn random_draw_inner(&self, request: RandomDrawRequest) -> AppResult<DrawResponse> {
        if request.number_of_winners < 1 {
            return Err(AppError::ValidationError(
                "number_of_winners must be at least 1".to_string(),
            ));
        }

        let pool = self.validated_pool(request.contest_id).await?;
        if pool.is_empty() {
            return Err(AppError::EmptyPool(format!(
                "Contest {} has no validated participants to draw from",
                request.contest_id
            )));
        }
        let k = request.number_of_winners as usize;
        if k > pool.len() {
            return Err(AppError::Overselection(format!(
                "Requested {} winners but only {} validated participants are available",
                request.number_of_winners,
                pool.len()
            )));
        }

        let selected = select_random(pool, k);
        self.persist_draw(
            request.contest_id,
            request.executed_by,
            DrawMode::Random,
            selected,
            request.prize_ids,
        )
        .await
    }

    async fn manual_draw_inner(&self, request: ManualDrawRequest) -> AppResult<DrawResponse> {
        if request.participant_ids.is_empty() {
            return Err(AppError::ValidationError(
                "participant_ids must not be empty".to_string(),
            ));
        }
        let unique: HashSet<i64> = request.participant_ids.iter().copied().collect();
        if unique.len() != request.participant_ids.len() {
            return Err(AppError::InvalidSelection(
                "participant_ids contains duplicates".to_string(),
            ));
        }

        let found = participants::Entity::find()
            .filter(participants::Column::ContestId.eq(request.contest_id))
            .filter(participants::Column::Validated.eq(true))
            .filter(participants::Column::ParticipantId.is_in(request.participant_ids.clone()))
            .all(&self.pool)
            .await?;
        if found.len() != request.participant_ids.len() {
            return Err(AppError::InvalidSelection(format!(
                "{} of {} selected participants are missing, unvalidated or not in contest {}",
                request.participant_ids.len() - found.len(),
                request.participant_ids.len(),
                request.contest_id
            )));
        }

        let selected = order_by_request(found, &request.participant_ids);
        self.persist_draw(
            request.contest_id,
            request.executed_by,
            DrawMode::Manual,
            selected,
            request.prize_ids,
        )
        .await
    }

    async fn validated_pool(&self, contest_id: i64) -> AppResult<Vec<participants::Model>> {
        Ok(participants::Entity::find()
            .filter(participants::Column::ContestId.eq(contest_id))
            .filter(participants::Column::Validated.eq(true))
            .all(&self.pool)
            .await?)
    }

    /// 批次行与全部中奖行同一事务写入，任何一步失败整体回滚
    async fn persist_draw(
        &self,
        contest_id: i64,
        executed_by: i64,
        draw_mode: DrawMode,
        selected: Vec<participants::Model>,
        prize_ids: Option<Vec<i64>>,
    ) -> AppResult<DrawResponse> {
        let txn = self.pool.begin().await?;

        let draw = draws::ActiveModel {
            contest_id: Set(contest_id),
            executed_by: Set(executed_by),
            draw_mode: Set(draw_mode),
            total_winners: Set(selected.len() as i32),
            executed_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut winner_rows = Vec::with_capacity(selected.len());
        for (i, participant) in selected.iter().enumerate() {
            // 第 i 名中奖者配 prize_ids[i]，没有则先不配奖
            let prize_id = prize_ids.as_ref().and_then(|ids| ids.get(i).copied());
            let winner = winners::ActiveModel {
                draw_id: Set(draw.draw_id),
                participant_id: Set(participant.participant_id),
                prize_id: Set(prize_id),
                notified: Set(false),
                notified_at: Set(None),
                prize_status: Set(PrizeStatus::Pending),
                claimed_at: Set(None),
                dispatched_at: Set(None),
                created_at: Set(Some(Utc::now())),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            winner_rows.push(winner);
        }

        txn.commit().await?;

        let participant_by_id: HashMap<i64, participants::Model> = selected
            .into_iter()
            .map(|p| (p.participant_id, p))
            .collect();
        let prize_by_id = self
            .resolve_prizes(winner_rows.iter().filter_map(|w| w.prize_id).collect())
            .await?;

        let winner_responses = winner_rows
            .into_iter()
            .map(|w| {
                let participant = participant_by_id
                    .get(&w.participant_id)
                    .cloned()
                    .map(ParticipantResponse::from);
                let prize = w
                    .prize_id
                    .and_then(|id| prize_by_id.get(&id).cloned())
                    .map(PrizeResponse::from);
                WinnerResponse::from_parts(w, participant, prize)
            })
            .collect();
        Ok(DrawResponse::from_parts(draw, winner_responses))
    }

    pub async fn get_draw(&self, draw_id: i64) -> AppResult<DrawResponse> {
        let draw = draws::Entity::find_by_id(draw_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Draw {draw_id} not found")))?;
        let winner_rows = winners::Entity::find()
            .filter(winners::Column::DrawId.eq(draw_id))
            .order_by_asc(winners::Column::WinnerId)
            .all(&self.pool)
            .await?;
        let resolved = self.resolve_winner_details(winner_rows).await?;
        Ok(DrawResponse::from_parts(draw, resolved))
    }

    /// 某活动的开奖批次，新的在前，各批次带全部中奖记录
    pub async fn get_draws_by_contest(&self, contest_id: i64) -> AppResult<Vec<DrawResponse>> {
        let draw_rows = draws::Entity::find()
            .filter(draws::Column::ContestId.eq(contest_id))
            .order_by_desc(draws::Column::ExecutedAt)
            .all(&self.pool)
            .await?;
        if draw_rows.is_empty() {
            return Ok(Vec::new());
        }

        let draw_ids: Vec<i64> = draw_rows.iter().map(|d| d.draw_id).collect();
        let winner_rows = winners::Entity::find()
            .filter(winners::Column::DrawId.is_in(draw_ids))
            .order_by_asc(winners::Column::WinnerId)
            .all(&self.pool)
            .await?;
        let resolved = self.resolve_winner_details(winner_rows).await?;

        let mut by_draw: HashMap<i64, Vec<WinnerResponse>> = HashMap::new();
        for winner in resolved {
            by_draw.entry(winner.draw_id).or_default().push(winner);
        }
        Ok(draw_rows
            .into_iter()
            .map(|d| {
                let winners = by_draw.remove(&d.draw_id).unwrap_or_default();
                DrawResponse::from_parts(d, winners)
            })
            .collect())
    }

    /// 某活动的全部中奖记录，新批次在前
    pub async fn get_winners_by_contest(&self, contest_id: i64) -> AppResult<Vec<WinnerResponse>> {
        let draws = self.get_draws_by_contest(contest_id).await?;
        Ok(draws.into_iter().flat_map(|d| d.winners).collect())
    }

    /// 通知标记：置 true 时打点 notified_at，置 false 时清除
    pub async fn update_winner_notification(
        &self,
        winner_id: i64,
        notified: bool,
    ) -> AppResult<WinnerResponse> {
        let winner = self.find_winner(winner_id).await?;
        let mut model = winner.into_active_model();
        model.notified = Set(notified);
        model.notified_at = Set(notified.then(Utc::now));
        let updated = model.update(&self.pool).await?;
        self.resolve_single(updated).await
    }

    /// 发奖状态只能向前推进（允许跳级），进入 CLAIMED / DISPATCHED 时打点
    pub async fn update_winner_status(
        &self,
        winner_id: i64,
        status: PrizeStatus,
    ) -> AppResult<WinnerResponse> {
        let winner = self.find_winner(winner_id).await?;
        if status.rank() <= winner.prize_status.rank() {
            return Err(AppError::ValidationError(format!(
                "Prize status cannot move from {} to {}",
                winner.prize_status, status
            )));
        }

        let mut model = winner.into_active_model();
        if status == PrizeStatus::Claimed {
            model.claimed_at = Set(Some(Utc::now()));
        }
        if status == PrizeStatus::Dispatched {
            model.dispatched_at = Set(Some(Utc::now()));
        }
        model.prize_status = Set(status);
        let updated = model.update(&self.pool).await?;
        self.resolve_single(updated).await
    }

    async fn find_winner(&self, winner_id: i64) -> AppResult<winners::Model> {
        winners::Entity::find_by_id(winner_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Winner {winner_id} not found")))
    }

    async fn resolve_single(&self, winner: winners::Model) -> AppResult<WinnerResponse> {
        let participant = participants::Entity::find_by_id(winner.participant_id)
            .one(&self.pool)
            .await?;
        let prize = match winner.prize_id {
            Some(prize_id) => prizes::Entity::find_by_id(prize_id).one(&self.pool).await?,
            None => None,
        };
        Ok(WinnerResponse::from_parts(
            winner,
            participant.map(ParticipantResponse::from),
            prize.map(PrizeResponse::from),
        ))
    }

    async fn resolve_winner_details(
        &self,
        winner_rows: Vec<winners::Model>,
    ) -> AppResult<Vec<WinnerResponse>> {
        let participant_ids: Vec<i64> = winner_rows.iter().map(|w| w.participant_id).collect();
        let participant_by_id: HashMap<i64, participants::Model> = if participant_ids.is_empty() {
            HashMap::new()
        } else {
            participants::Entity::find()
                .filter(participants::Column::ParticipantId.is_in(participant_ids))
                .all(&self.pool)
                .await?
                .into_iter()
                .map(|p| (p.participant_id, p))
                .collect()
        };
        let prize_by_id = self
            .resolve_prizes(winner_rows.iter().filter_map(|w| w.prize_id).collect())
            .await?;

        Ok(winner_rows
            .into_iter()
            .map(|w| {
                let participant = participant_by_id
                    .get(&w.participant_id)
                    .cloned()
                    .map(ParticipantResponse::from);
                let prize = w
                    .prize_id
                    .and_then(|id| prize_by_id.get(&id).cloned())
                    .map(PrizeResponse::from);
                WinnerResponse::from_parts(w, participant, prize)
            })
            .collect())
    }

    async fn resolve_prizes(&self, prize_ids: Vec<i64>) -> AppResult<HashMap<i64, prizes::Model>> {
        if prize_ids.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(prizes::Entity::find()
            .filter(prizes::Column::PrizeId.is_in(prize_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|p| (p.prize_id, p))
            .collect())
    }

    async fn log_outcome(&self, executed_by: i64, action: &str, result: &AppResult<DrawResponse>) {
        match result {
            Ok(draw) => {
                self.activity_log
                    .log(
                        executed_by,
                        action,
                        "draws",
                        Some(draw.draw_id),
                        ActivityStatus::Success,
                    )
                    .await
            }
            Err(_) => {
                self.activity_log
                    .log(executed_by, action, "draws", None, ActivityStatus::Failure)
                    .await
            }
        }
    }
}

/// Fisher-Yates 无偏洗牌后取前 k 个
fn select_random(mut pool: Vec<participants::Model>, k: usize) -> Vec<participants::Model> {
    let mut rng = rand::thread_rng();
    pool.shuffle(&mut rng);
    pool.truncate(k);
    pool
}

/// 中奖顺序按请求中的 participant_ids 顺序排列
fn order_by_request(
    found: Vec<participants::Model>,
    requested_ids: &[i64],
) -> Vec<participants::Model> {
    let mut by_id: HashMap<i64, participants::Model> =
        found.into_iter().map(|p| (p.participant_id, p)).collect();
    requested_ids
        .iter()
        .filter_map(|id| by_id.remove(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::activity_log_entity as activity_log;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};

    fn service(db: DatabaseConnection) -> DrawService {
        DrawService::new(db.clone(), ActivityLogService::new(db))
    }

    fn participant(participant_id: i64) -> participants::Model {
        participants::Model {
            participant_id,
            contest_id: 1,
            name: format!("P{participant_id}"),
            contact: format!("p{participant_id}@example.com"),
            validated: true,
            is_duplicate: false,
            unique_token: format!("token-{participant_id}"),
            entry_timestamp: Some(Utc::now()),
        }
    }

    fn draw_row(draw_id: i64, draw_mode: DrawMode, total_winners: i32) -> draws::Model {
        draws::Model {
            draw_id,
            contest_id: 1,
            executed_by: 9,
            draw_mode,
            total_winners,
            executed_at: Some(Utc::now()),
        }
    }

    fn winner_row(winner_id: i64, draw_id: i64, participant_id: i64) -> winners::Model {
        winners::Model {
            winner_id,
            draw_id,
            participant_id,
            prize_id: None,
            notified: false,
            notified_at: None,
            prize_status: PrizeStatus::Pending,
            claimed_at: None,
            dispatched_at: None,
            created_at: Some(Utc::now()),
        }
    }

    fn activity_row(action: &str, status: ActivityStatus) -> activity_log::Model {
        activity_log::Model {
            log_id: 1,
            admin_id: 9,
            action: action.to_string(),
            target_table: "draws".to_string(),
            target_id: None,
            status,
            timestamp: Some(Utc::now()),
        }
    }

    fn random_request(number_of_winners: i32) -> RandomDrawRequest {
        RandomDrawRequest {
            contest_id: 1,
            executed_by: 9,
            number_of_winners,
            prize_ids: None,
        }
    }

    #[test]
    fn test_select_random_returns_exactly_k_distinct() {
        let pool: Vec<_> = (1..=5).map(participant).collect();
        let selected = select_random(pool.clone(), 3);
        assert_eq!(selected.len(), 3);

        let ids: HashSet<i64> = selected.iter().map(|p| p.participant_id).collect();
        assert_eq!(ids.len(), 3);
        for id in &ids {
            assert!((1..=5).contains(id));
        }
    }

    #[test]
    fn test_select_random_k_equal_to_pool_is_permutation() {
        let pool: Vec<_> = (1..=4).map(participant).collect();
        let selected = select_random(pool, 4);
        let ids: HashSet<i64> = selected.iter().map(|p| p.participant_id).collect();
        assert_eq!(ids, (1..=4).collect());
    }

    #[test]
    fn test_select_random_is_roughly_uniform() {
        let pool: Vec<_> = (1..=5).map(participant).collect();
        let mut hits: HashMap<i64, u32> = HashMap::new();
        for _ in 0..2000 {
            let selected = select_random(pool.clone(), 1);
            *hits.entry(selected[0].participant_id).or_insert(0) += 1;
        }
        // 期望 400 次，给出宽松区间避免偶发抖动
        for id in 1..=5 {
            let n = *hits.get(&id).unwrap_or(&0);
            assert!((300..=500).contains(&n), "participant {id} selected {n} times");
        }
    }

    #[test]
    fn test_order_by_request_preserves_request_order() {
        let found = vec![participant(10), participant(30), participant(20)];
        let ordered = order_by_request(found, &[30, 10, 20]);
        let ids: Vec<i64> = ordered.iter().map(|p| p.participant_id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
    }

    #[tokio::test]
    async fn test_random_draw_rejects_non_positive_count() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![activity_row(
                "EXECUTE_RANDOM_DRAW",
                ActivityStatus::Failure,
            )]])
            .into_connection();
        let result = service(db).execute_random_draw(random_request(0)).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_random_draw_empty_pool_creates_no_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<participants::Model>::new()])
            .append_query_results([vec![activity_row(
                "EXECUTE_RANDOM_DRAW",
                ActivityStatus::Failure,
            )]])
            .into_connection();
        let service = service(db.clone());

        let result = service.execute_random_draw(random_request(1)).await;
        assert!(matches!(result, Err(AppError::EmptyPool(_))));

        let log = format!("{:?}", db.into_transaction_log());
        assert!(!log.contains(r#"INSERT INTO \"draws\""#));
        assert!(!log.contains(r#"INSERT INTO \"winners\""#));
    }

    #[tokio::test]
    async fn test_random_draw_overselection_creates_no_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![participant(1), participant(2), participant(3)]])
            .append_query_results([vec![activity_row(
                "EXECUTE_RANDOM_DRAW",
                ActivityStatus::Failure,
            )]])
            .into_connection();
        let service = service(db.clone());

        let result = service.execute_random_draw(random_request(5)).await;
        assert!(matches!(result, Err(AppError::Overselection(_))));

        let log = format!("{:?}", db.into_transaction_log());
        assert!(!log.contains(r#"INSERT INTO \"draws\""#));
        assert!(!log.contains(r#"INSERT INTO \"winners\""#));
    }

    #[tokio::test]
    async fn test_random_draw_persists_batch_in_one_transaction() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![participant(1), participant(2), participant(3)]])
            .append_query_results([vec![draw_row(77, DrawMode::Random, 2)]])
            .append_query_results([
                vec![winner_row(501, 77, 1)],
                vec![winner_row(502, 77, 2)],
            ])
            .append_query_results([vec![activity_row(
                "EXECUTE_RANDOM_DRAW",
                ActivityStatus::Success,
            )]])
            .into_connection();
        let service = service(db.clone());

        let draw = service.execute_random_draw(random_request(2)).await.unwrap();
        assert_eq!(draw.draw_id, 77);
        assert_eq!(draw.draw_mode, DrawMode::Random);
        assert_eq!(draw.winners.len(), 2);

        let log = format!("{:?}", db.into_transaction_log());
        assert_eq!(log.matches(r#"INSERT INTO \"draws\""#).count(), 1);
        assert_eq!(log.matches(r#"INSERT INTO \"winners\""#).count(), 2);
    }

    #[tokio::test]
    async fn test_manual_draw_rejects_unknown_or_unvalidated_ids() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![participant(1)]])
            .append_query_results([vec![activity_row(
                "EXECUTE_MANUAL_DRAW",
                ActivityStatus::Failure,
            )]])
            .into_connection();
        let service = service(db.clone());

        let result = service
            .execute_manual_draw(ManualDrawRequest {
                contest_id: 1,
                executed_by: 9,
                participant_ids: vec![1, 99],
                prize_ids: None,
            })
            .await;
        assert!(matches!(result, Err(AppError::InvalidSelection(_))));

        let log = format!("{:?}", db.into_transaction_log());
        assert!(!log.contains(r#"INSERT INTO \"draws\""#));
    }

    #[tokio::test]
    async fn test_manual_draw_rejects_duplicate_ids() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![activity_row(
                "EXECUTE_MANUAL_DRAW",
                ActivityStatus::Failure,
            )]])
            .into_connection();

        let result = service(db)
            .execute_manual_draw(ManualDrawRequest {
                contest_id: 1,
                executed_by: 9,
                participant_ids: vec![1, 1],
                prize_ids: None,
            })
            .await;
        assert!(matches!(result, Err(AppError::InvalidSelection(_))));
    }

    #[tokio::test]
    async fn test_get_winners_by_contest_newest_draw_first() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                draw_row(2, DrawMode::Random, 1),
                draw_row(1, DrawMode::Manual, 1),
            ]])
            .append_query_results([vec![winner_row(11, 1, 1), winner_row(12, 2, 2)]])
            .append_query_results([vec![participant(1), participant(2)]])
            .into_connection();

        let winners = service(db).get_winners_by_contest(1).await.unwrap();
        assert_eq!(winners.len(), 2);
        // 批次2更新，排在前
        assert_eq!(winners[0].draw_id, 2);
        assert_eq!(winners[1].draw_id, 1);
        assert!(winners[0].participant.is_some());
    }

    #[tokio::test]
    async fn test_update_status_rejects_backward_transition() {
        let mut claimed = winner_row(11, 1, 1);
        claimed.prize_status = PrizeStatus::Claimed;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![claimed]])
            .into_connection();

        let result = service(db)
            .update_winner_status(11, PrizeStatus::Notified)
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_update_status_skip_ahead_stamps_dispatched_only() {
        let pending = winner_row(11, 1, 1);
        let mut updated = winner_row(11, 1, 1);
        updated.prize_status = PrizeStatus::Dispatched;
        updated.dispatched_at = Some(Utc::now());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![pending]])
            .append_query_results([vec![updated]])
            .append_query_results([vec![participant(1)]])
            .into_connection();
        let service = service(db.clone());

        let winner = service
            .update_winner_status(11, PrizeStatus::Dispatched)
            .await
            .unwrap();
        assert_eq!(winner.prize_status, PrizeStatus::Dispatched);

        // 跳过 CLAIMED 时不得补打 claimed_at
        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains(r#"\"dispatched_at\" = "#));
        assert!(!log.contains(r#"\"claimed_at\" = "#));
    }

    #[tokio::test]
    async fn test_update_notification_stamps_and_clears() {
        let unnotified = winner_row(11, 1, 1);
        let mut notified = winner_row(11, 1, 1);
        notified.notified = true;
        notified.notified_at = Some(Utc::now());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![unnotified]])
            .append_query_results([vec![notified]])
            .append_query_results([vec![participant(1)]])
            .into_connection();

        let winner = service(db)
            .update_winner_notification(11, true)
            .await
            .unwrap();
        assert!(winner.notified);
        assert!(winner.notified_at.is_some());
        // 发奖状态不受通知标记影响
        assert_eq!(winner.prize_status, PrizeStatus::Pending);
    }

    #[tokio::test]
    async fn test_get_draw_resolves_participant_and_prize() {
        let mut awarded = winner_row(11, 77, 1);
        awarded.prize_id = Some(5);
        let prize = prizes::Model {
            prize_id: 5,
            contest_id: 1,
            prize_name: "Gift card".to_string(),
            value_cents: 5000,
            quantity: 1,
            description: None,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![draw_row(77, DrawMode::Manual, 1)]])
            .append_query_results([vec![awarded]])
            .append_query_results([vec![participant(1)]])
            .append_query_results([vec![prize]])
            .into_connection();

        let draw = service(db).get_draw(77).await.unwrap();
        assert_eq!(draw.winners.len(), 1);
        let winner = &draw.winners[0];
        assert_eq!(winner.participant.as_ref().unwrap().name, "P1");
        assert_eq!(winner.prize.as_ref().unwrap().prize_name, "Gift card");
    }

    #[tokio::test]
    async fn test_get_draw_missing_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<draws::Model>::new()])
            .into_connection();

        let result = service(db).get_draw(404).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
