use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use crate::entities::{prize_entity as prizes, winner_entity as winners};
use crate::error::{AppError, AppResult};
use crate::models::{CreatePrizeRequest, PrizeResponse, PrizeStatsResponse, UpdatePrizeRequest};
use crate::storage::{NewPrize, PrizePatch, PrizeStore};

/// 奖品管理服务
/// 奖品读写走兜底集合，中奖件数统计只查远端（开奖数据不落本地）
#[derive(Clone)]
pub struct PrizeService {
    store: PrizeStore,
    pool: DatabaseConnection,
}

impl PrizeService {
    pub fn new(store: PrizeStore, pool: DatabaseConnection) -> Self {
        Self { store, pool }
    }

    pub async fn create_prize(&self, request: CreatePrizeRequest) -> AppResult<PrizeResponse> {
        if request.prize_name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Prize name must not be empty".to_string(),
            ));
        }
        let value_cents = request.value_cents.unwrap_or(0);
        if value_cents < 0 {
            return Err(AppError::ValidationError(
                "value_cents must not be negative".to_string(),
            ));
        }
        let quantity = request.quantity.unwrap_or(1);
        if quantity < 0 {
            return Err(AppError::ValidationError(
                "quantity must not be negative".to_string(),
            ));
        }

        let created = self
            .store
            .create(NewPrize {
                contest_id: request.contest_id,
                prize_name: request.prize_name.trim().to_string(),
                value_cents,
                quantity,
                description: request.description,
            })
            .await?;
        Ok(PrizeResponse::from(created))
    }

    pub async fn get_prizes(&self) -> AppResult<Vec<PrizeResponse>> {
        let records = self.store.fetch_all().await?;
        Ok(records.into_iter().map(PrizeResponse::from).collect())
    }

    pub async fn get_prizes_by_contest(&self, contest_id: i64) -> AppResult<Vec<PrizeResponse>> {
        let records = self.store.fetch_all().await?;
        Ok(records
            .into_iter()
            .filter(|p| p.contest_id == contest_id)
            .map(PrizeResponse::from)
            .collect())
    }

    pub async fn get_prize(&self, prize_id: i64) -> AppResult<PrizeResponse> {
        let record = self
            .store
            .fetch_by_id(prize_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Prize {prize_id} not found")))?;
        Ok(PrizeResponse::from(record))
    }

    pub async fn update_prize(
        &self,
        prize_id: i64,
        request: UpdatePrizeRequest,
    ) -> AppResult<PrizeResponse> {
        if let Some(prize_name) = &request.prize_name {
            if prize_name.trim().is_empty() {
                return Err(AppError::ValidationError(
                    "Prize name must not be empty".to_string(),
                ));
            }
        }
        if request.value_cents.is_some_and(|v| v < 0) {
            return Err(AppError::ValidationError(
                "value_cents must not be negative".to_string(),
            ));
        }
        if request.quantity.is_some_and(|q| q < 0) {
            return Err(AppError::ValidationError(
                "quantity must not be negative".to_string(),
            ));
        }

        let updated = self
            .store
            .update(
                prize_id,
                PrizePatch {
                    prize_name: request.prize_name.map(|n| n.trim().to_string()),
                    value_cents: request.value_cents,
                    quantity: request.quantity,
                    description: request.description,
                },
            )
            .await?;
        Ok(PrizeResponse::from(updated))
    }

    pub async fn delete_prize(&self, prize_id: i64) -> AppResult<()> {
        self.store.delete(prize_id).await
    }

    /// 还有剩余件数的奖品（中出件数 < quantity）
    pub async fn available_prizes(&self, contest_id: i64) -> AppResult<Vec<PrizeResponse>> {
        let contest_prizes = self.get_prizes_by_contest(contest_id).await?;
        let mut available = Vec::new();
        for prize in contest_prizes {
            let won = self.won_count(prize.prize_id).await?;
            if won < prize.quantity as u64 {
                available.push(prize);
            }
        }
        Ok(available)
    }

    /// 某活动的奖品发放统计
    pub async fn prize_stats(&self, contest_id: i64) -> AppResult<PrizeStatsResponse> {
        let contest_prizes = self.get_prizes_by_contest(contest_id).await?;

        let prize_ids: Vec<i64> = contest_prizes.iter().map(|p| p.prize_id).collect();
        let won_prizes = if prize_ids.is_empty() {
            0
        } else {
            winners::Entity::find()
                .filter(winners::Column::PrizeId.is_in(prize_ids))
                .count(&self.pool)
                .await? as i64
        };

        let total_prizes: i64 = contest_prizes.iter().map(|p| p.quantity as i64).sum();
        let total_value_cents: i64 = contest_prizes
            .iter()
            .map(|p| p.value_cents * p.quantity as i64)
            .sum();

        Ok(PrizeStatsResponse {
            total_prizes,
            won_prizes,
            available_prizes: total_prizes - won_prizes,
            total_value_cents,
            prize_count: contest_prizes.len() as i64,
        })
    }

    async fn won_count(&self, prize_id: i64) -> AppResult<u64> {
        Ok(winners::Entity::find()
            .filter(winners::Column::PrizeId.eq(prize_id))
            .count(&self.pool)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{LocalPrizes, RemotePrizes};
    use chrono::Utc;
    use maplit::btreemap;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("luckydraw-test-{}", uuid::Uuid::new_v4()))
    }

    fn service(db: sea_orm::DatabaseConnection, dir: &PathBuf) -> PrizeService {
        let store = PrizeStore::new(RemotePrizes::new(db.clone()), LocalPrizes::new(dir), "prize");
        PrizeService::new(store, db)
    }

    fn prize_row(prize_id: i64, quantity: i32, value_cents: i64) -> prizes::Model {
        let now = Utc::now();
        prizes::Model {
            prize_id,
            contest_id: 1,
            prize_name: format!("Prize {prize_id}"),
            value_cents,
            quantity,
            description: None,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    fn count_row(n: i64) -> std::collections::BTreeMap<&'static str, Value> {
        btreemap! { "num_items" => Value::BigInt(Some(n)) }
    }

    #[tokio::test]
    async fn test_create_rejects_negative_quantity() {
        let dir = temp_dir();
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service(db, &dir);

        let result = service
            .create_prize(CreatePrizeRequest {
                contest_id: 1,
                prize_name: "Speaker".to_string(),
                value_cents: None,
                quantity: Some(-1),
                description: None,
            })
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_available_excludes_fully_won() {
        let dir = temp_dir();
        // 奖品2已中满 (quantity 1, won 1)，奖品3还有剩余
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![prize_row(3, 2, 500), prize_row(2, 1, 1000)]])
            .append_query_results([vec![count_row(1)], vec![count_row(1)]])
            .into_connection();
        let service = service(db, &dir);

        let available = service.available_prizes(1).await.unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].prize_id, 3);
    }

    #[tokio::test]
    async fn test_prize_stats_totals() {
        let dir = temp_dir();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![prize_row(3, 2, 500), prize_row(2, 1, 1000)]])
            .append_query_results([vec![count_row(2)]])
            .into_connection();
        let service = service(db, &dir);

        let stats = service.prize_stats(1).await.unwrap();
        assert_eq!(stats.prize_count, 2);
        assert_eq!(stats.total_prizes, 3);
        assert_eq!(stats.won_prizes, 2);
        assert_eq!(stats.available_prizes, 1);
        assert_eq!(stats.total_value_cents, 2 * 500 + 1000);
    }

    #[tokio::test]
    async fn test_prize_stats_empty_contest() {
        let dir = temp_dir();
        // 远端空集回落本地（也为空），不应再发 count 查询
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<prizes::Model>::new()])
            .into_connection();
        let service = service(db, &dir);

        let stats = service.prize_stats(1).await.unwrap();
        assert_eq!(stats.prize_count, 0);
        assert_eq!(stats.won_prizes, 0);
        assert_eq!(stats.total_prizes, 0);
    }
}
