use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryOrder, Set,
};

use crate::entities::prize_entity as prizes;
use crate::error::AppResult;
use crate::storage::fallback::CollectionStore;
use crate::storage::local::{LocalCollection, synthesize_id};

/// 新建奖品记录
#[derive(Debug, Clone)]
pub struct NewPrize {
    pub contest_id: i64,
    pub prize_name: String,
    pub value_cents: i64,
    pub quantity: i32,
    pub description: Option<String>,
}

/// 奖品字段补丁，None 保持原值
#[derive(Debug, Clone, Default)]
pub struct PrizePatch {
    pub prize_name: Option<String>,
    pub value_cents: Option<i64>,
    pub quantity: Option<i32>,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct RemotePrizes {
    pool: DatabaseConnection,
}

impl RemotePrizes {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionStore for RemotePrizes {
    type Record = prizes::Model;
    type NewRecord = NewPrize;
    type Patch = PrizePatch;

    async fn insert(&self, new: NewPrize) -> AppResult<prizes::Model> {
        let now = Utc::now();
        let model = prizes::ActiveModel {
            contest_id: Set(new.contest_id),
            prize_name: Set(new.prize_name),
            value_cents: Set(new.value_cents),
            quantity: Set(new.quantity),
            description: Set(new.description),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        };
        Ok(model.insert(&self.pool).await?)
    }

    async fn fetch_all(&self) -> AppResult<Vec<prizes::Model>> {
        Ok(prizes::Entity::find()
            .order_by_desc(prizes::Column::PrizeId)
            .all(&self.pool)
            .await?)
    }

    async fn fetch_by_id(&self, id: i64) -> AppResult<Option<prizes::Model>> {
        Ok(prizes::Entity::find_by_id(id).one(&self.pool).await?)
    }

    async fn apply_patch(&self, id: i64, patch: PrizePatch) -> AppResult<Option<prizes::Model>> {
        let Some(existing) = prizes::Entity::find_by_id(id).one(&self.pool).await? else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(prize_name) = patch.prize_name {
            model.prize_name = Set(prize_name);
        }
        if let Some(value_cents) = patch.value_cents {
            model.value_cents = Set(value_cents);
        }
        if let Some(quantity) = patch.quantity {
            model.quantity = Set(quantity);
        }
        if let Some(description) = patch.description {
            model.description = Set(Some(description));
        }
        model.updated_at = Set(Some(Utc::now()));

        Ok(Some(model.update(&self.pool).await?))
    }

    async fn remove(&self, id: i64) -> AppResult<bool> {
        let res = prizes::Entity::delete_by_id(id).exec(&self.pool).await?;
        Ok(res.rows_affected > 0)
    }

    async fn len(&self) -> AppResult<u64> {
        Ok(prizes::Entity::find().count(&self.pool).await?)
    }
}

#[derive(Clone)]
pub struct LocalPrizes {
    collection: LocalCollection<prizes::Model>,
}

impl LocalPrizes {
    pub fn new(dir: &Path) -> Self {
        Self {
            collection: LocalCollection::new(dir, "lucky_draw_prizes"),
        }
    }
}

#[async_trait]
impl CollectionStore for LocalPrizes {
    type Record = prizes::Model;
    type NewRecord = NewPrize;
    type Patch = PrizePatch;

    async fn insert(&self, new: NewPrize) -> AppResult<prizes::Model> {
        let now = Utc::now();
        self.collection
            .mutate(move |records| {
                let taken: Vec<i64> = records.iter().map(|r| r.prize_id).collect();
                let model = prizes::Model {
                    prize_id: synthesize_id(&taken),
                    contest_id: new.contest_id,
                    prize_name: new.prize_name,
                    value_cents: new.value_cents,
                    quantity: new.quantity,
                    description: new.description,
                    created_at: Some(now),
                    updated_at: Some(now),
                };
                records.push(model.clone());
                Ok(model)
            })
            .await
    }

    async fn fetch_all(&self) -> AppResult<Vec<prizes::Model>> {
        let mut records = self.collection.read_all().await;
        records.sort_by(|a, b| b.prize_id.cmp(&a.prize_id));
        Ok(records)
    }

    async fn fetch_by_id(&self, id: i64) -> AppResult<Option<prizes::Model>> {
        Ok(self
            .collection
            .read_all()
            .await
            .into_iter()
            .find(|r| r.prize_id == id))
    }

    async fn apply_patch(&self, id: i64, patch: PrizePatch) -> AppResult<Option<prizes::Model>> {
        self.collection
            .mutate(move |records| {
                let Some(record) = records.iter_mut().find(|r| r.prize_id == id) else {
                    return Ok(None);
                };
                if let Some(prize_name) = patch.prize_name {
                    record.prize_name = prize_name;
                }
                if let Some(value_cents) = patch.value_cents {
                    record.value_cents = value_cents;
                }
                if let Some(quantity) = patch.quantity {
                    record.quantity = quantity;
                }
                if let Some(description) = patch.description {
                    record.description = Some(description);
                }
                record.updated_at = Some(Utc::now());
                Ok(Some(record.clone()))
            })
            .await
    }

    async fn remove(&self, id: i64) -> AppResult<bool> {
        self.collection
            .mutate(move |records| {
                let before = records.len();
                records.retain(|r| r.prize_id != id);
                Ok(records.len() < before)
            })
            .await
    }

    async fn len(&self) -> AppResult<u64> {
        Ok(self.collection.count().await)
    }
}
