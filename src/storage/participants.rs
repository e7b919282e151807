use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryOrder, Set,
};

use crate::entities::participant_entity as participants;
use crate::error::AppResult;
use crate::storage::fallback::CollectionStore;
use crate::storage::local::{LocalCollection, synthesize_id};

/// 新报名记录，unique_token 由服务层生成
#[derive(Debug, Clone)]
pub struct NewParticipant {
    pub contest_id: i64,
    pub name: String,
    pub contact: String,
    pub validated: bool,
    pub is_duplicate: bool,
    pub unique_token: String,
}

/// 报名字段补丁，None 保持原值
#[derive(Debug, Clone, Default)]
pub struct ParticipantPatch {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub validated: Option<bool>,
    pub is_duplicate: Option<bool>,
}

#[derive(Clone)]
pub struct RemoteParticipants {
    pool: DatabaseConnection,
}

impl RemoteParticipants {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionStore for RemoteParticipants {
    type Record = participants::Model;
    type NewRecord = NewParticipant;
    type Patch = ParticipantPatch;

    async fn insert(&self, new: NewParticipant) -> AppResult<participants::Model> {
        let model = participants::ActiveModel {
            contest_id: Set(new.contest_id),
            name: Set(new.name),
            contact: Set(new.contact),
            validated: Set(new.validated),
            is_duplicate: Set(new.is_duplicate),
            unique_token: Set(new.unique_token),
            entry_timestamp: Set(Some(Utc::now())),
            ..Default::default()
        };
        Ok(model.insert(&self.pool).await?)
    }

    async fn fetch_all(&self) -> AppResult<Vec<participants::Model>> {
        Ok(participants::Entity::find()
            .order_by_desc(participants::Column::EntryTimestamp)
            .all(&self.pool)
            .await?)
    }

    async fn fetch_by_id(&self, id: i64) -> AppResult<Option<participants::Model>> {
        Ok(participants::Entity::find_by_id(id).one(&self.pool).await?)
    }

    async fn apply_patch(
        &self,
        id: i64,
        patch: ParticipantPatch,
    ) -> AppResult<Option<participants::Model>> {
        let Some(existing) = participants::Entity::find_by_id(id).one(&self.pool).await? else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(name) = patch.name {
            model.name = Set(name);
        }
        if let Some(contact) = patch.contact {
            model.contact = Set(contact);
        }
        if let Some(validated) = patch.validated {
            model.validated = Set(validated);
        }
        if let Some(is_duplicate) = patch.is_duplicate {
            model.is_duplicate = Set(is_duplicate);
        }

        Ok(Some(model.update(&self.pool).await?))
    }

    async fn remove(&self, id: i64) -> AppResult<bool> {
        let res = participants::Entity::delete_by_id(id)
            .exec(&self.pool)
            .await?;
        Ok(res.rows_affected > 0)
    }

    async fn len(&self) -> AppResult<u64> {
        Ok(participants::Entity::find().count(&self.pool).await?)
    }
}

#[derive(Clone)]
pub struct LocalParticipants {
    collection: LocalCollection<participants::Model>,
}

impl LocalParticipants {
    pub fn new(dir: &Path) -> Self {
        Self {
            collection: LocalCollection::new(dir, "lucky_draw_participants"),
        }
    }
}

#[async_trait]
impl CollectionStore for LocalParticipants {
    type Record = participants::Model;
    type NewRecord = NewParticipant;
    type Patch = ParticipantPatch;

    async fn insert(&self, new: NewParticipant) -> AppResult<participants::Model> {
        let now = Utc::now();
        self.collection
            .mutate(move |records| {
                let taken: Vec<i64> = records.iter().map(|r| r.participant_id).collect();
                let model = participants::Model {
                    participant_id: synthesize_id(&taken),
                    contest_id: new.contest_id,
                    name: new.name,
                    contact: new.contact,
                    validated: new.validated,
                    is_duplicate: new.is_duplicate,
                    unique_token: new.unique_token,
                    entry_timestamp: Some(now),
                };
                records.push(model.clone());
                Ok(model)
            })
            .await
    }

    async fn fetch_all(&self) -> AppResult<Vec<participants::Model>> {
        let mut records = self.collection.read_all().await;
        records.sort_by(|a, b| b.entry_timestamp.cmp(&a.entry_timestamp));
        Ok(records)
    }

    async fn fetch_by_id(&self, id: i64) -> AppResult<Option<participants::Model>> {
        Ok(self
            .collection
            .read_all()
            .await
            .into_iter()
            .find(|r| r.participant_id == id))
    }

    async fn apply_patch(
        &self,
        id: i64,
        patch: ParticipantPatch,
    ) -> AppResult<Option<participants::Model>> {
        self.collection
            .mutate(move |records| {
                let Some(record) = records.iter_mut().find(|r| r.participant_id == id) else {
                    return Ok(None);
                };
                if let Some(name) = patch.name {
                    record.name = name;
                }
                if let Some(contact) = patch.contact {
                    record.contact = contact;
                }
                if let Some(validated) = patch.validated {
                    record.validated = validated;
                }
                if let Some(is_duplicate) = patch.is_duplicate {
                    record.is_duplicate = is_duplicate;
                }
                Ok(Some(record.clone()))
            })
            .await
    }

    async fn remove(&self, id: i64) -> AppResult<bool> {
        self.collection
            .mutate(move |records| {
                let before = records.len();
                records.retain(|r| r.participant_id != id);
                Ok(records.len() < before)
            })
            .await
    }

    async fn len(&self) -> AppResult<u64> {
        Ok(self.collection.count().await)
    }
}
