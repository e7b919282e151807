use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryOrder, Set,
};

use crate::entities::contest_entity as contests;
use crate::error::AppResult;
use crate::models::{ContestStatus, EntryRules};
use crate::storage::fallback::CollectionStore;
use crate::storage::local::{LocalCollection, synthesize_id};

/// 新建活动记录，字段已通过服务层校验
#[derive(Debug, Clone)]
pub struct NewContest {
    pub name: String,
    pub theme: Option<String>,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: ContestStatus,
    pub entry_rules: Option<EntryRules>,
    pub created_by: Option<i64>,
    pub qr_code_url: Option<String>,
}

/// 活动字段补丁，None 保持原值
#[derive(Debug, Clone, Default)]
pub struct ContestPatch {
    pub name: Option<String>,
    pub theme: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<ContestStatus>,
    pub entry_rules: Option<EntryRules>,
    pub qr_code_url: Option<String>,
}

#[derive(Clone)]
pub struct RemoteContests {
    pool: DatabaseConnection,
}

impl RemoteContests {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionStore for RemoteContests {
    type Record = contests::Model;
    type NewRecord = NewContest;
    type Patch = ContestPatch;

    async fn insert(&self, new: NewContest) -> AppResult<contests::Model> {
        let now = Utc::now();
        let model = contests::ActiveModel {
            name: Set(new.name),
            theme: Set(new.theme),
            description: Set(new.description),
            start_date: Set(new.start_date),
            end_date: Set(new.end_date),
            status: Set(new.status),
            entry_rules: Set(new.entry_rules),
            created_by: Set(new.created_by),
            qr_code_url: Set(new.qr_code_url),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        };
        Ok(model.insert(&self.pool).await?)
    }

    async fn fetch_all(&self) -> AppResult<Vec<contests::Model>> {
        Ok(contests::Entity::find()
            .order_by_desc(contests::Column::CreatedAt)
            .all(&self.pool)
            .await?)
    }

    async fn fetch_by_id(&self, id: i64) -> AppResult<Option<contests::Model>> {
        Ok(contests::Entity::find_by_id(id).one(&self.pool).await?)
    }

    async fn apply_patch(
        &self,
        id: i64,
        patch: ContestPatch,
    ) -> AppResult<Option<contests::Model>> {
        let Some(existing) = contests::Entity::find_by_id(id).one(&self.pool).await? else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(name) = patch.name {
            model.name = Set(name);
        }
        if let Some(theme) = patch.theme {
            model.theme = Set(Some(theme));
        }
        if let Some(description) = patch.description {
            model.description = Set(Some(description));
        }
        if let Some(start_date) = patch.start_date {
            model.start_date = Set(start_date);
        }
        if let Some(end_date) = patch.end_date {
            model.end_date = Set(end_date);
        }
        if let Some(status) = patch.status {
            model.status = Set(status);
        }
        if let Some(entry_rules) = patch.entry_rules {
            model.entry_rules = Set(Some(entry_rules));
        }
        if let Some(qr_code_url) = patch.qr_code_url {
            model.qr_code_url = Set(Some(qr_code_url));
        }
        model.updated_at = Set(Some(Utc::now()));

        Ok(Some(model.update(&self.pool).await?))
    }

    async fn remove(&self, id: i64) -> AppResult<bool> {
        let res = contests::Entity::delete_by_id(id).exec(&self.pool).await?;
        Ok(res.rows_affected > 0)
    }

    async fn len(&self) -> AppResult<u64> {
        Ok(contests::Entity::find().count(&self.pool).await?)
    }
}

#[derive(Clone)]
pub struct LocalContests {
    collection: LocalCollection<contests::Model>,
}

impl LocalContests {
    pub fn new(dir: &Path) -> Self {
        Self {
            collection: LocalCollection::new(dir, "lucky_draw_contests"),
        }
    }
}

#[async_trait]
impl CollectionStore for LocalContests {
    type Record = contests::Model;
    type NewRecord = NewContest;
    type Patch = ContestPatch;

    async fn insert(&self, new: NewContest) -> AppResult<contests::Model> {
        let now = Utc::now();
        self.collection
            .mutate(move |records| {
                let taken: Vec<i64> = records.iter().map(|r| r.contest_id).collect();
                let model = contests::Model {
                    contest_id: synthesize_id(&taken),
                    name: new.name,
                    theme: new.theme,
                    description: new.description,
                    start_date: new.start_date,
                    end_date: new.end_date,
                    status: new.status,
                    entry_rules: new.entry_rules,
                    created_by: new.created_by,
                    qr_code_url: new.qr_code_url,
                    created_at: Some(now),
                    updated_at: Some(now),
                };
                records.push(model.clone());
                Ok(model)
            })
            .await
    }

    async fn fetch_all(&self) -> AppResult<Vec<contests::Model>> {
        let mut records = self.collection.read_all().await;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn fetch_by_id(&self, id: i64) -> AppResult<Option<contests::Model>> {
        Ok(self
            .collection
            .read_all()
            .await
            .into_iter()
            .find(|r| r.contest_id == id))
    }

    async fn apply_patch(
        &self,
        id: i64,
        patch: ContestPatch,
    ) -> AppResult<Option<contests::Model>> {
        self.collection
            .mutate(move |records| {
                let Some(record) = records.iter_mut().find(|r| r.contest_id == id) else {
                    return Ok(None);
                };
                if let Some(name) = patch.name {
                    record.name = name;
                }
                if let Some(theme) = patch.theme {
                    record.theme = Some(theme);
                }
                if let Some(description) = patch.description {
                    record.description = Some(description);
                }
                if let Some(start_date) = patch.start_date {
                    record.start_date = start_date;
                }
                if let Some(end_date) = patch.end_date {
                    record.end_date = end_date;
                }
                if let Some(status) = patch.status {
                    record.status = status;
                }
                if let Some(entry_rules) = patch.entry_rules {
                    record.entry_rules = Some(entry_rules);
                }
                if let Some(qr_code_url) = patch.qr_code_url {
                    record.qr_code_url = Some(qr_code_url);
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
                records.retain(|r| r.contest_id != id);
                Ok(records.len() < before)
            })
            .await
    }

    async fn len(&self) -> AppResult<u64> {
        Ok(self.collection.count().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("luckydraw-test-{}", uuid::Uuid::new_v4()))
    }

    fn new_contest(name: &str) -> NewContest {
        NewContest {
            name: name.to_string(),
            theme: None,
            description: None,
            start_date: Utc::now(),
            end_date: Utc::now() + chrono::Duration::days(7),
            status: ContestStatus::Draft,
            entry_rules: Some(EntryRules::OneEntry),
            created_by: None,
            qr_code_url: None,
        }
    }

    #[tokio::test]
    async fn test_local_insert_assigns_unique_ids() {
        let dir = temp_dir();
        let store = LocalContests::new(&dir);

        let a = store.insert(new_contest("a")).await.unwrap();
        let b = store.insert(new_contest("b")).await.unwrap();
        assert_ne!(a.contest_id, b.contest_id);
        assert_eq!(store.len().await.unwrap(), 2);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_local_roundtrip_create_update_fetch_delete() {
        let dir = temp_dir();
        let store = LocalContests::new(&dir);

        let created = store.insert(new_contest("before")).await.unwrap();
        let patched = store
            .apply_patch(
                created.contest_id,
                ContestPatch {
                    name: Some("after".to_string()),
                    status: Some(ContestStatus::Ongoing),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(patched.name, "after");
        assert_eq!(patched.status, ContestStatus::Ongoing);

        let all = store.fetch_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "after");

        assert!(store.remove(created.contest_id).await.unwrap());
        assert!(!store.remove(created.contest_id).await.unwrap());
        assert!(store.fetch_all().await.unwrap().is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
