use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::models::EntityStorageStatus;

/// 单个集合的异步存取抽象，远端 (sea-orm) 与本地 (JSON 文件) 各有实现
#[async_trait]
pub trait CollectionStore: Send + Sync {
    type Record: Send + Sync;
    type NewRecord: Send + Sync;
    type Patch: Send + Sync;

    async fn insert(&self, new: Self::NewRecord) -> AppResult<Self::Record>;
    async fn fetch_all(&self) -> AppResult<Vec<Self::Record>>;
    async fn fetch_by_id(&self, id: i64) -> AppResult<Option<Self::Record>>;
    /// 不存在时返回 Ok(None)
    async fn apply_patch(&self, id: i64, patch: Self::Patch) -> AppResult<Option<Self::Record>>;
    /// 返回是否真的删除了一行
    async fn remove(&self, id: i64) -> AppResult<bool>;
    async fn len(&self) -> AppResult<u64>;
}

/// fetch_all 实际命中的数据源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreSource {
    Remote,
    /// 远端可达但空集，回落本地
    LocalAfterEmpty,
    /// 远端出错，回落本地
    LocalAfterError,
}

/// 远端优先、本地兜底的集合装饰器
/// 远端失败只记日志不冒泡，仅本地写失败向上抛 PersistenceError
#[derive(Clone)]
pub struct FallbackStore<R, L> {
    remote: R,
    local: L,
    name: &'static str,
}

impl<R, L> FallbackStore<R, L>
where
    R: CollectionStore,
    L: CollectionStore<Record = R::Record, NewRecord = R::NewRecord, Patch = R::Patch>,
    R::NewRecord: Clone,
    R::Patch: Clone,
{
    pub fn new(remote: R, local: L, name: &'static str) -> Self {
        FallbackStore {
            remote,
            local,
            name,
        }
    }

    pub async fn create(&self, new: R::NewRecord) -> AppResult<R::Record> {
        match self.remote.insert(new.clone()).await {
            Ok(record) => Ok(record),
            Err(e) => {
                log::warn!(
                    "Remote insert failed for {}, falling back to local storage: {e}",
                    self.name
                );
                self.local.insert(new).await
            }
        }
    }

    pub async fn fetch_all(&self) -> AppResult<Vec<R::Record>> {
        let (records, _) = self.fetch_all_with_source().await?;
        Ok(records)
    }

    /// 远端非空集胜出，远端空集或出错时回落本地并带回实际来源
    pub async fn fetch_all_with_source(&self) -> AppResult<(Vec<R::Record>, StoreSource)> {
        match self.remote.fetch_all().await {
            Ok(records) if !records.is_empty() => Ok((records, StoreSource::Remote)),
            Ok(_) => {
                let records = self.local.fetch_all().await?;
                Ok((records, StoreSource::LocalAfterEmpty))
            }
            Err(e) => {
                log::warn!(
                    "Remote fetch failed for {}, falling back to local storage: {e}",
                    self.name
                );
                let records = self.local.fetch_all().await?;
                Ok((records, StoreSource::LocalAfterError))
            }
        }
    }

    pub async fn fetch_by_id(&self, id: i64) -> AppResult<Option<R::Record>> {
        match self.remote.fetch_by_id(id).await {
            Ok(Some(record)) => Ok(Some(record)),
            Ok(None) => self.local.fetch_by_id(id).await,
            Err(e) => {
                log::warn!(
                    "Remote lookup failed for {} {id}, falling back to local storage: {e}",
                    self.name
                );
                self.local.fetch_by_id(id).await
            }
        }
    }

    /// 远端无此记录时也尝试本地，两边都没有才算 NotFound
    pub async fn update(&self, id: i64, patch: R::Patch) -> AppResult<R::Record> {
        match self.remote.apply_patch(id, patch.clone()).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => self.update_local(id, patch).await,
            Err(e) => {
                log::warn!(
                    "Remote update failed for {} {id}, falling back to local storage: {e}",
                    self.name
                );
                self.update_local(id, patch).await
            }
        }
    }

    async fn update_local(&self, id: i64, patch: R::Patch) -> AppResult<R::Record> {
        match self.local.apply_patch(id, patch).await? {
            Some(record) => Ok(record),
            None => Err(AppError::NotFound(format!("{} {id} not found", self.name))),
        }
    }

    /// 远端删除缺失行视为成功；仅远端出错时回落本地
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        match self.remote.remove(id).await {
            Ok(_) => Ok(()),
            Err(e) => {
                log::warn!(
                    "Remote delete failed for {} {id}, falling back to local storage: {e}",
                    self.name
                );
                if self.local.remove(id).await? {
                    Ok(())
                } else {
                    Err(AppError::NotFound(format!("{} {id} not found", self.name)))
                }
            }
        }
    }

    /// remote 要求远端可达且非空，local_records 为兜底文件中的记录数
    pub async fn status(&self) -> EntityStorageStatus {
        let remote = match self.remote.len().await {
            Ok(n) => n > 0,
            Err(e) => {
                log::warn!("Remote status probe failed for {}: {e}", self.name);
                false
            }
        };
        let local_records = self.local.len().await.unwrap_or(0);
        EntityStorageStatus {
            remote,
            local_records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: i64,
        name: String,
    }

    #[derive(Debug, Clone)]
    struct NewItem {
        name: String,
    }

    #[derive(Debug, Clone)]
    struct ItemPatch {
        name: Option<String>,
    }

    #[derive(Clone, Copy)]
    enum RemoteMode {
        Healthy,
        Empty,
        Broken,
    }

    struct StubRemote {
        mode: RemoteMode,
        rows: Vec<Item>,
    }

    fn remote_err() -> AppError {
        AppError::DatabaseError(sea_orm::DbErr::Custom("connection refused".to_string()))
    }

    #[async_trait]
    impl CollectionStore for StubRemote {
        type Record = Item;
        type NewRecord = NewItem;
        type Patch = ItemPatch;

        async fn insert(&self, new: NewItem) -> AppResult<Item> {
            match self.mode {
                RemoteMode::Broken => Err(remote_err()),
                _ => Ok(Item {
                    id: 1,
                    name: new.name,
                }),
            }
        }

        async fn fetch_all(&self) -> AppResult<Vec<Item>> {
            match self.mode {
                RemoteMode::Broken => Err(remote_err()),
                RemoteMode::Empty => Ok(Vec::new()),
                RemoteMode::Healthy => Ok(self.rows.clone()),
            }
        }

        async fn fetch_by_id(&self, id: i64) -> AppResult<Option<Item>> {
            match self.mode {
                RemoteMode::Broken => Err(remote_err()),
                _ => Ok(self.rows.iter().find(|r| r.id == id).cloned()),
            }
        }

        async fn apply_patch(&self, id: i64, patch: ItemPatch) -> AppResult<Option<Item>> {
            match self.mode {
                RemoteMode::Broken => Err(remote_err()),
                _ => Ok(self.rows.iter().find(|r| r.id == id).map(|r| Item {
                    id: r.id,
                    name: patch.name.clone().unwrap_or_else(|| r.name.clone()),
                })),
            }
        }

        async fn remove(&self, id: i64) -> AppResult<bool> {
            match self.mode {
                RemoteMode::Broken => Err(remote_err()),
                _ => Ok(self.rows.iter().any(|r| r.id == id)),
            }
        }

        async fn len(&self) -> AppResult<u64> {
            match self.mode {
                RemoteMode::Broken => Err(remote_err()),
                _ => Ok(self.rows.len() as u64),
            }
        }
    }

    #[derive(Clone, Default)]
    struct StubLocal {
        rows: Arc<Mutex<Vec<Item>>>,
    }

    #[async_trait]
    impl CollectionStore for StubLocal {
        type Record = Item;
        type NewRecord = NewItem;
        type Patch = ItemPatch;

        async fn insert(&self, new: NewItem) -> AppResult<Item> {
            let mut rows = self.rows.lock().unwrap();
            let item = Item {
                id: 1000 + rows.len() as i64,
                name: new.name,
            };
            rows.push(item.clone());
            Ok(item)
        }

        async fn fetch_all(&self) -> AppResult<Vec<Item>> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn fetch_by_id(&self, id: i64) -> AppResult<Option<Item>> {
            Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
        }

        async fn apply_patch(&self, id: i64, patch: ItemPatch) -> AppResult<Option<Item>> {
            let mut rows = self.rows.lock().unwrap();
            match rows.iter_mut().find(|r| r.id == id) {
                Some(row) => {
                    if let Some(name) = patch.name {
                        row.name = name;
                    }
                    Ok(Some(row.clone()))
                }
                None => Ok(None),
            }
        }

        async fn remove(&self, id: i64) -> AppResult<bool> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| r.id != id);
            Ok(rows.len() < before)
        }

        async fn len(&self) -> AppResult<u64> {
            Ok(self.rows.lock().unwrap().len() as u64)
        }
    }

    fn store(mode: RemoteMode, remote_rows: Vec<Item>) -> FallbackStore<StubRemote, StubLocal> {
        FallbackStore::new(
            StubRemote {
                mode,
                rows: remote_rows,
            },
            StubLocal::default(),
            "item",
        )
    }

    fn seeded_local(store: &FallbackStore<StubRemote, StubLocal>, items: Vec<Item>) {
        *store.local.rows.lock().unwrap() = items;
    }

    #[tokio::test]
    async fn test_create_remote_success_skips_local() {
        let store = store(RemoteMode::Healthy, Vec::new());
        let created = store
            .create(NewItem {
                name: "a".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(store.local.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_falls_back_on_remote_error() {
        let store = store(RemoteMode::Broken, Vec::new());
        let created = store
            .create(NewItem {
                name: "a".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, 1000);
        assert_eq!(store.local.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_fallback_create_visible_while_remote_stays_down() {
        let store = store(RemoteMode::Broken, Vec::new());

        let created = store
            .create(NewItem {
                name: "offline".to_string(),
            })
            .await
            .unwrap();

        let (rows, source) = store.fetch_all_with_source().await.unwrap();
        assert_eq!(source, StoreSource::LocalAfterError);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, created.id);
        assert_eq!(rows[0].name, "offline");
    }

    #[tokio::test]
    async fn test_fetch_all_prefers_remote_rows() {
        let store = store(
            RemoteMode::Healthy,
            vec![Item {
                id: 7,
                name: "remote".to_string(),
            }],
        );
        seeded_local(
            &store,
            vec![Item {
                id: 1000,
                name: "local".to_string(),
            }],
        );

        let (rows, source) = store.fetch_all_with_source().await.unwrap();
        assert_eq!(source, StoreSource::Remote);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 7);
    }

    #[tokio::test]
    async fn test_fetch_all_falls_back_when_remote_empty() {
        let store = store(RemoteMode::Empty, Vec::new());
        seeded_local(
            &store,
            vec![Item {
                id: 1000,
                name: "local".to_string(),
            }],
        );

        let (rows, source) = store.fetch_all_with_source().await.unwrap();
        assert_eq!(source, StoreSource::LocalAfterEmpty);
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_all_falls_back_on_remote_error() {
        let store = store(RemoteMode::Broken, Vec::new());
        seeded_local(
            &store,
            vec![Item {
                id: 1000,
                name: "local".to_string(),
            }],
        );

        let (rows, source) = store.fetch_all_with_source().await.unwrap();
        assert_eq!(source, StoreSource::LocalAfterError);
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_by_id_consults_local_on_remote_miss() {
        let store = store(RemoteMode::Healthy, Vec::new());
        seeded_local(
            &store,
            vec![Item {
                id: 1000,
                name: "local".to_string(),
            }],
        );

        let found = store.fetch_by_id(1000).await.unwrap();
        assert_eq!(found.map(|r| r.name), Some("local".to_string()));
    }

    #[tokio::test]
    async fn test_update_falls_back_to_local() {
        let store = store(RemoteMode::Broken, Vec::new());
        seeded_local(
            &store,
            vec![Item {
                id: 1000,
                name: "old".to_string(),
            }],
        );

        let updated = store
            .update(
                1000,
                ItemPatch {
                    name: Some("new".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "new");
    }

    #[tokio::test]
    async fn test_update_missing_everywhere_is_not_found() {
        let store = store(RemoteMode::Healthy, Vec::new());
        let result = store.update(42, ItemPatch { name: None }).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_remote_row_is_trivial_success() {
        let store = store(RemoteMode::Healthy, Vec::new());
        assert!(store.delete(42).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_falls_back_on_remote_error() {
        let store = store(RemoteMode::Broken, Vec::new());
        seeded_local(
            &store,
            vec![Item {
                id: 1000,
                name: "local".to_string(),
            }],
        );

        assert!(store.delete(1000).await.is_ok());
        assert_eq!(store.local.len().await.unwrap(), 0);

        let missing = store.delete(555).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_status_requires_remote_rows() {
        let healthy = store(
            RemoteMode::Healthy,
            vec![Item {
                id: 1,
                name: "r".to_string(),
            }],
        );
        assert!(healthy.status().await.remote);

        let empty = store(RemoteMode::Empty, Vec::new());
        assert!(!empty.status().await.remote);

        let broken = store(RemoteMode::Broken, Vec::new());
        seeded_local(
            &broken,
            vec![Item {
                id: 1000,
                name: "l".to_string(),
            }],
        );
        let status = broken.status().await;
        assert!(!status.remote);
        assert_eq!(status.local_records, 1);
    }
}
